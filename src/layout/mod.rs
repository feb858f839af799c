//! Widget placement from alignment strings

use crate::domain::Vec2;

/// Position a widget of `size` inside `viewport`.
///
/// `offset` is added to the aligned position. Valid `halign` values are
/// `center`, `left`, `right` and `none`; valid `valign` values are
/// `center`, `top`, `bottom` and `none`. Anything else is logged and
/// treated as `none`. Coordinates grow upwards from the bottom edge.
pub fn pos_from_hv_align(
    viewport: Vec2,
    size: Vec2,
    offset: Vec2,
    halign: &str,
    valign: &str,
) -> Vec2 {
    let mut pos = offset;

    match halign {
        "center" => pos.x += viewport.x / 2.0 - size.x / 2.0,
        "left" | "none" => {}
        "right" => pos.x += viewport.x - size.x,
        other => tracing::error!("invalid halign {}", other),
    }

    match valign {
        "center" => pos.y += viewport.y / 2.0 - size.y / 2.0,
        "top" => pos.y += viewport.y - size.y,
        "bottom" => pos.y += size.y,
        "none" => {}
        other => tracing::error!("invalid valign {}", other),
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2 { x: 1920.0, y: 1080.0 };
    const SIZE: Vec2 = Vec2 { x: 400.0, y: 90.0 };

    #[test]
    fn test_center_center_with_offset() {
        let pos = pos_from_hv_align(VIEWPORT, SIZE, Vec2::new(0.0, -20.0), "center", "center");
        assert_eq!(pos, Vec2::new(760.0, 475.0));
    }

    #[test]
    fn test_edges() {
        let zero = Vec2::default();
        assert_eq!(pos_from_hv_align(VIEWPORT, SIZE, zero, "right", "top"), Vec2::new(1520.0, 990.0));
        assert_eq!(pos_from_hv_align(VIEWPORT, SIZE, zero, "left", "bottom"), Vec2::new(0.0, 90.0));
    }

    #[test]
    fn test_none_and_invalid_keep_offset() {
        let offset = Vec2::new(12.0, 34.0);
        assert_eq!(pos_from_hv_align(VIEWPORT, SIZE, offset, "none", "none"), offset);
        assert_eq!(pos_from_hv_align(VIEWPORT, SIZE, offset, "middle", "up"), offset);
    }
}
