//! Get command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::Path;

use super::utils::load_manager;
use crate::domain::ConfigValue;

#[derive(Args)]
pub struct GetArgs {
    /// Full option name, e.g. general:grace
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Print integers as 0x-prefixed hex (useful for colors)
    #[arg(long)]
    pub hex: bool,
}

pub fn run(config_path: &Path, args: GetArgs) -> Result<()> {
    let manager = load_manager(config_path);
    let value = manager
        .get_value(&args.name)
        .with_context(|| format!("Cannot read {}", args.name))?;

    match value {
        ConfigValue::Int(v) if args.hex => println!("{}", hex_int(v)?),
        other => println!("{}", other),
    }
    Ok(())
}

/// `--hex` covers the colour range only.
fn hex_int(value: i64) -> Result<String> {
    match u32::try_from(value) {
        Ok(v) => Ok(format!("0x{:08X}", v)),
        Err(_) => bail!("{} is outside the 32-bit colour range, cannot print as hex", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_int_colour_range() {
        assert_eq!(hex_int(0xFF33_CCFF).unwrap(), "0xFF33CCFF");
        assert_eq!(hex_int(0).unwrap(), "0x00000000");
        assert!(hex_int(-1).is_err());
        assert!(hex_int(0x1_0000_0000).is_err());
    }
}
