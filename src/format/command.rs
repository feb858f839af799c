//! Shell command execution for `cmd[...]` labels

use anyhow::{Context, Result};
use std::process::Command;

/// Run `cmd` through `sh -c` and return its stdout with the trailing newline
/// removed. A non-zero exit status is logged; the output is still returned.
pub fn run_command(cmd: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .output()
        .with_context(|| format!("Failed to spawn command: {}", cmd))?;

    if !output.status.success() {
        tracing::warn!(
            "label command '{}' exited with {}: {}",
            cmd,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_strips_trailing_newline() {
        let out = run_command("printf 'one\\ntwo\\n'").expect("run");
        assert_eq!(out, "one\ntwo");
    }

    #[test]
    fn test_run_command_failure_still_returns_output() {
        let out = run_command("echo partial; exit 3").expect("run");
        assert_eq!(out, "partial");
    }
}
