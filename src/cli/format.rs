//! Format command implementation

use anyhow::Result;
use clap::Args;

use crate::format::{format_string, run_command};

#[derive(Args)]
pub struct FormatArgs {
    /// Label text, e.g. 'Hi $USER, it is $TIME'
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Print the text a label would show, running cmd[...] commands
    #[arg(long)]
    pub run: bool,
}

pub fn run(args: FormatArgs) -> Result<()> {
    let result = format_string(&args.text);

    if !args.run {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.cmd {
        println!("{}", run_command(&result.formatted)?);
    } else {
        println!("{}", result.formatted);
    }
    Ok(())
}
