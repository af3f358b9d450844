use anyhow::Result;
use clap::Parser;

use crate::commands::{Commands, execute_command};

mod commands;
mod ui;

/// Post fields and files to an upload endpoint as multipart/form-data
#[derive(Debug, Parser)]
#[clap(name = "formpost", version)]
pub(crate) struct Cli {
	/// Only print failures
	#[arg(short, long, global = true)]
	quiet: bool,

	#[command(subcommand)]
	command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::init();

	let cli = Cli::parse();
	let ui = ui::UI::new(cli.quiet);
	execute_command(&ui, cli.command).await
}
