use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use formpost_sdk::{FormPayload, UploadConfig, UploadLifecycle, UploadOutcome, form};
use log::debug;

use crate::ui::UI;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
	/// Upload fields and files as one multipart form
	Upload(UploadArgs),
}

#[derive(Debug, Args)]
pub(crate) struct UploadArgs {
	/// URL to post the form to
	#[arg(short, long, env = "FORMPOST_ENDPOINT")]
	endpoint: String,

	/// Text field as name=value (repeatable)
	#[arg(short = 'F', long = "field", value_parser = parse_key_value::<String>)]
	fields: Vec<(String, String)>,

	/// File field as name=path (repeatable)
	#[arg(short, long = "file", value_parser = parse_key_value::<PathBuf>)]
	files: Vec<(String, PathBuf)>,

	/// Give up after this many seconds
	#[arg(long)]
	timeout: Option<u64>,

	/// Treat non-2xx responses like any other response instead of as errors
	#[arg(long)]
	accept_error_status: bool,
}

pub(crate) fn parse_key_value<V: From<String>>(s: &str) -> Result<(String, V), String> {
	match s.split_once('=') {
		Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), V::from(value.to_owned()))),
		_ => Err(format!("expected name=value, got `{s}`")),
	}
}

pub(crate) async fn execute_command(ui: &UI, command: Commands) -> Result<()> {
	match command {
		Commands::Upload(args) => upload(ui, args).await,
	}
}

async fn upload(ui: &UI, args: UploadArgs) -> Result<()> {
	let mut config = UploadConfig::new(args.endpoint.as_str())
		.reject_error_status(!args.accept_error_status)
		.user_agent(concat!("formpost/", env!("CARGO_PKG_VERSION")));
	if let Some(secs) = args.timeout {
		config = config.timeout(Duration::from_secs(secs));
	}

	let mut payload = FormPayload::new();
	for (name, value) in args.fields {
		payload = payload.text(name, value);
	}
	for (name, path) in args.files {
		payload.push(form::file_part(name, &path).await?);
	}
	debug!("built form with {} part(s)", payload.len());

	let lifecycle = UploadLifecycle::from_config(config)
		.context("Failed to set up upload")?
		.with_notifier(ui.notifier());

	match lifecycle.submit_with_outcome(&payload).await {
		UploadOutcome::Success(response) => ui.print_response(&response),
		UploadOutcome::ApplicationFailure { response, .. } => {
			ui.print_response(&response)?;
			bail!("Upload to {} was not successful", args.endpoint)
		}
		// the notifier already printed the reason
		UploadOutcome::TransportFailure { .. } => bail!("Upload to {} failed", args.endpoint),
	}
}
