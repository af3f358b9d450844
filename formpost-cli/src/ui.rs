use anyhow::Result;
use formpost_sdk::{UploadResponse, notify::Notifier};

pub(crate) struct UI {
	quiet: bool,
}

impl UI {
	pub(crate) fn new(quiet: bool) -> Self {
		Self { quiet }
	}

	pub(crate) fn print_response(&self, response: &UploadResponse) -> Result<()> {
		if !self.quiet {
			println!("{}", serde_json::to_string_pretty(&response.data)?);
		}
		Ok(())
	}

	pub(crate) fn notifier(&self) -> TerminalNotifier {
		TerminalNotifier
	}
}

/// Prints upload failures to stderr, regardless of `--quiet`.
pub(crate) struct TerminalNotifier;

impl Notifier for TerminalNotifier {
	fn notify(&self, message: &str) {
		eprintln!("✗ {message}");
	}
}
