use std::path::PathBuf;

use formpost_types::api::response::UploadResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("endpoint must not be empty")]
	EmptyEndpoint,
	#[error("invalid endpoint `{endpoint}`: {source}")]
	InvalidEndpoint {
		endpoint: String,
		#[source]
		source: url::ParseError,
	},
	#[error("request failed: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("server responded with status {status}")]
	Status {
		status: reqwest::StatusCode,
		response: Box<UploadResponse>,
	},
	#[error("invalid content type `{content_type}` for field `{field}`: {source}")]
	ContentType {
		field: String,
		content_type: String,
		#[source]
		source: reqwest::Error,
	},
	#[error("failed to read `{}`: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("{0}")]
	Custom(String),
}

impl Error {
	pub fn custom(message: impl Into<String>) -> Self {
		Error::Custom(message.into())
	}

	/// The response attached to this error, if the server sent one.
	pub fn response(&self) -> Option<&UploadResponse> {
		match self {
			Error::Status { response, .. } => Some(&**response),
			_ => None,
		}
	}

	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Reqwest(e) if e.is_timeout())
	}
}
