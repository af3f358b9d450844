use formpost_types::api::response::UploadResponse;

use crate::Error;

/// Turns a failed response or a transport error into a user facing message.
pub trait ErrorFormatter: Send + Sync {
	fn format_response(&self, response: &UploadResponse) -> String;
	fn format_error(&self, error: &Error) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorFormatter;

impl ErrorFormatter for DefaultErrorFormatter {
	fn format_response(&self, response: &UploadResponse) -> String {
		match response.message() {
			Some(message) => message.to_owned(),
			None => format!("Upload failed with status {}", response.status),
		}
	}

	fn format_error(&self, error: &Error) -> String {
		match error.response() {
			Some(response) => self.format_response(response),
			None if error.is_timeout() => "Upload timed out".to_owned(),
			None => error.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn response_messages() {
		let formatter = DefaultErrorFormatter;
		let resp = UploadResponse::new(
			200,
			json!({"isSuccess": false, "errorMessage": {"message": "duplicate jar"}}),
		);
		assert_eq!(formatter.format_response(&resp), "duplicate jar");

		let bare = UploadResponse::new(200, json!({}));
		assert_eq!(
			formatter.format_response(&bare),
			"Upload failed with status 200"
		);
	}

	#[test]
	fn status_errors_use_the_attached_response() {
		let formatter = DefaultErrorFormatter;
		let err = Error::Status {
			status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
			response: Box::new(UploadResponse::new(500, json!({"errorMessage": "disk full"}))),
		};
		assert_eq!(formatter.format_error(&err), "disk full");

		let err = Error::Status {
			status: reqwest::StatusCode::BAD_GATEWAY,
			response: Box::new(UploadResponse::new(502, json!("Bad Gateway"))),
		};
		assert_eq!(formatter.format_error(&err), "Upload failed with status 502");
	}

	#[test]
	fn other_errors_use_display() {
		let formatter = DefaultErrorFormatter;
		assert_eq!(
			formatter.format_error(&Error::custom("connection reset")),
			"connection reset"
		);
		assert_eq!(
			formatter.format_error(&Error::EmptyEndpoint),
			"endpoint must not be empty"
		);
	}
}
