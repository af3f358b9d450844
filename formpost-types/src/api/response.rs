use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_FIELD: &str = "isSuccess";

/// A response received from an upload endpoint.
///
/// `data` is the decoded body: JSON when the body parses as JSON, otherwise
/// the body text as a JSON string, or `null` for an empty body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
	pub status: u16,
	#[serde(default)]
	pub headers: Vec<(String, String)>,
	pub data: Value,
}

impl UploadResponse {
	pub fn new(status: u16, data: Value) -> Self {
		Self {
			status,
			headers: Vec::new(),
			data,
		}
	}

	pub fn from_body(status: u16, headers: Vec<(String, String)>, body: &[u8]) -> Self {
		let data = if body.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(body)
				.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
		};
		Self {
			status,
			headers,
			data,
		}
	}

	/// `data.isSuccess`, anything but a JSON `true` counts as a failure.
	pub fn is_success(&self) -> bool {
		self.data
			.get(SUCCESS_FIELD)
			.and_then(Value::as_bool)
			.unwrap_or(false)
	}

	/// The server supplied error message, looked up as `errorMessage.message`,
	/// then `errorMessage`, then `message`.
	pub fn message(&self) -> Option<&str> {
		let error_message = self.data.get("errorMessage");
		error_message
			.and_then(|e| e.get("message"))
			.and_then(Value::as_str)
			.or_else(|| error_message.and_then(Value::as_str))
			.or_else(|| self.data.get("message").and_then(Value::as_str))
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}
