use std::time::Duration;

use url::Url;

use crate::Error;

#[derive(Debug, Clone)]
pub struct UploadConfig {
	pub(crate) endpoint: String,
	pub(crate) log_level: log::LevelFilter,
	pub(crate) timeout: Option<Duration>,
	pub(crate) reject_error_status: bool,
	pub(crate) user_agent: Option<String>,
}

impl UploadConfig {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			log_level: log::LevelFilter::Debug,
			timeout: None,
			reject_error_status: true,
			user_agent: None,
		}
	}

	pub fn log_level(mut self, level: log::LevelFilter) -> Self {
		self.log_level = level;
		self
	}

	/// Per-request timeout. Without one the request waits as long as the
	/// underlying client does.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Whether a non-2xx status is a transport failure (the default) or a
	/// regular response that is checked for `isSuccess` like any other.
	pub fn reject_error_status(mut self, reject: bool) -> Self {
		self.reject_error_status = reject;
		self
	}

	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub(crate) fn transport_config(&self) -> TransportConfig {
		TransportConfig {
			log_level: self.log_level,
			timeout: self.timeout,
			reject_error_status: self.reject_error_status,
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct TransportConfig {
	pub log_level: log::LevelFilter,
	pub timeout: Option<Duration>,
	pub reject_error_status: bool,
}

impl Default for TransportConfig {
	fn default() -> Self {
		Self {
			log_level: log::LevelFilter::Debug,
			timeout: None,
			reject_error_status: true,
		}
	}
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, Error> {
	let trimmed = endpoint.trim();
	if trimmed.is_empty() {
		return Err(Error::EmptyEndpoint);
	}
	Url::parse(trimmed).map_err(|source| Error::InvalidEndpoint {
		endpoint: endpoint.to_owned(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = UploadConfig::new("http://localhost:12345/api/files");
		assert_eq!(config.endpoint(), "http://localhost:12345/api/files");
		let transport = config.transport_config();
		assert!(transport.reject_error_status);
		assert_eq!(transport.timeout, None);
		assert_eq!(transport.log_level, log::LevelFilter::Debug);
	}

	#[test]
	fn endpoint_parsing() {
		assert!(matches!(parse_endpoint(""), Err(Error::EmptyEndpoint)));
		assert!(matches!(parse_endpoint("   "), Err(Error::EmptyEndpoint)));
		assert!(matches!(
			parse_endpoint("api/files"),
			Err(Error::InvalidEndpoint { .. })
		));
		assert_eq!(
			parse_endpoint("http://localhost:8080/api/jars")
				.unwrap()
				.path(),
			"/api/jars"
		);
	}
}
