use std::time::Duration;

use bytes::Bytes;
use formpost_types::api::{form::FormPayload, response::UploadResponse};
use futures::future;
use reqwest::StatusCode;
use tower::{ServiceBuilder, ServiceExt};
use url::Url;

use crate::{
	Error,
	config::{TransportConfig, UploadConfig},
};

mod logging;
mod multipart;

pub(crate) use multipart::guess_content_type;

/// Sends a multipart form and hands back whatever the server answered.
///
/// Implementations return `Err` only when no usable response was obtained.
pub trait Transport: Send + Sync {
	fn post_multipart(
		&self,
		url: &Url,
		payload: &FormPayload,
	) -> impl Future<Output = Result<UploadResponse, Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: reqwest::Client,
	config: TransportConfig,
}

impl ReqwestTransport {
	pub fn new(config: TransportConfig) -> Self {
		Self::from_client(reqwest::Client::new(), config)
	}

	pub fn from_client(client: reqwest::Client, config: TransportConfig) -> Self {
		Self { client, config }
	}

	pub(crate) fn from_upload_config(config: &UploadConfig) -> Result<Self, Error> {
		let mut builder = reqwest::Client::builder();
		if let Some(user_agent) = &config.user_agent {
			builder = builder.user_agent(user_agent.clone());
		}
		Ok(Self::from_client(builder.build()?, config.transport_config()))
	}
}

impl Default for ReqwestTransport {
	fn default() -> Self {
		Self::new(TransportConfig::default())
	}
}

impl Transport for ReqwestTransport {
	async fn post_multipart(&self, url: &Url, payload: &FormPayload) -> Result<UploadResponse, Error> {
		let request = MultipartRequest {
			client: self.client.clone(),
			url: url.clone(),
			payload: payload.clone(),
			timeout: self.config.timeout,
		};
		let reject_error_status = self.config.reject_error_status;

		ServiceBuilder::new()
			.layer(logging::LogLayer::new(self.config.log_level, url.to_string())) // optional logging
			.and_then(move |raw: RawResponse| {
				future::ready(raw.into_upload_response(reject_error_status))
			}) // required to decode the body and apply the status policy
			.and_then(read_body) // required to download the full body
			.service_fn(execute_request)
			.oneshot(request)
			.await
	}
}

#[derive(Clone)]
struct MultipartRequest {
	client: reqwest::Client,
	url: Url,
	payload: FormPayload,
	timeout: Option<Duration>,
}

#[derive(Debug)]
struct RawResponse {
	status: StatusCode,
	headers: Vec<(String, String)>,
	body: Bytes,
}

impl RawResponse {
	fn into_upload_response(self, reject_error_status: bool) -> Result<UploadResponse, Error> {
		let response = UploadResponse::from_body(self.status.as_u16(), self.headers, &self.body);
		if reject_error_status && !self.status.is_success() {
			return Err(Error::Status {
				status: self.status,
				response: Box::new(response),
			});
		}
		Ok(response)
	}
}

async fn execute_request(request: MultipartRequest) -> Result<reqwest::Response, Error> {
	// reqwest sets `multipart/form-data; boundary=..` itself
	let form = multipart::into_form(&request.payload)?;
	let mut builder = request.client.post(request.url).multipart(form);
	if let Some(timeout) = request.timeout {
		builder = builder.timeout(timeout);
	}
	Ok(builder.send().await?)
}

async fn read_body(response: reqwest::Response) -> Result<RawResponse, Error> {
	let status = response.status();
	let headers = response
		.headers()
		.iter()
		.map(|(name, value)| {
			(
				name.as_str().to_owned(),
				String::from_utf8_lossy(value.as_bytes()).into_owned(),
			)
		})
		.collect();
	let body = response.bytes().await?;
	Ok(RawResponse {
		status,
		headers,
		body,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw(status: u16, body: &'static str) -> RawResponse {
		RawResponse {
			status: StatusCode::from_u16(status).unwrap(),
			headers: vec![],
			body: Bytes::from_static(body.as_bytes()),
		}
	}

	#[test]
	fn rejects_error_status_when_configured() {
		match raw(500, r#"{"isSuccess":false,"errorMessage":"boom"}"#).into_upload_response(true) {
			Err(Error::Status { status, response }) => {
				assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
				assert_eq!(response.message(), Some("boom"));
			}
			other => panic!("expected status error, got {other:?}"),
		}
	}

	#[test]
	fn keeps_error_status_as_response_when_accepted() {
		let response = raw(500, r#"{"isSuccess":false}"#)
			.into_upload_response(false)
			.unwrap();
		assert_eq!(response.status, 500);
		assert!(!response.is_success());
	}

	#[test]
	fn success_status_passes_through() {
		let response = raw(200, r#"{"isSuccess":true}"#)
			.into_upload_response(true)
			.unwrap();
		assert!(response.is_success());
	}
}
