use std::sync::RwLock;

use formpost_types::api::{form::FormPayload, response::UploadResponse};
use url::Url;

use crate::{
	Error,
	config::{UploadConfig, parse_endpoint},
	message::{DefaultErrorFormatter, ErrorFormatter},
	notify::{LogNotifier, Notifier},
	transport::{ReqwestTransport, Transport},
};

/// What a single submit ended with.
#[derive(Debug)]
pub enum UploadOutcome {
	Success(UploadResponse),
	/// A response arrived but `isSuccess` was not `true`.
	ApplicationFailure {
		response: UploadResponse,
		message: String,
	},
	/// No usable response, the stored result was left alone.
	TransportFailure { error: Error, message: String },
}

impl UploadOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, UploadOutcome::Success(_))
	}

	pub fn response(&self) -> Option<&UploadResponse> {
		match self {
			UploadOutcome::Success(response) => Some(response),
			UploadOutcome::ApplicationFailure { response, .. } => Some(response),
			UploadOutcome::TransportFailure { error, .. } => error.response(),
		}
	}

	/// The message that was sent to the notifier, if any.
	pub fn message(&self) -> Option<&str> {
		match self {
			UploadOutcome::Success(_) => None,
			UploadOutcome::ApplicationFailure { message, .. } => Some(message),
			UploadOutcome::TransportFailure { message, .. } => Some(message),
		}
	}
}

/// Posts multipart forms to one fixed endpoint and keeps the last response.
///
/// Submits never fail from the caller's point of view. Every failure is
/// formatted and handed to the notifier instead. The last response slot is
/// written whenever a response is received, successful or not, and is left
/// untouched when the request fails before a response exists.
///
/// Submits are not serialized. When several run at once, the one that
/// completes last owns the slot; use [`UploadLifecycle::submit_with_outcome`]
/// to get each call's own result.
pub struct UploadLifecycle<T = ReqwestTransport, N = LogNotifier, F = DefaultErrorFormatter> {
	endpoint: Url,
	transport: T,
	notifier: N,
	formatter: F,
	last: RwLock<Option<UploadResponse>>,
}

impl UploadLifecycle {
	pub fn new(endpoint: &str) -> Result<Self, Error> {
		Self::from_config(UploadConfig::new(endpoint))
	}

	pub fn from_config(config: UploadConfig) -> Result<Self, Error> {
		// validate before building a client
		parse_endpoint(config.endpoint())?;
		let transport = ReqwestTransport::from_upload_config(&config)?;
		Self::with_parts(config.endpoint(), transport, LogNotifier, DefaultErrorFormatter)
	}
}

impl<T, N, F> UploadLifecycle<T, N, F>
where
	T: Transport,
	N: Notifier,
	F: ErrorFormatter,
{
	pub fn with_parts(endpoint: &str, transport: T, notifier: N, formatter: F) -> Result<Self, Error> {
		Ok(Self {
			endpoint: parse_endpoint(endpoint)?,
			transport,
			notifier,
			formatter,
			last: RwLock::new(None),
		})
	}

	pub fn with_notifier<N2: Notifier>(self, notifier: N2) -> UploadLifecycle<T, N2, F> {
		UploadLifecycle {
			endpoint: self.endpoint,
			transport: self.transport,
			notifier,
			formatter: self.formatter,
			last: self.last,
		}
	}

	pub fn with_formatter<F2: ErrorFormatter>(self, formatter: F2) -> UploadLifecycle<T, N, F2> {
		UploadLifecycle {
			endpoint: self.endpoint,
			transport: self.transport,
			notifier: self.notifier,
			formatter,
			last: self.last,
		}
	}

	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	pub async fn submit(&self, payload: &FormPayload) {
		self.submit_with_outcome(payload).await;
	}

	pub async fn submit_with_outcome(&self, payload: &FormPayload) -> UploadOutcome {
		log::debug!(
			"submitting {} form part(s) to {}",
			payload.len(),
			self.endpoint
		);
		match self.transport.post_multipart(&self.endpoint, payload).await {
			Ok(response) => {
				self.store(response.clone());
				if response.is_success() {
					UploadOutcome::Success(response)
				} else {
					let message = self.formatter.format_response(&response);
					self.notifier.notify(&message);
					UploadOutcome::ApplicationFailure { response, message }
				}
			}
			Err(error) => {
				let message = self.formatter.format_error(&error);
				self.notifier.notify(&message);
				UploadOutcome::TransportFailure { error, message }
			}
		}
	}

	/// The most recently received response, `None` until one arrives.
	pub fn last_result(&self) -> Option<UploadResponse> {
		self.last.read().unwrap_or_else(|e| e.into_inner()).clone()
	}

	fn store(&self, response: UploadResponse) {
		*self.last.write().unwrap_or_else(|e| e.into_inner()) = Some(response);
	}
}

impl<T, N, F> std::fmt::Debug for UploadLifecycle<T, N, F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("UploadLifecycle")
			.field("endpoint", &self.endpoint.as_str())
			.finish_non_exhaustive()
	}
}
