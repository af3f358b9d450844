use std::{
	borrow::Cow,
	fmt,
	pin::Pin,
	task::{Context, Poll, ready},
};

use formpost_types::api::{
	form::{FormPart, FormPayload},
	response::UploadResponse,
};
use tower::Service;

use super::MultipartRequest;
use crate::Error;

/// Logs each upload as a part summary and its outcome, never the part contents.
///
/// Failures are logged at debug only, the notifier is what reports them.
#[derive(Clone)]
pub(crate) struct LogLayer {
	level_filter: log::LevelFilter,
	endpoint: Cow<'static, str>,
}

impl LogLayer {
	pub fn new(level_filter: log::LevelFilter, endpoint: impl Into<Cow<'static, str>>) -> Self {
		Self {
			level_filter,
			endpoint: endpoint.into(),
		}
	}
}

impl<S> tower::Layer<S> for LogLayer {
	type Service = LogService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		LogService {
			inner,
			level_filter: self.level_filter,
			endpoint: self.endpoint.clone(),
		}
	}
}

#[derive(Clone)]
pub(crate) struct LogService<S> {
	inner: S,
	level_filter: log::LevelFilter,
	endpoint: Cow<'static, str>,
}

impl<S> Service<MultipartRequest> for LogService<S>
where
	S: Service<MultipartRequest, Response = UploadResponse, Error = Error>,
{
	type Response = UploadResponse;
	type Error = Error;
	type Future = LoggedFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: MultipartRequest) -> Self::Future {
		if self.level_filter >= log::LevelFilter::Trace {
			log::trace!(
				"posting {} part(s) to {}: {}",
				req.payload.len(),
				self.endpoint,
				PartSummary(&req.payload)
			);
		} else if self.level_filter >= log::LevelFilter::Debug {
			log::debug!("posting {} part(s) to {}", req.payload.len(), self.endpoint);
		}
		LoggedFuture {
			inner: self.inner.call(req),
			filter: self.level_filter,
			endpoint: self.endpoint.clone(),
		}
	}
}

#[pin_project::pin_project]
pub(crate) struct LoggedFuture<F> {
	#[pin]
	inner: F,
	filter: log::LevelFilter,
	endpoint: Cow<'static, str>,
}

impl<F> Future for LoggedFuture<F>
where
	F: Future<Output = Result<UploadResponse, Error>>,
{
	type Output = F::Output;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.project();
		let result = ready!(this.inner.poll(cx));
		if *this.filter >= log::LevelFilter::Debug {
			match &result {
				Ok(response) => log::debug!(
					"upload to {} returned status {} (isSuccess: {})",
					this.endpoint,
					response.status,
					response.is_success()
				),
				Err(e) => log::debug!("upload to {} failed: {}", this.endpoint, e),
			}
		}
		Poll::Ready(result)
	}
}

/// `name (N bytes)` for text parts, `name=file_name (N bytes)` for files.
struct PartSummary<'a>(&'a FormPayload);

impl fmt::Display for PartSummary<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, part) in self.0.parts().iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			match part {
				FormPart::Text { name, value } => write!(f, "{name} ({} bytes)", value.len())?,
				FormPart::File {
					name,
					file_name,
					bytes,
					..
				} => write!(f, "{name}={file_name} ({} bytes)", bytes.len())?,
			}
		}
		Ok(())
	}
}
