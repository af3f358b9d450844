pub mod config;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod message;
pub mod notify;
pub mod transport;

#[cfg(test)]
mod test_log;

pub use config::UploadConfig;
pub use error::Error;
pub use formpost_types::api::{
	form::{FormPart, FormPayload},
	response::UploadResponse,
};
pub use lifecycle::{UploadLifecycle, UploadOutcome};
