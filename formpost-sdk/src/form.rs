use std::path::Path;

pub use formpost_types::api::form::{FormPart, FormPayload};

use crate::{Error, transport::guess_content_type};

/// Reads `path` into a file part named `name`, the MIME type is guessed
/// from the file extension.
pub async fn file_part(name: impl Into<String>, path: impl AsRef<Path>) -> Result<FormPart, Error> {
	let path = path.as_ref();
	let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let file_name = path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.ok_or_else(|| Error::custom(format!("`{}` has no file name", path.display())))?;
	let content_type = guess_content_type(&file_name);
	Ok(FormPart::File {
		name: name.into(),
		file_name,
		content_type: Some(content_type),
		bytes: bytes.into(),
	})
}
