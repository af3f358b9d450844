use std::borrow::Cow;

use formpost_types::api::form::{FormPart, FormPayload};
use reqwest::multipart::{Form, Part};

use crate::Error;

pub(crate) fn into_form(payload: &FormPayload) -> Result<Form, Error> {
	payload
		.parts()
		.iter()
		.try_fold(Form::new(), |form, part| match part {
			FormPart::Text { name, value } => Ok(form.text(name.clone(), value.clone())),
			FormPart::File {
				name,
				file_name,
				content_type,
				bytes,
			} => {
				let content_type = content_type
					.as_deref()
					.map(Cow::Borrowed)
					.unwrap_or_else(|| Cow::Owned(guess_content_type(file_name)));
				let part = Part::stream_with_length(bytes.clone(), bytes.len() as u64)
					.file_name(file_name.clone())
					.mime_str(&content_type)
					.map_err(|source| Error::ContentType {
						field: name.clone(),
						content_type: content_type.clone().into_owned(),
						source,
					})?;
				Ok(form.part(name.clone(), part))
			}
		})
}

pub(crate) fn guess_content_type(file_name: &str) -> String {
	mime_guess::from_path(file_name)
		.first_or_octet_stream()
		.essence_str()
		.to_owned()
}
