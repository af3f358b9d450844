use bytes::Bytes;

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
	Text {
		name: String,
		value: String,
	},
	File {
		name: String,
		file_name: String,
		/// `None` lets the transport guess it from `file_name`.
		content_type: Option<String>,
		bytes: Bytes,
	},
}

impl FormPart {
	pub fn name(&self) -> &str {
		match self {
			FormPart::Text { name, .. } => name,
			FormPart::File { name, .. } => name,
		}
	}

	pub fn is_file(&self) -> bool {
		matches!(self, FormPart::File { .. })
	}
}

/// An ordered multipart form.
///
/// Nothing here is validated: names may repeat and the form may be empty,
/// the server decides what it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
	parts: Vec<FormPart>,
}

impl FormPayload {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parts.push(FormPart::Text {
			name: name.into(),
			value: value.into(),
		});
		self
	}

	pub fn file(
		mut self,
		name: impl Into<String>,
		file_name: impl Into<String>,
		bytes: impl Into<Bytes>,
	) -> Self {
		self.parts.push(FormPart::File {
			name: name.into(),
			file_name: file_name.into(),
			content_type: None,
			bytes: bytes.into(),
		});
		self
	}

	pub fn file_with_type(
		mut self,
		name: impl Into<String>,
		file_name: impl Into<String>,
		content_type: impl Into<String>,
		bytes: impl Into<Bytes>,
	) -> Self {
		self.parts.push(FormPart::File {
			name: name.into(),
			file_name: file_name.into(),
			content_type: Some(content_type.into()),
			bytes: bytes.into(),
		});
		self
	}

	pub fn push(&mut self, part: FormPart) {
		self.parts.push(part);
	}

	pub fn parts(&self) -> &[FormPart] {
		&self.parts
	}

	pub fn len(&self) -> usize {
		self.parts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}
}

impl FromIterator<FormPart> for FormPayload {
	fn from_iter<I: IntoIterator<Item = FormPart>>(iter: I) -> Self {
		Self {
			parts: iter.into_iter().collect(),
		}
	}
}

impl Extend<FormPart> for FormPayload {
	fn extend<I: IntoIterator<Item = FormPart>>(&mut self, iter: I) {
		self.parts.extend(iter);
	}
}

impl<'a> IntoIterator for &'a FormPayload {
	type Item = &'a FormPart;
	type IntoIter = std::slice::Iter<'a, FormPart>;

	fn into_iter(self) -> Self::IntoIter {
		self.parts.iter()
	}
}
