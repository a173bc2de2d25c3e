//! Multipart form encoding.
//!
//! # Design
//! A [`Form`] is an ordered list of named [`FormValue`]s rendered into a
//! `multipart/form-data` body. Value rendering follows the server's parsing
//! rules: booleans become the literals `"true"`/`"false"`, numbers their
//! decimal form, dates RFC 3339 strings, and files carry their declared
//! filename. Sparse updates fall out of `append_opt`: a `None` never
//! produces a part, so partial-update payloads contain exactly the fields
//! that were set.

use chrono::{DateTime, Utc};

/// A file to upload as a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// One form field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    File(FileUpload),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FormValue {
    fn from(value: DateTime<Utc>) -> Self {
        FormValue::Date(value)
    }
}

impl From<FileUpload> for FormValue {
    fn from(value: FileUpload) -> Self {
        FormValue::File(value)
    }
}

/// An ordered multipart form under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<(String, FormValue)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Append the field only when a value is present.
    pub fn append_opt(&mut self, name: impl Into<String>, value: Option<impl Into<FormValue>>) {
        if let Some(value) = value {
            self.append(name, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    /// The `Content-Type` header value matching [`Form::encode`].
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }

    /// Render the form as a multipart body delimited by `boundary`.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, value) in &self.fields {
            match value {
                FormValue::File(file) => push_file_part(&mut out, boundary, name, file),
                FormValue::Text(text) => push_text_part(&mut out, boundary, name, text),
                FormValue::Number(number) => {
                    push_text_part(&mut out, boundary, name, &number.to_string())
                }
                FormValue::Bool(flag) => {
                    push_text_part(&mut out, boundary, name, if *flag { "true" } else { "false" })
                }
                FormValue::Date(date) => {
                    push_text_part(&mut out, boundary, name, &date.to_rfc3339())
                }
            }
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }
}

fn push_text_part(out: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    out.extend_from_slice(
        format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
            .as_bytes(),
    );
    out.extend_from_slice(value.as_bytes());
    out.extend_from_slice(b"\r\n");
}

fn push_file_part(out: &mut Vec<u8>, boundary: &str, name: &str, file: &FileUpload) {
    out.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            file.filename
        )
        .as_bytes(),
    );
    out.extend_from_slice(&file.bytes);
    out.extend_from_slice(b"\r\n");
}

/// A boundary that will not collide with field content in practice.
pub(crate) fn random_boundary() -> String {
    format!("----FlareFormBoundary{:032x}", rand::random::<u128>())
}
