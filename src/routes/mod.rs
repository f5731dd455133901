use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

pub mod admin;
pub mod details;
pub mod events;
pub mod payments;
pub mod users;
pub mod venues;

pub(crate) struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A fully drained multipart form: repeated text fields accumulate in
/// order, file parts keep their name and content type for the media store.
pub(crate) struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl FormData {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn texts(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn files(&self, name: &str) -> &[UploadedFile] {
        self.files.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn required(&self, name: &str) -> AppResult<&str> {
        self.text(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation(format!("{name} must be present")))
    }
}

pub(crate) async fn collect_multipart(mut multipart: Multipart) -> AppResult<FormData> {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    let mut files: HashMap<String, Vec<UploadedFile>> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?
                .to_vec();
            files.entry(name).or_default().push(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            fields.entry(name).or_default().push(value);
        }
    }

    Ok(FormData { fields, files })
}
