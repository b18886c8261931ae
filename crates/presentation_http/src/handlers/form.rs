//! Multipart form collection for audio uploads

use application::AudioUpload;
use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};
use tracing::debug;

use crate::error::ApiError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// All fields of one multipart request, read into memory
///
/// The router's body limit bounds how much is buffered.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: Vec<AudioUpload>,
    texts: Vec<(String, String)>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!(field = %name, filename = %filename, bytes = data.len(), "Received file");
                form.files.push(AudioUpload {
                    field_name: name,
                    filename,
                    content_type,
                    data,
                });
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.texts.push((name, value));
            }
        }

        Ok(form)
    }

    /// Remove and return the first file sent as `name`
    pub fn take_file(&mut self, name: &str) -> Option<AudioUpload> {
        let index = self.files.iter().position(|f| f.field_name == name)?;
        Some(self.files.swap_remove(index))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
