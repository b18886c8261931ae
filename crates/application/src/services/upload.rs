//! Uploaded audio held on disk for the duration of one request

use std::path::Path;

use bytes::Bytes;
use chrono::Utc;
use rand::Rng;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::{error::ApplicationError, ports::AudioSource};

/// An audio file received from a client, still in memory
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Multipart field the file arrived in
    pub field_name: String,
    /// Client-supplied file name
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl AudioUpload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Temporary copy of an upload, removed when dropped
///
/// Files are named `<field>-<unix millis>-<random><ext>`. Removal failures
/// are logged and otherwise ignored.
#[derive(Debug)]
pub struct ScopedUpload {
    file: Option<NamedTempFile>,
    source: AudioSource,
}

impl ScopedUpload {
    /// Write `upload` into `dir`, creating the directory if needed
    pub async fn write(dir: &Path, upload: &AudioUpload) -> Result<Self, ApplicationError> {
        tokio::fs::create_dir_all(dir).await?;

        let stem = format!(
            "{}-{}-{}",
            sanitize(&upload.field_name, "file"),
            Utc::now().timestamp_millis(),
            rand::rng().random_range(0..1_000_000_000_u32)
        );
        let file = tempfile::Builder::new()
            .prefix(&stem)
            .suffix(&extension(&upload.filename))
            .rand_bytes(0)
            .tempfile_in(dir)?;

        // Dropping `file` on error removes the partial write
        tokio::fs::write(file.path(), &upload.data).await?;
        debug!(path = %file.path().display(), bytes = upload.len(), "Stored upload");

        let source = AudioSource {
            path: file.path().to_path_buf(),
            filename: if upload.filename.is_empty() {
                file.path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            } else {
                upload.filename.clone()
            },
            content_type: upload.content_type.clone(),
        };

        Ok(Self {
            file: Some(file),
            source,
        })
    }

    pub fn source(&self) -> &AudioSource {
        &self.source
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }
}

impl Drop for ScopedUpload {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            match file.close() {
                Ok(()) => debug!(path = %path.display(), "Removed upload"),
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove upload"),
            }
        }
    }
}

fn sanitize(value: &str, fallback: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}

fn extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
