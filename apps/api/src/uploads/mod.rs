//! Transient storage for multipart uploads.
//!
//! Every stored file is owned by an `UploadedFile`. The normal path removes it
//! with `discard`/`extract_and_discard`; if the owning request is dropped first
//! (client disconnect, early return), `Drop` removes it synchronously. No upload
//! outlives the request that stored it.

use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind, ExtractionError};

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
pub const MAX_BULK_FILES: usize = 10;
/// Whole-body ceiling for multipart routes: a full bulk request plus form overhead.
pub const MULTIPART_BODY_LIMIT: usize = MAX_BULK_FILES * MAX_FILE_SIZE + 1024 * 1024;

const UNSUPPORTED_TYPE_MESSAGE: &str = "Only PDF and DOCX files are allowed";

/// Filesystem failures around transient artifacts. Logged, never sent to clients.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which multipart field carries files and how many of them are allowed.
#[derive(Debug, Clone, Copy)]
pub struct UploadSpec {
    pub file_field: &'static str,
    pub max_files: usize,
    pub missing_files_message: &'static str,
}

impl UploadSpec {
    pub const SINGLE_RESUME: Self = Self {
        file_field: "resume",
        max_files: 1,
        missing_files_message: "No resume file uploaded",
    };

    pub const BULK_RESUMES: Self = Self {
        file_field: "resumes",
        max_files: MAX_BULK_FILES,
        missing_files_message: "No resume files uploaded",
    };
}

/// A resume stored on disk for the duration of one request.
#[derive(Debug)]
pub struct UploadedFile {
    path: PathBuf,
    original_name: String,
    kind: DocumentKind,
    size: usize,
    removed: bool,
}

impl UploadedFile {
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Extracts the text and removes the file, whatever the extraction outcome.
    pub async fn extract_and_discard(self) -> Result<String, ExtractionError> {
        let result = extract_text(&self.path, self.kind.mime()).await;
        self.discard().await;
        result
    }

    /// Removes the file. Failures are logged and swallowed.
    pub async fn discard(mut self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!("Removed upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => warn!(
                "{}",
                FilesystemError::Remove {
                    path: self.path.clone(),
                    source
                }
            ),
        }
        self.removed = true;
    }
}

impl Drop for UploadedFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed abandoned upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => warn!(
                "{}",
                FilesystemError::Remove {
                    path: self.path.clone(),
                    source
                }
            ),
        }
    }
}

/// Everything a resume workflow reads from its multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    pub job_description: Option<String>,
}

impl UploadForm {
    pub async fn discard_all(self) {
        for file in self.files {
            file.discard().await;
        }
    }

    /// Checks the required fields, files first. On failure every stored file
    /// is removed before the client error is returned.
    pub async fn require(self, spec: UploadSpec) -> Result<(Vec<UploadedFile>, String), AppError> {
        if self.files.is_empty() {
            return Err(AppError::client(spec.missing_files_message));
        }
        let job_description = match self.job_description.as_deref().map(str::trim) {
            Some(jd) if !jd.is_empty() => jd.to_string(),
            _ => {
                self.discard_all().await;
                return Err(AppError::client("Job description is required"));
            }
        };
        Ok((self.files, job_description))
    }
}

/// Reads a multipart body, storing files under `upload_dir` and enforcing the
/// type, size and count limits. Any rejection removes what was already stored.
pub async fn collect_upload_form(
    mut multipart: Multipart,
    upload_dir: &Path,
    spec: UploadSpec,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    match read_fields(&mut multipart, upload_dir, spec, &mut form).await {
        Ok(()) => {
            info!(
                "Received {} upload(s) ({} bytes)",
                form.files.len(),
                form.files.iter().map(UploadedFile::size).sum::<usize>()
            );
            Ok(form)
        }
        Err(e) => {
            form.discard_all().await;
            Err(e)
        }
    }
}

async fn read_fields(
    multipart: &mut Multipart,
    upload_dir: &Path,
    spec: UploadSpec,
    form: &mut UploadForm,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        // A file input left empty arrives as a part with `filename=""`.
        let has_file = field.file_name().is_some_and(|f| !f.is_empty());
        if name == spec.file_field && !has_file {
            continue;
        }
        if name == spec.file_field {
            if form.files.len() == spec.max_files {
                return Err(AppError::client(format!(
                    "Too many files. Maximum is {} per request.",
                    spec.max_files
                )));
            }
            let file = store_file(field, upload_dir).await?;
            form.files.push(file);
        } else if name == "jobDescription" {
            form.job_description = Some(field.text().await.map_err(multipart_error)?);
        }
    }
    Ok(())
}

async fn store_file(mut field: Field<'_>, upload_dir: &Path) -> Result<UploadedFile, AppError> {
    let declared = field.content_type().unwrap_or_default().to_string();
    let kind = DocumentKind::from_mime(&declared)
        .ok_or_else(|| AppError::client(UNSUPPORTED_TYPE_MESSAGE))?;

    let original_name = field.file_name().unwrap_or("resume").to_string();
    let path = upload_dir.join(stored_file_name(&original_name));

    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|source| write_error(&path, source))?;

    // From here on the guard owns the path, so every early return removes it.
    let mut upload = UploadedFile {
        path,
        original_name,
        kind,
        size: 0,
        removed: false,
    };

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        upload.size += chunk.len();
        if upload.size > MAX_FILE_SIZE {
            return Err(AppError::FileTooLarge);
        }
        file.write_all(&chunk)
            .await
            .map_err(|source| write_error(&upload.path, source))?;
    }
    file.flush()
        .await
        .map_err(|source| write_error(&upload.path, source))?;

    Ok(upload)
}

/// `<unix-millis>-<uuid>-<sanitized original name>`
fn stored_file_name(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume");
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(100)
        .collect();
    format!(
        "{}-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        safe
    )
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge
    } else {
        AppError::client(format!("Invalid multipart body: {}", e.body_text()))
    }
}

fn write_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::Internal(
        FilesystemError::Write {
            path: path.to_path_buf(),
            source,
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_file_name_is_unique_and_sanitized() {
        let a = stored_file_name("../../etc/my résumé (final).pdf");
        let b = stored_file_name("../../etc/my résumé (final).pdf");
        assert_ne!(a, b);
        assert!(a.ends_with("my_r_sum___final_.pdf"), "got {a}");
        assert!(!a.contains('/'));
    }

    #[tokio::test]
    async fn test_discard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.5").unwrap();
        let upload = UploadedFile {
            path: path.clone(),
            original_name: "cv.pdf".to_string(),
            kind: DocumentKind::Pdf,
            size: 8,
            removed: false,
        };

        upload.discard().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_abandoned_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, b"PK").unwrap();
        let upload = UploadedFile {
            path: path.clone(),
            original_name: "cv.docx".to_string(),
            kind: DocumentKind::Docx,
            size: 2,
            removed: false,
        };

        drop(upload);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_extract_and_discard_removes_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"garbage").unwrap();
        let upload = UploadedFile {
            path: path.clone(),
            original_name: "broken.pdf".to_string(),
            kind: DocumentKind::Pdf,
            size: 7,
            removed: false,
        };

        assert!(upload.extract_and_discard().await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_require_discards_files_when_description_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        let form = UploadForm {
            files: vec![UploadedFile {
                path: path.clone(),
                original_name: "cv.pdf".to_string(),
                kind: DocumentKind::Pdf,
                size: 4,
                removed: false,
            }],
            job_description: Some("   ".to_string()),
        };

        let err = form.require(UploadSpec::SINGLE_RESUME).await.unwrap_err();
        assert_eq!(err.to_string(), "Job description is required");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_require_reports_missing_files_first() {
        let form = UploadForm::default();
        let err = form.require(UploadSpec::BULK_RESUMES).await.unwrap_err();
        assert_eq!(err.to_string(), "No resume files uploaded");
    }
}
