//! Object storage for uploaded resumes.

pub mod handlers;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },
}

/// Where resumes go. Carried in `AppState` as `Option<Arc<dyn ResumeStore>>`;
/// `None` disables uploads.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Stores the file and returns its public URL.
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<String, StorageError>;
}

pub struct S3ResumeStore {
    s3: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ResumeStore {
    pub fn new(s3: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            s3,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<String, StorageError> {
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Object key for an uploaded resume: `resumes/<unix-millis>-<safe name>`.
pub fn resume_key(uploaded_at_millis: i64, file_name: &str) -> String {
    format!("resumes/{uploaded_at_millis}-{}", sanitize_file_name(file_name))
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(|c: char| c == '.' || c == '_').is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_key_is_prefixed_and_sanitized() {
        assert_eq!(
            resume_key(1_700_000_000_000, "Jane Doe (CV).pdf"),
            "resumes/1700000000000-Jane_Doe__CV_.pdf"
        );
    }

    #[test]
    fn test_path_components_are_dropped() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cv.docx"), "cv.docx");
        assert_eq!(sanitize_file_name(".."), "resume");
    }
}
