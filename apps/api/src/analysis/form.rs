use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

use crate::config::parse_flag;
use crate::errors::AppError;
use crate::extraction::UploadedDocument;

/// Multipart form accepted by the analysis endpoints.
///
/// Fields:
/// - `resumes` (repeatable file field, `resume` also accepted)
/// - `job_description` (text)
/// - `strict_alpha_tokens` (optional, `true`/`false`)
/// - `email` (optional recipient forwarded to report sinks)
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resumes: Vec<UploadedDocument>,
    pub job_description: String,
    pub strict_alpha_tokens: Option<bool>,
    pub email: Option<String>,
}

impl AnalysisForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalysisForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resumes" | "resume" => {
                    let filename = field
                        .file_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("resume_{}", form.resumes.len() + 1));
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    // Browsers send an empty part when no file was picked.
                    if bytes.is_empty() && filename.is_empty() {
                        continue;
                    }
                    form.resumes.push(UploadedDocument::new(filename, content_type, bytes));
                }
                "job_description" => {
                    form.job_description = field.text().await.map_err(multipart_error)?;
                }
                "strict_alpha_tokens" => {
                    let raw = field.text().await.map_err(multipart_error)?;
                    let flag = parse_flag(&raw).ok_or_else(|| {
                        AppError::Validation(format!(
                            "strict_alpha_tokens must be true or false, got '{raw}'"
                        ))
                    })?;
                    form.strict_alpha_tokens = Some(flag);
                }
                "email" => {
                    let raw = field.text().await.map_err(multipart_error)?;
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        form.email = Some(trimmed.to_string());
                    }
                }
                other => debug!("Ignoring unknown form field '{other}'"),
            }
        }

        form.validate()?;
        Ok(form)
    }

    /// Refuses to analyze without at least one resume and a job description.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.resumes.is_empty() {
            return Err(AppError::Validation(
                "upload at least one resume".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("malformed multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn resume() -> UploadedDocument {
        UploadedDocument::new("cv.txt", None, Bytes::from_static(b"rust"))
    }

    #[test]
    fn test_validate_requires_resume() {
        let form = AnalysisForm {
            job_description: "Rust engineer".to_string(),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_requires_job_description() {
        let form = AnalysisForm {
            resumes: vec![resume()],
            job_description: "  \n ".to_string(),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(m)) if m.contains("job_description")));
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let form = AnalysisForm {
            resumes: vec![resume()],
            job_description: "Rust engineer".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }
}
