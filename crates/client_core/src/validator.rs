//! Presence checks run before an evaluation request is formed.

use shared::{domain::EvaluationInput, error::ValidationError};

/// Extensions offered by file pickers. A hint only; `validate` does not enforce it.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Rules short-circuit in order: file first, then job description.
pub fn validate(input: &EvaluationInput) -> Result<(), ValidationError> {
    if input.resume_file.is_none() {
        return Err(ValidationError::MissingFile);
    }
    if input.job_description.trim().is_empty() {
        return Err(ValidationError::MissingJobDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::ResumeFile;

    fn resume() -> Option<ResumeFile> {
        Some(ResumeFile::new("resume.pdf", b"%PDF-1.7".to_vec()))
    }

    #[test]
    fn missing_file_is_reported_before_job_description() {
        let input = EvaluationInput::new(None, "");
        assert_eq!(validate(&input), Err(ValidationError::MissingFile));

        let input = EvaluationInput::new(None, "Senior Rust engineer");
        assert_eq!(validate(&input), Err(ValidationError::MissingFile));
    }

    #[test]
    fn whitespace_only_job_description_is_missing() {
        for text in ["", " ", "\n\t  \r\n"] {
            let input = EvaluationInput::new(resume(), text);
            assert_eq!(
                validate(&input),
                Err(ValidationError::MissingJobDescription),
                "text {text:?}"
            );
        }
    }

    #[test]
    fn accepts_any_file_type_with_job_description() {
        let input = EvaluationInput::new(
            Some(ResumeFile::new("notes.txt", b"plain".to_vec()).with_mime_type("text/plain")),
            "  Backend developer  ",
        );
        assert_eq!(validate(&input), Ok(()));
    }
}
