use thiserror::Error;

/// Inline message shown when a selected file is not declared as a PDF.
pub const INVALID_RESUME_FILE_MESSAGE: &str = "Please upload a PDF file";

/// Failure modes of one submission attempt. Each maps to a fixed inline
/// message; none are fatal and none are retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("no resume file selected")]
    MissingResume,
    #[error("job description is empty after trimming")]
    MissingJobDescription,
    #[error("analysis request failed")]
    AnalysisRequestFailed,
}

impl SubmissionError {
    /// Exact message surfaced in the submission view's error banner.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingResume => "Please upload your resume",
            Self::MissingJobDescription => "Please enter a job description",
            Self::AnalysisRequestFailed => "Failed to analyze resume",
        }
    }
}
