use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{multipart, Client, StatusCode};
use shared::domain::AnalysisResult;
use thiserror::Error;

pub mod report;
pub mod store;
pub mod submission;
pub mod workflow;

pub use report::{enter_report_view, load_stored_result, ReportLoadError, ReportModel, ScoreBand};
pub use store::{JsonFileResultStore, MemoryResultStore, ResultStore, ANALYSIS_RESULT_KEY};
pub use submission::{
    PreparedSubmission, ResumeCandidate, SelectedResume, SubmissionController,
    SubmissionSnapshot, RESUME_MIME_TYPE,
};
pub use workflow::{Navigator, View};

/// Fixed analysis path appended to the configured base address.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Total deadline for one analysis request. Expiry surfaces like any other
/// transport failure; without it a hung service would pin the submission
/// pending forever.
const ANALYZE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read resume file: {0}")]
    ResumeFile(#[from] std::io::Error),
    #[error("analysis request could not be sent: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("analysis service returned status {0}")]
    Status(StatusCode),
    #[error("analysis response body could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Resume payload for one outbound analysis request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP client for the external analysis service. One multipart POST per
/// submission; the service's scoring internals are opaque to this crate.
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(ANALYZE_TIMEOUT)
            .build()
            .context("failed to build analysis http client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{ANALYZE_PATH}", self.base_url)
    }

    /// Sends the resume and the verbatim job description text and decodes the
    /// response into an [`AnalysisResult`]. Any non-2xx status is reported
    /// uniformly as [`AnalyzeError::Status`].
    pub async fn analyze(
        &self,
        resume: ResumeUpload,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let resume_part = multipart::Part::bytes(resume.bytes)
            .file_name(resume.file_name)
            .mime_str(&resume.mime_type)
            .map_err(AnalyzeError::Transport)?;
        let form = multipart::Form::new()
            .part("resume", resume_part)
            .text("jobDescription", job_description.to_string());

        let response = self
            .http
            .post(self.analyze_url())
            .multipart(form)
            .send()
            .await
            .map_err(AnalyzeError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Status(status));
        }
        response
            .json::<AnalysisResult>()
            .await
            .map_err(AnalyzeError::Decode)
    }
}
