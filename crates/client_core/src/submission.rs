//! Submission-side state machine: gate and package one analysis request,
//! hand exactly one successful result to the report view.

use std::path::PathBuf;

use shared::{
    domain::AnalysisResult,
    error::{SubmissionError, INVALID_RESUME_FILE_MESSAGE},
};
use tracing::{info, warn};

use crate::{
    store::{persist_analysis_result, ResultStore},
    workflow::{Navigator, View},
    AnalysisClient, AnalyzeError, ResumeUpload,
};

/// The only accepted declared type. Equality against this string is the whole
/// resume check; file contents are never sniffed.
pub const RESUME_MIME_TYPE: &str = "application/pdf";

/// A file offered through the picker, carrying the MIME type its name
/// declares.
#[derive(Debug, Clone)]
pub struct ResumeCandidate {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

/// A candidate that passed the MIME gate. Bytes are read at submit time.
#[derive(Debug, Clone)]
pub struct SelectedResume {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

/// Read-only view of the form state, for hosts mirroring it into a UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSnapshot {
    pub resume_file_name: Option<String>,
    pub job_description: String,
    pub pending: bool,
    pub error: Option<String>,
}

/// Form state for one page visit. The submit affordance must be disabled by
/// the host whenever [`SubmissionController::pending`] is true; the
/// controller supports at most one outstanding submission.
#[derive(Default)]
pub struct SubmissionController {
    resume: Option<SelectedResume>,
    job_description: String,
    pending: bool,
    error: Option<String>,
}

/// A validated submission ready to go over the wire. Produced by
/// [`SubmissionController::begin_submit`] while the controller is pending.
pub struct PreparedSubmission {
    resume: SelectedResume,
    job_description: String,
}

impl PreparedSubmission {
    /// Reads the resume bytes and performs the analysis request. The job
    /// description crosses the wire untrimmed; trimming is a validation
    /// detail only.
    pub async fn dispatch(&self, client: &AnalysisClient) -> Result<AnalysisResult, AnalyzeError> {
        let bytes = tokio::fs::read(&self.resume.path).await?;
        info!(
            file = %self.resume.file_name,
            bytes = bytes.len(),
            "submitting resume for analysis"
        );
        client
            .analyze(
                ResumeUpload {
                    file_name: self.resume.file_name.clone(),
                    mime_type: self.resume.mime_type.clone(),
                    bytes,
                },
                &self.job_description,
            )
            .await
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the candidate when its declared MIME type equals
    /// "application/pdf"; anything else clears the selection and raises the
    /// fixed inline message.
    pub fn select_resume(&mut self, candidate: ResumeCandidate) {
        if candidate.mime_type == RESUME_MIME_TYPE {
            self.resume = Some(SelectedResume {
                path: candidate.path,
                file_name: candidate.file_name,
                mime_type: candidate.mime_type,
            });
            self.error = None;
        } else {
            warn!(mime_type = %candidate.mime_type, "rejected resume candidate");
            self.resume = None;
            self.error = Some(INVALID_RESUME_FILE_MESSAGE.to_string());
        }
    }

    /// Stores the text verbatim; emptiness is judged only at submit time.
    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn resume(&self) -> Option<&SelectedResume> {
        self.resume.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> SubmissionSnapshot {
        SubmissionSnapshot {
            resume_file_name: self.resume.as_ref().map(|r| r.file_name.clone()),
            job_description: self.job_description.clone(),
            pending: self.pending,
            error: self.error.clone(),
        }
    }

    /// Runs the validation gates in order. Each failure records its inline
    /// message and exits without touching the network; when both gates pass
    /// the controller becomes pending and the returned payload must be
    /// dispatched and fed back through [`Self::finish_submit`]. Must not be
    /// called while a submission is outstanding.
    pub fn begin_submit(&mut self) -> Result<PreparedSubmission, SubmissionError> {
        debug_assert!(!self.pending, "submit invoked while a submission is outstanding");
        let Some(resume) = self.resume.clone() else {
            let err = SubmissionError::MissingResume;
            self.error = Some(err.user_message().to_string());
            return Err(err);
        };
        if self.job_description.trim().is_empty() {
            let err = SubmissionError::MissingJobDescription;
            self.error = Some(err.user_message().to_string());
            return Err(err);
        }
        self.pending = true;
        self.error = None;
        Ok(PreparedSubmission {
            resume,
            job_description: self.job_description.clone(),
        })
    }

    /// Applies a dispatch outcome. `pending` is cleared first so every exit
    /// path resets it; on success the result is persisted and control moves
    /// to the report view. Form values are kept on failure so the user can
    /// retry.
    pub fn finish_submit(
        &mut self,
        outcome: Result<AnalysisResult, AnalyzeError>,
        store: &dyn ResultStore,
        navigator: &dyn Navigator,
    ) -> Result<(), SubmissionError> {
        self.pending = false;
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                warn!("analysis request failed: {err}");
                return Err(self.fail(SubmissionError::AnalysisRequestFailed));
            }
        };
        if let Err(err) = persist_analysis_result(store, &result) {
            warn!("failed to persist analysis result: {err}");
            return Err(self.fail(SubmissionError::AnalysisRequestFailed));
        }
        self.error = None;
        navigator.go_to(View::Report);
        Ok(())
    }

    /// One-call form of the begin/dispatch/finish sequence.
    pub async fn submit(
        &mut self,
        client: &AnalysisClient,
        store: &dyn ResultStore,
        navigator: &dyn Navigator,
    ) -> Result<(), SubmissionError> {
        let prepared = self.begin_submit()?;
        let outcome = prepared.dispatch(client).await;
        self.finish_submit(outcome, store, navigator)
    }

    fn fail(&mut self, err: SubmissionError) -> SubmissionError {
        self.error = Some(err.user_message().to_string());
        err
    }
}
