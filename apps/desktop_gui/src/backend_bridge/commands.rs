//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

pub enum BackendCommand {
    SelectResume {
        path: PathBuf,
    },
    /// Carries the editor buffer as typed; the controller stores it verbatim
    /// and trims only while validating.
    SubmitAnalysis {
        job_description: String,
    },
    LoadReport,
    StartOver,
}
