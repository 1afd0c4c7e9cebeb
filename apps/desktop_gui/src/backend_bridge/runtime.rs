//! Backend worker: owns the submission controller, the analysis client, and
//! the persisted result slot, and runs them on a dedicated tokio runtime.

use std::{
    path::{Path, PathBuf},
    thread,
};

use client_core::{
    report::enter_report_view,
    store::JsonFileResultStore,
    submission::{ResumeCandidate, SubmissionController},
    workflow::{Navigator, View},
    AnalysisClient,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub server_url: String,
    pub data_dir: Option<PathBuf>,
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: BackendConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_worker(cmd_rx, ui_tx, config));
    });
}

/// Navigation capability for the core: a view transition is just an event on
/// the UI queue.
struct ChannelNavigator {
    ui_tx: Sender<UiEvent>,
}

impl Navigator for ChannelNavigator {
    fn go_to(&self, view: View) {
        let _ = self.ui_tx.try_send(UiEvent::Navigate(view));
    }
}

async fn run_worker(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    config: BackendConfig,
) {
    let slot_dir = match resolve_slot_dir(config.data_dir) {
        Ok(dir) => dir,
        Err(attempted) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!(
                    "backend worker startup failure: could not resolve a writable data dir ({attempted})"
                ),
            )));
            tracing::error!("unable to resolve result slot directory: {attempted}");
            return;
        }
    };

    let client = match AnalysisClient::new(&config.server_url) {
        Ok(client) => client,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: {err}"),
            )));
            tracing::error!("failed to build analysis client: {err}");
            return;
        }
    };

    let store = JsonFileResultStore::new(&slot_dir);
    let navigator = ChannelNavigator {
        ui_tx: ui_tx.clone(),
    };
    let mut controller = SubmissionController::new();
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::SelectResume { path } => {
                controller.select_resume(resume_candidate_from_path(&path));
                let _ = ui_tx.try_send(UiEvent::SubmissionState(controller.snapshot()));
            }
            BackendCommand::SubmitAnalysis { job_description } => {
                controller.set_job_description(job_description);
                let prepared = match controller.begin_submit() {
                    Ok(prepared) => prepared,
                    Err(err) => {
                        tracing::info!("submission rejected: {err}");
                        let _ = ui_tx.try_send(UiEvent::SubmissionState(controller.snapshot()));
                        continue;
                    }
                };
                // Surface the pending form before awaiting the service.
                let _ = ui_tx.try_send(UiEvent::SubmissionState(controller.snapshot()));

                let outcome = prepared.dispatch(&client).await;
                let failure_detail = outcome.as_ref().err().map(|err| err.to_string());
                if let Err(err) = controller.finish_submit(outcome, &store, &navigator) {
                    tracing::warn!("submission failed: {err}");
                }
                let _ = ui_tx.try_send(UiEvent::SubmissionState(controller.snapshot()));
                if let Some(detail) = failure_detail {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Submit,
                        detail,
                    )));
                }
            }
            BackendCommand::LoadReport => {
                // On failure the navigator has already redirected.
                if let Some(model) = enter_report_view(&store, &navigator) {
                    let _ = ui_tx.try_send(UiEvent::ReportReady(model));
                }
            }
            BackendCommand::StartOver => {
                // A fresh controller, as a new page load would give.
                controller = SubmissionController::new();
                let _ = ui_tx.try_send(UiEvent::SubmissionState(controller.snapshot()));
                let _ = ui_tx.try_send(UiEvent::Navigate(View::Submission));
            }
        }
    }
}

/// Declared MIME type of a picked file, judged from its name only. The
/// controller compares this string against "application/pdf"; contents are
/// never inspected.
fn resume_candidate_from_path(path: &Path) -> ResumeCandidate {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("resume")
        .to_string();
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();
    ResumeCandidate {
        path: path.to_path_buf(),
        file_name,
        mime_type,
    }
}

fn read_non_empty_env_var(name: &str, attempts: &mut Vec<String>) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => {
            attempts.push(format!("{name} was set but empty"));
            None
        }
        Ok(value) => Some(value),
        Err(err) => {
            attempts.push(format!("{name} unavailable: {err}"));
            None
        }
    }
}

fn resolve_slot_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }

    let mut attempts = Vec::new();
    if let Some(dir) = read_non_empty_env_var("RESUME_TAILOR_DATA_DIR", &mut attempts) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(base) = dirs::data_local_dir() {
        return Ok(base.join("resume_tailor"));
    }
    attempts.push("local app data dir unavailable".to_string());
    Err(attempts.join("; "))
}
