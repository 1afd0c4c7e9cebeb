use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::{launch, BackendConfig};
use controller::events::UiEvent;
use ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(name = "resume-tailor", about = "Desktop client for the resume analysis service")]
struct Cli {
    /// Base URL of the analysis service.
    #[arg(long, default_value = "http://127.0.0.1:5002")]
    server_url: String,
    /// Directory for the persisted analysis result slot. Defaults to the
    /// RESUME_TAILOR_DATA_DIR env var, then the local app data dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(
        cmd_rx,
        ui_tx,
        BackendConfig {
            server_url: cli.server_url,
            data_dir: cli.data_dir,
        },
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Resume Tailor")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([820.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Resume Tailor",
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx)))),
    )
}
