use client_core::{
    report::{ListContent, ReportModel, ScoreBand, ScoreCard},
    workflow::View,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_submit_failure, UiErrorCategory, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppViewState {
    Submission,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn band_color(band: ScoreBand) -> egui::Color32 {
    match band {
        ScoreBand::Good => egui::Color32::from_rgb(34, 197, 94),
        ScoreBand::Warning => egui::Color32::from_rgb(234, 179, 8),
        ScoreBand::Bad => egui::Color32::from_rgb(239, 68, 68),
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    view_state: AppViewState,

    // Submission form mirrors. The editor buffer is owned here; the
    // authoritative form state lives in the backend controller and arrives
    // as snapshots.
    job_description: String,
    selected_resume: Option<String>,
    pending: bool,

    report: Option<ReportModel>,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view_state: AppViewState::Submission,
            job_description: String::new(),
            selected_resume: None,
            pending: false,
            report: None,
            status: "Backend worker starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::SubmissionState(snapshot) => {
                    self.pending = snapshot.pending;
                    self.selected_resume = snapshot.resume_file_name;
                    self.status_banner = snapshot.error.map(|message| StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message,
                    });
                    self.status = if self.pending {
                        "Analyzing resume...".to_string()
                    } else {
                        "Ready".to_string()
                    };
                }
                UiEvent::Navigate(view) => match view {
                    View::Report => {
                        self.view_state = AppViewState::Report;
                        self.report = None;
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::LoadReport,
                            &mut self.status,
                        );
                    }
                    View::Submission => {
                        self.view_state = AppViewState::Submission;
                        self.report = None;
                    }
                },
                UiEvent::ReportReady(model) => {
                    self.report = Some(model);
                }
                UiEvent::Error(err) => {
                    self.status = if err.context() == UiErrorContext::Submit {
                        classify_submit_failure(err.message())
                    } else {
                        format!("{} error: {}", err_label(err.category()), err.message())
                    };
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    }
                }
            }
        }
    }

    fn show_status_banner(&self, ui: &mut egui::Ui) {
        if let Some(banner) = &self.status_banner {
            let (fill, text_color) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(68, 28, 28),
                    egui::Color32::from_rgb(252, 165, 165),
                ),
            };
            egui::Frame::NONE
                .fill(fill)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(&banner.message).color(text_color));
                });
            ui.add_space(6.0);
        }
    }

    fn pick_resume_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF documents", &["pdf"])
            .pick_file()
        {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SelectResume { path },
                &mut self.status,
            );
        }
    }

    fn show_submission_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(440.0, 640.0);
            ui.add_space((avail.y * 0.08).clamp(12.0, 70.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::NONE
                    .fill(ui.visuals().panel_fill.gamma_multiply(1.15))
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                        ui.vertical_centered(|ui| {
                            ui.heading("Resume Tailor");
                            ui.weak("Optimize your resume for job applications.");
                        });

                        ui.add_space(8.0);
                        self.show_status_banner(ui);

                        ui.label(egui::RichText::new("Upload Your Resume (PDF)").strong());
                        ui.horizontal(|ui| {
                            if ui.button("Choose PDF file...").clicked() {
                                self.pick_resume_file();
                            }
                            if let Some(name) = &self.selected_resume {
                                ui.small(
                                    egui::RichText::new(format!("File selected: {name}"))
                                        .color(egui::Color32::from_rgb(74, 222, 128)),
                                );
                            }
                        });

                        ui.add_space(4.0);
                        ui.label(egui::RichText::new("Job Description").strong());
                        ui.add(
                            egui::TextEdit::multiline(&mut self.job_description)
                                .desired_rows(8)
                                .desired_width(f32::INFINITY)
                                .hint_text("Paste the job description here..."),
                        );

                        ui.add_space(6.0);
                        let submit_label = if self.pending {
                            "Analyzing..."
                        } else {
                            "Analyze Resume"
                        };
                        let submit_btn = egui::Button::new(
                            egui::RichText::new(submit_label).strong().size(16.0),
                        )
                        .min_size(egui::vec2(ui.available_width(), 40.0));
                        if ui.add_enabled(!self.pending, submit_btn).clicked() {
                            dispatch_backend_command(
                                &self.cmd_tx,
                                BackendCommand::SubmitAnalysis {
                                    job_description: self.job_description.clone(),
                                },
                                &mut self.status,
                            );
                        }

                        ui.add_space(6.0);
                        ui.separator();
                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });
        });
    }

    fn show_report_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(report) = self.report.clone() else {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.weak("Loading results...");
                    });
                });
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                let avail = ui.available_size();
                let card_width = avail.x.clamp(520.0, 760.0);
                ui.add_space(16.0);

                ui.vertical_centered(|ui| {
                    ui.set_width(card_width);
                    ui.heading("Resume Analysis Results");
                    ui.weak("See how well your resume matches the job description.");
                    ui.add_space(10.0);

                    self.overall_card(ui, report.overall);
                    self.match_card(
                        ui,
                        "Skills Match",
                        &report.skills.score,
                        ("Matching Skills", &report.skills.matching),
                        ("Missing Skills", &report.skills.missing),
                        false,
                    );
                    self.match_card(
                        ui,
                        "Keyword Optimization",
                        &report.keywords.score,
                        ("Matching Keywords", &report.keywords.matching),
                        ("Missing Keywords", &report.keywords.missing),
                        true,
                    );
                    self.suggestions_card(ui, &report.suggestions);

                    ui.add_space(8.0);
                    let again_btn = egui::Button::new(
                        egui::RichText::new("Analyze Another Resume").strong(),
                    )
                    .min_size(egui::vec2(240.0, 36.0));
                    if ui.add(again_btn).clicked() {
                        // Fresh form, as a new page load would give.
                        self.job_description.clear();
                        self.selected_resume = None;
                        self.status_banner = None;
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::StartOver,
                            &mut self.status,
                        );
                    }
                    ui.add_space(16.0);
                });
            });
        });
    }

    fn report_card(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::NONE
            .fill(ui.visuals().panel_fill.gamma_multiply(1.15))
            .corner_radius(12.0)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .inner_margin(egui::Margin::symmetric(18, 14))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                add(ui);
            });
        ui.add_space(10.0);
    }

    fn overall_card(&self, ui: &mut egui::Ui, score: ScoreCard) {
        Self::report_card(ui, |ui| {
            ui.label(egui::RichText::new("Overall Match Score").strong().size(18.0));
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}%", score.score))
                        .size(56.0)
                        .strong()
                        .color(band_color(score.band)),
                );
            });
        });
    }

    fn match_card(
        &self,
        ui: &mut egui::Ui,
        title: &str,
        score: &ScoreCard,
        matching: (&str, &ListContent),
        missing: (&str, &ListContent),
        as_chips: bool,
    ) {
        Self::report_card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(title).strong().size(18.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{}%", score.score))
                            .size(24.0)
                            .strong()
                            .color(band_color(score.band)),
                    );
                });
            });
            ui.add_space(6.0);
            ui.columns(2, |columns| {
                Self::list_column(
                    &mut columns[0],
                    matching.0,
                    matching.1,
                    egui::Color32::from_rgb(74, 222, 128),
                    as_chips,
                );
                Self::list_column(
                    &mut columns[1],
                    missing.0,
                    missing.1,
                    egui::Color32::from_rgb(248, 113, 113),
                    as_chips,
                );
            });
        });
    }

    fn list_column(
        ui: &mut egui::Ui,
        heading: &str,
        content: &ListContent,
        accent: egui::Color32,
        as_chips: bool,
    ) {
        ui.label(egui::RichText::new(heading).strong().color(accent));
        ui.add_space(4.0);
        match content {
            ListContent::Items(items) if as_chips => {
                ui.horizontal_wrapped(|ui| {
                    for item in items {
                        egui::Frame::NONE
                            .fill(accent.gamma_multiply(0.2))
                            .corner_radius(10.0)
                            .inner_margin(egui::Margin::symmetric(8, 3))
                            .show(ui, |ui| {
                                ui.small(egui::RichText::new(item).color(accent));
                            });
                    }
                });
            }
            ListContent::Items(items) => {
                for item in items {
                    ui.label(format!("• {item}"));
                }
            }
            ListContent::Empty(placeholder) => {
                ui.label(egui::RichText::new(*placeholder).weak().italics());
            }
        }
    }

    fn suggestions_card(&self, ui: &mut egui::Ui, suggestions: &ListContent) {
        Self::report_card(ui, |ui| {
            ui.label(
                egui::RichText::new("Improvement Suggestions")
                    .strong()
                    .size(18.0),
            );
            ui.add_space(4.0);
            match suggestions {
                ListContent::Items(items) => {
                    for item in items {
                        ui.label(format!("• {item}"));
                    }
                }
                ListContent::Empty(placeholder) => {
                    ui.label(egui::RichText::new(*placeholder).weak().italics());
                }
            }
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.view_state {
            AppViewState::Submission => self.show_submission_screen(ctx),
            AppViewState::Report => self.show_report_screen(ctx),
        }

        // Keep polling the event queue while work may be in flight.
        if self.pending || (self.view_state == AppViewState::Report && self.report.is_none()) {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
