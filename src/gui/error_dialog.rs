//! Window shown when the configuration file cannot be loaded.

use crate::i18n::{CachedTranslations, Language};
use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How the user left the configuration error window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorChoice {
    Quit,
    /// Run this session with default settings, leaving the file untouched.
    UseDefaults,
}

struct ConfigErrorWindow {
    path: PathBuf,
    /// Error chain, outermost context first.
    causes: Vec<String>,
    translations: CachedTranslations,
    use_defaults: Arc<AtomicBool>,
}

impl ConfigErrorWindow {
    fn render_details(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(self.translations.error_config_file())
                    .size(13.0)
                    .color(egui::Color32::from_rgb(200, 200, 215)),
            );
            ui.label(
                egui::RichText::new(self.path.display().to_string())
                    .monospace()
                    .color(egui::Color32::from_rgb(176, 224, 230)),
            );
        });
        ui.add_space(8.0);

        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(45, 40, 52))
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(14, 10))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical().max_height(90.0).show(ui, |ui| {
                    for (depth, cause) in self.causes.iter().enumerate() {
                        let text = if depth == 0 {
                            cause.clone()
                        } else {
                            format!("↳ {cause}")
                        };
                        ui.label(
                            egui::RichText::new(text)
                                .size(13.0)
                                .color(egui::Color32::from_rgb(255, 210, 230)),
                        );
                    }
                });
            });
    }
}

impl eframe::App for ConfigErrorWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut visuals = egui::Visuals::dark();
        super::KeyCaptureGui::apply_flat_style(&mut visuals);
        visuals.panel_fill = egui::Color32::from_rgb(32, 34, 45);
        ctx.set_visuals(visuals);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(self.translations.error_title())
                    .size(22.0)
                    .strong()
                    .color(egui::Color32::from_rgb(255, 100, 130)),
            );
            ui.add_space(10.0);

            self.render_details(ui);

            ui.add_space(10.0);
            ui.label(
                egui::RichText::new(self.translations.error_defaults_hint())
                    .size(12.0)
                    .italics()
                    .color(egui::Color32::from_rgb(170, 170, 185)),
            );
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let defaults_btn = egui::Button::new(
                    egui::RichText::new(self.translations.error_defaults_button())
                        .size(15.0)
                        .color(egui::Color32::WHITE),
                )
                .fill(egui::Color32::from_rgb(135, 206, 235))
                .corner_radius(15.0);
                if ui.add_sized([150.0, 34.0], defaults_btn).clicked() {
                    self.use_defaults.store(true, Ordering::Relaxed);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }

                let quit_btn = egui::Button::new(
                    egui::RichText::new(self.translations.error_close_button())
                        .size(15.0)
                        .color(egui::Color32::WHITE),
                )
                .fill(egui::Color32::from_rgb(255, 182, 193))
                .corner_radius(15.0);
                if ui.add_sized([110.0, 34.0], quit_btn).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

/// Messages of an error and its sources, outermost first, without repeats.
fn error_causes(error: &anyhow::Error) -> Vec<String> {
    let mut causes: Vec<String> = Vec::new();
    for cause in error.chain() {
        let message = cause.to_string();
        if causes.last() != Some(&message) {
            causes.push(message);
        }
    }
    causes
}

/// Shows why the configuration at `path` failed to load and asks whether to
/// continue with defaults.
///
/// The configuration could not be read, so the window is shown in English.
/// Closing the window counts as [`ErrorChoice::Quit`].
///
/// # Errors
///
/// Returns an error if the GUI framework fails to initialize.
pub fn show_config_error(path: &Path, error: &anyhow::Error) -> anyhow::Result<ErrorChoice> {
    log::error!("failed to load {}: {:#}", path.display(), error);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([480.0, 300.0])
        .with_resizable(false)
        .with_title("KeyCapture - Configuration Error")
        .with_always_on_top();

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let use_defaults = Arc::new(AtomicBool::new(false));
    let window = ConfigErrorWindow {
        path: path.to_path_buf(),
        causes: error_causes(error),
        translations: CachedTranslations::new(Language::English),
        use_defaults: use_defaults.clone(),
    };

    eframe::run_native(
        "KeyCapture Error",
        options,
        Box::new(|_cc| Ok(Box::new(window))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to show error dialog: {}", e))?;

    let choice = if use_defaults.load(Ordering::Relaxed) {
        ErrorChoice::UseDefaults
    } else {
        ErrorChoice::Quit
    };
    log::info!("configuration error window closed with {:?}", choice);
    Ok(choice)
}
