//! GUI module for application interface components.
//!
//! A small bindings window built on `egui`: each row shows one action and its
//! binding, clicking the binding opens the capture dialog.

mod error_dialog;
mod fonts;
mod get_key_dialog;
mod utils;

use crate::capture::CaptureOptions;
use crate::combination::{KeyCombination, Modifiers, ShortcutKey};
use crate::config::CaptureConfig;
use crate::gui::get_key_dialog::{DialogResponse, GetKeyDialog};
use crate::gui::utils::{key_to_code, modifier_transitions, modifiers_from_egui, pointer_state};
use crate::i18n::CachedTranslations;
use crate::input::SharedInput;
use crate::keys;
use crate::shortcuts::ShortcutDispatcher;
use eframe::egui;

pub use error_dialog::{ErrorChoice, show_config_error};

/// Actions the sample bindings trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleTheme,
    Increment,
    Reset,
}

/// One row of the bindings list.
struct Binding {
    action: Action,
    options: CaptureOptions,
    combination: KeyCombination,
    /// Used by keyboard-only bindings instead of `combination`.
    shortcut: ShortcutKey,
}

impl Binding {
    fn display(&self) -> String {
        if self.options.keyboard_only {
            self.shortcut.to_string()
        } else {
            self.combination.to_string()
        }
    }
}

fn default_bindings() -> Vec<Binding> {
    vec![
        Binding {
            action: Action::ToggleTheme,
            options: CaptureOptions::default(),
            combination: KeyCombination::new(&[0xA2, 0x54]),
            shortcut: ShortcutKey::default(),
        },
        Binding {
            action: Action::Increment,
            options: CaptureOptions::single_key(),
            combination: KeyCombination::single(keys::controller_code(0, 12)),
            shortcut: ShortcutKey::default(),
        },
        Binding {
            action: Action::Reset,
            options: CaptureOptions::keyboard_only(),
            combination: KeyCombination::default(),
            shortcut: ShortcutKey::new(
                Modifiers {
                    ctrl: true,
                    ..Modifiers::NONE
                },
                0x74,
            ),
        },
    ]
}

/// Main GUI application structure.
pub struct KeyCaptureGui {
    config: CaptureConfig,
    input: SharedInput,
    /// Cached translations for high-performance rendering
    translations: CachedTranslations,
    dark_mode: bool,
    bindings: Vec<Binding>,
    dispatcher: ShortcutDispatcher<Action>,
    /// Open capture dialog and the binding row it edits
    dialog: Option<(usize, GetKeyDialog)>,
    /// Modifier state last forwarded to the input backend
    modifiers: Modifiers,
    counter: u32,
    last_action: Option<Action>,
    /// Cached dark theme visuals
    cached_dark_visuals: egui::Visuals,
    /// Cached light theme visuals
    cached_light_visuals: egui::Visuals,
}

impl KeyCaptureGui {
    /// Creates a new GUI instance with the given configuration and input backend.
    pub fn new(config: CaptureConfig, input: SharedInput) -> Self {
        let translations = CachedTranslations::new(config.language);
        let bindings = default_bindings();
        let mut dispatcher = ShortcutDispatcher::new();
        for binding in &bindings {
            if !binding.options.keyboard_only {
                dispatcher.bind(binding.combination.clone(), binding.action);
            }
        }

        Self {
            dark_mode: config.dark_mode,
            config,
            input,
            translations,
            bindings,
            dispatcher,
            dialog: None,
            modifiers: Modifiers::NONE,
            counter: 0,
            last_action: None,
            cached_dark_visuals: Self::create_dark_visuals(),
            cached_light_visuals: Self::create_light_visuals(),
        }
    }

    /// Creates dark theme visuals configuration.
    fn create_dark_visuals() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();
        Self::apply_flat_style(&mut visuals);

        visuals.window_fill = egui::Color32::from_rgb(25, 27, 35);
        visuals.panel_fill = egui::Color32::from_rgb(30, 32, 40);
        visuals.faint_bg_color = egui::Color32::from_rgb(35, 37, 45);
        visuals.widgets.noninteractive.weak_bg_fill = egui::Color32::from_rgb(38, 40, 50);
        visuals.extreme_bg_color = egui::Color32::from_rgb(42, 44, 55);
        visuals
    }

    /// Creates light theme visuals configuration.
    fn create_light_visuals() -> egui::Visuals {
        let mut visuals = egui::Visuals::light();
        Self::apply_flat_style(&mut visuals);

        visuals.window_fill = egui::Color32::from_rgb(240, 235, 245);
        visuals.panel_fill = egui::Color32::from_rgb(238, 233, 243);
        visuals.faint_bg_color = egui::Color32::from_rgb(245, 240, 250);
        visuals.widgets.noninteractive.weak_bg_fill = egui::Color32::from_rgb(250, 245, 255);
        visuals.extreme_bg_color = egui::Color32::from_rgb(235, 230, 245);
        visuals
    }

    /// Rounded corners, no borders.
    fn apply_flat_style(visuals: &mut egui::Visuals) {
        visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(18);
        visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(18);
        visuals.widgets.active.corner_radius = egui::CornerRadius::same(18);
        visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(12);
        visuals.widgets.open.corner_radius = egui::CornerRadius::same(18);

        visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;
        visuals.widgets.hovered.bg_stroke = egui::Stroke::NONE;
        visuals.widgets.active.bg_stroke = egui::Stroke::NONE;
        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::NONE;
        visuals.selection.stroke.width = 0.0;

        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 4],
            blur: 18,
            spread: 0,
            color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 25),
        };
        visuals.popup_shadow = egui::epaint::Shadow {
            offset: [0, 3],
            blur: 12,
            spread: 0,
            color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 20),
        };
    }

    fn open_dialog(&mut self, ctx: &egui::Context, row: usize) {
        let Some(binding) = self.bindings.get(row) else {
            return;
        };
        let dialog = GetKeyDialog::open(
            ctx,
            self.input.clone(),
            binding.options,
            &self.config.momentary_keys,
            self.config.poll_interval(),
        );
        self.dialog = Some((row, dialog));
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some((row, dialog)) = self.dialog.as_mut() else {
            return;
        };
        let row = *row;
        let response = dialog.render(ctx, self.dark_mode, &self.translations);
        if response == DialogResponse::Open {
            return;
        }

        let Some((_, dialog)) = self.dialog.take() else {
            return;
        };
        let outcome = dialog.close();
        if response == DialogResponse::Cancelled || !outcome.resolved {
            return;
        }

        // Keys used for the capture are still down on the host side.
        self.input.reset_key_state();

        if let Some(binding) = self.bindings.get_mut(row) {
            if binding.options.keyboard_only {
                binding.shortcut = outcome.shortcut;
            } else {
                binding.combination = outcome.combination.clone();
                self.dispatcher.bind(outcome.combination, binding.action);
                // A single-key binding is still held when the capture resolves.
                self.dispatcher.resync(self.input.as_ref());
            }
            log::info!("{:?} bound to {}", binding.action, binding.display());
        }
    }

    /// Mirrors the UI's keys and pointer into the input backend.
    fn sync_input(&mut self, ctx: &egui::Context) {
        let (key_events, modifiers, focused, pointer) = ctx.input(|i| {
            let keys: Vec<(u16, bool)> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed,
                        repeat: false,
                        ..
                    } => key_to_code(*key).map(|code| (code, *pressed)),
                    _ => None,
                })
                .collect();
            (keys, modifiers_from_egui(i.modifiers), i.focused, pointer_state(i))
        });

        if !focused {
            if !self.input.pressed_keys().is_empty() {
                self.input.reset_key_state();
            }
            self.modifiers = Modifiers::NONE;
            return;
        }

        for (code, pressed) in key_events {
            self.input.set_key_state(code, pressed);
        }
        for (code, down) in modifier_transitions(self.modifiers, modifiers) {
            self.input.set_key_state(code, down);
        }
        self.modifiers = modifiers;

        if let Some(pointer) = pointer {
            self.input.observe_pointer(pointer);
        }
        for (code, down) in self.input.system_mouse_state().buttons() {
            self.input.set_key_state(code, down);
        }
    }

    /// Keyboard-only bindings fire from key presses with matching modifiers.
    fn pressed_shortcut(&self, ctx: &egui::Context) -> Option<Action> {
        if self.input.shortcuts_disabled() {
            return None;
        }
        ctx.input(|i| {
            i.events.iter().find_map(|event| {
                let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } = event
                else {
                    return None;
                };
                let pressed = ShortcutKey::new(modifiers_from_egui(*modifiers), key_to_code(*key)?);
                self.bindings
                    .iter()
                    .find(|b| b.options.keyboard_only && !b.shortcut.is_empty() && b.shortcut == pressed)
                    .map(|b| b.action)
            })
        })
    }

    fn run_action(&mut self, action: Action) {
        log::debug!("shortcut fired: {:?}", action);
        match action {
            Action::ToggleTheme => self.dark_mode = !self.dark_mode,
            Action::Increment => self.counter = self.counter.saturating_add(1),
            Action::Reset => self.counter = 0,
        }
        self.last_action = Some(action);
    }

    fn action_name(&self, action: Action) -> &str {
        match action {
            Action::ToggleTheme => self.translations.action_toggle_theme(),
            Action::Increment => self.translations.action_increment(),
            Action::Reset => self.translations.action_reset(),
        }
    }

    fn mode_name(&self, options: CaptureOptions) -> &str {
        if options.keyboard_only {
            self.translations.mode_keyboard_only()
        } else if options.single_key {
            self.translations.mode_single_key()
        } else {
            self.translations.mode_combination()
        }
    }

    fn render_main_content(&mut self, ctx: &egui::Context) {
        let capturing = self.dialog.is_some();
        let mut open_row = None;
        let mut clear_row = None;
        let mut toggle_theme = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!capturing, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(self.translations.bindings_title())
                            .size(18.0)
                            .strong()
                            .color(if self.dark_mode {
                                egui::Color32::from_rgb(176, 224, 230)
                            } else {
                                egui::Color32::from_rgb(135, 206, 235)
                            }),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = if self.dark_mode {
                            self.translations.light_theme()
                        } else {
                            self.translations.dark_theme()
                        };
                        if ui.button(theme_label).clicked() {
                            toggle_theme = true;
                        }
                    });
                });
                ui.add_space(12.0);

                egui::Grid::new("bindings_grid")
                    .num_columns(4)
                    .spacing([16.0, 10.0])
                    .show(ui, |ui| {
                        for (row, binding) in self.bindings.iter().enumerate() {
                            ui.label(self.action_name(binding.action));
                            ui.label(egui::RichText::new(self.mode_name(binding.options)).weak());

                            let text = binding.display();
                            let text = if text.is_empty() {
                                self.translations.not_bound().to_string()
                            } else {
                                text
                            };
                            if ui.add_sized([180.0, 28.0], egui::Button::new(text)).clicked() {
                                open_row = Some(row);
                            }
                            if ui.button(self.translations.clear_button()).clicked() {
                                clear_row = Some(row);
                            }
                            ui.end_row();
                        }
                    });

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    ui.label(self.translations.counter_label());
                    ui.label(egui::RichText::new(self.counter.to_string()).strong());
                });
                if let Some(action) = self.last_action {
                    ui.horizontal(|ui| {
                        ui.label(self.translations.last_triggered());
                        ui.label(self.action_name(action));
                    });
                }
            });
        });

        if toggle_theme {
            self.dark_mode = !self.dark_mode;
        }
        if let Some(row) = clear_row
            && let Some(binding) = self.bindings.get_mut(row)
        {
            binding.combination = KeyCombination::default();
            binding.shortcut = ShortcutKey::default();
            self.dispatcher.bind(KeyCombination::default(), binding.action);
        }
        if let Some(row) = open_row {
            self.open_dialog(ctx, row);
        }
    }

    /// Launches the GUI application.
    ///
    /// # Errors
    ///
    /// Returns an error if the GUI framework fails to initialize or run.
    pub fn run(config: CaptureConfig, input: SharedInput) -> anyhow::Result<()> {
        let translations = CachedTranslations::new(config.language);

        let mut viewport = egui::ViewportBuilder::default()
            .with_inner_size([560.0, 360.0])
            .with_min_inner_size([480.0, 320.0])
            .with_resizable(true)
            .with_title(translations.app_title());

        if config.always_on_top {
            viewport = viewport.with_always_on_top();
        }

        let options = eframe::NativeOptions {
            viewport,
            ..Default::default()
        };

        let language = config.language;

        eframe::run_native(
            "KeyCapture",
            options,
            Box::new(move |cc| {
                fonts::load_fonts(&cc.egui_ctx, language);
                Ok(Box::new(KeyCaptureGui::new(config, input)))
            }),
        )
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
    }
}

impl eframe::App for KeyCaptureGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.dark_mode {
            self.cached_dark_visuals.clone()
        } else {
            self.cached_light_visuals.clone()
        });

        if self.dialog.is_some() {
            self.render_dialog(ctx);
        } else {
            self.sync_input(ctx);
            if let Some(action) = self.pressed_shortcut(ctx) {
                self.run_action(action);
            }
        }

        if let Some(action) = self.dispatcher.dispatch(self.input.as_ref()) {
            self.run_action(action);
        }

        self.render_main_content(ctx);

        // Controllers are only seen by polling.
        ctx.request_repaint_after(self.config.poll_interval());
    }
}
