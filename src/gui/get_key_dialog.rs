//! "Press a key" dialog hosting a [`KeyCapture`].

use crate::capture::{CaptureOptions, CaptureOutcome, CaptureStatus, KeyCapture};
use crate::combination::Modifiers;
use crate::geometry::{PixelPoint, Point, Size};
use crate::gui::utils::{
    key_to_code, modifier_transitions, modifiers_from_egui, pointer_state, to_physical,
    viewport_origin,
};
use crate::i18n::CachedTranslations;
use crate::input::{SharedInput, SystemMouseState};
use crate::window::HostWindow;
use eframe::egui;
use std::time::{Duration, Instant};

/// Result of one dialog frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Open,
    Finished,
    Cancelled,
}

/// Dialog area in egui screen coordinates.
struct DialogWindow {
    /// Top-left corner in points, relative to the desktop.
    origin: egui::Pos2,
    size: egui::Vec2,
    pixels_per_point: f32,
}

impl HostWindow for DialogWindow {
    fn point_to_screen(&self, point: Point) -> PixelPoint {
        let pos = egui::pos2(point.x as f32, point.y as f32);
        let (x, y) = to_physical(self.origin, pos, self.pixels_per_point);
        PixelPoint::new(x, y)
    }

    fn client_size(&self) -> Size {
        Size::new(self.size.x as f64, self.size.y as f64)
    }

    fn layout_scale(&self) -> f64 {
        self.pixels_per_point as f64
    }
}

enum KeyEvent {
    Down(u16, Modifiers),
    Up(u16),
    Modifiers(Modifiers),
}

pub struct GetKeyDialog {
    capture: KeyCapture,
    input: SharedInput,
    poll_interval: Duration,
    last_tick: Instant,
    /// Modifier state last forwarded to the capture.
    modifiers: Modifiers,
    /// Dialog rect from the previous frame, in viewport points.
    rect: Option<egui::Rect>,
    /// Cancel button rect from the previous frame, in viewport points.
    cancel_rect: Option<egui::Rect>,
}

impl GetKeyDialog {
    pub fn open(
        ctx: &egui::Context,
        input: SharedInput,
        options: CaptureOptions,
        momentary_keys: &[String],
        poll_interval: Duration,
    ) -> Self {
        let capture = KeyCapture::open(input.clone(), options, momentary_keys);
        Self {
            capture,
            input,
            poll_interval,
            last_tick: Instant::now(),
            // Modifiers held while opening are not part of the capture.
            modifiers: ctx.input(|i| modifiers_from_egui(i.modifiers)),
            rect: None,
            cancel_rect: None,
        }
    }

    /// Consumes the dialog, releasing shortcut suppression.
    pub fn close(self) -> CaptureOutcome {
        self.capture.close()
    }

    /// Renders the dialog and feeds it the frame's input.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        dark_mode: bool,
        translations: &CachedTranslations,
    ) -> DialogResponse {
        let mut status = self.intercept_keys(ctx);

        if status == CaptureStatus::Capturing {
            for code in self.input.take_transient_presses(&self.capture.momentary_codes()) {
                status = self.capture.on_key_up(code);
            }
        }

        if status == CaptureStatus::Capturing {
            self.observe_pointer(ctx);
            if self.last_tick.elapsed() >= self.poll_interval {
                self.last_tick = Instant::now();
                let window = self.host_window(ctx);
                status = self.capture.tick(&window);
            }
            ctx.request_repaint_after(self.poll_interval);
        }

        let cancelled = self.show(ctx, dark_mode, translations);

        if cancelled {
            DialogResponse::Cancelled
        } else if status == CaptureStatus::Finished {
            DialogResponse::Finished
        } else {
            DialogResponse::Open
        }
    }

    /// Removes key events from the frame so no other widget reacts to them.
    fn intercept_keys(&mut self, ctx: &egui::Context) -> CaptureStatus {
        let mut events = Vec::new();
        ctx.input_mut(|i| {
            i.events.retain(|event| match event {
                egui::Event::Key {
                    key,
                    pressed,
                    repeat,
                    modifiers,
                    ..
                } => {
                    let modifiers = modifiers_from_egui(*modifiers);
                    events.push(KeyEvent::Modifiers(modifiers));
                    if let Some(code) = key_to_code(*key)
                        && !*repeat
                    {
                        events.push(if *pressed {
                            KeyEvent::Down(code, modifiers)
                        } else {
                            KeyEvent::Up(code)
                        });
                    }
                    false
                }
                egui::Event::Text(_) | egui::Event::Copy | egui::Event::Cut => false,
                _ => true,
            });
            events.push(KeyEvent::Modifiers(modifiers_from_egui(i.modifiers)));
        });

        let mut status = CaptureStatus::Capturing;
        for event in events {
            let next = match event {
                KeyEvent::Down(code, modifiers) => {
                    self.capture.on_key_down(code, modifiers);
                    CaptureStatus::Capturing
                }
                KeyEvent::Up(code) => self.capture.on_key_up(code),
                KeyEvent::Modifiers(modifiers) => self.sync_modifiers(modifiers),
            };
            if next == CaptureStatus::Finished {
                status = next;
            }
        }
        status
    }

    fn sync_modifiers(&mut self, modifiers: Modifiers) -> CaptureStatus {
        let mut status = CaptureStatus::Capturing;
        for (code, down) in modifier_transitions(self.modifiers, modifiers) {
            if down {
                self.capture.on_key_down(code, modifiers);
            } else if self.capture.on_key_up(code) == CaptureStatus::Finished {
                status = CaptureStatus::Finished;
            }
        }
        self.modifiers = modifiers;
        status
    }

    /// Hands the pointer to backends that cannot read the system cursor.
    fn observe_pointer(&self, ctx: &egui::Context) {
        let state = ctx.input(pointer_state).unwrap_or(SystemMouseState {
            x: i32::MIN,
            y: i32::MIN,
            ..Default::default()
        });
        self.input.observe_pointer(state);
    }

    fn host_window(&self, ctx: &egui::Context) -> DialogWindow {
        let (origin, ppp) = ctx.input(|i| (viewport_origin(i), i.pixels_per_point));
        let rect = capture_area(self.rect.unwrap_or(egui::Rect::NOTHING), self.cancel_rect);
        let size = if rect.is_positive() {
            rect.size()
        } else {
            egui::Vec2::ZERO
        };
        DialogWindow {
            origin: origin + rect.min.to_vec2(),
            size,
            pixels_per_point: ppp,
        }
    }

    /// Draws the dialog. Returns `true` when cancel was clicked.
    fn show(
        &mut self,
        ctx: &egui::Context,
        dark_mode: bool,
        translations: &CachedTranslations,
    ) -> bool {
        let (title_color, text_color, label_bg, label_color) = if dark_mode {
            (
                egui::Color32::from_rgb(176, 224, 230), // Powder blue
                egui::Color32::from_rgb(220, 220, 220), // Light gray text
                egui::Color32::from_rgb(42, 44, 55),    // Dark card bg
                egui::Color32::from_rgb(255, 182, 193), // Soft pink
            )
        } else {
            (
                egui::Color32::from_rgb(135, 206, 235), // Sky blue
                egui::Color32::from_rgb(60, 60, 60),    // Dark text
                egui::Color32::from_rgb(250, 245, 255), // Light card bg
                egui::Color32::from_rgb(219, 112, 147), // Pale violet red
            )
        };

        let mut cancelled = false;
        let response = egui::Window::new(translations.capture_title())
            .id(egui::Id::new("get_key_dialog_window"))
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .fixed_size([400.0, 190.0])
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(translations.capture_title())
                            .size(18.0)
                            .strong()
                            .color(title_color),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(translations.message(self.capture.hint_key()))
                            .size(14.0)
                            .color(text_color),
                    );
                    ui.add_space(12.0);

                    if self.capture.shows_label() {
                        egui::Frame::NONE
                            .fill(label_bg)
                            .corner_radius(egui::CornerRadius::same(12))
                            .inner_margin(egui::Margin::symmetric(16, 8))
                            .show(ui, |ui| {
                                ui.set_min_width(220.0);
                                ui.label(
                                    egui::RichText::new(self.capture.label())
                                        .size(16.0)
                                        .strong()
                                        .color(label_color),
                                );
                            });
                        ui.add_space(12.0);
                    }

                    let cancel_btn = egui::Button::new(
                        egui::RichText::new(translations.cancel_button())
                            .size(14.0)
                            .color(egui::Color32::WHITE),
                    )
                    .fill(egui::Color32::from_rgb(255, 182, 193))
                    .corner_radius(15.0);
                    let cancel = ui.add_sized([110.0, 30.0], cancel_btn);
                    self.cancel_rect = Some(cancel.rect);
                    if cancel.clicked() {
                        cancelled = true;
                    }
                    ui.add_space(8.0);
                });
            });

        if let Some(response) = response {
            self.rect = Some(response.response.rect);
        }
        cancelled
    }
}

/// Part of the dialog that captures mouse buttons: everything above the
/// cancel button row, so clicking cancel is never captured.
fn capture_area(dialog: egui::Rect, cancel: Option<egui::Rect>) -> egui::Rect {
    match cancel {
        Some(cancel) if dialog.is_positive() => egui::Rect::from_min_max(
            dialog.min,
            egui::pos2(dialog.max.x, cancel.min.y.clamp(dialog.min.y, dialog.max.y)),
        ),
        _ => dialog,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputApi, KeyStateTable};
    use crate::keys;
    use crate::momentary::DEFAULT_MOMENTARY_KEYS;
    use crate::window::client_bounds;
    use std::sync::Arc;

    #[test]
    fn test_dialog_window_bounds_in_physical_pixels() {
        let window = DialogWindow {
            origin: egui::pos2(100.0, 50.0),
            size: egui::vec2(400.0, 190.0),
            pixels_per_point: 1.5,
        };
        let bounds = client_bounds(&window, 1.0);
        assert_eq!((bounds.x, bounds.y), (150, 75));
        assert_eq!((bounds.width, bounds.height), (600, 285));
    }

    #[test]
    fn test_capture_area_stops_above_cancel_row() {
        let dialog = egui::Rect::from_min_size(egui::pos2(20.0, 10.0), egui::vec2(400.0, 190.0));
        let cancel = egui::Rect::from_min_size(egui::pos2(165.0, 160.0), egui::vec2(110.0, 30.0));
        let area = capture_area(dialog, Some(cancel));
        assert_eq!(area.min, dialog.min);
        assert_eq!(area.max, egui::pos2(420.0, 160.0));

        assert_eq!(capture_area(dialog, None), dialog);
        assert_eq!(capture_area(egui::Rect::NOTHING, Some(cancel)), egui::Rect::NOTHING);
    }

    #[test]
    fn test_click_on_cancel_row_is_not_captured() {
        let dialog = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(400.0, 190.0));
        let cancel = egui::Rect::from_min_size(egui::pos2(145.0, 150.0), egui::vec2(110.0, 30.0));
        let area = capture_area(dialog, Some(cancel));
        let window = DialogWindow {
            origin: area.min,
            size: area.size(),
            pixels_per_point: 1.0,
        };

        let table = Arc::new(KeyStateTable::new());
        let mut capture = KeyCapture::open(
            table.clone(),
            CaptureOptions::single_key(),
            &DEFAULT_MOMENTARY_KEYS,
        );

        table.observe_pointer(SystemMouseState {
            x: 200,
            y: 165,
            left: true,
            ..Default::default()
        });
        assert_eq!(capture.tick(&window), CaptureStatus::Capturing);
        assert!(!table.is_pressed(keys::MOUSE_LEFT));

        table.observe_pointer(SystemMouseState {
            x: 200,
            y: 60,
            left: true,
            ..Default::default()
        });
        assert_eq!(capture.tick(&window), CaptureStatus::Finished);
        assert_eq!(capture.combination().codes(), &[keys::MOUSE_LEFT]);
    }
}
