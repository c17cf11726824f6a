//! Key capture state machine behind the "press a key" dialog.
//!
//! A [`KeyCapture`] is created when the dialog opens and consumed when it
//! closes. In between, the host forwards key events and calls [`KeyCapture::tick`]
//! at a fixed interval. Global shortcut dispatch stays suppressed for exactly
//! the lifetime of the capture.


use crate::combination::{KeyCombination, Modifiers, ShortcutKey};
use crate::geometry::PixelPoint;
use crate::input::SharedInput;
use crate::momentary::MomentaryKeys;
use crate::suppression::ShortcutSuppression;
use crate::window::{HostWindow, client_bounds};
use smallvec::SmallVec;
use std::time::Duration;

/// Interval between two polls of the input devices.
pub const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Hint message key shown by keyboard-only captures.
pub const HINT_KEYBOARD: &str = "SetKeyHint";
/// Hint message key shown when mouse buttons can be captured too.
pub const HINT_KEYBOARD_MOUSE: &str = "SetKeyMouseHint";

/// Behaviour flags of one capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Only keyboard events are used; the capture ends on the first key release.
    pub keyboard_only: bool,
    /// Resolve as soon as anything is pressed, keeping the highest code.
    pub single_key: bool,
}

impl CaptureOptions {
    pub fn keyboard_only() -> Self {
        Self {
            keyboard_only: true,
            single_key: false,
        }
    }

    pub fn single_key() -> Self {
        Self {
            keyboard_only: false,
            single_key: true,
        }
    }
}

/// Whether the dialog should stay open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    Capturing,
    Finished,
}

/// Values produced by a closed capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Resolved combination. Empty for keyboard-only or cancelled captures.
    pub combination: KeyCombination,
    /// Last modifier+key pair pressed while the capture was open.
    pub shortcut: ShortcutKey,
    /// `false` when the dialog was closed before the capture finished.
    pub resolved: bool,
}

/// Live state of an open capture dialog.
pub struct KeyCapture {
    input: SharedInput,
    options: CaptureOptions,
    momentary: MomentaryKeys,
    /// Codes seen on the previous tick.
    prev_codes: SmallVec<[u16; 8]>,
    combination: KeyCombination,
    shortcut: ShortcutKey,
    label: String,
    finished: bool,
    _suppression: ShortcutSuppression,
}

impl KeyCapture {
    /// Opens a capture: refreshes devices, clears stale key state and
    /// suppresses global shortcuts until the capture is closed or dropped.
    pub fn open<S: AsRef<str>>(
        input: SharedInput,
        options: CaptureOptions,
        momentary_names: &[S],
    ) -> Self {
        let momentary = MomentaryKeys::resolve(input.as_ref(), momentary_names);

        input.update_input_devices();
        input.reset_key_state();
        let suppression = ShortcutSuppression::acquire(input.clone());

        log::debug!(
            "key capture opened (keyboard_only: {}, single_key: {})",
            options.keyboard_only,
            options.single_key
        );

        Self {
            input,
            options,
            momentary,
            prev_codes: SmallVec::new(),
            combination: KeyCombination::default(),
            shortcut: ShortcutKey::default(),
            label: String::new(),
            finished: false,
            _suppression: suppression,
        }
    }

    /// Handles a key press routed to the dialog before any other handler.
    pub fn on_key_down(&mut self, code: u16, modifiers: Modifiers) {
        if self.finished {
            return;
        }
        self.input.set_key_state(code, true);
        self.shortcut = ShortcutKey::new(modifiers, code);
        self.momentary.mark_hit(code);
    }

    /// Handles a key release. Keyboard-only captures finish on the first release.
    pub fn on_key_up(&mut self, code: u16) -> CaptureStatus {
        if self.finished {
            return CaptureStatus::Finished;
        }
        self.input.set_key_state(code, false);
        // Some keys only ever report a release.
        self.momentary.mark_hit(code);

        if self.options.keyboard_only {
            self.finished = true;
            log::debug!("keyboard-only capture finished with {:?}", self.shortcut.to_string());
            return CaptureStatus::Finished;
        }
        CaptureStatus::Capturing
    }

    /// Samples the input devices once.
    pub fn tick(&mut self, window: &dyn HostWindow) -> CaptureStatus {
        if self.finished {
            return CaptureStatus::Finished;
        }

        if self.options.keyboard_only {
            self.label = self.shortcut.to_string();
            return CaptureStatus::Capturing;
        }

        self.sample_mouse(window);

        let mut codes = self.input.pressed_keys();

        // Momentary keys must persist for at least one tick.
        self.momentary.drain_into(&mut codes);

        if self.options.single_key {
            // Highest code wins when several buttons are pressed at once.
            if let Some(&code) = codes.iter().max() {
                self.select(KeyCombination::single(code));
            }
        } else {
            let key = KeyCombination::new(&self.prev_codes);
            self.label = key.to_string();

            // A shrinking set means the user released a key.
            if codes.len() < self.prev_codes.len() {
                self.select(key);
            }

            self.prev_codes = SmallVec::from_vec(codes);
        }

        if self.finished {
            CaptureStatus::Finished
        } else {
            CaptureStatus::Capturing
        }
    }

    /// Feeds mouse buttons into the key table while the cursor is over the dialog.
    fn sample_mouse(&self, window: &dyn HostWindow) {
        let mouse = self.input.system_mouse_state();
        let bounds = client_bounds(window, self.input.pixel_scale());
        let inside = bounds.contains(PixelPoint::new(mouse.x, mouse.y));
        for (code, down) in mouse.buttons() {
            self.input.set_key_state(code, inside && down);
        }
    }

    /// Accepts `key` unless it renders as a blank string.
    fn select(&mut self, key: KeyCombination) {
        if key.to_string().trim().is_empty() {
            log::trace!("ignoring blank combination {:?}", key.codes());
            return;
        }
        log::debug!("key capture resolved to {}", key);
        self.combination = key;
        self.finished = true;
    }

    /// Closes the capture and restores global shortcuts.
    pub fn close(self) -> CaptureOutcome {
        log::debug!("key capture closed (resolved: {})", self.finished);
        CaptureOutcome {
            combination: self.combination,
            shortcut: self.shortcut,
            resolved: self.finished,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text of the live combination label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Single-key captures resolve immediately and hide the live label.
    #[inline]
    pub fn shows_label(&self) -> bool {
        !self.options.single_key
    }

    pub fn hint_key(&self) -> &'static str {
        if self.options.keyboard_only {
            HINT_KEYBOARD
        } else {
            HINT_KEYBOARD_MOUSE
        }
    }

    #[inline]
    pub fn combination(&self) -> &KeyCombination {
        &self.combination
    }

    #[inline]
    pub fn shortcut(&self) -> ShortcutKey {
        self.shortcut
    }

    pub fn momentary_codes(&self) -> SmallVec<[u16; 4]> {
        self.momentary.codes()
    }
}
