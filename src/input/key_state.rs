//! Portable input backend driven entirely by UI events.

use super::{InputApi, SystemMouseState};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, AtomicU64, Ordering};

const BUTTON_LEFT: u8 = 1 << 0;
const BUTTON_RIGHT: u8 = 1 << 1;
const BUTTON_MIDDLE: u8 = 1 << 2;
const BUTTON_4: u8 = 1 << 3;
const BUTTON_5: u8 = 1 << 4;

/// Key-state table fed by the host UI.
///
/// Holds the synthetic pressed flags set through [`InputApi::set_key_state`],
/// the shortcut suppression flag and the last pointer pushed by the host.
pub struct KeyStateTable {
    pressed: scc::HashSet<u16>,
    shortcuts_disabled: AtomicBool,
    pointer_x: AtomicI32,
    pointer_y: AtomicI32,
    pointer_buttons: AtomicU8,
    /// `f64` bits of the display scale.
    pixel_scale: AtomicU64,
}

impl KeyStateTable {
    pub fn new() -> Self {
        Self {
            pressed: scc::HashSet::new(),
            shortcuts_disabled: AtomicBool::new(false),
            pointer_x: AtomicI32::new(0),
            pointer_y: AtomicI32::new(0),
            pointer_buttons: AtomicU8::new(0),
            pixel_scale: AtomicU64::new(1.0f64.to_bits()),
        }
    }

    /// Sets the display scale reported by [`InputApi::pixel_scale`].
    pub fn set_pixel_scale(&self, scale: f64) {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.pixel_scale.store(scale.to_bits(), Ordering::Relaxed);
    }

    /// Returns `true` if the synthetic flag of `code` is set.
    #[inline]
    pub fn is_pressed(&self, code: u16) -> bool {
        self.pressed.contains_sync(&code)
    }
}

impl Default for KeyStateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InputApi for KeyStateTable {
    fn pressed_keys(&self) -> Vec<u16> {
        let mut codes = Vec::with_capacity(8);
        self.pressed.iter_sync(|&code| {
            codes.push(code);
            true
        });
        codes.sort_unstable();
        codes
    }

    fn set_key_state(&self, code: u16, pressed: bool) {
        if pressed {
            let _ = self.pressed.insert_sync(code);
        } else {
            let _ = self.pressed.remove_sync(&code);
        }
    }

    fn reset_key_state(&self) {
        self.pressed.clear_sync();
    }

    fn update_input_devices(&self) {
        log::debug!("portable input backend: keyboard and pointer only");
    }

    fn disable_all_keys(&self, disabled: bool) {
        self.shortcuts_disabled.store(disabled, Ordering::Release);
    }

    fn shortcuts_disabled(&self) -> bool {
        self.shortcuts_disabled.load(Ordering::Acquire)
    }

    fn system_mouse_state(&self) -> SystemMouseState {
        let buttons = self.pointer_buttons.load(Ordering::Relaxed);
        SystemMouseState {
            x: self.pointer_x.load(Ordering::Relaxed),
            y: self.pointer_y.load(Ordering::Relaxed),
            left: buttons & BUTTON_LEFT != 0,
            right: buttons & BUTTON_RIGHT != 0,
            middle: buttons & BUTTON_MIDDLE != 0,
            button4: buttons & BUTTON_4 != 0,
            button5: buttons & BUTTON_5 != 0,
        }
    }

    fn pixel_scale(&self) -> f64 {
        f64::from_bits(self.pixel_scale.load(Ordering::Relaxed))
    }

    fn observe_pointer(&self, state: SystemMouseState) {
        let mut buttons = 0u8;
        for (flag, down) in [
            (BUTTON_LEFT, state.left),
            (BUTTON_RIGHT, state.right),
            (BUTTON_MIDDLE, state.middle),
            (BUTTON_4, state.button4),
            (BUTTON_5, state.button5),
        ] {
            if down {
                buttons |= flag;
            }
        }
        self.pointer_x.store(state.x, Ordering::Relaxed);
        self.pointer_y.store(state.y, Ordering::Relaxed);
        self.pointer_buttons.store(buttons, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_set_and_reset_key_state() {
        let table = KeyStateTable::new();
        table.set_key_state(0x42, true);
        table.set_key_state(0x41, true);
        assert_eq!(table.pressed_keys(), vec![0x41, 0x42]);

        table.set_key_state(0x42, false);
        assert_eq!(table.pressed_keys(), vec![0x41]);
        assert!(table.is_pressed(0x41));

        table.reset_key_state();
        assert!(table.pressed_keys().is_empty());
    }

    #[test]
    fn test_release_of_unpressed_key_is_noop() {
        let table = KeyStateTable::new();
        table.set_key_state(0x41, false);
        assert!(table.pressed_keys().is_empty());
    }

    #[test]
    fn test_shortcut_suppression_flag() {
        let table = KeyStateTable::new();
        assert!(!table.shortcuts_disabled());
        table.disable_all_keys(true);
        assert!(table.shortcuts_disabled());
        table.disable_all_keys(false);
        assert!(!table.shortcuts_disabled());
    }

    #[test]
    fn test_observed_pointer_round_trip() {
        let table = KeyStateTable::new();
        let state = SystemMouseState {
            x: 120,
            y: -4,
            left: true,
            button5: true,
            ..Default::default()
        };
        table.observe_pointer(state);
        assert_eq!(table.system_mouse_state(), state);

        let pressed: Vec<u16> = state
            .buttons()
            .iter()
            .filter(|(_, down)| *down)
            .map(|(code, _)| *code)
            .collect();
        assert_eq!(pressed, vec![keys::MOUSE_LEFT, keys::MOUSE_BUTTON5]);
    }

    #[test]
    fn test_pixel_scale_rejects_invalid_values() {
        let table = KeyStateTable::new();
        assert_eq!(table.pixel_scale(), 1.0);
        table.set_pixel_scale(1.5);
        assert_eq!(table.pixel_scale(), 1.5);
        table.set_pixel_scale(0.0);
        assert_eq!(table.pixel_scale(), 1.0);
        table.set_pixel_scale(f64::NAN);
        assert_eq!(table.pixel_scale(), 1.0);
    }
}
