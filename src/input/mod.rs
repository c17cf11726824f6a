//! Input device access used by the capture dialog.
//!
//! [`InputApi`] is the seam between capture logic and the platform. The
//! portable [`KeyStateTable`] backend only knows what the UI feeds it, the
//! Windows backend additionally polls the physical keyboard, mouse and
//! XInput controllers.

mod key_state;
#[cfg(windows)]
mod win32;

pub use key_state::KeyStateTable;
#[cfg(windows)]
pub use win32::Win32Input;

use crate::keys;
use std::sync::Arc;

/// Snapshot of the system cursor in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemMouseState {
    pub x: i32,
    pub y: i32,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
    pub button4: bool,
    pub button5: bool,
}

impl SystemMouseState {
    /// Pairs each mouse button code with its current state.
    pub fn buttons(&self) -> [(u16, bool); 5] {
        [
            (keys::MOUSE_LEFT, self.left),
            (keys::MOUSE_RIGHT, self.right),
            (keys::MOUSE_MIDDLE, self.middle),
            (keys::MOUSE_BUTTON4, self.button4),
            (keys::MOUSE_BUTTON5, self.button5),
        ]
    }
}

/// Platform input services.
///
/// All methods take `&self`; implementations keep their state in atomics or
/// concurrent containers so one instance can be shared behind an `Arc`.
pub trait InputApi: Send + Sync {
    /// Codes of every key and button currently pressed.
    fn pressed_keys(&self) -> Vec<u16>;

    /// Resolves a key name, returning [`keys::NO_KEY`] when unknown.
    fn key_code(&self, name: &str) -> u16 {
        keys::key_code(name)
    }

    /// Sets or clears the synthetic pressed flag of a code.
    fn set_key_state(&self, code: u16, pressed: bool);

    /// Clears every synthetic pressed flag.
    fn reset_key_state(&self);

    /// Re-enumerates connected input devices.
    fn update_input_devices(&self);

    /// Enables or disables global shortcut dispatch.
    fn disable_all_keys(&self, disabled: bool);

    /// Returns `true` while global shortcut dispatch is disabled.
    fn shortcuts_disabled(&self) -> bool;

    /// Current cursor position and button states.
    fn system_mouse_state(&self) -> SystemMouseState;

    /// Ratio between physical pixels and the units of [`system_mouse_state`](Self::system_mouse_state).
    fn pixel_scale(&self) -> f64;

    /// Receives the UI's pointer for backends that cannot query the cursor themselves.
    fn observe_pointer(&self, _state: SystemMouseState) {}

    /// Returns the codes among `codes` that were pressed at some point since the
    /// previous call, even if they are already released.
    fn take_transient_presses(&self, _codes: &[u16]) -> Vec<u16> {
        Vec::new()
    }
}

/// Shared handle to an input backend.
pub type SharedInput = Arc<dyn InputApi>;

/// Creates the input backend for the current platform.
pub fn platform_input() -> SharedInput {
    #[cfg(windows)]
    {
        let input = Win32Input::new();
        input.update_input_devices();
        Arc::new(input)
    }
    #[cfg(not(windows))]
    {
        Arc::new(KeyStateTable::new())
    }
}
