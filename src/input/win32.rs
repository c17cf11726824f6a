//! Windows input backend.
//!
//! Polls the physical keyboard and mouse with `GetAsyncKeyState`, the cursor
//! with `GetCursorPos` and game controllers through XInput. Synthetic states
//! set by the UI are merged on top through an inner [`KeyStateTable`].

use super::{InputApi, KeyStateTable, SystemMouseState};
use crate::keys;
use std::sync::atomic::{AtomicU8, Ordering};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::HiDpi::GetDpiForSystem;
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::Input::XboxController::{XINPUT_STATE, XInputGetState, XUSER_MAX_COUNT};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, IsProcessDPIAware};

/// Trigger deadzone threshold.
const TRIGGER_THRESHOLD: u8 = 30;

/// Virtual-key codes outside the contiguous ranges polled below.
const EXTRA_VK_CODES: &[u16] = &[
    0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0x5B, 0x5C, 0x5D,
    0x20, 0x0D, 0x09, 0x1B, 0x08, 0x2E, 0x2D, 0x24, 0x23, 0x21, 0x22, 0x26, 0x28, 0x25, 0x27,
    0x14, 0x90, 0x91, 0x13, 0x2C,
    0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F,
    0xBA, 0xBB, 0xBC, 0xBD, 0xBE, 0xBF, 0xC0, 0xDB, 0xDC, 0xDD, 0xDE, 0xDF, 0xE2,
];

/// Win32 mouse virtual keys paired with the synthetic mouse codes.
const MOUSE_VK_CODES: [(i32, u16); 5] = [
    (0x01, keys::MOUSE_LEFT),
    (0x02, keys::MOUSE_RIGHT),
    (0x04, keys::MOUSE_MIDDLE),
    (0x05, keys::MOUSE_BUTTON4),
    (0x06, keys::MOUSE_BUTTON5),
];

#[inline(always)]
fn is_vk_down(vk: i32) -> bool {
    unsafe { GetAsyncKeyState(vk) < 0 }
}

/// Low bit of `GetAsyncKeyState`: key was pressed since the previous query.
#[inline(always)]
fn was_vk_pressed(vk: i32) -> bool {
    unsafe { GetAsyncKeyState(vk) & 1 != 0 }
}

/// Input backend for Windows.
pub struct Win32Input {
    synthetic: KeyStateTable,
    /// Bit per XInput user index that answered the last device refresh.
    connected_pads: AtomicU8,
}

impl Win32Input {
    pub fn new() -> Self {
        Self {
            synthetic: KeyStateTable::new(),
            connected_pads: AtomicU8::new(0),
        }
    }

    fn poll_keyboard(pressed: &mut Vec<u16>) {
        let ranges = (0x30u16..=0x5A).chain(0x60u16..=0x87);
        for vk in ranges.chain(EXTRA_VK_CODES.iter().copied()) {
            if is_vk_down(vk as i32) && keys::key_name(vk).is_some() {
                pressed.push(vk);
            }
        }
    }

    fn poll_controllers(&self, pressed: &mut Vec<u16>) {
        let connected = self.connected_pads.load(Ordering::Relaxed);
        for user_index in 0..XUSER_MAX_COUNT.min(keys::CONTROLLER_PADS as u32) {
            if connected & (1 << user_index) == 0 {
                continue;
            }

            let mut state = XINPUT_STATE::default();
            if unsafe { XInputGetState(user_index, &mut state) } != 0 {
                continue;
            }

            let pad = user_index as u16;
            let buttons = state.Gamepad.wButtons.0;
            for bit in 0..16u16 {
                if buttons & (1 << bit) != 0 {
                    pressed.push(keys::controller_code(pad, bit));
                }
            }
            if state.Gamepad.bLeftTrigger > TRIGGER_THRESHOLD {
                pressed.push(keys::controller_code(pad, keys::BUTTON_LEFT_TRIGGER));
            }
            if state.Gamepad.bRightTrigger > TRIGGER_THRESHOLD {
                pressed.push(keys::controller_code(pad, keys::BUTTON_RIGHT_TRIGGER));
            }
            let gamepad = &state.Gamepad;
            for button in keys::stick_directions(
                gamepad.sThumbLX,
                gamepad.sThumbLY,
                gamepad.sThumbRX,
                gamepad.sThumbRY,
            ) {
                pressed.push(keys::controller_code(pad, button));
            }
        }
    }
}

impl Default for Win32Input {
    fn default() -> Self {
        Self::new()
    }
}

impl InputApi for Win32Input {
    fn pressed_keys(&self) -> Vec<u16> {
        let mut pressed = self.synthetic.pressed_keys();
        // Side-specific modifiers are polled; drop the generic codes the UI reports.
        pressed.retain(|&code| !matches!(code, 0x10..=0x12));
        Self::poll_keyboard(&mut pressed);
        self.poll_controllers(&mut pressed);
        pressed.sort_unstable();
        pressed.dedup();
        pressed
    }

    fn set_key_state(&self, code: u16, state: bool) {
        self.synthetic.set_key_state(code, state);
    }

    fn reset_key_state(&self) {
        self.synthetic.reset_key_state();
    }

    fn update_input_devices(&self) {
        let mut connected = 0u8;
        for user_index in 0..XUSER_MAX_COUNT.min(keys::CONTROLLER_PADS as u32) {
            let mut state = XINPUT_STATE::default();
            if unsafe { XInputGetState(user_index, &mut state) } == 0 {
                connected |= 1 << user_index;
            }
        }
        self.connected_pads.store(connected, Ordering::Relaxed);
        log::debug!("xinput pads connected: {:#06b}", connected);
    }

    fn disable_all_keys(&self, disabled: bool) {
        self.synthetic.disable_all_keys(disabled);
    }

    fn shortcuts_disabled(&self) -> bool {
        self.synthetic.shortcuts_disabled()
    }

    fn system_mouse_state(&self) -> SystemMouseState {
        let mut pos = POINT::default();
        if unsafe { GetCursorPos(&mut pos) }.is_err() {
            return SystemMouseState::default();
        }

        let [left, right, middle, button4, button5] = MOUSE_VK_CODES.map(|(vk, _)| is_vk_down(vk));
        SystemMouseState {
            x: pos.x,
            y: pos.y,
            left,
            right,
            middle,
            button4,
            button5,
        }
    }

    fn pixel_scale(&self) -> f64 {
        // DPI-aware processes already receive physical cursor coordinates.
        if unsafe { IsProcessDPIAware() }.as_bool() {
            return 1.0;
        }
        let dpi = unsafe { GetDpiForSystem() };
        if dpi == 0 { 1.0 } else { dpi as f64 / 96.0 }
    }

    fn take_transient_presses(&self, codes: &[u16]) -> Vec<u16> {
        codes
            .iter()
            .copied()
            .filter(|&code| keys::input_kind(code) == keys::InputKind::Keyboard)
            .filter(|&code| was_vk_pressed(code as i32))
            .collect()
    }
}
