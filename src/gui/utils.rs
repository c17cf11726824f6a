//! GUI utility functions.

use crate::combination::Modifiers;
use crate::input::SystemMouseState;
use eframe::egui;
use smallvec::SmallVec;

pub const VK_SHIFT: u16 = 0x10;
pub const VK_CONTROL: u16 = 0x11;
pub const VK_MENU: u16 = 0x12;
pub const VK_LWIN: u16 = 0x5B;

/// Converts egui::Key to a virtual key code.
pub fn key_to_code(key: egui::Key) -> Option<u16> {
    use egui::Key;

    let code = match key {
        Key::A => 0x41,
        Key::B => 0x42,
        Key::C => 0x43,
        Key::D => 0x44,
        Key::E => 0x45,
        Key::F => 0x46,
        Key::G => 0x47,
        Key::H => 0x48,
        Key::I => 0x49,
        Key::J => 0x4A,
        Key::K => 0x4B,
        Key::L => 0x4C,
        Key::M => 0x4D,
        Key::N => 0x4E,
        Key::O => 0x4F,
        Key::P => 0x50,
        Key::Q => 0x51,
        Key::R => 0x52,
        Key::S => 0x53,
        Key::T => 0x54,
        Key::U => 0x55,
        Key::V => 0x56,
        Key::W => 0x57,
        Key::X => 0x58,
        Key::Y => 0x59,
        Key::Z => 0x5A,
        Key::Num0 => 0x30,
        Key::Num1 => 0x31,
        Key::Num2 => 0x32,
        Key::Num3 => 0x33,
        Key::Num4 => 0x34,
        Key::Num5 => 0x35,
        Key::Num6 => 0x36,
        Key::Num7 => 0x37,
        Key::Num8 => 0x38,
        Key::Num9 => 0x39,
        Key::F1 => 0x70,
        Key::F2 => 0x71,
        Key::F3 => 0x72,
        Key::F4 => 0x73,
        Key::F5 => 0x74,
        Key::F6 => 0x75,
        Key::F7 => 0x76,
        Key::F8 => 0x77,
        Key::F9 => 0x78,
        Key::F10 => 0x79,
        Key::F11 => 0x7A,
        Key::F12 => 0x7B,
        Key::F13 => 0x7C,
        Key::F14 => 0x7D,
        Key::F15 => 0x7E,
        Key::F16 => 0x7F,
        Key::F17 => 0x80,
        Key::F18 => 0x81,
        Key::F19 => 0x82,
        Key::F20 => 0x83,
        Key::F21 => 0x84,
        Key::F22 => 0x85,
        Key::F23 => 0x86,
        Key::F24 => 0x87,
        Key::Backspace => 0x08,
        Key::Tab => 0x09,
        Key::Enter => 0x0D,
        Key::Escape => 0x1B,
        Key::Space => 0x20,
        Key::PageUp => 0x21,
        Key::PageDown => 0x22,
        Key::End => 0x23,
        Key::Home => 0x24,
        Key::ArrowLeft => 0x25,
        Key::ArrowUp => 0x26,
        Key::ArrowRight => 0x27,
        Key::ArrowDown => 0x28,
        Key::Insert => 0x2D,
        Key::Delete => 0x2E,
        Key::Semicolon | Key::Colon => 0xBA,
        Key::Equals | Key::Plus => 0xBB,
        Key::Comma => 0xBC,
        Key::Minus => 0xBD,
        Key::Period => 0xBE,
        Key::Slash | Key::Questionmark => 0xBF,
        Key::Backtick => 0xC0,
        Key::OpenBracket | Key::OpenCurlyBracket => 0xDB,
        Key::Backslash | Key::Pipe => 0xDC,
        Key::CloseBracket | Key::CloseCurlyBracket => 0xDD,
        Key::Quote => 0xDE,
        _ => return None,
    };
    Some(code)
}

/// Top-left of the viewport's client area on the desktop, in points.
pub fn viewport_origin(input: &egui::InputState) -> egui::Pos2 {
    input
        .viewport()
        .inner_rect
        .map(|rect| rect.min)
        .unwrap_or(egui::Pos2::ZERO)
}

/// Converts a viewport position in points to desktop pixels.
pub fn to_physical(origin: egui::Pos2, pos: egui::Pos2, pixels_per_point: f32) -> (i32, i32) {
    (
        ((origin.x + pos.x) * pixels_per_point).round() as i32,
        ((origin.y + pos.y) * pixels_per_point).round() as i32,
    )
}

/// Pointer position in desktop pixels with the held buttons.
///
/// `None` while egui has no pointer position for the viewport.
pub fn pointer_state(input: &egui::InputState) -> Option<SystemMouseState> {
    let pos = input.pointer.latest_pos()?;
    let (x, y) = to_physical(viewport_origin(input), pos, input.pixels_per_point);
    let pointer = &input.pointer;
    Some(SystemMouseState {
        x,
        y,
        left: pointer.button_down(egui::PointerButton::Primary),
        right: pointer.button_down(egui::PointerButton::Secondary),
        middle: pointer.button_down(egui::PointerButton::Middle),
        button4: pointer.button_down(egui::PointerButton::Extra1),
        button5: pointer.button_down(egui::PointerButton::Extra2),
    })
}

/// Converts egui modifier flags. The logo key is only reported on macOS.
pub fn modifiers_from_egui(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        shift: modifiers.shift,
        logo: modifiers.mac_cmd,
    }
}

/// Modifier key presses and releases between two modifier states.
///
/// egui reports modifiers as flags on other events, never as key events.
pub fn modifier_transitions(before: Modifiers, after: Modifiers) -> SmallVec<[(u16, bool); 4]> {
    let mut changes = SmallVec::new();
    for (code, was, is) in [
        (VK_CONTROL, before.ctrl, after.ctrl),
        (VK_MENU, before.alt, after.alt),
        (VK_SHIFT, before.shift, after.shift),
        (VK_LWIN, before.logo, after.logo),
    ] {
        if was != is {
            changes.push((code, is));
        }
    }
    changes
}
