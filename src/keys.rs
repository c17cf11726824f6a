//! Scan-code space shared by every input source.
//!
//! Keyboard keys use Windows virtual-key codes, mouse buttons and controller
//! buttons live in their own ranges above the keyboard table so that a single
//! `u16` can identify any bindable input.

use smallvec::SmallVec;

/// Code reported for a name that does not resolve to any key.
pub const NO_KEY: u16 = 0;

/// Synthetic mouse button codes.
pub const MOUSE_LEFT: u16 = 0x200;
pub const MOUSE_RIGHT: u16 = 0x201;
pub const MOUSE_MIDDLE: u16 = 0x202;
pub const MOUSE_BUTTON4: u16 = 0x203;
pub const MOUSE_BUTTON5: u16 = 0x204;

/// First controller code. Each pad owns a block of `CONTROLLER_PAD_STRIDE` codes.
pub const CONTROLLER_BASE: u16 = 0x1000;
pub const CONTROLLER_PAD_STRIDE: u16 = 0x100;
/// Number of controller pads with a reserved code block.
pub const CONTROLLER_PADS: u16 = 4;

/// Controller button names, indexed by button number.
///
/// Buttons 0..=15 follow the XInput `wButtons` bit order, 16 and 17 are the
/// triggers, 18..=25 are thumbstick directions.
const CONTROLLER_BUTTONS: [&str; 26] = [
    "DPAD_UP",
    "DPAD_DOWN",
    "DPAD_LEFT",
    "DPAD_RIGHT",
    "START",
    "BACK",
    "LS",
    "RS",
    "LB",
    "RB",
    "",
    "",
    "A",
    "B",
    "X",
    "Y",
    "LT",
    "RT",
    "LS_UP",
    "LS_DOWN",
    "LS_LEFT",
    "LS_RIGHT",
    "RS_UP",
    "RS_DOWN",
    "RS_LEFT",
    "RS_RIGHT",
];

/// Controller button number of the left trigger.
pub const BUTTON_LEFT_TRIGGER: u16 = 16;
/// Controller button number of the right trigger.
pub const BUTTON_RIGHT_TRIGGER: u16 = 17;
/// Controller button number of the first stick direction (left stick up).
pub const BUTTON_LEFT_STICK_UP: u16 = 18;
/// Controller button number of the first right stick direction.
pub const BUTTON_RIGHT_STICK_UP: u16 = 22;

/// Analog stick deadzone, ~24% of the axis range.
pub const STICK_DEADZONE: i16 = 7849;

/// Button numbers of the stick directions pushed past [`STICK_DEADZONE`].
///
/// Each stick reports at most one vertical and one horizontal direction.
pub fn stick_directions(lx: i16, ly: i16, rx: i16, ry: i16) -> SmallVec<[u16; 4]> {
    let mut active = SmallVec::new();
    for (base, x, y) in [
        (BUTTON_LEFT_STICK_UP, lx, ly),
        (BUTTON_RIGHT_STICK_UP, rx, ry),
    ] {
        if y > STICK_DEADZONE {
            active.push(base);
        } else if y < -STICK_DEADZONE {
            active.push(base + 1);
        }
        if x < -STICK_DEADZONE {
            active.push(base + 2);
        } else if x > STICK_DEADZONE {
            active.push(base + 3);
        }
    }
    active
}

/// Keys with fixed names that are not covered by a numeric pattern.
const NAMED_KEYS: &[(u16, &str)] = &[
    // Navigation keys
    (0x20, "SPACE"),
    (0x0D, "RETURN"),
    (0x09, "TAB"),
    (0x1B, "ESCAPE"),
    (0x08, "BACK"),
    (0x2E, "DELETE"),
    (0x2D, "INSERT"),
    (0x24, "HOME"),
    (0x23, "END"),
    (0x21, "PAGEUP"),
    (0x22, "PAGEDOWN"),
    (0x26, "UP"),
    (0x28, "DOWN"),
    (0x25, "LEFT"),
    (0x27, "RIGHT"),
    // Lock and special keys
    (0x14, "CAPITAL"),
    (0x90, "NUMLOCK"),
    (0x91, "SCROLL"),
    (0x13, "PAUSE"),
    (0x2C, "SNAPSHOT"),
    (0x5D, "APPS"),
    // Numpad operators
    (0x6A, "MULTIPLY"),
    (0x6B, "ADD"),
    (0x6C, "SEPARATOR"),
    (0x6D, "SUBTRACT"),
    (0x6E, "DECIMAL"),
    (0x6F, "DIVIDE"),
    // OEM keys
    (0xBA, "OEM_1"),
    (0xBB, "OEM_PLUS"),
    (0xBC, "OEM_COMMA"),
    (0xBD, "OEM_MINUS"),
    (0xBE, "OEM_PERIOD"),
    (0xBF, "OEM_2"),
    (0xC0, "OEM_3"),
    (0xDB, "OEM_4"),
    (0xDC, "OEM_5"),
    (0xDD, "OEM_6"),
    (0xDE, "OEM_7"),
    (0xDF, "OEM_8"),
    (0xE2, "OEM_102"),
    // Modifiers
    (0x10, "SHIFT"),
    (0x11, "CTRL"),
    (0x12, "ALT"),
    (0xA2, "LCTRL"),
    (0xA3, "RCTRL"),
    (0xA4, "LALT"),
    (0xA5, "RALT"),
    (0xA0, "LSHIFT"),
    (0xA1, "RSHIFT"),
    (0x5B, "LWIN"),
    (0x5C, "RWIN"),
    // Mouse buttons
    (MOUSE_LEFT, "LBUTTON"),
    (MOUSE_RIGHT, "RBUTTON"),
    (MOUSE_MIDDLE, "MBUTTON"),
    (MOUSE_BUTTON4, "XBUTTON1"),
    (MOUSE_BUTTON5, "XBUTTON2"),
];

/// Alternative spellings accepted by [`key_code`], already normalized.
const ALIASES: &[(&str, u16)] = &[
    ("PRINTSCREEN", 0x2C),
    ("PRTSC", 0x2C),
    ("BREAK", 0x13),
    ("ESC", 0x1B),
    ("ENTER", 0x0D),
    ("BACKSPACE", 0x08),
    ("DEL", 0x2E),
    ("INS", 0x2D),
    ("PGUP", 0x21),
    ("PGDN", 0x22),
    ("CAPSLOCK", 0x14),
    ("SCROLLLOCK", 0x91),
    ("MENU", 0x5D),
    ("CONTROL", 0x11),
    ("LEFTCTRL", 0xA2),
    ("RIGHTCTRL", 0xA3),
    ("LEFTALT", 0xA4),
    ("RIGHTALT", 0xA5),
    ("LEFTSHIFT", 0xA0),
    ("RIGHTSHIFT", 0xA1),
    ("MOUSELEFT", MOUSE_LEFT),
    ("MOUSERIGHT", MOUSE_RIGHT),
    ("MOUSEMIDDLE", MOUSE_MIDDLE),
    ("MOUSE4", MOUSE_BUTTON4),
    ("MOUSE5", MOUSE_BUTTON5),
];

/// Broad classification of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Keyboard,
    Mouse,
    Controller,
}

/// Returns which device family a code belongs to.
#[inline]
pub fn input_kind(code: u16) -> InputKind {
    if code >= CONTROLLER_BASE {
        InputKind::Controller
    } else if (MOUSE_LEFT..=MOUSE_BUTTON5).contains(&code) {
        InputKind::Mouse
    } else {
        InputKind::Keyboard
    }
}

/// Returns `true` for controller codes.
#[inline(always)]
pub fn is_controller(code: u16) -> bool {
    input_kind(code) == InputKind::Controller
}

/// Builds the code of a controller button.
#[inline]
pub fn controller_code(pad: u16, button: u16) -> u16 {
    CONTROLLER_BASE + pad * CONTROLLER_PAD_STRIDE + button
}

/// Ordering rank for modifier keys: Ctrl, Alt, Shift, Win.
///
/// Returns `None` for every non-modifier code.
#[inline]
pub fn modifier_rank(code: u16) -> Option<u8> {
    match code {
        0x11 | 0xA2 | 0xA3 => Some(0),
        0x12 | 0xA4 | 0xA5 => Some(1),
        0x10 | 0xA0 | 0xA1 => Some(2),
        0x5B | 0x5C => Some(3),
        _ => None,
    }
}

/// Converts a code to its display name.
pub fn key_name(code: u16) -> Option<String> {
    match code {
        NO_KEY => None,
        // A-Z, 0-9
        0x41..=0x5A | 0x30..=0x39 => char::from_u32(code as u32).map(|c| c.to_string()),
        // Numpad 0-9
        0x60..=0x69 => Some(format!("NUMPAD{}", code - 0x60)),
        // F1-F24
        0x70..=0x87 => Some(format!("F{}", code - 0x70 + 1)),
        _ if is_controller(code) => controller_name(code),
        _ => NAMED_KEYS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| (*name).to_string()),
    }
}

/// Display name of a code, falling back to `VK_xx` for unnamed keyboard codes.
///
/// Mouse and controller codes without a name have no display name.
pub fn display_name(code: u16) -> Option<String> {
    key_name(code).or_else(|| {
        (code != NO_KEY && input_kind(code) == InputKind::Keyboard)
            .then(|| format!("VK_{:02X}", code))
    })
}

fn controller_name(code: u16) -> Option<String> {
    let offset = code - CONTROLLER_BASE;
    let pad = offset / CONTROLLER_PAD_STRIDE;
    let button = (offset % CONTROLLER_PAD_STRIDE) as usize;
    if pad >= CONTROLLER_PADS {
        return None;
    }
    match CONTROLLER_BUTTONS.get(button) {
        Some(name) if !name.is_empty() => Some(format!("PAD{}_{}", pad + 1, name)),
        _ => None,
    }
}

/// Uppercases and strips separators so `"Print Screen"` matches `"PRINTSCREEN"`.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Resolves a key name to its code, or [`NO_KEY`] if the name is unknown.
///
/// Matching is case-insensitive and ignores spaces, underscores and dashes.
pub fn key_code(name: &str) -> u16 {
    let key = normalize(name);
    if key.is_empty() {
        return NO_KEY;
    }

    // letter and digit keys
    if key.len() == 1
        && let Some(c) = key.chars().next()
        && (c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return c as u16;
    }

    // F1-F24
    if let Some(num) = key.strip_prefix('F')
        && let Ok(num) = num.parse::<u16>()
        && (1..=24).contains(&num)
    {
        return 0x70 + num - 1;
    }

    // Numpad keys
    if let Some(num) = key.strip_prefix("NUMPAD")
        && let Ok(num) = num.parse::<u16>()
        && num <= 9
    {
        return 0x60 + num;
    }

    if let Some(code) = controller_code_from_name(&key) {
        return code;
    }

    if let Some((_, code)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
        return *code;
    }

    NAMED_KEYS
        .iter()
        .find(|(_, n)| normalize(n) == key)
        .map(|(c, _)| *c)
        .unwrap_or(NO_KEY)
}

/// Parses `PAD<n><button>` (already normalized) into a controller code.
fn controller_code_from_name(key: &str) -> Option<u16> {
    let rest = key.strip_prefix("PAD")?;
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let pad = rest[..digits].parse::<u16>().ok()?;
    if pad == 0 || pad > CONTROLLER_PADS {
        return None;
    }
    let button = &rest[digits..];
    CONTROLLER_BUTTONS
        .iter()
        .position(|name| !name.is_empty() && normalize(name) == button)
        .map(|idx| controller_code(pad - 1, idx as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_letters_and_digits() {
        assert_eq!(key_code("A"), 0x41);
        assert_eq!(key_code("z"), 0x5A);
        assert_eq!(key_code("7"), 0x37);
    }

    #[test]
    fn test_key_code_function_and_numpad() {
        assert_eq!(key_code("F1"), 0x70);
        assert_eq!(key_code("f24"), 0x87);
        assert_eq!(key_code("F25"), NO_KEY);
        assert_eq!(key_code("NUMPAD3"), 0x63);
    }

    #[test]
    fn test_momentary_names_resolve() {
        assert_eq!(key_code("Print Screen"), 0x2C);
        assert_eq!(key_code("Pause"), 0x13);
        assert_eq!(key_code("SNAPSHOT"), 0x2C);
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(key_code(""), NO_KEY);
        assert_eq!(key_code("   "), NO_KEY);
        assert_eq!(key_code("NotAKey"), NO_KEY);
        assert_eq!(key_code("PAD9_A"), NO_KEY);
    }

    #[test]
    fn test_key_name_round_trips_through_code() {
        for code in [0x41u16, 0x70, 0x63, 0x2C, 0xA2, MOUSE_LEFT, MOUSE_BUTTON5] {
            let name = key_name(code).expect("named code");
            assert_eq!(key_code(&name), code, "{name}");
        }
    }

    #[test]
    fn test_controller_codes() {
        let code = controller_code(1, 12);
        assert_eq!(key_name(code).as_deref(), Some("PAD2_A"));
        assert_eq!(key_code("pad2 a"), code);
        assert_eq!(key_code("PAD1_LT"), controller_code(0, 16));
        assert_eq!(key_name(controller_code(0, 10)), None);
        assert_eq!(input_kind(code), InputKind::Controller);
    }

    #[test]
    fn test_stick_direction_names() {
        assert_eq!(key_code("PAD1 LS_UP"), controller_code(0, 18));
        assert_eq!(key_code("PAD1_LSUP"), controller_code(0, 18));
        assert_eq!(key_code("PAD1 RS_RIGHT"), controller_code(0, 25));
        for button in 18..=25 {
            let code = controller_code(2, button);
            let name = key_name(code).expect("stick direction is named");
            assert!(name.starts_with("PAD3_"), "{name}");
            assert_eq!(key_code(&name), code, "{name}");
        }
    }

    #[test]
    fn test_stick_directions_respect_deadzone() {
        assert!(stick_directions(0, 0, 0, 0).is_empty());
        assert!(stick_directions(STICK_DEADZONE, -STICK_DEADZONE, 0, 0).is_empty());
        assert_eq!(stick_directions(0, i16::MAX, 0, 0).as_slice(), &[18]);
        assert_eq!(stick_directions(i16::MIN, i16::MIN, 0, 0).as_slice(), &[19, 20]);
        assert_eq!(stick_directions(0, 0, 20000, -20000).as_slice(), &[23, 25]);
        let names: Vec<String> = stick_directions(0, 0, i16::MAX, 0)
            .iter()
            .filter_map(|&b| key_name(controller_code(0, b)))
            .collect();
        assert_eq!(names, vec!["PAD1_RS_RIGHT"]);
    }

    #[test]
    fn test_kinds_and_modifiers() {
        assert_eq!(input_kind(0x41), InputKind::Keyboard);
        assert_eq!(input_kind(MOUSE_MIDDLE), InputKind::Mouse);
        assert_eq!(modifier_rank(0xA0), Some(2));
        assert_eq!(modifier_rank(0x41), None);
        assert!(modifier_rank(0xA2) < modifier_rank(0xA4));
        assert!(modifier_rank(0xA4) < modifier_rank(0xA1));
    }

    #[test]
    fn test_unnamed_codes() {
        assert_eq!(key_name(NO_KEY), None);
        assert_eq!(key_name(0xFF), None);
        assert_eq!(display_name(0x07).as_deref(), Some("VK_07"));
        assert_eq!(display_name(NO_KEY), None);
        assert_eq!(display_name(controller_code(0, 10)), None);
    }
}
