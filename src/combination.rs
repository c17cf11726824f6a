//! Captured input values: key combinations and modifier+key shortcuts.

use crate::keys;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Maximum number of codes held by a combination.
pub const MAX_KEYS: usize = 3;

/// Immutable set of up to [`MAX_KEYS`] simultaneously pressed codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    codes: SmallVec<[u16; MAX_KEYS]>,
}

impl KeyCombination {
    /// Builds a combination from pressed codes.
    ///
    /// When controller codes are mixed with keyboard or mouse codes only the
    /// controller codes are kept, since launchers that remap pad buttons onto
    /// keys report both at once.
    pub fn new(codes: &[u16]) -> Self {
        let has_controller = codes.iter().any(|&c| keys::is_controller(c));
        let mut kept: SmallVec<[u16; MAX_KEYS]> = SmallVec::new();
        for &code in codes {
            if code == keys::NO_KEY || (has_controller && !keys::is_controller(code)) {
                continue;
            }
            if kept.contains(&code) {
                continue;
            }
            kept.push(code);
            if kept.len() == MAX_KEYS {
                break;
            }
        }
        Self { codes: kept }
    }

    /// Combination of a single code.
    pub fn single(code: u16) -> Self {
        Self::new(&[code])
    }

    #[inline]
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns `true` if every code of the combination is in `pressed`.
    pub fn is_pressed_in(&self, pressed: &[u16]) -> bool {
        !self.is_empty() && self.codes.iter().all(|c| pressed.contains(c))
    }
}

/// Orders names so modifiers come first (Ctrl, Alt, Shift, Win), then alphabetically.
fn compare_keys(a: &(u16, String), b: &(u16, String)) -> Ordering {
    match (keys::modifier_rank(a.0), keys::modifier_rank(b.0)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb).then_with(|| a.1.cmp(&b.1)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.1.cmp(&b.1),
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: SmallVec<[(u16, String); MAX_KEYS]> = self
            .codes
            .iter()
            .filter_map(|&code| {
                keys::display_name(code)
                    .filter(|name| !name.trim().is_empty())
                    .map(|name| (code, name))
            })
            .collect();
        named.sort_by(compare_keys);

        for (idx, (_, name)) in named.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Modifier flags attached to a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub logo: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        logo: false,
    };
}

/// Last modifier+key pair seen by a keyboard-only capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ShortcutKey {
    pub modifiers: Modifiers,
    pub key: Option<u16>,
}

impl ShortcutKey {
    pub fn new(modifiers: Modifiers, key: u16) -> Self {
        Self {
            modifiers,
            key: (key != keys::NO_KEY).then_some(key),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key.is_none()
    }
}

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(key) = self.key else {
            return Ok(());
        };

        // The key itself is not repeated as a modifier prefix.
        let key_rank = keys::modifier_rank(key);
        let prefixes = [
            (self.modifiers.ctrl && key_rank != Some(0), "Ctrl"),
            (self.modifiers.alt && key_rank != Some(1), "Alt"),
            (self.modifiers.shift && key_rank != Some(2), "Shift"),
            (self.modifiers.logo && key_rank != Some(3), "Win"),
        ];
        for (_, label) in prefixes.iter().filter(|(active, _)| *active) {
            write!(f, "{}+", label)?;
        }

        f.write_str(&keys::display_name(key).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_combination() {
        let key = KeyCombination::default();
        assert!(key.is_empty());
        assert_eq!(key.to_string(), "");
        assert_eq!(KeyCombination::new(&[]), key);
    }

    #[test]
    fn test_modifiers_sort_first() {
        let key = KeyCombination::new(&[0x41, 0xA0, 0xA2]);
        assert_eq!(key.to_string(), "LCTRL+LSHIFT+A");
    }

    #[test]
    fn test_non_modifiers_sort_alphabetically() {
        let key = KeyCombination::new(&[0x5A, 0x41]);
        assert_eq!(key.to_string(), "A+Z");
    }

    #[test]
    fn test_limited_to_three_keys() {
        let key = KeyCombination::new(&[0x41, 0x42, 0x43, 0x44]);
        assert_eq!(key.codes(), &[0x41, 0x42, 0x43]);
    }

    #[test]
    fn test_duplicates_and_no_key_dropped() {
        let key = KeyCombination::new(&[0x41, 0x41, keys::NO_KEY, 0x42]);
        assert_eq!(key.codes(), &[0x41, 0x42]);
    }

    #[test]
    fn test_controller_codes_win_over_keyboard() {
        let pad_a = keys::controller_code(0, 12);
        let key = KeyCombination::new(&[0x41, pad_a]);
        assert_eq!(key.codes(), &[pad_a]);
        assert_eq!(key.to_string(), "PAD1_A");
    }

    #[test]
    fn test_unnamed_codes_render_blank() {
        let key = KeyCombination::new(&[keys::controller_code(0, 10)]);
        assert!(!key.is_empty());
        assert!(key.to_string().trim().is_empty());
        assert_eq!(KeyCombination::new(&[0x07]).to_string(), "VK_07");
    }

    #[test]
    fn test_is_pressed_in() {
        let key = KeyCombination::new(&[0xA2, 0x50]);
        assert!(key.is_pressed_in(&[0x50, 0xA2, 0x41]));
        assert!(!key.is_pressed_in(&[0x50]));
        assert!(!KeyCombination::default().is_pressed_in(&[0x50]));
    }

    #[test]
    fn test_shortcut_display() {
        let modifiers = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::NONE
        };
        assert_eq!(ShortcutKey::new(modifiers, 0x74).to_string(), "Ctrl+Shift+F5");
        assert_eq!(ShortcutKey::new(Modifiers::NONE, 0x41).to_string(), "A");
        assert_eq!(ShortcutKey::default().to_string(), "");
    }

    #[test]
    fn test_shortcut_does_not_repeat_modifier_key() {
        let modifiers = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(ShortcutKey::new(modifiers, 0xA2).to_string(), "LCTRL");
    }

    #[test]
    fn test_shortcut_no_key_is_empty() {
        assert!(ShortcutKey::new(Modifiers::NONE, keys::NO_KEY).is_empty());
    }
}
