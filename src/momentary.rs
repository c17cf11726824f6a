//! Keys whose down and up events can both land between two polls.

use crate::input::InputApi;
use crate::keys;
use smallvec::SmallVec;

/// Key names treated as momentary when the configuration does not override them.
pub const DEFAULT_MOMENTARY_KEYS: [&str; 2] = ["Print Screen", "Pause"];

/// Map from momentary key code to a pending-hit flag.
#[derive(Debug, Clone, Default)]
pub struct MomentaryKeys {
    entries: SmallVec<[(u16, bool); 4]>,
}

impl MomentaryKeys {
    /// Resolves `names` through the input backend. Unresolved names are skipped.
    pub fn resolve<S: AsRef<str>>(input: &dyn InputApi, names: &[S]) -> Self {
        let mut entries: SmallVec<[(u16, bool); 4]> = SmallVec::new();
        for name in names {
            let code = input.key_code(name.as_ref());
            if code == keys::NO_KEY {
                log::warn!("momentary key {:?} does not resolve to a key code", name.as_ref());
                continue;
            }
            if !entries.iter().any(|(c, _)| *c == code) {
                entries.push((code, false));
            }
        }
        Self { entries }
    }

    /// Flags a hit if `code` is momentary. Returns whether it was.
    pub fn mark_hit(&mut self, code: u16) -> bool {
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, pending)) => {
                *pending = true;
                true
            }
            None => false,
        }
    }

    /// Adds every pending code missing from `pressed`, then clears all flags.
    pub fn drain_into(&mut self, pressed: &mut Vec<u16>) {
        for (code, pending) in self.entries.iter_mut() {
            if !*pending {
                continue;
            }
            if !pressed.contains(code) {
                pressed.push(*code);
            }
            *pending = false;
        }
    }

    pub fn codes(&self) -> SmallVec<[u16; 4]> {
        self.entries.iter().map(|(code, _)| *code).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyStateTable;

    fn defaults() -> MomentaryKeys {
        MomentaryKeys::resolve(&KeyStateTable::new(), &DEFAULT_MOMENTARY_KEYS)
    }

    #[test]
    fn test_defaults_resolve() {
        let keys = defaults();
        assert_eq!(keys.codes().as_slice(), &[0x2C, 0x13]);
    }

    #[test]
    fn test_unknown_and_duplicate_names_skipped() {
        let keys = MomentaryKeys::resolve(
            &KeyStateTable::new(),
            &["Pause", "Nope", "PAUSE", "SNAPSHOT"],
        );
        assert_eq!(keys.codes().as_slice(), &[0x13, 0x2C]);
    }

    #[test]
    fn test_hit_is_forced_once() {
        let mut keys = defaults();
        assert!(keys.mark_hit(0x2C));
        assert!(!keys.mark_hit(0x41));

        let mut pressed = vec![0x41];
        keys.drain_into(&mut pressed);
        assert_eq!(pressed, vec![0x41, 0x2C]);

        let mut pressed = Vec::new();
        keys.drain_into(&mut pressed);
        assert!(pressed.is_empty());
    }

    #[test]
    fn test_drain_does_not_duplicate_held_key() {
        let mut keys = defaults();
        keys.mark_hit(0x13);
        let mut pressed = vec![0x13];
        keys.drain_into(&mut pressed);
        assert_eq!(pressed, vec![0x13]);
    }

    #[test]
    fn test_only_hit_keys_are_drained() {
        let mut keys = defaults();
        keys.mark_hit(0x13);
        let mut pressed = Vec::new();
        keys.drain_into(&mut pressed);
        assert_eq!(pressed, vec![0x13]);
    }
}
