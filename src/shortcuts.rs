//! Application shortcut dispatch that honours capture suppression.

use crate::combination::KeyCombination;
use crate::input::InputApi;

/// Maps key combinations to actions and fires them on press.
pub struct ShortcutDispatcher<T> {
    bindings: Vec<(KeyCombination, T)>,
    /// Binding currently held down, fired already or swallowed by suppression.
    held: Option<usize>,
}

impl<T: Clone> ShortcutDispatcher<T> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            held: None,
        }
    }

    /// Binds `combination` to `action`, replacing a previous binding of the same action.
    pub fn bind(&mut self, combination: KeyCombination, action: T)
    where
        T: PartialEq,
    {
        self.bindings.retain(|(_, a)| *a != action);
        if !combination.is_empty() {
            self.bindings.push((combination, action));
        }
        self.held = None;
    }

    pub fn bindings(&self) -> &[(KeyCombination, T)] {
        &self.bindings
    }

    /// Most specific binding whose keys are all in `pressed`.
    fn best_match(&self, pressed: &[u16]) -> Option<usize> {
        self.bindings
            .iter()
            .enumerate()
            .filter(|(_, (combo, _))| combo.is_pressed_in(pressed))
            .max_by_key(|(_, (combo, _))| combo.codes().len())
            .map(|(idx, _)| idx)
    }

    /// Treats the keys currently down as already handled.
    pub fn resync(&mut self, input: &dyn InputApi) {
        self.held = self.best_match(&input.pressed_keys());
    }

    /// Returns the action to run for the current key state, once per press.
    ///
    /// While global shortcuts are disabled nothing fires, and keys still held
    /// when suppression ends must be released before they fire.
    pub fn dispatch(&mut self, input: &dyn InputApi) -> Option<T> {
        let pressed = input.pressed_keys();
        let best = self.best_match(&pressed);

        if input.shortcuts_disabled() {
            self.held = best;
            return None;
        }

        if best == self.held {
            return None;
        }
        self.held = best;
        best.map(|idx| self.bindings[idx].1.clone())
    }
}

impl<T: Clone> Default for ShortcutDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}
