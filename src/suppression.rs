//! Scoped suppression of global shortcut dispatch.

use crate::input::SharedInput;

/// Keeps global shortcuts disabled for as long as it is alive.
///
/// Acquiring calls `disable_all_keys(true)` once; dropping calls
/// `disable_all_keys(false)` once, whatever path the owner closes through.
pub struct ShortcutSuppression {
    input: SharedInput,
}

impl ShortcutSuppression {
    pub fn acquire(input: SharedInput) -> Self {
        input.disable_all_keys(true);
        log::debug!("global shortcuts suppressed");
        Self { input }
    }
}

impl Drop for ShortcutSuppression {
    fn drop(&mut self) {
        self.input.disable_all_keys(false);
        log::debug!("global shortcuts restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputApi, KeyStateTable};
    use std::sync::Arc;

    #[test]
    fn test_guard_restores_on_drop() {
        let table = Arc::new(KeyStateTable::new());
        let guard = ShortcutSuppression::acquire(table.clone());
        assert!(table.shortcuts_disabled());
        drop(guard);
        assert!(!table.shortcuts_disabled());
    }

    #[test]
    fn test_guard_restores_during_unwind() {
        let table = Arc::new(KeyStateTable::new());
        let shared = table.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = ShortcutSuppression::acquire(shared);
            panic!("capture aborted");
        }));
        assert!(result.is_err());
        assert!(!table.shortcuts_disabled());
    }
}
