//! Key capture for configurable shortcut and controller bindings.
//!
//! [`capture::KeyCapture`] turns raw key, mouse and controller state into a
//! [`KeyCombination`] while global shortcuts are suppressed. The `gui` module
//! hosts it in an egui dialog.

pub mod capture;
pub mod combination;
pub mod config;
pub mod geometry;
pub mod gui;
pub mod i18n;
pub mod input;
pub mod keys;
pub mod momentary;
pub mod shortcuts;
pub mod suppression;
pub mod window;

// Re-export types for test modules
pub use capture::{CaptureOptions, CaptureOutcome, CaptureStatus, KeyCapture};
pub use combination::{KeyCombination, Modifiers, ShortcutKey};
pub use config::CaptureConfig;
pub use i18n::{CachedTranslations, Language};
pub use input::{InputApi, KeyStateTable, SharedInput, SystemMouseState};
