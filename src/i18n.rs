//! Internationalization support for multiple languages.
//!
//! Provides cached translation strings for UI elements.
//! All strings are pre-formatted to avoid repeated allocation in the render loop.

use crate::capture::{HINT_KEYBOARD, HINT_KEYBOARD_MOUSE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Supported languages in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Simplified Chinese
    SimplifiedChinese,
    /// Traditional Chinese
    TraditionalChinese,
    /// Japanese
    Japanese,
}

impl Language {
    /// Returns all available languages.
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::SimplifiedChinese,
            Language::TraditionalChinese,
            Language::Japanese,
        ]
    }
}

/// Cached translations for high-performance rendering.
/// All strings are pre-formatted and stored in an Arc for efficient cloning.
#[derive(Clone)]
pub struct CachedTranslations {
    inner: Arc<TranslationCache>,
}

struct TranslationCache {
    app_title: String,
    bindings_title: String,
    capture_title: String,
    set_key_hint: String,
    set_key_mouse_hint: String,
    cancel_button: String,
    clear_button: String,
    not_bound: String,
    last_triggered: String,
    mode_combination: String,
    mode_single_key: String,
    mode_keyboard_only: String,
    dark_theme: String,
    light_theme: String,
    error_title: String,
    error_close_button: String,
    error_config_file: String,
    error_defaults_button: String,
    error_defaults_hint: String,
    action_toggle_theme: String,
    action_increment: String,
    action_reset: String,
    counter_label: String,
}

impl CachedTranslations {
    /// Creates a new cached translations instance for the specified language.
    pub fn new(lang: Language) -> Self {
        let inner = Arc::new(TranslationCache::new(lang));
        Self { inner }
    }

    /// Looks up a message by its resource key, returning the key itself when unknown.
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        match key {
            HINT_KEYBOARD => &self.inner.set_key_hint,
            HINT_KEYBOARD_MOUSE => &self.inner.set_key_mouse_hint,
            _ => key,
        }
    }

    pub fn app_title(&self) -> &str {
        &self.inner.app_title
    }
    pub fn bindings_title(&self) -> &str {
        &self.inner.bindings_title
    }
    pub fn capture_title(&self) -> &str {
        &self.inner.capture_title
    }
    pub fn cancel_button(&self) -> &str {
        &self.inner.cancel_button
    }
    pub fn clear_button(&self) -> &str {
        &self.inner.clear_button
    }
    pub fn not_bound(&self) -> &str {
        &self.inner.not_bound
    }
    pub fn last_triggered(&self) -> &str {
        &self.inner.last_triggered
    }
    pub fn mode_combination(&self) -> &str {
        &self.inner.mode_combination
    }
    pub fn mode_single_key(&self) -> &str {
        &self.inner.mode_single_key
    }
    pub fn mode_keyboard_only(&self) -> &str {
        &self.inner.mode_keyboard_only
    }
    pub fn dark_theme(&self) -> &str {
        &self.inner.dark_theme
    }
    pub fn light_theme(&self) -> &str {
        &self.inner.light_theme
    }
    pub fn error_title(&self) -> &str {
        &self.inner.error_title
    }
    pub fn error_close_button(&self) -> &str {
        &self.inner.error_close_button
    }
    pub fn error_config_file(&self) -> &str {
        &self.inner.error_config_file
    }
    pub fn error_defaults_button(&self) -> &str {
        &self.inner.error_defaults_button
    }
    pub fn error_defaults_hint(&self) -> &str {
        &self.inner.error_defaults_hint
    }
    pub fn action_toggle_theme(&self) -> &str {
        &self.inner.action_toggle_theme
    }
    pub fn action_increment(&self) -> &str {
        &self.inner.action_increment
    }
    pub fn action_reset(&self) -> &str {
        &self.inner.action_reset
    }
    pub fn counter_label(&self) -> &str {
        &self.inner.counter_label
    }
}

impl TranslationCache {
    fn new(lang: Language) -> Self {
        Self {
            app_title: get_raw_translation(lang, RawKey::AppTitle).to_string(),
            bindings_title: get_raw_translation(lang, RawKey::BindingsTitle).to_string(),
            capture_title: get_raw_translation(lang, RawKey::CaptureTitle).to_string(),
            set_key_hint: get_raw_translation(lang, RawKey::SetKeyHint).to_string(),
            set_key_mouse_hint: get_raw_translation(lang, RawKey::SetKeyMouseHint).to_string(),
            cancel_button: get_raw_translation(lang, RawKey::CancelBtn).to_string(),
            clear_button: get_raw_translation(lang, RawKey::ClearBtn).to_string(),
            not_bound: get_raw_translation(lang, RawKey::NotBound).to_string(),
            last_triggered: get_raw_translation(lang, RawKey::LastTriggered).to_string(),
            mode_combination: get_raw_translation(lang, RawKey::ModeCombination).to_string(),
            mode_single_key: get_raw_translation(lang, RawKey::ModeSingleKey).to_string(),
            mode_keyboard_only: get_raw_translation(lang, RawKey::ModeKeyboardOnly).to_string(),
            dark_theme: get_raw_translation(lang, RawKey::Dark).to_string(),
            light_theme: get_raw_translation(lang, RawKey::Light).to_string(),
            error_title: get_raw_translation(lang, RawKey::ErrorTitle).to_string(),
            error_close_button: get_raw_translation(lang, RawKey::ErrorCloseBtn).to_string(),
            error_config_file: get_raw_translation(lang, RawKey::ErrorConfigFile).to_string(),
            error_defaults_button: get_raw_translation(lang, RawKey::ErrorDefaultsBtn).to_string(),
            error_defaults_hint: get_raw_translation(lang, RawKey::ErrorDefaultsHint).to_string(),
            action_toggle_theme: get_raw_translation(lang, RawKey::ActionToggleTheme).to_string(),
            action_increment: get_raw_translation(lang, RawKey::ActionIncrement).to_string(),
            action_reset: get_raw_translation(lang, RawKey::ActionReset).to_string(),
            counter_label: get_raw_translation(lang, RawKey::CounterLabel).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RawKey {
    AppTitle,
    BindingsTitle,
    CaptureTitle,
    SetKeyHint,
    SetKeyMouseHint,
    CancelBtn,
    ClearBtn,
    NotBound,
    LastTriggered,
    ModeCombination,
    ModeSingleKey,
    ModeKeyboardOnly,
    Dark,
    Light,
    ErrorTitle,
    ErrorCloseBtn,
    ErrorConfigFile,
    ErrorDefaultsBtn,
    ErrorDefaultsHint,
    ActionToggleTheme,
    ActionIncrement,
    ActionReset,
    CounterLabel,
}

fn get_raw_translation(lang: Language, key: RawKey) -> &'static str {
    match (lang, key) {
        // App Title
        (Language::English, RawKey::AppTitle) => "KeyCapture ~ Input Bindings",
        (Language::SimplifiedChinese, RawKey::AppTitle) => "KeyCapture ~ 输入绑定",
        (Language::TraditionalChinese, RawKey::AppTitle) => "KeyCapture ~ 輸入綁定",
        (Language::Japanese, RawKey::AppTitle) => "KeyCapture ~ 入力割り当て",

        // Bindings Title
        (Language::English, RawKey::BindingsTitle) => "Shortcuts",
        (Language::SimplifiedChinese, RawKey::BindingsTitle) => "快捷键",
        (Language::TraditionalChinese, RawKey::BindingsTitle) => "快速鍵",
        (Language::Japanese, RawKey::BindingsTitle) => "ショートカット",

        // Capture Title
        (Language::English, RawKey::CaptureTitle) => "Set binding",
        (Language::SimplifiedChinese, RawKey::CaptureTitle) => "设置绑定",
        (Language::TraditionalChinese, RawKey::CaptureTitle) => "設定綁定",
        (Language::Japanese, RawKey::CaptureTitle) => "割り当て設定",

        // Set Key Hint
        (Language::English, RawKey::SetKeyHint) => "Press any key on your keyboard to set a new binding.",
        (Language::SimplifiedChinese, RawKey::SetKeyHint) => "请按下键盘上的任意键以设置新的绑定。",
        (Language::TraditionalChinese, RawKey::SetKeyHint) => "請按下鍵盤上的任意鍵以設定新的綁定。",
        (Language::Japanese, RawKey::SetKeyHint) => "キーボードのキーを押して割り当ててください。",

        // Set Key Mouse Hint
        (Language::English, RawKey::SetKeyMouseHint) => {
            "Press any key or button on your keyboard, mouse or controller to set a new binding."
        }
        (Language::SimplifiedChinese, RawKey::SetKeyMouseHint) => {
            "请按下键盘、鼠标或手柄上的任意按键以设置新的绑定。"
        }
        (Language::TraditionalChinese, RawKey::SetKeyMouseHint) => {
            "請按下鍵盤、滑鼠或手把上的任意按鍵以設定新的綁定。"
        }
        (Language::Japanese, RawKey::SetKeyMouseHint) => {
            "キーボード・マウス・コントローラーのボタンを押して割り当ててください。"
        }

        // Cancel
        (Language::English, RawKey::CancelBtn) => "Cancel",
        (Language::SimplifiedChinese, RawKey::CancelBtn) => "取消",
        (Language::TraditionalChinese, RawKey::CancelBtn) => "取消",
        (Language::Japanese, RawKey::CancelBtn) => "キャンセル",

        // Clear
        (Language::English, RawKey::ClearBtn) => "Clear",
        (Language::SimplifiedChinese, RawKey::ClearBtn) => "清除",
        (Language::TraditionalChinese, RawKey::ClearBtn) => "清除",
        (Language::Japanese, RawKey::ClearBtn) => "クリア",

        // Not Bound
        (Language::English, RawKey::NotBound) => "Not bound",
        (Language::SimplifiedChinese, RawKey::NotBound) => "未绑定",
        (Language::TraditionalChinese, RawKey::NotBound) => "未綁定",
        (Language::Japanese, RawKey::NotBound) => "未設定",

        // Last Triggered
        (Language::English, RawKey::LastTriggered) => "Last triggered:",
        (Language::SimplifiedChinese, RawKey::LastTriggered) => "上次触发：",
        (Language::TraditionalChinese, RawKey::LastTriggered) => "上次觸發：",
        (Language::Japanese, RawKey::LastTriggered) => "最後の実行：",

        // Capture Modes
        (Language::English, RawKey::ModeCombination) => "Key combination",
        (Language::SimplifiedChinese, RawKey::ModeCombination) => "组合键",
        (Language::TraditionalChinese, RawKey::ModeCombination) => "組合鍵",
        (Language::Japanese, RawKey::ModeCombination) => "キーの組み合わせ",

        (Language::English, RawKey::ModeSingleKey) => "Single button",
        (Language::SimplifiedChinese, RawKey::ModeSingleKey) => "单个按键",
        (Language::TraditionalChinese, RawKey::ModeSingleKey) => "單個按鍵",
        (Language::Japanese, RawKey::ModeSingleKey) => "単一ボタン",

        (Language::English, RawKey::ModeKeyboardOnly) => "Keyboard shortcut",
        (Language::SimplifiedChinese, RawKey::ModeKeyboardOnly) => "键盘快捷键",
        (Language::TraditionalChinese, RawKey::ModeKeyboardOnly) => "鍵盤快速鍵",
        (Language::Japanese, RawKey::ModeKeyboardOnly) => "キーボードショートカット",

        // Dark
        (Language::English, RawKey::Dark) => "Dark",
        (Language::SimplifiedChinese, RawKey::Dark) => "深色",
        (Language::TraditionalChinese, RawKey::Dark) => "深色",
        (Language::Japanese, RawKey::Dark) => "ダーク",

        // Light
        (Language::English, RawKey::Light) => "Light",
        (Language::SimplifiedChinese, RawKey::Light) => "浅色",
        (Language::TraditionalChinese, RawKey::Light) => "淺色",
        (Language::Japanese, RawKey::Light) => "ライト",

        // Error Dialog
        (Language::English, RawKey::ErrorTitle) => "Configuration Error",
        (Language::SimplifiedChinese, RawKey::ErrorTitle) => "配置错误",
        (Language::TraditionalChinese, RawKey::ErrorTitle) => "設定錯誤",
        (Language::Japanese, RawKey::ErrorTitle) => "設定エラー",

        (Language::English, RawKey::ErrorCloseBtn) => "Quit",
        (Language::SimplifiedChinese, RawKey::ErrorCloseBtn) => "退出",
        (Language::TraditionalChinese, RawKey::ErrorCloseBtn) => "結束",
        (Language::Japanese, RawKey::ErrorCloseBtn) => "終了",

        (Language::English, RawKey::ErrorConfigFile) => "File:",
        (Language::SimplifiedChinese, RawKey::ErrorConfigFile) => "文件：",
        (Language::TraditionalChinese, RawKey::ErrorConfigFile) => "檔案：",
        (Language::Japanese, RawKey::ErrorConfigFile) => "ファイル：",

        (Language::English, RawKey::ErrorDefaultsBtn) => "Use defaults",
        (Language::SimplifiedChinese, RawKey::ErrorDefaultsBtn) => "使用默认设置",
        (Language::TraditionalChinese, RawKey::ErrorDefaultsBtn) => "使用預設值",
        (Language::Japanese, RawKey::ErrorDefaultsBtn) => "既定値で起動",

        (Language::English, RawKey::ErrorDefaultsHint) => {
            "Default settings are used for this session only. The file is left as is."
        }
        (Language::SimplifiedChinese, RawKey::ErrorDefaultsHint) => {
            "默认设置仅用于本次运行，文件不会被修改。"
        }
        (Language::TraditionalChinese, RawKey::ErrorDefaultsHint) => {
            "預設值僅用於本次執行，檔案不會被修改。"
        }
        (Language::Japanese, RawKey::ErrorDefaultsHint) => {
            "既定値はこの起動でのみ使われ、ファイルは変更されません。"
        }

        // Sample Actions
        (Language::English, RawKey::ActionToggleTheme) => "Toggle theme",
        (Language::SimplifiedChinese, RawKey::ActionToggleTheme) => "切换主题",
        (Language::TraditionalChinese, RawKey::ActionToggleTheme) => "切換主題",
        (Language::Japanese, RawKey::ActionToggleTheme) => "テーマ切り替え",

        (Language::English, RawKey::ActionIncrement) => "Increase counter",
        (Language::SimplifiedChinese, RawKey::ActionIncrement) => "计数加一",
        (Language::TraditionalChinese, RawKey::ActionIncrement) => "計數加一",
        (Language::Japanese, RawKey::ActionIncrement) => "カウンターを増やす",

        (Language::English, RawKey::ActionReset) => "Reset counter",
        (Language::SimplifiedChinese, RawKey::ActionReset) => "重置计数",
        (Language::TraditionalChinese, RawKey::ActionReset) => "重設計數",
        (Language::Japanese, RawKey::ActionReset) => "カウンターをリセット",

        (Language::English, RawKey::CounterLabel) => "Counter:",
        (Language::SimplifiedChinese, RawKey::CounterLabel) => "计数：",
        (Language::TraditionalChinese, RawKey::CounterLabel) => "計數：",
        (Language::Japanese, RawKey::CounterLabel) => "カウンター：",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default() {
        let lang = Language::default();
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn test_language_all() {
        let all_languages = Language::all();
        assert_eq!(all_languages.len(), 4);
        assert_eq!(all_languages[0], Language::English);
        assert_eq!(all_languages[3], Language::Japanese);
    }

    #[test]
    fn test_hint_messages_by_key() {
        let translations = CachedTranslations::new(Language::English);
        assert_eq!(
            translations.message(HINT_KEYBOARD),
            "Press any key on your keyboard to set a new binding."
        );
        assert!(translations.message(HINT_KEYBOARD_MOUSE).contains("mouse"));
        assert_eq!(translations.message("UnknownKey"), "UnknownKey");
    }

    #[test]
    fn test_all_languages_have_strings() {
        for &lang in Language::all() {
            let translations = CachedTranslations::new(lang);
            assert!(!translations.message(HINT_KEYBOARD).is_empty());
            assert!(!translations.message(HINT_KEYBOARD_MOUSE).is_empty());
            assert!(!translations.cancel_button().is_empty());
            assert!(!translations.error_config_file().is_empty());
            assert!(!translations.error_defaults_button().is_empty());
            assert!(!translations.error_defaults_hint().is_empty());
            assert!(translations.app_title().contains("KeyCapture"));
        }
    }

    #[test]
    fn test_cached_translations_clone_shares_cache() {
        let translations = CachedTranslations::new(Language::Japanese);
        let cloned = translations.clone();
        assert_eq!(translations.capture_title(), cloned.capture_title());
        assert!(Arc::ptr_eq(&translations.inner, &cloned.inner));
    }
}
