//! Editor preferences persisted with the local record.

use serde::{Deserialize, Serialize};

/// Default editor font size in points.
pub const DEFAULT_FONT_SIZE: u16 = 14;
/// Default editor color theme.
pub const DEFAULT_EDITOR_THEME: &str = "vs-dark";

/// Editor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    pub auto_refresh: bool,
    pub font_size: u16,
    pub editor_theme: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            font_size: DEFAULT_FONT_SIZE,
            editor_theme: DEFAULT_EDITOR_THEME.to_string(),
        }
    }
}
