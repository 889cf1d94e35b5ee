// Application settings
// Loaded from <config dir>/tallyview/settings.toml

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use tallyview_engine::normalize::DateOrder;
use tallyview_engine::view::{GroupingMode, SortMode};

use crate::theme::ThemeMode;

/// Persisted preferences. A missing or malformed file yields defaults —
/// preferences are cosmetic and never block a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeMode,
    pub view: ViewDefaults,
}

/// Startup defaults for the view state. The live view state itself is
/// process-wide and resets on reload; only these defaults persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewDefaults {
    pub sort: SortMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_enabled: Option<bool>,
    pub left_date_order: DateOrder,
    pub right_date_order: DateOrder,
    pub left_grouping: GroupingMode,
}

impl Settings {
    /// Default on-disk location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tallyview").join("settings.toml"))
    }

    /// Load from the default location; any failure yields defaults.
    pub fn load() -> Self {
        Self::default_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load from an explicit path; any failure yields defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::default_path().ok_or("no config directory available")?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }
}
