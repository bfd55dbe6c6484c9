#![forbid(unsafe_code)]

//! Picker behaviour configuration.
//!
//! # Example
//! ```
//! use fpick_state::{MenuTriggerMode, PickerConfig};
//!
//! let config = PickerConfig::default()
//!     .with_menu_trigger(MenuTriggerMode::Focus)
//!     .with_wrap_focus(true);
//! assert!(config.should_close_on_blur);
//! ```

#[cfg(feature = "config-json")]
use std::fmt;

/// When the menu opens on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config-json",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MenuTriggerMode {
    /// Open when the user types into the focused input.
    #[default]
    Input,
    /// Open as soon as the input gains focus, showing every candidate.
    Focus,
    /// Only explicit `open`/`toggle` calls open the menu.
    Manual,
}

/// Behaviour switches for a `PickerController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "config-json",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PickerConfig {
    /// Which interactions open the menu automatically.
    pub menu_trigger: MenuTriggerMode,
    /// Keep the menu open (and allow opening it) with no visible candidates.
    pub allows_empty_collection: bool,
    /// Finalize the selection when the input loses focus.
    pub should_close_on_blur: bool,
    /// Focus traversal wraps around at either end.
    pub wrap_focus: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            menu_trigger: MenuTriggerMode::Input,
            allows_empty_collection: false,
            should_close_on_blur: true,
            wrap_focus: false,
        }
    }
}

impl PickerConfig {
    /// Set the automatic open mode.
    #[must_use]
    pub fn with_menu_trigger(mut self, mode: MenuTriggerMode) -> Self {
        self.menu_trigger = mode;
        self
    }

    /// Allow an empty visible collection while open.
    #[must_use]
    pub fn with_allows_empty_collection(mut self, allow: bool) -> Self {
        self.allows_empty_collection = allow;
        self
    }

    /// Finalize on blur.
    #[must_use]
    pub fn with_should_close_on_blur(mut self, close: bool) -> Self {
        self.should_close_on_blur = close;
        self
    }

    /// Wrap focus traversal.
    #[must_use]
    pub fn with_wrap_focus(mut self, wrap: bool) -> Self {
        self.wrap_focus = wrap;
        self
    }
}

#[cfg(feature = "config-json")]
impl PickerConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Serialize the config as JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Json(e.to_string()))
    }
}

/// Errors from loading or saving a [`PickerConfig`].
#[cfg(feature = "config-json")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON was malformed or did not describe a config.
    Json(String),
}

#[cfg(feature = "config-json")]
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(msg) => write!(f, "invalid picker config: {msg}"),
        }
    }
}

#[cfg(feature = "config-json")]
impl std::error::Error for ConfigError {}
