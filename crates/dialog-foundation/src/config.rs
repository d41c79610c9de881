#![forbid(unsafe_code)]

//! Per-dialog configuration.
//!
//! Defaults reproduce the stock behavior: scrim clicks and Escape both close
//! with [`CLOSE_ACTION`](crate::strings::CLOSE_ACTION), animations use the
//! durations in [`numbers`](crate::numbers), and button stacking is detected
//! on every layout pass.
//!
//! With the `policy-config` feature, configs can be loaded from JSON or TOML.
//! Missing fields fall back to their defaults.

use core::fmt;
use core::time::Duration;

use crate::{numbers, strings};

/// Which configured action a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionField {
    ScrimClick,
    EscapeKey,
}

impl fmt::Display for ActionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScrimClick => f.write_str("scrim_click_action"),
            Self::EscapeKey => f.write_str("escape_key_action"),
        }
    }
}

/// Errors raised while building or loading a [`DialogConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogConfigError {
    /// A dismissal action uses the reserved destroy sentinel, which would
    /// make user dismissal indistinguishable from teardown.
    ReservedAction { field: ActionField },
    /// The config document could not be parsed.
    Parse {
        format: &'static str,
        message: String,
    },
}

impl fmt::Display for DialogConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedAction { field } => write!(
                f,
                "{field} may not be the reserved action {:?}",
                strings::DESTROY_ACTION
            ),
            Self::Parse { format, message } => write!(f, "invalid {format} config: {message}"),
        }
    }
}

impl std::error::Error for DialogConfigError {}

/// Dialog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogConfig {
    /// Action used when the scrim is clicked. Empty disables.
    pub scrim_click_action: String,
    /// Action used when Escape is pressed. Empty disables.
    pub escape_key_action: String,
    /// Entrance animation length in milliseconds.
    pub open_animation_ms: u64,
    /// Exit animation length in milliseconds.
    pub close_animation_ms: u64,
    /// Detect stacked buttons during layout.
    pub auto_stack_buttons: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            scrim_click_action: strings::CLOSE_ACTION.to_owned(),
            escape_key_action: strings::CLOSE_ACTION.to_owned(),
            open_animation_ms: numbers::DIALOG_ANIMATION_OPEN_TIME_MS,
            close_animation_ms: numbers::DIALOG_ANIMATION_CLOSE_TIME_MS,
            auto_stack_buttons: true,
        }
    }
}

impl DialogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-length animations for reduced-motion hosts.
    ///
    /// Transitions still complete through the scheduler (on the next due
    /// tick) so notification order is unchanged.
    pub fn reduced_motion() -> Self {
        Self {
            open_animation_ms: 0,
            close_animation_ms: 0,
            ..Self::default()
        }
    }

    pub fn scrim_click_action(mut self, action: impl Into<String>) -> Self {
        self.scrim_click_action = action.into();
        self
    }

    pub fn escape_key_action(mut self, action: impl Into<String>) -> Self {
        self.escape_key_action = action.into();
        self
    }

    pub fn open_animation_ms(mut self, ms: u64) -> Self {
        self.open_animation_ms = ms;
        self
    }

    pub fn close_animation_ms(mut self, ms: u64) -> Self {
        self.close_animation_ms = ms;
        self
    }

    pub fn auto_stack_buttons(mut self, enabled: bool) -> Self {
        self.auto_stack_buttons = enabled;
        self
    }

    #[inline]
    pub fn open_duration(&self) -> Duration {
        Duration::from_millis(self.open_animation_ms)
    }

    #[inline]
    pub fn close_duration(&self) -> Duration {
        Duration::from_millis(self.close_animation_ms)
    }

    /// Check the config for values the foundation refuses to start with.
    pub fn validate(&self) -> Result<(), DialogConfigError> {
        if self.scrim_click_action == strings::DESTROY_ACTION {
            return Err(DialogConfigError::ReservedAction {
                field: ActionField::ScrimClick,
            });
        }
        if self.escape_key_action == strings::DESTROY_ACTION {
            return Err(DialogConfigError::ReservedAction {
                field: ActionField::EscapeKey,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(input: &str) -> Result<Self, DialogConfigError> {
        let config: Self = serde_json::from_str(input).map_err(|e| DialogConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML config document.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(input: &str) -> Result<Self, DialogConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| DialogConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
