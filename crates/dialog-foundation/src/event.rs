#![forbid(unsafe_code)]

//! Input events the host forwards to the foundation.

/// Legacy `keyCode` for Escape.
pub const ESCAPE_KEY_CODE: u32 = 27;

/// A click anywhere inside the dialog root.
///
/// `T` is the host's representation of the clicked element; the foundation
/// never inspects it and only hands it back to the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent<T> {
    pub target: T,
}

impl<T> ClickEvent<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }
}

/// A keydown observed at document level.
///
/// Either field may be absent; browsers disagree on which one they fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// `KeyboardEvent.key`, e.g. `"Escape"`.
    pub key: Option<String>,
    /// Legacy `KeyboardEvent.keyCode`.
    pub key_code: Option<u32>,
}

impl KeyboardEvent {
    /// Event carrying only a `key` value.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            key_code: None,
        }
    }

    /// Event carrying only a legacy `keyCode`.
    pub fn key_code(code: u32) -> Self {
        Self {
            key: None,
            key_code: Some(code),
        }
    }

    /// True if either signal identifies the Escape key.
    pub fn is_escape(&self) -> bool {
        self.key.as_deref() == Some("Escape") || self.key_code == Some(ESCAPE_KEY_CODE)
    }
}
