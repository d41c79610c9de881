#![forbid(unsafe_code)]

//! Static configuration shared by the foundation and its hosts.
//!
//! Everything here is plain data so hosts can style against the same class
//! names and tests can assert against them without constructing a dialog.

/// Class names toggled on the dialog root (and the document body for
/// [`css_classes::SCROLL_LOCK`]).
pub mod css_classes {
    /// Dialog is logically open. Removed at the start of a close.
    pub const OPEN: &str = "mdc-dialog--open";
    /// Entrance animation in flight.
    pub const OPENING: &str = "mdc-dialog--opening";
    /// Exit animation in flight.
    pub const CLOSING: &str = "mdc-dialog--closing";
    /// Action buttons are laid out vertically.
    pub const STACKED: &str = "mdc-dialog--stacked";
    /// Content overflows and scrolls.
    pub const SCROLLABLE: &str = "mdc-dialog--scrollable";
    /// Backdrop element behind the surface.
    pub const SCRIM: &str = "mdc-dialog__scrim";
    /// Applied to the body while a dialog is open.
    pub const SCROLL_LOCK: &str = "mdc-dialog-scroll-lock";

    /// Every class name, in declaration order.
    pub const ALL: [&str; 7] = [OPEN, OPENING, CLOSING, STACKED, SCROLLABLE, SCRIM, SCROLL_LOCK];
}

/// String constants.
pub mod strings {
    /// Attribute hosts read to map a clicked element to an action.
    pub const ACTION_ATTRIBUTE: &str = "data-mdc-dialog-action";
    /// Default scrim-click and Escape action.
    pub const CLOSE_ACTION: &str = "close";
    /// Reserved action reported when a dialog is torn down while open.
    pub const DESTROY_ACTION: &str = "destroy";
}

/// Numeric constants.
pub mod numbers {
    /// Entrance animation length.
    pub const DIALOG_ANIMATION_OPEN_TIME_MS: u64 = 150;
    /// Exit animation length.
    pub const DIALOG_ANIMATION_CLOSE_TIME_MS: u64 = 75;
}

/// Class names grouped as a value, for `DialogFoundation::CSS_CLASSES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssClasses {
    pub open: &'static str,
    pub opening: &'static str,
    pub closing: &'static str,
    pub stacked: &'static str,
    pub scrollable: &'static str,
    pub scrim: &'static str,
    pub scroll_lock: &'static str,
}

/// String constants grouped as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub action_attribute: &'static str,
    pub close_action: &'static str,
    pub destroy_action: &'static str,
}

/// Numeric constants grouped as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbers {
    pub dialog_animation_open_time_ms: u64,
    pub dialog_animation_close_time_ms: u64,
}

pub const CSS_CLASSES: CssClasses = CssClasses {
    open: css_classes::OPEN,
    opening: css_classes::OPENING,
    closing: css_classes::CLOSING,
    stacked: css_classes::STACKED,
    scrollable: css_classes::SCROLLABLE,
    scrim: css_classes::SCRIM,
    scroll_lock: css_classes::SCROLL_LOCK,
};

pub const STRINGS: Strings = Strings {
    action_attribute: strings::ACTION_ATTRIBUTE,
    close_action: strings::CLOSE_ACTION,
    destroy_action: strings::DESTROY_ACTION,
};

pub const NUMBERS: Numbers = Numbers {
    dialog_animation_open_time_ms: numbers::DIALOG_ANIMATION_OPEN_TIME_MS,
    dialog_animation_close_time_ms: numbers::DIALOG_ANIMATION_CLOSE_TIME_MS,
};
