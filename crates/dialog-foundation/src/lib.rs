#![forbid(unsafe_code)]

//! Platform-independent behavioral core of a modal dialog.
//!
//! [`DialogFoundation`] owns the open/close lifecycle, animation timing, the
//! batched layout pass, and scrim/Escape dismissal. It renders nothing: every
//! visible effect goes through a [`DialogAdapter`] and every deferred
//! continuation through a [`Scheduler`], so the same engine can drive a DOM
//! surface, a terminal overlay, or a test double.
//!
//! # Example
//!
//! ```
//! use dialog_foundation::{
//!     ClickEvent, DialogFoundation, KeyboardEvent, ManualScheduler, NoopAdapter,
//! };
//!
//! let mut dialog = DialogFoundation::new(NoopAdapter::<()>::new(), ManualScheduler::new());
//! dialog.open();
//! assert!(dialog.is_open());
//!
//! dialog.advance_ms(150);
//! dialog.handle_document_keydown(&KeyboardEvent::key("Escape"));
//! assert!(!dialog.is_open());
//!
//! // Clicks on a plain target never resolve to an action with NoopAdapter.
//! dialog.handle_click(&ClickEvent::new(()));
//! ```
//!
//! # Features
//!
//! - `tracing`: structured logs for transitions and layout passes.
//! - `serde`: `Serialize`/`Deserialize` for [`DialogConfig`].
//! - `policy-config`: `DialogConfig::from_json_str` and
//!   `DialogConfig::from_toml_str`.

pub mod adapter;
pub mod config;
pub mod constants;
pub mod event;
pub mod foundation;
mod logging;
pub mod scheduler;
pub mod testing;

pub use adapter::{BoundingRect, DialogAdapter, NoopAdapter};
pub use config::{ActionField, DialogConfig, DialogConfigError};
pub use constants::{css_classes, numbers, strings};
pub use event::{ClickEvent, ESCAPE_KEY_CODE, KeyboardEvent};
pub use foundation::{DialogFoundation, DialogPhase, LayoutOutcome};
pub use scheduler::{
    FrameHandle, InstantScheduler, ManualScheduler, Scheduler, TimerHandle, Wakeup,
};
