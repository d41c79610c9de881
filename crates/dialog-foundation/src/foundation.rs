#![forbid(unsafe_code)]

//! The dialog state machine and dismissal decision engine.
//!
//! # State Machine
//!
//! ```text
//! Closed ──open()──▶ Opening ──timer──▶ Open
//!   ▲                  │  ▲               │
//!   │               close() open()      close()
//!   │                  ▼  │               │
//!   └────timer──── Closing ◀──────────────┘
//! ```
//!
//! `is_open()` tracks the caller's intent and flips the instant `open()` or
//! `close()` is called; [`DialogPhase`] tracks where the animation is.
//!
//! # Invariants
//!
//! - At most one animation timer and one layout frame are pending. Every
//!   entry point that schedules work cancels the handle it replaces first.
//! - A "closed" notification carries the same action as the "closing"
//!   notification of the `close()` call whose timer completed.
//! - After `destroy()` neither animation class is present and nothing is
//!   pending.
//!
//! # Failure Modes
//!
//! - `open()` while open and `close()` while closed are logged no-ops.
//! - Stale wakeups (superseded or cancelled handles) are ignored and
//!   reported as `false`.
//! - Adapter panics propagate to the caller of the triggering method.

use core::fmt;
use core::time::Duration;

use crate::adapter::{BoundingRect, DialogAdapter, NoopAdapter};
use crate::config::{DialogConfig, DialogConfigError};
use crate::constants::{self, CssClasses, Numbers, Strings, css_classes, strings};
use crate::event::{ClickEvent, KeyboardEvent};
use crate::logging;
use crate::scheduler::{
    FrameHandle, InstantScheduler, ManualScheduler, Scheduler, TimerHandle, Wakeup,
};

/// Where the dialog is in its open/close animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    /// Fully closed. Initial and terminal state.
    #[default]
    Closed,
    /// Entrance animation pending.
    Opening,
    /// Fully open.
    Open,
    /// Exit animation pending.
    Closing,
}

impl DialogPhase {
    /// Whether the dialog surface should be shown.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether an entrance or exit animation is pending.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

impl fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        })
    }
}

/// Measurements taken by the most recent layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOutcome {
    /// `None` when stacking detection is disabled.
    pub stacked: Option<bool>,
    pub scrollable: bool,
    pub surface: BoundingRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Transition {
    Opening,
    Closing { action: String },
}

#[derive(Debug)]
struct PendingAnimation {
    handle: TimerHandle,
    transition: Transition,
}

/// Behavioral core of a modal dialog.
///
/// Owns the lifecycle and decision logic; every visible effect goes through
/// the adapter `A`, and every deferred continuation through the scheduler
/// `S`. Each instance is independent.
#[derive(Debug)]
pub struct DialogFoundation<A: DialogAdapter, S: Scheduler> {
    adapter: A,
    scheduler: S,
    config: DialogConfig,
    is_open: bool,
    phase: DialogPhase,
    animation_timer: Option<PendingAnimation>,
    layout_frame: Option<FrameHandle>,
    last_layout: Option<LayoutOutcome>,
}

impl<A: DialogAdapter, S: Scheduler> DialogFoundation<A, S> {
    /// Class names toggled by the foundation.
    pub const CSS_CLASSES: CssClasses = constants::CSS_CLASSES;
    /// Action attribute and reserved action strings.
    pub const STRINGS: Strings = constants::STRINGS;
    /// Default animation durations.
    pub const NUMBERS: Numbers = constants::NUMBERS;

    /// Create a closed dialog with the default configuration.
    pub fn new(adapter: A, scheduler: S) -> Self {
        Self {
            adapter,
            scheduler,
            config: DialogConfig::default(),
            is_open: false,
            phase: DialogPhase::Closed,
            animation_timer: None,
            layout_frame: None,
            last_layout: None,
        }
    }

    /// Create a closed dialog with a validated configuration.
    pub fn with_config(
        adapter: A,
        scheduler: S,
        config: DialogConfig,
    ) -> Result<Self, DialogConfigError> {
        config.validate()?;
        let mut foundation = Self::new(adapter, scheduler);
        foundation.config = config;
        Ok(foundation)
    }

    /// An adapter implementing every capability as a no-op.
    pub fn default_adapter() -> NoopAdapter<A::Target> {
        NoopAdapter::new()
    }

    /// Prepare the surface. Pins the stacked class when stacking detection is
    /// disabled.
    pub fn init(&mut self) {
        if !self.config.auto_stack_buttons {
            self.adapter.add_class(css_classes::STACKED);
        }
        logging::debug!(
            auto_stack_buttons = self.config.auto_stack_buttons,
            "dialog initialized"
        );
    }

    /// Tear down, closing synchronously if open.
    ///
    /// A pending animation completes immediately, so a dialog destroyed while
    /// open delivers both "closing" and "closed" with
    /// [`DESTROY_ACTION`](strings::DESTROY_ACTION) before this returns.
    pub fn destroy(&mut self) {
        if matches!(self.phase, DialogPhase::Opening | DialogPhase::Open) {
            self.close(strings::DESTROY_ACTION);
        }
        if let Some(transition) = self.cancel_animation_timer() {
            self.complete(transition);
        }
        if let Some(frame) = self.layout_frame.take() {
            self.scheduler.cancel_animation_frame(frame);
        }
        self.adapter.remove_class(css_classes::OPENING);
        self.adapter.remove_class(css_classes::CLOSING);
        logging::debug!("dialog destroyed");
    }

    /// Begin opening.
    pub fn open(&mut self) {
        if self.phase == DialogPhase::Open {
            logging::debug!("open ignored: dialog already open");
            return;
        }
        let interrupted = self.cancel_animation_timer();
        self.is_open = true;
        self.phase = DialogPhase::Opening;

        if matches!(interrupted, Some(Transition::Closing { .. })) {
            self.adapter.remove_class(css_classes::CLOSING);
        }
        self.adapter.add_class(css_classes::OPENING);
        self.adapter.add_class(css_classes::OPEN);
        self.adapter.add_body_class(css_classes::SCROLL_LOCK);
        self.layout();
        self.adapter.notify_opening();

        let handle = self.scheduler.set_timeout(self.config.open_duration());
        self.animation_timer = Some(PendingAnimation {
            handle,
            transition: Transition::Opening,
        });
        logging::debug!(timer = handle.id(), "dialog opening");
    }

    /// Begin closing with `action` (`""` for none).
    ///
    /// Closing again before the exit animation ends restarts it; only the
    /// latest call's "closed" notification is delivered.
    pub fn close(&mut self, action: impl Into<String>) {
        let action = action.into();
        if self.phase == DialogPhase::Closed {
            logging::debug!(action = %action, "close ignored: dialog already closed");
            return;
        }
        let interrupted = self.cancel_animation_timer();
        self.is_open = false;
        self.phase = DialogPhase::Closing;

        if interrupted == Some(Transition::Opening) {
            self.adapter.remove_class(css_classes::OPENING);
        }
        self.adapter.add_class(css_classes::CLOSING);
        self.adapter.remove_class(css_classes::OPEN);
        self.adapter.remove_body_class(css_classes::SCROLL_LOCK);
        self.adapter.release_focus();
        self.adapter.notify_closing(&action);

        let handle = self.scheduler.set_timeout(self.config.close_duration());
        logging::debug!(timer = handle.id(), action = %action, "dialog closing");
        self.animation_timer = Some(PendingAnimation {
            handle,
            transition: Transition::Closing { action },
        });
    }

    /// Whether the dialog is logically open, regardless of animation.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Current position in the animation cycle.
    #[inline]
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Whether an animation timer is pending.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation_timer.is_some()
    }

    /// Schedule a layout pass on the next frame, replacing any pending one.
    pub fn layout(&mut self) {
        if let Some(previous) = self.layout_frame.take() {
            self.scheduler.cancel_animation_frame(previous);
            logging::trace!(frame = previous.id(), "layout frame superseded");
        }
        self.layout_frame = Some(self.scheduler.request_animation_frame());
    }

    /// Result of the most recent completed layout pass.
    pub fn last_layout(&self) -> Option<LayoutOutcome> {
        self.last_layout
    }

    /// Action used when the scrim is clicked.
    pub fn scrim_click_action(&self) -> &str {
        &self.config.scrim_click_action
    }

    /// Set the scrim-click action. `""` disables scrim dismissal.
    pub fn set_scrim_click_action(&mut self, action: impl Into<String>) {
        self.config.scrim_click_action = action.into();
        if self.config.scrim_click_action == strings::DESTROY_ACTION {
            logging::warn!("scrim click action set to the reserved destroy action");
        }
    }

    /// Action used when Escape is pressed.
    pub fn escape_key_action(&self) -> &str {
        &self.config.escape_key_action
    }

    /// Set the Escape action. `""` disables Escape dismissal.
    pub fn set_escape_key_action(&mut self, action: impl Into<String>) {
        self.config.escape_key_action = action.into();
        if self.config.escape_key_action == strings::DESTROY_ACTION {
            logging::warn!("escape key action set to the reserved destroy action");
        }
    }

    /// Whether layout passes detect stacked buttons.
    pub fn auto_stack_buttons(&self) -> bool {
        self.config.auto_stack_buttons
    }

    /// Enable or disable stacked-button detection for later layout passes.
    pub fn set_auto_stack_buttons(&mut self, enabled: bool) {
        self.config.auto_stack_buttons = enabled;
    }

    /// Action a click would dismiss with, if any.
    ///
    /// An explicit action on the target wins over the scrim.
    pub fn resolve_click_action(&self, event: &ClickEvent<A::Target>) -> Option<String> {
        if let Some(action) = self
            .adapter
            .get_action_from_event(event)
            .filter(|a| !a.is_empty())
        {
            return Some(action);
        }
        if self
            .adapter
            .event_target_has_class(&event.target, css_classes::SCRIM)
            && !self.config.scrim_click_action.is_empty()
        {
            return Some(self.config.scrim_click_action.clone());
        }
        None
    }

    /// Close if the click resolves to an action.
    pub fn handle_click(&mut self, event: &ClickEvent<A::Target>) {
        if let Some(action) = self.resolve_click_action(event) {
            self.close(action);
        }
    }

    /// Close with the Escape action if `event` is Escape.
    pub fn handle_document_keydown(&mut self, event: &KeyboardEvent) {
        if !event.is_escape() {
            return;
        }
        if self.config.escape_key_action.is_empty() {
            logging::debug!("escape ignored: escape key action disabled");
            return;
        }
        let action = self.config.escape_key_action.clone();
        self.close(action);
    }

    /// Complete the animation if `handle` is the live timer.
    pub fn handle_timer(&mut self, handle: TimerHandle) -> bool {
        match self.animation_timer.take() {
            Some(pending) if pending.handle == handle => {
                self.complete(pending.transition);
                true
            }
            other => {
                self.animation_timer = other;
                logging::trace!(timer = handle.id(), "stale timer ignored");
                false
            }
        }
    }

    /// Run the layout pass if `handle` is the live frame.
    pub fn handle_frame(&mut self, handle: FrameHandle) -> bool {
        if self.layout_frame != Some(handle) {
            logging::trace!(frame = handle.id(), "stale frame ignored");
            return false;
        }
        self.layout_frame = None;
        self.last_layout = Some(self.run_layout_pass());
        true
    }

    /// Dispatch an elapsed scheduler handle.
    pub fn wake(&mut self, wakeup: Wakeup) -> bool {
        match wakeup {
            Wakeup::Timer(handle) => self.handle_timer(handle),
            Wakeup::Frame(handle) => self.handle_frame(handle),
        }
    }

    /// Active configuration, including setter changes.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// The injected adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the injected adapter.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// The injected scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the injected scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Release the adapter and scheduler. Call [`destroy`](Self::destroy)
    /// first if the surface is being torn down.
    pub fn into_parts(self) -> (A, S) {
        (self.adapter, self.scheduler)
    }

    fn cancel_animation_timer(&mut self) -> Option<Transition> {
        let pending = self.animation_timer.take()?;
        self.scheduler.clear_timeout(pending.handle);
        Some(pending.transition)
    }

    fn complete(&mut self, transition: Transition) {
        match transition {
            Transition::Opening => {
                self.phase = DialogPhase::Open;
                self.adapter.remove_class(css_classes::OPENING);
                self.adapter.trap_focus();
                self.adapter.notify_opened();
                logging::debug!("dialog opened");
            }
            Transition::Closing { action } => {
                self.phase = DialogPhase::Closed;
                self.adapter.remove_class(css_classes::CLOSING);
                self.adapter.notify_closed(&action);
                logging::debug!(action = %action, "dialog closed");
            }
        }
    }

    // The surface is measured before any mutation. The stacked query must
    // follow its class removal, so the pass is batched onto one frame rather
    // than split into a read phase and a write phase.
    fn run_layout_pass(&mut self) -> LayoutOutcome {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "dialog_layout",
            auto_stack_buttons = self.config.auto_stack_buttons
        )
        .entered();

        let surface = self.adapter.compute_bounding_rect();

        let stacked = if self.config.auto_stack_buttons {
            self.adapter.remove_class(css_classes::STACKED);
            let stacked = self.adapter.are_buttons_stacked();
            if stacked {
                self.adapter.add_class(css_classes::STACKED);
            }
            Some(stacked)
        } else {
            None
        };

        let scrollable = self.adapter.is_content_scrollable();
        if scrollable {
            self.adapter.add_class(css_classes::SCROLLABLE);
        } else {
            self.adapter.remove_class(css_classes::SCROLLABLE);
        }

        let outcome = LayoutOutcome {
            stacked,
            scrollable,
            surface,
        };
        logging::debug!(
            stacked = ?outcome.stacked,
            scrollable = outcome.scrollable,
            width = outcome.surface.width,
            height = outcome.surface.height,
            "layout pass"
        );
        outcome
    }
}

impl<A: DialogAdapter> DialogFoundation<A, ManualScheduler> {
    /// Advance virtual time by `by`, dispatching every wakeup that falls due,
    /// including ones scheduled while dispatching. Returns how many were
    /// handled.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(by);
        let mut handled = 0;
        while let Some(wakeup) = self.scheduler.pop_due(until) {
            if self.wake(wakeup) {
                handled += 1;
            }
        }
        self.scheduler.set_now(until);
        handled
    }

    /// [`advance`](Self::advance) by `ms` milliseconds.
    pub fn advance_ms(&mut self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }
}

impl<A: DialogAdapter> DialogFoundation<A, InstantScheduler> {
    /// Dispatch every wakeup whose deadline has passed.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(wakeup) = self.scheduler.poll() {
            if self.wake(wakeup) {
                handled += 1;
            }
        }
        handled
    }
}
