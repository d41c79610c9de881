#![forbid(unsafe_code)]

//! Recording adapter for tests.
//!
//! [`RecordingAdapter`] logs every adapter call in order, keeps the class
//! sets and focus-trap state those calls would produce, and answers layout
//! queries from flags the test controls. Hosts can use it to check their own
//! wiring against the foundation.
//!
//! ```
//! use dialog_foundation::testing::{AdapterCall, RecordingAdapter};
//! use dialog_foundation::{DialogFoundation, ManualScheduler};
//!
//! let mut dialog = DialogFoundation::new(RecordingAdapter::new(), ManualScheduler::new());
//! dialog.open();
//! dialog.advance_ms(150);
//! assert_eq!(dialog.adapter().count(&AdapterCall::NotifyOpened), 1);
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::adapter::{BoundingRect, DialogAdapter};
use crate::css_classes;
use crate::event::ClickEvent;

/// One adapter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterCall {
    AddClass(String),
    RemoveClass(String),
    AddBodyClass(String),
    RemoveBodyClass(String),
    EventTargetHasClass(String),
    ComputeBoundingRect,
    TrapFocus,
    ReleaseFocus,
    IsContentScrollable,
    AreButtonsStacked,
    GetActionFromEvent,
    NotifyOpening,
    NotifyOpened,
    NotifyClosing(String),
    NotifyClosed(String),
}

impl AdapterCall {
    /// True for the four observer hooks.
    pub fn is_notification(&self) -> bool {
        matches!(
            self,
            Self::NotifyOpening
                | Self::NotifyOpened
                | Self::NotifyClosing(_)
                | Self::NotifyClosed(_)
        )
    }
}

/// Stand-in for a clicked element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestTarget {
    pub classes: Vec<String>,
    /// Value of the action attribute on the element or an ancestor.
    pub action: Option<String>,
}

impl TestTarget {
    /// Element with no classes and no action.
    pub fn plain() -> Self {
        Self::default()
    }

    /// The scrim element.
    pub fn scrim() -> Self {
        Self::plain().with_class(css_classes::SCRIM)
    }

    /// A button carrying `action`.
    pub fn button(action: impl Into<String>) -> Self {
        Self::plain().with_action(action)
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.classes.push(class_name.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Adapter that records calls and simulates class state.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    calls: RefCell<Vec<AdapterCall>>,
    classes: BTreeSet<String>,
    body_classes: BTreeSet<String>,
    focus_trapped: bool,
    buttons_stacked: bool,
    content_scrollable: bool,
    surface: BoundingRect,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buttons_stacked(mut self, stacked: bool) -> Self {
        self.buttons_stacked = stacked;
        self
    }

    #[must_use]
    pub fn with_content_scrollable(mut self, scrollable: bool) -> Self {
        self.content_scrollable = scrollable;
        self
    }

    #[must_use]
    pub fn with_surface(mut self, surface: BoundingRect) -> Self {
        self.surface = surface;
        self
    }

    pub fn set_buttons_stacked(&mut self, stacked: bool) {
        self.buttons_stacked = stacked;
    }

    pub fn set_content_scrollable(&mut self, scrollable: bool) {
        self.content_scrollable = scrollable;
    }

    /// Snapshot of the call log.
    pub fn calls(&self) -> Vec<AdapterCall> {
        self.calls.borrow().clone()
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<AdapterCall> {
        std::mem::take(self.calls.get_mut())
    }

    pub fn clear_calls(&mut self) {
        self.calls.get_mut().clear();
    }

    /// Notifications only, in order.
    pub fn notifications(&self) -> Vec<AdapterCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_notification())
            .cloned()
            .collect()
    }

    pub fn count(&self, call: &AdapterCall) -> usize {
        self.count_where(|c| c == call)
    }

    pub fn count_where(&self, pred: impl Fn(&AdapterCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }

    /// Index of the first occurrence of `call` in the log.
    pub fn position(&self, call: &AdapterCall) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    /// Index of the last occurrence of `call` in the log.
    pub fn last_position(&self, call: &AdapterCall) -> Option<usize> {
        self.calls.borrow().iter().rposition(|c| c == call)
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    pub fn has_body_class(&self, class_name: &str) -> bool {
        self.body_classes.contains(class_name)
    }

    pub fn is_focus_trapped(&self) -> bool {
        self.focus_trapped
    }

    fn record(&self, call: AdapterCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DialogAdapter for RecordingAdapter {
    type Target = TestTarget;

    fn add_class(&mut self, class_name: &str) {
        self.record(AdapterCall::AddClass(class_name.to_owned()));
        self.classes.insert(class_name.to_owned());
    }

    fn remove_class(&mut self, class_name: &str) {
        self.record(AdapterCall::RemoveClass(class_name.to_owned()));
        self.classes.remove(class_name);
    }

    fn add_body_class(&mut self, class_name: &str) {
        self.record(AdapterCall::AddBodyClass(class_name.to_owned()));
        self.body_classes.insert(class_name.to_owned());
    }

    fn remove_body_class(&mut self, class_name: &str) {
        self.record(AdapterCall::RemoveBodyClass(class_name.to_owned()));
        self.body_classes.remove(class_name);
    }

    fn event_target_has_class(&self, target: &TestTarget, class_name: &str) -> bool {
        self.record(AdapterCall::EventTargetHasClass(class_name.to_owned()));
        target.classes.iter().any(|c| c == class_name)
    }

    fn compute_bounding_rect(&self) -> BoundingRect {
        self.record(AdapterCall::ComputeBoundingRect);
        self.surface
    }

    fn trap_focus(&mut self) {
        self.record(AdapterCall::TrapFocus);
        self.focus_trapped = true;
    }

    fn release_focus(&mut self) {
        self.record(AdapterCall::ReleaseFocus);
        self.focus_trapped = false;
    }

    fn is_content_scrollable(&self) -> bool {
        self.record(AdapterCall::IsContentScrollable);
        self.content_scrollable
    }

    fn are_buttons_stacked(&self) -> bool {
        self.record(AdapterCall::AreButtonsStacked);
        self.buttons_stacked
    }

    fn get_action_from_event(&self, event: &ClickEvent<TestTarget>) -> Option<String> {
        self.record(AdapterCall::GetActionFromEvent);
        event.target.action.clone()
    }

    fn notify_opening(&mut self) {
        self.record(AdapterCall::NotifyOpening);
    }

    fn notify_opened(&mut self) {
        self.record(AdapterCall::NotifyOpened);
    }

    fn notify_closing(&mut self, action: &str) {
        self.record(AdapterCall::NotifyClosing(action.to_owned()));
    }

    fn notify_closed(&mut self, action: &str) {
        self.record(AdapterCall::NotifyClosed(action.to_owned()));
    }
}
