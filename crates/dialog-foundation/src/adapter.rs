#![forbid(unsafe_code)]

//! The capability boundary between the foundation and a rendering surface.
//!
//! # Contract
//!
//! - Class mutations are idempotent and side-effect-only.
//! - Queries (`is_content_scrollable`, `are_buttons_stacked`,
//!   `get_action_from_event`, `event_target_has_class`,
//!   `compute_bounding_rect`) are pure reads evaluated at call time.
//! - Notifications are fire-and-forget and must not panic.
//!
//! Every method is required. Hosts that only need a subset start from
//! [`NoopAdapter`] and wrap it, so the foundation is never driven against a
//! partial implementation.

use std::marker::PhantomData;

use crate::event::ClickEvent;

/// Surface rectangle in host units (CSS pixels for a DOM host).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True if either dimension is zero or negative (detached or hidden).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Operations the foundation performs on, and queries it makes of, the host.
pub trait DialogAdapter {
    /// The host's handle for an event target.
    type Target;

    /// Add a class to the dialog root.
    fn add_class(&mut self, class_name: &str);

    /// Remove a class from the dialog root.
    fn remove_class(&mut self, class_name: &str);

    /// Add a class to the document body.
    fn add_body_class(&mut self, class_name: &str);

    /// Remove a class from the document body.
    fn remove_body_class(&mut self, class_name: &str);

    /// Whether `target` carries `class_name`.
    fn event_target_has_class(&self, target: &Self::Target, class_name: &str) -> bool;

    /// Current bounds of the dialog surface.
    fn compute_bounding_rect(&self) -> BoundingRect;

    /// Constrain keyboard focus to the dialog.
    fn trap_focus(&mut self);

    /// Undo [`trap_focus`](Self::trap_focus) and restore prior focus.
    fn release_focus(&mut self);

    /// Whether the content region currently overflows.
    fn is_content_scrollable(&self) -> bool;

    /// Whether the action buttons no longer fit on one row.
    fn are_buttons_stacked(&self) -> bool;

    /// Action carried by the clicked element or its nearest ancestor with
    /// [`ACTION_ATTRIBUTE`](crate::strings::ACTION_ATTRIBUTE).
    ///
    /// `Some("")` is treated the same as `None`.
    fn get_action_from_event(&self, event: &ClickEvent<Self::Target>) -> Option<String>;

    fn notify_opening(&mut self);

    fn notify_opened(&mut self);

    fn notify_closing(&mut self, action: &str);

    fn notify_closed(&mut self, action: &str);
}

/// Adapter that does nothing and answers every query negatively.
///
/// Queries return `false`, `None`, or an empty rectangle.
pub struct NoopAdapter<T = ()> {
    _target: PhantomData<fn(&T)>,
}

impl<T> NoopAdapter<T> {
    pub const fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for NoopAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for NoopAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NoopAdapter")
    }
}

impl<T> DialogAdapter for NoopAdapter<T> {
    type Target = T;

    fn add_class(&mut self, _class_name: &str) {}

    fn remove_class(&mut self, _class_name: &str) {}

    fn add_body_class(&mut self, _class_name: &str) {}

    fn remove_body_class(&mut self, _class_name: &str) {}

    fn event_target_has_class(&self, _target: &T, _class_name: &str) -> bool {
        false
    }

    fn compute_bounding_rect(&self) -> BoundingRect {
        BoundingRect::default()
    }

    fn trap_focus(&mut self) {}

    fn release_focus(&mut self) {}

    fn is_content_scrollable(&self) -> bool {
        false
    }

    fn are_buttons_stacked(&self) -> bool {
        false
    }

    fn get_action_from_event(&self, _event: &ClickEvent<T>) -> Option<String> {
        None
    }

    fn notify_opening(&mut self) {}

    fn notify_opened(&mut self) {}

    fn notify_closing(&mut self, _action: &str) {}

    fn notify_closed(&mut self, _action: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css_classes;

    #[test]
    fn noop_adapter_answers_negatively() {
        let adapter: NoopAdapter<&str> = NoopAdapter::new();
        assert!(!adapter.is_content_scrollable());
        assert!(!adapter.are_buttons_stacked());
        assert!(!adapter.event_target_has_class(&"scrim", css_classes::SCRIM));
        assert_eq!(adapter.get_action_from_event(&ClickEvent::new("button")), None);
        assert!(adapter.compute_bounding_rect().is_empty());
    }

    #[test]
    fn noop_adapter_accepts_mutations() {
        let mut adapter = NoopAdapter::<()>::default();
        adapter.add_class(css_classes::OPEN);
        adapter.remove_class(css_classes::OPEN);
        adapter.add_body_class(css_classes::SCROLL_LOCK);
        adapter.remove_body_class(css_classes::SCROLL_LOCK);
        adapter.trap_focus();
        adapter.release_focus();
        adapter.notify_opening();
        adapter.notify_opened();
        adapter.notify_closing("close");
        adapter.notify_closed("close");
    }

    #[test]
    fn bounding_rect_emptiness() {
        assert!(BoundingRect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(!BoundingRect::new(10.0, 20.0, 300.0, 200.0).is_empty());
    }
}
