#![forbid(unsafe_code)]

//! Property-based invariant tests for the dialog lifecycle.
//!
//! Verifies, over arbitrary operation sequences:
//! 1. `is_open()` equals the intent of the last open/close-like call
//! 2. At most one animation timer and one layout frame are pending
//! 3. Animation classes match the phase; OPEN and scroll lock match intent
//! 4. Focus is trapped exactly while fully open
//! 5. Every "closed" carries the action of the most recent "closing"
//! 6. "opened" never outnumbers "opening", "closed" never outnumbers "closing"
//! 7. Draining the scheduler always leaves a settled phase

use dialog_foundation::testing::{AdapterCall, RecordingAdapter, TestTarget};
use dialog_foundation::{
    ClickEvent, DialogFoundation, DialogPhase, KeyboardEvent, ManualScheduler, css_classes,
};
use proptest::prelude::*;

type Dialog = DialogFoundation<RecordingAdapter, ManualScheduler>;

#[derive(Debug, Clone)]
enum Op {
    Open,
    Close(&'static str),
    Advance(u64),
    Layout,
    Escape,
    ScrimClick,
    ButtonClick(&'static str),
    Destroy,
    SetScrollable(bool),
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_action() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "ok", "cancel", "save"])
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Open),
        2 => arb_action().prop_map(Op::Close),
        4 => (0u64..200).prop_map(Op::Advance),
        1 => Just(Op::Layout),
        1 => Just(Op::Escape),
        1 => Just(Op::ScrimClick),
        1 => arb_action().prop_map(Op::ButtonClick),
        1 => Just(Op::Destroy),
        1 => any::<bool>().prop_map(Op::SetScrollable),
    ]
}

/// Apply `op`, returning the new expected `is_open()` value.
fn apply(d: &mut Dialog, op: &Op, intent: bool) -> bool {
    match op {
        Op::Open => {
            d.open();
            true
        }
        Op::Close(action) => {
            d.close(*action);
            false
        }
        Op::Advance(ms) => {
            d.advance_ms(*ms);
            intent
        }
        Op::Layout => {
            d.layout();
            intent
        }
        Op::Escape => {
            d.handle_document_keydown(&KeyboardEvent::key("Escape"));
            false
        }
        Op::ScrimClick => {
            d.handle_click(&ClickEvent::new(TestTarget::scrim()));
            false
        }
        Op::ButtonClick(action) => {
            d.handle_click(&ClickEvent::new(TestTarget::button(*action)));
            // An empty explicit action falls through to a non-scrim miss.
            if action.is_empty() { intent } else { false }
        }
        Op::Destroy => {
            d.destroy();
            false
        }
        Op::SetScrollable(scrollable) => {
            d.adapter_mut().set_content_scrollable(*scrollable);
            intent
        }
    }
}

fn check_state(d: &Dialog, intent: bool) -> Result<(), TestCaseError> {
    prop_assert_eq!(d.is_open(), intent);
    prop_assert!(d.scheduler().pending_timers() <= 1);
    prop_assert!(d.scheduler().pending_frames() <= 1);

    let phase = d.phase();
    if intent {
        prop_assert!(matches!(phase, DialogPhase::Opening | DialogPhase::Open));
    } else {
        prop_assert!(matches!(phase, DialogPhase::Closing | DialogPhase::Closed));
    }
    prop_assert_eq!(d.is_animating(), phase.is_animating());
    prop_assert_eq!(d.scheduler().pending_timers() == 1, phase.is_animating());

    let adapter = d.adapter();
    prop_assert_eq!(adapter.has_class(css_classes::OPENING), phase == DialogPhase::Opening);
    prop_assert_eq!(adapter.has_class(css_classes::CLOSING), phase == DialogPhase::Closing);
    prop_assert_eq!(adapter.has_class(css_classes::OPEN), intent);
    prop_assert_eq!(adapter.has_body_class(css_classes::SCROLL_LOCK), intent);
    prop_assert_eq!(adapter.is_focus_trapped(), phase == DialogPhase::Open);
    Ok(())
}

fn check_notifications(d: &Dialog) -> Result<(), TestCaseError> {
    let mut last_closing: Option<String> = None;
    let (mut opening, mut opened, mut closing, mut closed) = (0usize, 0usize, 0usize, 0usize);
    for call in d.adapter().notifications() {
        match call {
            AdapterCall::NotifyOpening => opening += 1,
            AdapterCall::NotifyOpened => {
                opened += 1;
                prop_assert!(opened <= opening);
            }
            AdapterCall::NotifyClosing(action) => {
                closing += 1;
                last_closing = Some(action);
            }
            AdapterCall::NotifyClosed(action) => {
                closed += 1;
                prop_assert!(closed <= closing);
                prop_assert_eq!(Some(action), last_closing.take());
            }
            other => prop_assert!(false, "unexpected call {:?}", other),
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn lifecycle_invariants_hold(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut d: Dialog = DialogFoundation::new(RecordingAdapter::new(), ManualScheduler::new());
        let mut intent = false;
        for op in &ops {
            intent = apply(&mut d, op, intent);
            check_state(&d, intent)?;
        }
        check_notifications(&d)?;

        d.advance_ms(10_000);
        check_state(&d, intent)?;
        prop_assert!(!d.phase().is_animating());
        prop_assert_eq!(d.scheduler().pending_frames(), 0);
        check_notifications(&d)?;
    }

    #[test]
    fn destroy_always_settles(ops in prop::collection::vec(arb_op(), 0..32)) {
        let mut d: Dialog = DialogFoundation::new(RecordingAdapter::new(), ManualScheduler::new());
        let mut intent = false;
        for op in &ops {
            intent = apply(&mut d, op, intent);
        }
        d.destroy();
        prop_assert!(!d.is_open());
        prop_assert_eq!(d.phase(), DialogPhase::Closed);
        prop_assert_eq!(d.scheduler().pending_timers(), 0);
        prop_assert_eq!(d.scheduler().pending_frames(), 0);
        prop_assert!(!d.adapter().has_class(css_classes::OPENING));
        prop_assert!(!d.adapter().has_class(css_classes::CLOSING));
        check_notifications(&d)?;
    }

    #[test]
    fn layout_pass_count_matches_frames(layouts in 1usize..8, gap in 0u64..40) {
        let mut d: Dialog = DialogFoundation::new(RecordingAdapter::new(), ManualScheduler::new());
        let mut frames_fired = 0;
        for _ in 0..layouts {
            d.layout();
            frames_fired += d.advance_ms(gap);
        }
        frames_fired += d.advance_ms(100);
        prop_assert_eq!(
            d.adapter().count(&AdapterCall::IsContentScrollable),
            frames_fired
        );
        prop_assert!(frames_fired <= layouts);
    }
}
