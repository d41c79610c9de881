#![no_main]

//! Drives a dialog with arbitrary operation sequences and checks the
//! lifecycle invariants after every step.

use arbitrary::Arbitrary;
use dialog_foundation::testing::{AdapterCall, RecordingAdapter, TestTarget};
use dialog_foundation::{
    ClickEvent, DialogConfig, DialogFoundation, DialogPhase, FrameHandle, KeyboardEvent,
    ManualScheduler, TimerHandle, css_classes,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Empty,
    Ok,
    Cancel,
    Custom(u8),
}

impl Action {
    fn as_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Ok => "ok".to_owned(),
            Self::Cancel => "cancel".to_owned(),
            Self::Custom(n) => format!("action-{n}"),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Open,
    Close(Action),
    Advance(u8),
    Layout,
    Escape,
    KeyCode(u8),
    ScrimClick,
    ButtonClick(Action),
    SetScrimAction(Action),
    SetEscapeAction(Action),
    SetAutoStack(bool),
    SetButtonsStacked(bool),
    StaleTimer(u16),
    StaleFrame(u16),
    Destroy,
}

#[derive(Debug, Arbitrary)]
struct Input {
    reduced_motion: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = if input.reduced_motion {
        DialogConfig::reduced_motion()
    } else {
        DialogConfig::default()
    };
    let Ok(mut dialog) =
        DialogFoundation::with_config(RecordingAdapter::new(), ManualScheduler::new(), config)
    else {
        return;
    };
    dialog.init();

    for op in input.ops.iter().take(256) {
        match op {
            Op::Open => dialog.open(),
            Op::Close(action) => dialog.close(action.as_string()),
            Op::Advance(ms) => {
                dialog.advance_ms(u64::from(*ms));
            }
            Op::Layout => dialog.layout(),
            Op::Escape => dialog.handle_document_keydown(&KeyboardEvent::key("Escape")),
            Op::KeyCode(code) => {
                dialog.handle_document_keydown(&KeyboardEvent::key_code(u32::from(*code)))
            }
            Op::ScrimClick => dialog.handle_click(&ClickEvent::new(TestTarget::scrim())),
            Op::ButtonClick(action) => {
                dialog.handle_click(&ClickEvent::new(TestTarget::button(action.as_string())))
            }
            Op::SetScrimAction(action) => dialog.set_scrim_click_action(action.as_string()),
            Op::SetEscapeAction(action) => dialog.set_escape_key_action(action.as_string()),
            Op::SetAutoStack(enabled) => dialog.set_auto_stack_buttons(*enabled),
            Op::SetButtonsStacked(stacked) => dialog.adapter_mut().set_buttons_stacked(*stacked),
            // Handle ids start at 1 and grow by one per request, so large ids
            // are never live.
            Op::StaleTimer(id) => {
                dialog.handle_timer(TimerHandle::new(u64::from(*id) + 1_000_000));
            }
            Op::StaleFrame(id) => {
                dialog.handle_frame(FrameHandle::new(u64::from(*id) + 1_000_000));
            }
            Op::Destroy => dialog.destroy(),
        }

        let phase = dialog.phase();
        assert!(dialog.scheduler().pending_timers() <= 1);
        assert!(dialog.scheduler().pending_frames() <= 1);
        assert_eq!(dialog.is_open(), matches!(phase, DialogPhase::Opening | DialogPhase::Open));
        assert_eq!(
            dialog.adapter().has_class(css_classes::OPENING),
            phase == DialogPhase::Opening
        );
        assert_eq!(
            dialog.adapter().has_class(css_classes::CLOSING),
            phase == DialogPhase::Closing
        );
    }

    dialog.destroy();
    assert_eq!(dialog.phase(), DialogPhase::Closed);
    assert_eq!(dialog.scheduler().pending_timers(), 0);
    assert_eq!(dialog.scheduler().pending_frames(), 0);

    let mut last_closing = None;
    for call in dialog.adapter().notifications() {
        match call {
            AdapterCall::NotifyClosing(action) => last_closing = Some(action),
            AdapterCall::NotifyClosed(action) => assert_eq!(Some(action), last_closing.take()),
            _ => {}
        }
    }
});
