#![forbid(unsafe_code)]

//! Deferred work: animation timers and batched layout frames.
//!
//! The foundation never stores callbacks. It asks a [`Scheduler`] for an
//! opaque handle and, when the host observes that the handle has elapsed, the
//! host passes it back (`DialogFoundation::wake`). A handle that the
//! foundation has since cancelled or replaced is ignored, so a host whose
//! cancellation is best-effort still gets last-call-wins behavior.
//!
//! Two schedulers ship with the crate:
//!
//! - [`ManualScheduler`]: a virtual clock for tests and host-stepped loops
//!   (the host advances time explicitly).
//! - [`InstantScheduler`]: the same queue keyed off a real monotonic clock
//!   (`web_time::Instant`, so it also runs on `wasm32-unknown-unknown`).
//!
//! # Invariants
//!
//! - Handles are unique for the lifetime of a scheduler.
//! - A cancelled handle is never yielded.
//! - Due wakeups are yielded in (deadline, scheduling order) order.

use core::time::Duration;

use web_time::Instant;

/// Default interval between animation frames (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Handle for a pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Handle for a pending animation-frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// An elapsed handle, ready to be handed back to the foundation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wakeup {
    Timer(TimerHandle),
    Frame(FrameHandle),
}

impl Wakeup {
    fn raw(self) -> u64 {
        match self {
            Self::Timer(h) => h.id(),
            Self::Frame(h) => h.id(),
        }
    }
}

/// Timer and animation-frame capability.
///
/// Implementations must honor cancellation: a handle passed to
/// [`clear_timeout`](Self::clear_timeout) or
/// [`cancel_animation_frame`](Self::cancel_animation_frame) should not be
/// reported as elapsed afterwards. Unknown or already-fired handles are
/// ignored.
pub trait Scheduler {
    /// Schedule a one-shot timer `delay` from now.
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Request a callback on the next animation frame.
    fn request_animation_frame(&mut self) -> FrameHandle;

    fn cancel_animation_frame(&mut self, handle: FrameHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        (**self).set_timeout(delay)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        (**self).clear_timeout(handle);
    }

    fn request_animation_frame(&mut self) -> FrameHandle {
        (**self).request_animation_frame()
    }

    fn cancel_animation_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_animation_frame(handle);
    }
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Duration,
    wakeup: Wakeup,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Timers are due at `now + delay`; frames at `now + frame_interval`.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now: Duration,
    frame_interval: Duration,
    next_id: u64,
    pending: Vec<Scheduled>,
    cancelled: u64,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Create a scheduler at `t = 0` with a 16 ms frame interval.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            next_id: 1,
            pending: Vec::new(),
            cancelled: 0,
        }
    }

    /// Set the delay applied to frame requests.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward to `now`. Never moves backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Remove and return the earliest wakeup due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Wakeup> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.wakeup.raw()))
            .map(|(i, _)| i)?;
        let entry = self.pending.remove(idx);
        self.set_now(entry.due);
        Some(entry.wakeup)
    }

    /// Deadline of the earliest pending wakeup.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending_timers(&self) -> usize {
        self.pending
            .iter()
            .filter(|s| matches!(s.wakeup, Wakeup::Timer(_)))
            .count()
    }

    /// Number of frame requests not yet fired or cancelled.
    pub fn pending_frames(&self) -> usize {
        self.pending
            .iter()
            .filter(|s| matches!(s.wakeup, Wakeup::Frame(_)))
            .count()
    }

    /// Total handles cancelled while still pending.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn cancel(&mut self, wakeup: Wakeup) {
        let before = self.pending.len();
        self.pending.retain(|s| s.wakeup != wakeup);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.allocate());
        self.pending.push(Scheduled {
            due: self.now.saturating_add(delay),
            wakeup: Wakeup::Timer(handle),
        });
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.cancel(Wakeup::Timer(handle));
    }

    fn request_animation_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.allocate());
        self.pending.push(Scheduled {
            due: self.now.saturating_add(self.frame_interval),
            wakeup: Wakeup::Frame(handle),
        });
        handle
    }

    fn cancel_animation_frame(&mut self, handle: FrameHandle) {
        self.cancel(Wakeup::Frame(handle));
    }
}

/// Wall-clock scheduler for hosts with a real event loop.
///
/// The host calls [`poll`](Self::poll) (or `DialogFoundation::pump`) from its
/// loop and may sleep until [`next_deadline`](Self::next_deadline).
#[derive(Debug, Clone)]
pub struct InstantScheduler {
    origin: Instant,
    queue: ManualScheduler,
}

impl Default for InstantScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl InstantScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: ManualScheduler::new(),
        }
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.queue = self.queue.with_frame_interval(interval);
        self
    }

    /// Next wakeup whose deadline has passed, if any.
    pub fn poll(&mut self) -> Option<Wakeup> {
        self.poll_at(Instant::now())
    }

    /// Next wakeup whose deadline is at or before `now`.
    pub fn poll_at(&mut self, now: Instant) -> Option<Wakeup> {
        let elapsed = now.saturating_duration_since(self.origin);
        self.queue.pop_due(elapsed)
    }

    /// When the earliest pending wakeup becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_due().map(|due| self.origin + due)
    }

    pub fn pending(&self) -> usize {
        self.queue.pending_timers() + self.queue.pending_frames()
    }

    fn sync_clock(&mut self) {
        self.queue.set_now(self.origin.elapsed());
    }
}

impl Scheduler for InstantScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        self.sync_clock();
        self.queue.set_timeout(delay)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.queue.clear_timeout(handle);
    }

    fn request_animation_frame(&mut self) -> FrameHandle {
        self.sync_clock();
        self.queue.request_animation_frame()
    }

    fn cancel_animation_frame(&mut self, handle: FrameHandle) {
        self.queue.cancel_animation_frame(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn timers_fire_at_deadline() {
        let mut sched = ManualScheduler::new();
        let h = sched.set_timeout(ms(100));
        assert_eq!(sched.pop_due(ms(99)), None);
        assert_eq!(sched.pop_due(ms(100)), Some(Wakeup::Timer(h)));
        assert_eq!(sched.now(), ms(100));
        assert_eq!(sched.pop_due(ms(1000)), None);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut sched = ManualScheduler::new();
        let h = sched.set_timeout(ms(10));
        sched.clear_timeout(h);
        assert_eq!(sched.pending_timers(), 0);
        assert_eq!(sched.cancelled_count(), 1);
        assert_eq!(sched.pop_due(ms(1000)), None);
    }

    #[test]
    fn cancelling_unknown_handle_is_ignored() {
        let mut sched = ManualScheduler::new();
        sched.clear_timeout(TimerHandle::new(42));
        sched.cancel_animation_frame(FrameHandle::new(42));
        assert_eq!(sched.cancelled_count(), 0);
    }

    #[test]
    fn frames_use_frame_interval() {
        let mut sched = ManualScheduler::new().with_frame_interval(ms(10));
        let f = sched.request_animation_frame();
        assert_eq!(sched.next_due(), Some(ms(10)));
        assert_eq!(sched.pop_due(ms(10)), Some(Wakeup::Frame(f)));
    }

    #[test]
    fn ordering_by_deadline_then_scheduling_order() {
        let mut sched = ManualScheduler::new();
        let late = sched.set_timeout(ms(50));
        let a = sched.set_timeout(ms(20));
        let b = sched.set_timeout(ms(20));
        assert_eq!(sched.pop_due(ms(100)), Some(Wakeup::Timer(a)));
        assert_eq!(sched.pop_due(ms(100)), Some(Wakeup::Timer(b)));
        assert_eq!(sched.pop_due(ms(100)), Some(Wakeup::Timer(late)));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut sched = ManualScheduler::new();
        sched.set_now(ms(30));
        sched.set_now(ms(10));
        assert_eq!(sched.now(), ms(30));
        let h = sched.set_timeout(ms(5));
        assert_eq!(sched.pop_due(ms(34)), None);
        assert_eq!(sched.pop_due(ms(35)), Some(Wakeup::Timer(h)));
    }

    #[test]
    fn handles_are_unique_across_kinds() {
        let mut sched = ManualScheduler::new();
        let t = sched.set_timeout(ms(1));
        let f = sched.request_animation_frame();
        assert_ne!(t.id(), f.id());
    }

    #[test]
    fn instant_scheduler_yields_zero_delay_timer() {
        let mut sched = InstantScheduler::new();
        let h = sched.set_timeout(Duration::ZERO);
        assert!(sched.next_deadline().is_some());
        assert_eq!(sched.poll(), Some(Wakeup::Timer(h)));
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn instant_scheduler_holds_future_timer() {
        let mut sched = InstantScheduler::new();
        let h = sched.set_timeout(Duration::from_secs(3600));
        assert_eq!(sched.poll(), None);
        sched.clear_timeout(h);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.next_deadline(), None);
    }
}
