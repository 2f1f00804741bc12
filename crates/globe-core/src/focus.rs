//! Focus state machine.
//!
//! A focus request pins the globe to a location for a bounded time. The first
//! request arms a single decay timer; later requests retarget the globe but
//! leave that countdown running, so total attention stays bounded no matter
//! how often callers ask. Expiry (or an explicit release) returns to idle.

use crate::angles::Orientation;
use std::time::Duration;

/// Handle to a scheduled one-shot callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Callback run when a timer fires. Receives the id it was scheduled under.
pub type TimerCallback = Box<dyn FnOnce(TimerId)>;

/// One-shot timer service the session uses for focus decay.
///
/// Implementations must never run `on_fire` from inside `schedule` itself; the
/// caller may still hold borrows of the state the callback touches.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, on_fire: TimerCallback) -> TimerId;
    /// Cancelling an id that already fired or was never issued is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPhase {
    Idle,
    Focused,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FocusState {
    target: Option<Orientation>,
    timer: Option<TimerId>,
}

impl FocusState {
    pub fn phase(&self) -> FocusPhase {
        if self.target.is_some() {
            FocusPhase::Focused
        } else {
            FocusPhase::Idle
        }
    }

    pub fn target(&self) -> Option<Orientation> {
        self.target
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Point the globe at `target`, arming the decay timer only if none is pending.
    ///
    /// Returns `true` when `arm` was called.
    pub fn request(&mut self, target: Orientation, arm: impl FnOnce() -> TimerId) -> bool {
        self.target = Some(target);
        if self.timer.is_some() {
            log::debug!(
                "[focus] retarget phi={:.3} theta={:.3} (timer kept)",
                target.phi,
                target.theta
            );
            return false;
        }
        let id = arm();
        log::debug!(
            "[focus] focused phi={:.3} theta={:.3} timer={:?}",
            target.phi,
            target.theta,
            id
        );
        self.timer = Some(id);
        true
    }

    /// Timer `id` fired. Clears the focus if it is the pending timer.
    pub fn expire(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            log::debug!("[focus] ignoring stale timer {:?}", id);
            return false;
        }
        self.timer = None;
        self.target = None;
        log::debug!("[focus] expired, back to idle");
        true
    }

    /// Drop the focus immediately. Returns the pending timer so the caller can cancel it.
    pub fn release(&mut self) -> Option<TimerId> {
        self.target = None;
        self.timer.take()
    }
}
