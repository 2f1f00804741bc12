use crate::angles::{location_to_angles, Orientation};
use crate::animation::{AnimationState, MotionParams};
use crate::focus::{FocusPhase, FocusState, TimerId};

/// Focus state and smoothed orientation for one session.
///
/// Host-agnostic: the session feeds it frame ticks, focus requests and timer
/// expiries, and reads back the orientation to display.
#[derive(Clone, Debug, Default)]
pub struct OrientationController {
    focus: FocusState,
    animation: AnimationState,
    motion: MotionParams,
    frames: u64,
}

impl OrientationController {
    pub fn new(motion: MotionParams) -> Self {
        Self {
            motion,
            ..Self::default()
        }
    }

    /// Focus on `(lat, long)` in degrees. `arm` is only called when no timer is pending.
    pub fn set_focus(&mut self, lat: f64, long: f64, arm: impl FnOnce() -> TimerId) -> bool {
        self.focus.request(location_to_angles(lat, long), arm)
    }

    pub fn expire(&mut self, id: TimerId) -> bool {
        self.focus.expire(id)
    }

    pub fn release(&mut self) -> Option<TimerId> {
        self.focus.release()
    }

    /// Run one frame of the integrator.
    pub fn tick(&mut self) -> Orientation {
        self.frames += 1;
        self.animation.step(self.focus.target(), &self.motion)
    }

    pub fn phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn motion(&self) -> &MotionParams {
        &self.motion
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
