//! Per-frame orientation integrator.

use crate::angles::{clamp_theta, normalize_angle, shortest_angular_distance, Orientation};
use crate::constants::{DEFAULT_IDLE_ANGULAR_VELOCITY, DEFAULT_SMOOTHING_FACTOR};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    /// Idle spin added to `idle_phi` each frame (radians).
    pub idle_step: f64,
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            idle_step: DEFAULT_IDLE_ANGULAR_VELOCITY,
            smoothing: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

/// Smoothed orientation plus the idle rotation phase.
///
/// Lives for one rendering session and starts from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub current_phi: f64,
    pub current_theta: f64,
    pub idle_phi: f64,
}

impl AnimationState {
    /// Advance one frame toward `focus`, or toward idle rotation when there is none.
    ///
    /// Both angles follow a first-order decay, so `theta` never overshoots for
    /// a smoothing factor in `(0, 1)`. `phi` always takes the short way round.
    pub fn step(&mut self, focus: Option<Orientation>, params: &MotionParams) -> Orientation {
        let target = match focus {
            Some(target) => target,
            None => {
                self.idle_phi += params.idle_step;
                Orientation::new(self.idle_phi, 0.0)
            }
        };

        let delta_phi = shortest_angular_distance(normalize_angle(self.current_phi), target.phi);
        self.current_phi += delta_phi * params.smoothing;
        self.current_theta += (target.theta - self.current_theta) * params.smoothing;
        self.current_theta = clamp_theta(self.current_theta);

        self.orientation()
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.current_phi, self.current_theta)
    }
}
