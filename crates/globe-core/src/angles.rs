//! Angle math for the globe orientation.
//!
//! `phi` spins the globe around its polar axis and is left unbounded so idle
//! rotation can accumulate forever; `theta` tilts it toward the viewer and is
//! kept within `[-π/2, π/2]` by [`clamp_theta`].

use glam::Mat3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Sphere rotation (`phi`) and tilt (`theta`) in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub phi: f64,
    pub theta: f64,
}

impl Orientation {
    pub const fn new(phi: f64, theta: f64) -> Self {
        Self { phi, theta }
    }

    /// Rotation taking globe-local positions into view space.
    ///
    /// A location converted with [`location_to_angles`] ends up on `+Z`, facing
    /// the viewer. `phi` is wrapped first so long idle sessions keep full f32
    /// precision on the GPU.
    pub fn view_rotation(&self) -> Mat3 {
        let phi = normalize_angle(self.phi) as f32;
        let theta = clamp_theta(self.theta) as f32;
        Mat3::from_rotation_x(theta) * Mat3::from_rotation_y(phi)
    }
}

/// Convert a geographic coordinate in degrees to the orientation that faces it.
#[inline]
pub fn location_to_angles(lat: f64, long: f64) -> Orientation {
    let phi = PI - (long.to_radians() - FRAC_PI_2);
    let theta = lat.to_radians();
    Orientation { phi, theta }
}

/// Signed shortest turn from `from` to `to`, in `(-π, π]`.
#[inline]
pub fn shortest_angular_distance(from: f64, to: f64) -> f64 {
    let delta = PI - (PI - (to - from)).rem_euclid(TAU);
    // rem_euclid can round up to TAU for inputs just below a multiple of it
    if delta <= -PI {
        delta + TAU
    } else {
        delta
    }
}

/// Wrap any angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[inline]
pub fn clamp_theta(theta: f64) -> f64 {
    theta.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Unit position of a geographic coordinate (degrees) in globe-local space.
///
/// Matches the convention of [`Orientation::view_rotation`].
pub fn location_to_unit(lat: f64, long: f64) -> [f64; 3] {
    let lat = lat.to_radians();
    let azimuth = long.to_radians() + FRAC_PI_2;
    [lat.cos() * azimuth.sin(), lat.sin(), lat.cos() * azimuth.cos()]
}
