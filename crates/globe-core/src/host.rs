//! Contract between the orientation controller and whatever draws the globe.
//!
//! A host takes [`RenderOptions`] plus a per-frame callback, calls that callback
//! once per display refresh with a mutable [`FrameState`], and draws whatever
//! the callback left in it. The returned handle tears everything down again.

use crate::config::SessionConfig;
use crate::constants::*;

/// Output of one frame: the orientation to draw and the backing-store size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    pub phi: f64,
    pub theta: f64,
    pub width: u32,
    pub height: u32,
}

/// A marker as the host receives it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// `[lat, long]` in degrees.
    pub location: [f64; 2],
    pub size: f64,
}

/// Everything a host needs to set up drawing for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub device_pixel_ratio: u32,
    pub width: u32,
    pub height: u32,
    pub phi: f64,
    pub theta: f64,
    pub dark: f32,
    pub diffuse: f32,
    pub opacity: f32,
    pub map_samples: u32,
    pub map_brightness: f32,
    pub base_color: [f32; 3],
    pub marker_color: [f32; 3],
    pub glow_color: [f32; 3],
    pub markers: Vec<Marker>,
}

impl RenderOptions {
    pub fn from_config(config: &SessionConfig) -> Self {
        let palette = config.theme.palette();
        let dimension = config.render_dimension();
        Self {
            device_pixel_ratio: config.device_pixel_ratio,
            width: dimension,
            height: dimension,
            phi: 0.0,
            theta: 0.0,
            dark: palette.dark,
            diffuse: GLOBE_DIFFUSE,
            opacity: GLOBE_OPACITY,
            map_samples: GLOBE_MAP_SAMPLES,
            map_brightness: palette.map_brightness,
            base_color: palette.base_color,
            marker_color: palette.marker_color,
            glow_color: palette.glow_color,
            markers: config.render_markers(),
        }
    }

    pub fn initial_frame(&self) -> FrameState {
        FrameState {
            phi: self.phi,
            theta: self.theta,
            width: self.width,
            height: self.height,
        }
    }
}

pub type FrameCallback = Box<dyn FnMut(&mut FrameState)>;

pub trait RenderHost {
    /// What the globe is drawn onto (a canvas, a window).
    type Surface: ?Sized;
    type Handle: RenderHandle;
    /// Host failures are surfaced as-is; the session never wraps them.
    type Error;

    fn create(
        &mut self,
        surface: &Self::Surface,
        options: RenderOptions,
        on_render: FrameCallback,
    ) -> Result<Self::Handle, Self::Error>;
}

pub trait RenderHandle {
    /// Stop invoking the frame callback and release host resources.
    fn destroy(&mut self);
}
