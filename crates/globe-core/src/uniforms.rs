use crate::angles::{location_to_unit, Orientation};
use crate::constants::MAX_GPU_MARKERS;
use crate::host::{FrameState, RenderOptions};
use glam::Mat4;

/// Uniform block for `globe.wgsl`. Field order and padding mirror the WGSL struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobeUniforms {
    pub rotation: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub dark: f32,
    pub diffuse: f32,
    pub opacity: f32,
    pub map_samples: f32,
    pub map_brightness: f32,
    pub marker_count: u32,
    pub base_color: [f32; 4],
    pub marker_color: [f32; 4],
    pub glow_color: [f32; 4],
    /// xyz = globe-local unit position, w = size.
    pub markers: [[f32; 4]; MAX_GPU_MARKERS],
}

impl GlobeUniforms {
    /// Pack one frame. `viewport` is the surface size actually being drawn to.
    pub fn new(options: &RenderOptions, frame: &FrameState, viewport: [u32; 2]) -> Self {
        let rotation = Orientation::new(frame.phi, frame.theta).view_rotation();
        let mut markers = [[0.0; 4]; MAX_GPU_MARKERS];
        let count = options.markers.len().min(MAX_GPU_MARKERS);
        for (slot, marker) in markers.iter_mut().zip(&options.markers) {
            let [x, y, z] = location_to_unit(marker.location[0], marker.location[1]);
            *slot = [x as f32, y as f32, z as f32, marker.size as f32];
        }
        Self {
            rotation: Mat4::from_mat3(rotation).to_cols_array_2d(),
            resolution: [viewport[0].max(1) as f32, viewport[1].max(1) as f32],
            dark: options.dark,
            diffuse: options.diffuse,
            opacity: options.opacity,
            map_samples: options.map_samples as f32,
            map_brightness: options.map_brightness,
            marker_count: count as u32,
            base_color: rgba(options.base_color),
            marker_color: rgba(options.marker_color),
            glow_color: rgba(options.glow_color),
            markers,
        }
    }
}

#[inline]
fn rgba(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}
