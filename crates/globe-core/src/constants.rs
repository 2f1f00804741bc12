// Shared tuning constants used by the controller and both frontends.

// Session defaults
pub const DEFAULT_RENDER_SIZE: u32 = 600; // CSS pixels per side
pub const DEFAULT_DEVICE_PIXEL_RATIO: u32 = 2; // backing-store scale handed to the host
pub const DEFAULT_FOCUS_DURATION_MS: u64 = 2500;

// Motion
pub const DEFAULT_IDLE_ANGULAR_VELOCITY: f64 = 0.005; // radians per frame
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.05; // fraction of remaining distance per frame

// Markers
pub const MARKER_SIZE: f64 = 0.07;
pub const MAX_GPU_MARKERS: usize = 64;

// Globe surface look
pub const GLOBE_DIFFUSE: f32 = 2.0;
pub const GLOBE_OPACITY: f32 = 0.9;
pub const GLOBE_MAP_SAMPLES: u32 = 16_000;
pub const MAP_BRIGHTNESS_DARK: f32 = 1.5;
pub const MAP_BRIGHTNESS_LIGHT: f32 = 4.0;

// Palette
pub const MARKER_COLOR: [f32; 3] = [0.1, 0.8, 1.0];
pub const BASE_COLOR_DARK: [f32; 3] = [0.0, 0.0, 0.0];
pub const BASE_COLOR_LIGHT: [f32; 3] = [1.0, 1.0, 1.0];
pub const GLOW_COLOR_DARK: [f32; 3] = [0.3, 0.3, 0.3];
pub const GLOW_COLOR_LIGHT: [f32; 3] = [0.2118, 0.4039, 0.9686];
