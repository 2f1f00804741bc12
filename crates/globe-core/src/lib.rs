pub mod angles;
pub mod animation;
pub mod config;
pub mod constants;
pub mod controller;
pub mod focus;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod host;
pub mod session;
pub mod theme;
pub mod timer;
pub mod uniforms;

pub static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");

pub use angles::*;
pub use animation::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use focus::*;
#[cfg(feature = "gpu")]
pub use gpu::*;
pub use host::*;
pub use session::*;
pub use theme::*;
pub use timer::*;
pub use uniforms::*;
