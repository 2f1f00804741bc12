// DOM wiring and presentation constants for the web front-end

// Element lookup
pub const CANVAS_ID: &str = "globe-canvas";
pub const CONFIG_ATTR: &str = "data-globe-config"; // JSON SessionConfig on the canvas
pub const FOCUS_ATTR: &str = "data-focus"; // "lat,long" on clickable elements
pub const CLEAR_FOCUS_ATTR: &str = "data-clear-focus";

// Fade-in once the first session is mounted
pub const FADE_IN_TRANSITION: &str = "opacity 1s ease";
pub const OPACITY_HIDDEN: &str = "0";
pub const OPACITY_SHOWN: &str = "1";
