//! Colour parameters handed opaquely to the render host.

use crate::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub dark: f32,
    pub map_brightness: f32,
    pub base_color: [f32; 3],
    pub marker_color: [f32; 3],
    pub glow_color: [f32; 3],
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                dark: 0.0,
                map_brightness: MAP_BRIGHTNESS_LIGHT,
                base_color: BASE_COLOR_LIGHT,
                marker_color: MARKER_COLOR,
                glow_color: GLOW_COLOR_LIGHT,
            },
            Theme::Dark => Palette {
                dark: 1.0,
                map_brightness: MAP_BRIGHTNESS_DARK,
                base_color: BASE_COLOR_DARK,
                marker_color: MARKER_COLOR,
                glow_color: GLOW_COLOR_DARK,
            },
        }
    }
}
