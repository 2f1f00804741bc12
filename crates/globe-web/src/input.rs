// Pure parsing helpers for DOM attributes. Kept free of web-sys so the host
// test suite can include this file directly.

/// Parse a `data-focus` value of the form `"lat,long"` (degrees).
///
/// Surrounding whitespace is ignored. Values outside the geographic range are
/// accepted as-is; only non-numeric or non-finite input is rejected.
pub fn parse_focus_attr(value: &str) -> Option<(f64, f64)> {
    let (lat, long) = value.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let long: f64 = long.trim().parse().ok()?;
    (lat.is_finite() && long.is_finite()).then_some((lat, long))
}

/// CSS side length for a backing store of `dimension` device pixels.
#[inline]
pub fn css_size_px(dimension: u32, device_pixel_ratio: u32) -> u32 {
    (dimension / device_pixel_ratio.max(1)).max(1)
}

/// Treat an absent or blank config attribute as "use the defaults".
#[inline]
pub fn config_source(attr: Option<String>) -> Option<String> {
    attr.filter(|s| !s.trim().is_empty())
}
