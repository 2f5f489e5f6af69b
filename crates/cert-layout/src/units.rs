//! Millimeter / pixel conversion
//!
//! All geometry that is stored or passed between components is in
//! millimeters. Pixels only exist at the render boundary, derived from a
//! base scale (px per mm) and a view-only zoom multiplier.

use crate::constants::{BASE_SCALE, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, POSITION_STEP_MM};

/// Convert millimeters to pixels
#[inline]
pub fn mm_to_px(mm: f32, base_scale: f32, zoom: f32) -> f32 {
    mm * base_scale * zoom
}

/// Convert pixels to millimeters
#[inline]
pub fn px_to_mm(px: f32, base_scale: f32, zoom: f32) -> f32 {
    px / (base_scale * zoom)
}

/// Round to the nearest displayed position step (0.5 mm).
#[inline]
pub fn round_to_step(mm: f32) -> f32 {
    (mm / POSITION_STEP_MM).round() * POSITION_STEP_MM
}

/// Base scale and zoom of one render consumer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScale {
    /// Pixels per millimeter at zoom 1
    pub base_scale: f32,
    /// View-only magnification
    pub zoom: f32,
}

impl Default for RenderScale {
    fn default() -> Self {
        Self {
            base_scale: BASE_SCALE,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl RenderScale {
    pub fn new(base_scale: f32, zoom: f32) -> Self {
        Self { base_scale, zoom }
    }

    /// The same base scale at zoom 1, as used by the print path
    pub fn unzoomed(self) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            ..self
        }
    }

    /// Replace the zoom, clamped into the supported range
    pub fn with_zoom(self, zoom: f32) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }

    /// Effective pixels per millimeter
    pub fn px_per_mm(&self) -> f32 {
        self.base_scale * self.zoom
    }

    pub fn to_px(&self, mm: f32) -> f32 {
        mm_to_px(mm, self.base_scale, self.zoom)
    }

    pub fn to_mm(&self, px: f32) -> f32 {
        px_to_mm(px, self.base_scale, self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_uses_base_and_zoom() {
        assert_eq!(mm_to_px(10.0, 2.0, 1.0), 20.0);
        assert_eq!(mm_to_px(10.0, 2.0, 3.0), 60.0);
        assert_eq!(px_to_mm(60.0, 2.0, 3.0), 10.0);
    }

    #[test]
    fn test_round_trip_within_step() {
        for zoom in [0.25, 0.5, 1.0, 1.5, 3.0, 7.75] {
            let scale = RenderScale::new(BASE_SCALE, zoom);
            let mut mm = 0.0_f32;
            while mm < 420.0 {
                let back = scale.to_mm(scale.to_px(mm));
                assert!(
                    (round_to_step(back) - mm).abs() <= POSITION_STEP_MM,
                    "mm={mm} zoom={zoom} back={back}"
                );
                mm += 3.7;
            }
        }
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(40.0), 40.0);
        assert_eq!(round_to_step(40.2), 40.0);
        assert_eq!(round_to_step(40.3), 40.5);
        assert_eq!(round_to_step(40.8), 41.0);
        assert_eq!(round_to_step(-0.2), 0.0);
    }

    #[test]
    fn test_zoom_is_clamped_and_unzoomed_resets() {
        let scale = RenderScale::default().with_zoom(100.0);
        assert_eq!(scale.zoom, MAX_ZOOM);
        assert_eq!(scale.unzoomed().zoom, 1.0);
        assert_eq!(scale.unzoomed().base_scale, BASE_SCALE);
    }
}
