//! Output size resolution from intrinsic size plus user overrides

use super::{PixelSize, Size};

/// Requested output size overrides
///
/// All present values are expected to be finite and positive; the option
/// validator rejects anything else before resolution runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Multiplier applied after everything else, 1 when absent
    pub scale: Option<f64>,
}

impl TargetSize {
    pub fn width(width: f64) -> Self {
        Self { width: Some(width), ..Default::default() }
    }

    pub fn height(height: f64) -> Self {
        Self { height: Some(height), ..Default::default() }
    }

    pub fn fit(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), scale: None }
    }

    pub fn scaled(scale: f64) -> Self {
        Self { scale: Some(scale), ..Default::default() }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Resolve the raster size for `intrinsic` under `target`.
///
/// With both width and height the result fits inside the requested box without
/// distortion. With one of them the other follows the intrinsic aspect ratio.
/// With neither the intrinsic size is used. The scale factor is applied last
/// and each axis is rounded on its own, so the rounded aspect ratio may drift by
/// up to a pixel.
///
/// `intrinsic` must satisfy [`Size::is_valid`].
pub fn resolve(intrinsic: Size, target: &TargetSize) -> PixelSize {
    let aspect = intrinsic.aspect_ratio();

    let (width, height) = match (target.width, target.height) {
        (Some(w), Some(h)) => {
            if aspect > w / h {
                (w, w / aspect)
            } else {
                (h * aspect, h)
            }
        }
        (Some(w), None) => (w, w * intrinsic.height / intrinsic.width),
        (None, Some(h)) => (h * intrinsic.width / intrinsic.height, h),
        (None, None) => (intrinsic.width, intrinsic.height),
    };

    let scale = target.scale.unwrap_or(1.0);
    PixelSize {
        width: to_pixels(width * scale),
        height: to_pixels(height * scale),
    }
}

// Half away from zero; `as` saturates at u32::MAX. A zero-pixel axis can't be
// captured, so it is held at 1.
fn to_pixels(value: f64) -> u32 {
    (value.round() as u32).max(1)
}
