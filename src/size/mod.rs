//! Size types and the dimension logic built on them
//!
//! Intrinsic sizes come from the SVG text ([`extract_intrinsic_size`]) or, when
//! the document declares none, from a browser measurement reduced by
//! [`measured_size`]. [`resolve`] then turns the intrinsic size and the user's
//! overrides into the integer raster size handed to the renderer.

pub mod extract;
pub mod resolve;

pub use extract::extract_intrinsic_size;
pub use resolve::{resolve, TargetSize};

use std::fmt;

/// Size used when a rendered SVG reports neither a bounding box nor a client box
pub const DEFAULT_MEASURED_SIZE: Size = Size {
    width: 300.0,
    height: 300.0,
};

/// A width/height pair in pixel-equivalent units
///
/// SVG unit suffixes (`pt`, `cm`, ...) are ignored upstream, so every value
/// here is treated as CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both components are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Final raster dimensions in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pick the size reported by a browser measurement.
///
/// The geometric bounding box wins, then the element's client box, then
/// [`DEFAULT_MEASURED_SIZE`].
pub fn measured_size(bbox: Option<Size>, client: Option<Size>) -> Size {
    bbox.filter(Size::is_valid)
        .or_else(|| client.filter(Size::is_valid))
        .unwrap_or(DEFAULT_MEASURED_SIZE)
}
