//! User-facing conversion options, their validation, and background parsing

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::size::TargetSize;
use crate::{Error, Result};

/// Default PNG quality. Accepted for compatibility; it is not applied to the
/// captured bytes.
pub const DEFAULT_QUALITY: f64 = 100.0;

/// Conversion options supplied alongside the input path
///
/// # Examples
///
/// ```
/// let opts = svgshot::ConversionOptions { width: Some(200.0), ..Default::default() };
/// assert!(svgshot::validate_options(&opts).is_ok());
/// assert_eq!(opts.background.as_deref(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Target width in pixels
    pub width: Option<f64>,
    /// Target height in pixels
    pub height: Option<f64>,
    /// Multiplier applied after width/height resolution
    pub scale: Option<f64>,
    /// CSS color or `transparent`; `None` means transparent
    pub background: Option<String>,
    /// PNG quality in 0..=100
    pub quality: Option<f64>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            scale: None,
            background: None,
            quality: Some(DEFAULT_QUALITY),
        }
    }
}

impl ConversionOptions {
    /// The size overrides handed to [`crate::size::resolve`]
    pub fn target(&self) -> TargetSize {
        TargetSize {
            width: self.width,
            height: self.height,
            scale: self.scale,
        }
    }
}

/// Reject out-of-range numeric options.
///
/// Checks width, height, scale and quality in that order and reports the first
/// offender as [`Error::InvalidOption`].
pub fn validate_options(options: &ConversionOptions) -> Result<()> {
    check_positive("width", options.width)?;
    check_positive("height", options.height)?;
    check_positive("scale", options.scale)?;

    if let Some(quality) = options.quality {
        if !(0.0..=100.0).contains(&quality) {
            return Err(Error::InvalidOption { name: "quality", value: quality });
        }
    }
    Ok(())
}

fn check_positive(name: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(Error::InvalidOption { name, value: v }),
        _ => Ok(()),
    }
}

/// Page background behind the rendered SVG
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Transparent,
    /// A CSS color string, syntactically checked only
    Color(String),
}

impl Background {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Background::Transparent)
    }

    pub fn as_css(&self) -> &str {
        match self {
            Background::Transparent => "transparent",
            Background::Color(c) => c,
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{3,8}$").unwrap());
static RGB_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^rgba?\(.+\)$").unwrap());
static NAMED_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// Normalize a background specification.
///
/// Absent or `"transparent"` yields [`Background::Transparent`]. Otherwise the
/// value must look like a hex color, an `rgb()`/`rgba()` call or a bare
/// color name. Only the shape is checked: `#abcd` and `notacolor` pass.
pub fn normalize_background(spec: Option<&str>) -> Result<Background> {
    let spec = match spec {
        None | Some("transparent") => return Ok(Background::Transparent),
        Some(s) => s,
    };

    if HEX_COLOR.is_match(spec) || RGB_COLOR.is_match(spec) || NAMED_COLOR.is_match(spec) {
        Ok(Background::Color(spec.to_string()))
    } else {
        Err(Error::InvalidBackground(spec.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ConversionOptions {
        ConversionOptions::default()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_options(&opts()).is_ok());
        assert_eq!(opts().quality, Some(100.0));
    }

    #[test]
    fn all_fields_in_range() {
        let o = ConversionOptions {
            width: Some(10.0),
            height: Some(20.0),
            scale: Some(2.0),
            quality: Some(80.0),
            ..opts()
        };
        assert!(validate_options(&o).is_ok());
    }

    #[test]
    fn negative_width_is_rejected() {
        let err = validate_options(&ConversionOptions { width: Some(-1.0), ..opts() }).unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn zero_and_non_finite_are_rejected() {
        for o in [
            ConversionOptions { height: Some(0.0), ..opts() },
            ConversionOptions { scale: Some(f64::NAN), ..opts() },
            ConversionOptions { width: Some(f64::INFINITY), ..opts() },
            ConversionOptions { scale: Some(-0.5), ..opts() },
        ] {
            assert!(matches!(validate_options(&o), Err(Error::InvalidOption { .. })), "{o:?}");
        }
    }

    #[test]
    fn quality_out_of_range() {
        let err = validate_options(&ConversionOptions { quality: Some(150.0), ..opts() }).unwrap_err();
        assert!(err.to_string().contains("quality"));
        assert!(validate_options(&ConversionOptions { quality: Some(-1.0), ..opts() }).is_err());
        assert!(validate_options(&ConversionOptions { quality: Some(0.0), ..opts() }).is_ok());
        assert!(validate_options(&ConversionOptions { quality: None, ..opts() }).is_ok());
    }

    #[test]
    fn first_failure_wins() {
        let o = ConversionOptions {
            width: Some(-1.0),
            height: Some(-2.0),
            quality: Some(500.0),
            ..opts()
        };
        match validate_options(&o) {
            Err(Error::InvalidOption { name, .. }) => assert_eq!(name, "width"),
            other => panic!("unexpected: {other:?}"),
        }

        let o = ConversionOptions { scale: Some(0.0), quality: Some(500.0), ..opts() };
        match validate_options(&o) {
            Err(Error::InvalidOption { name, .. }) => assert_eq!(name, "scale"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn target_carries_size_fields() {
        let o = ConversionOptions { width: Some(5.0), scale: Some(2.0), ..opts() };
        assert_eq!(o.target(), TargetSize { width: Some(5.0), height: None, scale: Some(2.0) });
    }

    #[test]
    fn transparent_background() {
        assert_eq!(normalize_background(None).unwrap(), Background::Transparent);
        assert_eq!(normalize_background(Some("transparent")).unwrap(), Background::Transparent);
        assert_eq!(Background::Transparent.to_string(), "transparent");
    }

    #[test]
    fn accepted_color_shapes() {
        for spec in ["#fff", "#A0b1C2", "#abcd", "#11223344", "rgb(1,2,3)", "rgba(0, 0, 0, 0.5)", "white", "rebeccapurple", "notacolor"] {
            let bg = normalize_background(Some(spec)).unwrap();
            assert_eq!(bg.as_css(), spec);
            assert!(!bg.is_transparent());
        }
    }

    #[test]
    fn rejected_color_shapes() {
        for spec in ["not-a-color!", "#ff", "#123456789", "rgb()", "hsl(1,2,3)", "", "red blue", "#ggg"] {
            assert!(matches!(normalize_background(Some(spec)), Err(Error::InvalidBackground(_))), "{spec}");
        }
    }
}
