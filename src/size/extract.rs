//! Intrinsic size extraction from raw SVG text
//!
//! This is a textual scan, not an XML parse. The first `width`/`height` pair or
//! `viewBox` anywhere in the text wins, including ones on nested elements or
//! inside comments. An attribute name only counts when whitespace precedes it,
//! so `stroke-width` and `data-height` are skipped.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::Size;
use crate::{Error, Result};

// Attribute names must start at whitespace so `stroke-width` is not taken as
// `width`. Unit suffixes after the number are accepted and dropped.
static WIDTH_ATTR: LazyLock<Regex> = LazyLock::new(|| dimension_attr("width"));
static HEIGHT_ATTR: LazyLock<Regex> = LazyLock::new(|| dimension_attr("height"));
static VIEWBOX_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)viewBox\s*=\s*["']([^"']*)["']"#).unwrap()
});
static VIEWBOX_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

fn dimension_attr(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?:^|\s){name}\s*=\s*["']\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*[A-Za-z%]*\s*["']"#
    ))
    .unwrap()
}

/// Determine the size an SVG document declares for itself.
///
/// Tries explicit `width`/`height` attributes first, then `viewBox`. Fails with
/// [`Error::DimensionsUnavailable`] when neither yields a positive finite size.
pub fn extract_intrinsic_size(svg: &str) -> Result<Size> {
    if let Some(size) = from_width_height(svg) {
        debug!("intrinsic size {} from width/height attributes", size);
        return Ok(size);
    }
    if let Some(size) = from_view_box(svg) {
        debug!("intrinsic size {} from viewBox", size);
        return Ok(size);
    }
    Err(Error::DimensionsUnavailable)
}

fn from_width_height(svg: &str) -> Option<Size> {
    let width = first_number(&WIDTH_ATTR, svg)?;
    let height = first_number(&HEIGHT_ATTR, svg)?;
    Some(Size::new(width, height)).filter(Size::is_valid)
}

fn first_number(re: &Regex, svg: &str) -> Option<f64> {
    re.captures(svg)?.get(1)?.as_str().parse().ok()
}

// The third and fourth values are treated as max coordinates, so the origin is
// subtracted from them. For a viewBox at 0,0 this is the usual width/height.
fn from_view_box(svg: &str) -> Option<Size> {
    let raw = VIEWBOX_ATTR.captures(svg)?.get(1)?.as_str();
    let values = VIEWBOX_SEP
        .split(raw.trim())
        .filter(|t| !t.is_empty())
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;

    match values.as_slice() {
        [min_x, min_y, max_x, max_y] => {
            Some(Size::new(max_x - min_x, max_y - min_y)).filter(Size::is_valid)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_width_and_height() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(100.0, 100.0));
    }

    #[test]
    fn units_are_dropped() {
        let svg = r#"<svg width="12.5pt" height='30cm'/>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(12.5, 30.0));

        let svg = r#"<svg width="100%" height="50px"/>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(100.0, 50.0));
    }

    #[test]
    fn view_box_at_origin() {
        let svg = r#"<svg viewBox="0 0 200 150"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(200.0, 150.0));
    }

    #[test]
    fn view_box_with_commas() {
        let svg = r#"<svg viewBox="0,0, 64,32"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(64.0, 32.0));
    }

    #[test]
    fn view_box_offset_is_subtracted() {
        let svg = r#"<svg viewBox="10 10 200 150"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(190.0, 140.0));
    }

    #[test]
    fn single_dimension_falls_through_to_view_box() {
        let svg = r#"<svg width="500" viewBox="0 0 40 20"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(40.0, 20.0));
    }

    #[test]
    fn non_numeric_dimensions_fall_through() {
        let svg = r#"<svg width="auto" height="auto" viewBox="0 0 8 4"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(8.0, 4.0));
    }

    #[test]
    fn zero_dimensions_fall_through() {
        let svg = r#"<svg width="0" height="10" viewBox="0 0 5 5"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(5.0, 5.0));
    }

    #[test]
    fn stroke_width_is_not_width() {
        let svg = r#"<svg viewBox="0 0 30 30"><path stroke-width="2" height="9"/></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(30.0, 30.0));
    }

    #[test]
    fn prefixed_attribute_names_are_skipped() {
        let svg = r#"<svg data-width="999" data-height="999" width="12" height="6"></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(12.0, 6.0));
    }

    #[test]
    fn first_match_anywhere_wins() {
        // Nested element attributes are picked up ahead of the root viewBox.
        let svg = r#"<svg viewBox="0 0 50 50"><rect width="10" height="20"/></svg>"#;
        assert_eq!(extract_intrinsic_size(svg).unwrap(), Size::new(10.0, 20.0));
    }

    #[test]
    fn malformed_view_box_fails() {
        for svg in [
            r#"<svg viewBox="0 0 100"></svg>"#,
            r#"<svg viewBox="0 0 100 100 5"></svg>"#,
            r#"<svg viewBox="a b c d"></svg>"#,
            r#"<svg viewBox="50 50 10 10"></svg>"#,
        ] {
            assert!(matches!(extract_intrinsic_size(svg), Err(Error::DimensionsUnavailable)), "{svg}");
        }
    }

    #[test]
    fn missing_everything_fails() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="5"/></svg>"#;
        assert!(matches!(extract_intrinsic_size(svg), Err(Error::DimensionsUnavailable)));
    }
}
