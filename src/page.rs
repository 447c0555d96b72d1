//! HTML pages that host the SVG inside the browser

use base64::Engine as Base64Engine;

use crate::options::Background;
use crate::size::PixelSize;

/// Script evaluated against [`measure_page`]. Returns a JSON string with the
/// first `<svg>` element's geometric bounding box and client box; either may be
/// null when unavailable.
pub const MEASURE_SCRIPT: &str = r#"(function(){
    const svg = document.querySelector('svg');
    if (!svg) return JSON.stringify({ bbox: null, client: null });
    let bbox = null;
    try {
        const b = svg.getBBox();
        bbox = { width: b.width, height: b.height };
    } catch (e) {}
    const client = { width: svg.clientWidth, height: svg.clientHeight };
    return JSON.stringify({ bbox: bbox, client: client });
})()"#;

/// Page that shows `svg` at exactly `size` CSS pixels over `background`.
pub fn render_page(svg: &str, size: PixelSize, background: &Background) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>\
         html,body{{margin:0;padding:0;overflow:hidden;background:{bg};}}\
         svg{{display:block;width:{w}px;height:{h}px;}}\
         </style></head><body>{svg}</body></html>",
        bg = background.as_css(),
        w = size.width,
        h = size.height,
    )
}

/// Page that shows `svg` at its natural size, for measuring.
pub fn measure_page(svg: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>\
         html,body{{margin:0;padding:0;}}\
         </style></head><body>{svg}</body></html>"
    )
}

/// Encode an HTML document as a `data:` URL the browser can navigate to.
pub fn data_url(html: &str) -> String {
    format!(
        "data:text/html;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(html)
    )
}
