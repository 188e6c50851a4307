//! SVG export of the line store as an embeddable data URI.

use crate::document::LineStore;
use crate::shapes::Line;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt::Write;

/// XML namespace of the SVG root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Prefix of the exported data URI.
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// `<path>` element for a single line.
pub fn svg_path_element(line: &Line) -> String {
    format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
        line.to_path().to_svg(),
        line.color.to_hex(),
        line.width
    )
}

/// SVG document with one `<path>` per line, in stack order.
pub fn svg_document(store: &LineStore) -> String {
    let mut svg = format!(r#"<svg xmlns="{SVG_NAMESPACE}">"#);
    for line in store.lines() {
        svg.push_str(&svg_path_element(line));
    }
    svg.push_str("</svg>");
    svg
}

/// Encode arbitrary SVG text as a base64 data URI. The text is encoded as
/// UTF-8, so non-ASCII content survives.
pub fn encode_data_uri(svg: &str) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + svg.len() * 4 / 3 + 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(svg.as_bytes(), &mut uri);
    uri
}

/// Export the whole store as a `data:image/svg+xml;base64,...` URI.
pub fn svg_data_uri(store: &LineStore) -> String {
    let svg = svg_document(store);
    let uri = encode_data_uri(&svg);
    log::info!("Exported {} line(s) as SVG ({} bytes)", store.len(), svg.len());
    log::debug!("{uri}");
    uri
}

/// Decode a data URI produced by [`svg_data_uri`] back to SVG text.
///
/// Returns `None` if the prefix is wrong or the payload is not valid
/// base64-encoded UTF-8.
pub fn decode_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

/// Human-readable summary of an export, one line per path.
pub fn describe(store: &LineStore) -> String {
    let mut out = String::new();
    for (i, line) in store.lines().iter().enumerate() {
        let _ = writeln!(
            out,
            "#{i} {} width={} elbows={}{}",
            line.color,
            line.width,
            line.elbows.len(),
            if line.locked { " locked" } else { "" }
        );
    }
    out
}
