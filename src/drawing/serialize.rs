use log::debug;
use quick_xml::escape::escape;

use crate::drawing::model::Stroke;

// @module: Ipe path markup

/// Pen and color used for every emitted path
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    /// Named pen from the document style sheet
    pub pen: String,

    /// Color for strokes without metadata
    pub default_color: String,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            pen: "fat".to_string(),
            default_color: "black".to_string(),
        }
    }
}

// Avoid emitting "-0" for coordinates that were negated zeros
fn coord(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Append one stroke to `out` as a `<path>` element.
///
/// Returns `false` without writing anything if the stroke has fewer than
/// two points.
pub fn write_path(stroke: &Stroke, style: &PathStyle, out: &mut String) -> bool {
    if !stroke.is_drawable() {
        debug!("Skipping stroke with {} point(s)", stroke.points.len());
        return false;
    }

    let color = match stroke.color() {
        Some(color) => color.to_attribute(),
        None => style.default_color.clone(),
    };

    out.push_str(&format!(
        "<path stroke=\"{}\" pen=\"{}\">\n",
        escape(color.as_str()),
        escape(style.pen.as_str())
    ));
    for (i, point) in stroke.points.iter().enumerate() {
        let op = if i == 0 { 'm' } else { 'l' };
        out.push_str(&format!("{} {} {}\n", coord(point.x), coord(point.y), op));
    }
    out.push_str("</path>\n");

    true
}

/// Render every drawable stroke, in order, as concatenated path elements
pub fn serialize_paths(strokes: &[Stroke], style: &PathStyle) -> String {
    let mut out = String::new();
    let written = strokes
        .iter()
        .filter(|stroke| write_path(stroke, style, &mut out))
        .count();
    debug!("Serialized {} of {} strokes", written, strokes.len());
    out
}
