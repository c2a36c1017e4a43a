use log::debug;

use crate::drawing::model::{Drawing, LegacyStroke, PackedRecord, Point, Stroke};
use crate::drawing::record::{pair_values, parse_record};
use crate::errors::RecordError;

// @module: Stroke extraction from either drawing shape

// @const: Canvas height of the device that produced legacy notes
pub const DEFAULT_LEGACY_CANVAS_HEIGHT: f64 = 641.0;

/// Options for turning a stored drawing into strokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Legacy y values are flipped as `height - y`
    pub legacy_canvas_height: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            legacy_canvas_height: DEFAULT_LEGACY_CANVAS_HEIGHT,
        }
    }
}

/// Flatten a drawing into strokes, in group order then stroke order.
///
/// Degenerate strokes are dropped. An empty result is returned as-is.
pub fn extract_strokes(drawing: &Drawing, options: &ExtractOptions) -> Result<Vec<Stroke>, RecordError> {
    let strokes = match drawing {
        Drawing::Legacy(groups) => groups
            .iter()
            .flatten()
            .filter(|stroke| stroke.points.len() > 2)
            .map(|stroke| legacy_stroke(stroke, options.legacy_canvas_height))
            .collect::<Result<Vec<_>, _>>()?,
        Drawing::Brief(groups) => {
            let mut strokes = Vec::new();
            for record in groups.iter().flatten() {
                if let Some(stroke) = brief_stroke(record)? {
                    strokes.push(stroke);
                }
            }
            strokes
        }
    };

    debug!(
        "Extracted {} of {} {} strokes",
        strokes.len(),
        drawing.raw_stroke_count(),
        drawing.kind()
    );

    Ok(strokes)
}

fn legacy_stroke(stroke: &LegacyStroke, canvas_height: f64) -> Result<Stroke, RecordError> {
    let points = pair_values(&stroke.points)?;
    Ok(Stroke::new(points).map_points(|p| Point::new(p.x, canvas_height - p.y)))
}

fn brief_stroke(record: &PackedRecord) -> Result<Option<Stroke>, RecordError> {
    let stroke = parse_record(&record.meta, &record.points)?;
    if stroke.points.len() > 1 {
        Ok(Some(stroke.map_points(|p| Point::new(p.x, -p.y))))
    } else {
        Ok(None)
    }
}
