use crate::drawing::model::{BoundingBox, Point, Stroke};
use crate::errors::ConversionError;

// @module: Bounding-box recentering of a stroke batch

/// Strokes after recentering, with the center they were moved onto
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub strokes: Vec<Stroke>,

    /// Resolved target center, reported as the selection anchor
    pub anchor: Point,
}

/// Translate all strokes so the batch's bounding-box center lands on `target`.
///
/// Without a target the box is moved to the origin, which puts its center at
/// half its own extent.
pub fn normalize(strokes: &[Stroke], target: Option<Point>) -> Result<Normalized, ConversionError> {
    let bbox = BoundingBox::of(strokes).ok_or(ConversionError::EmptyStrokeSet)?;

    let half_x = bbox.width() / 2.0;
    let half_y = bbox.height() / 2.0;
    let anchor = target.unwrap_or_else(|| Point::new(half_x, half_y));

    let strokes = strokes
        .iter()
        .map(|stroke| {
            stroke.map_points(|p| {
                Point::new(
                    p.x - bbox.min_x - half_x + anchor.x,
                    p.y - bbox.min_y - half_y + anchor.y,
                )
            })
        })
        .collect();

    Ok(Normalized { strokes, anchor })
}
