/*!
 * Drawing pipeline: stored pen strokes to Ipe markup.
 *
 * The stages run in this order, each as a pure function:
 *
 * - `record`: packed brief-record decoding
 * - `extract`: flattening a `Drawing` into ordered strokes, with the axis flip
 * - `normalize`: bounding-box recentering onto a target point
 * - `serialize`: `<path>` element rendering
 * - `compose`: selection fragment or full document wrapping
 *
 * `render_selection` and `render_page` chain all of them.
 */

use log::debug;

use crate::errors::ConversionError;

// Re-export main types for easier usage
pub use self::compose::{DocumentHeader, selection_fragment, standalone_document};
pub use self::extract::{ExtractOptions, extract_strokes};
pub use self::model::{
    BoundingBox, Drawing, LegacyStroke, PackedRecord, Point, Stroke, StrokeColor, StrokeMetadata,
};
pub use self::normalize::{Normalized, normalize};
pub use self::record::parse_record;
pub use self::serialize::{PathStyle, serialize_paths};

// Submodules
pub mod compose;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod record;
pub mod serialize;

/// Everything the pipeline needs besides the drawing itself
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderOptions {
    pub extract: ExtractOptions,
    pub style: PathStyle,
    pub header: DocumentHeader,
}

/// Final markup of one rendered drawing
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDrawing {
    pub markup: String,

    /// Center the strokes were placed on
    pub anchor: Point,

    /// Paths actually emitted
    pub stroke_count: usize,
}

/// Extract, recenter and serialize, returning the path markup and anchor
fn render_paths(
    drawing: &Drawing,
    options: &RenderOptions,
    target: Option<Point>,
) -> Result<(String, Point, usize), ConversionError> {
    let strokes = extract_strokes(drawing, &options.extract)?;
    if strokes.is_empty() {
        return Err(ConversionError::EmptyStrokeSet);
    }

    let normalized = normalize(&strokes, target)?;
    let paths = serialize_paths(&normalized.strokes, &options.style);

    debug!(
        "Rendered {} paths anchored at ({})",
        normalized.strokes.len(),
        normalized.anchor
    );

    Ok((paths, normalized.anchor, normalized.strokes.len()))
}

/// Render a drawing as an `<ipeselection>` fragment for pasting into an editor
pub fn render_selection(
    drawing: &Drawing,
    options: &RenderOptions,
    target: Option<Point>,
) -> Result<RenderedDrawing, ConversionError> {
    let (paths, anchor, stroke_count) = render_paths(drawing, options, target)?;
    Ok(RenderedDrawing {
        markup: selection_fragment(&paths, anchor),
        anchor,
        stroke_count,
    })
}

/// Render a drawing as a standalone document centered on a `width` x `height` page
pub fn render_page(
    drawing: &Drawing,
    options: &RenderOptions,
    width: f64,
    height: f64,
) -> Result<RenderedDrawing, ConversionError> {
    let page_center = Point::new(width / 2.0, height / 2.0);
    let (paths, anchor, stroke_count) = render_paths(drawing, options, Some(page_center))?;
    Ok(RenderedDrawing {
        markup: standalone_document(&paths, &options.header),
        anchor,
        stroke_count,
    })
}
