use std::fmt;

// @module: Stroke and drawing data model

/// A point in the source coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Stroke color as three channel tokens, re-emitted verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeColor {
    pub red: String,
    pub green: String,
    pub blue: String,
}

impl StrokeColor {
    // @returns: Channels joined the way the path `stroke` attribute expects
    pub fn to_attribute(&self) -> String {
        format!("{} {} {}", self.red, self.green, self.blue)
    }
}

/// The twelve positional fields of a packed stroke metadata string.
///
/// Fields whose meaning is unknown are kept under placeholder names so the
/// record layout stays visible in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeMetadata {
    pub reserved_0: String,
    pub reserved_1: String,
    pub reserved_2: String,
    pub reserved_3: String,
    pub timestamp: f64,
    pub reserved_5: String,
    pub width: f64,
    pub reserved_7: String,
    pub color: StrokeColor,
    pub alpha: String,
}

/// One continuous pen gesture
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,

    /// Only brief-format strokes carry metadata
    pub metadata: Option<StrokeMetadata>,
}

impl Stroke {
    /// Create a stroke with point data only
    pub fn new(points: Vec<Point>) -> Self {
        Stroke { points, metadata: None }
    }

    /// Create a stroke with decoded metadata
    pub fn with_metadata(points: Vec<Point>, metadata: StrokeMetadata) -> Self {
        Stroke { points, metadata: Some(metadata) }
    }

    /// A single point cannot form a path
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn color(&self) -> Option<&StrokeColor> {
        self.metadata.as_ref().map(|m| &m.color)
    }

    /// Return a copy with every point passed through `f`
    pub fn map_points<F: Fn(Point) -> Point>(&self, f: F) -> Self {
        Stroke {
            points: self.points.iter().copied().map(f).collect(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Legacy stroke: a flat `x0, y0, x1, y1, ...` number list
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyStroke {
    pub points: Vec<f64>,
}

/// Brief stroke record as stored in the archive, still packed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackedRecord {
    pub meta: String,
    pub points: String,

    // The first record of a group may carry a text anchor. It is preserved
    // but has no geometric effect.
    pub anchor_char: Option<String>,
    pub anchor_y_loc: Option<f64>,
}

impl PackedRecord {
    pub fn new<M: Into<String>, P: Into<String>>(meta: M, points: P) -> Self {
        PackedRecord {
            meta: meta.into(),
            points: points.into(),
            anchor_char: None,
            anchor_y_loc: None,
        }
    }
}

/// All strokes captured in one note, in one of two storage shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Drawing {
    /// `strokeGroups`: per-point lists without style information
    Legacy(Vec<Vec<LegacyStroke>>),
    /// `briefStrokeGroups`: packed metadata and point strings
    Brief(Vec<Vec<PackedRecord>>),
}

impl Drawing {
    // @returns: Human readable variant name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Drawing::Legacy(_) => "legacy",
            Drawing::Brief(_) => "brief",
        }
    }

    /// Number of stored strokes before any filtering
    pub fn raw_stroke_count(&self) -> usize {
        match self {
            Drawing::Legacy(groups) => groups.iter().map(Vec::len).sum(),
            Drawing::Brief(groups) => groups.iter().map(Vec::len).sum(),
        }
    }
}

/// Axis-aligned bounds of a stroke batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds of every point of every stroke, or `None` when there are no points
    pub fn of(strokes: &[Stroke]) -> Option<Self> {
        let mut points = strokes.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let init = BoundingBox {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };

        Some(points.fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}
