use crate::drawing::model::{Point, Stroke, StrokeColor, StrokeMetadata};
use crate::errors::RecordError;

// @module: Packed stroke record decoding

// @const: Positional fields in a metadata string
pub const METADATA_FIELD_COUNT: usize = 12;

/// Decode one brief record into a stroke.
///
/// Points are returned as stored; any axis flip is up to the caller.
pub fn parse_record(meta: &str, points: &str) -> Result<Stroke, RecordError> {
    let metadata = parse_metadata(meta)?;
    let points = parse_points(points)?;
    Ok(Stroke::with_metadata(points, metadata))
}

/// Split a packed list, dropping the one trailing separator
fn split_packed(packed: &str) -> Vec<&str> {
    let packed = packed.trim();
    let trimmed = packed.strip_suffix(',').unwrap_or(packed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(',').collect()
}

fn parse_number(field: &'static str, token: &str) -> Result<f64, RecordError> {
    token.trim().parse::<f64>().map_err(|_| RecordError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

/// Decode a metadata string such as `"a,b,c,d,1000,e,2.5,f,255,0,0,1,"`
pub fn parse_metadata(meta: &str) -> Result<StrokeMetadata, RecordError> {
    let fields = split_packed(meta);
    let [r0, r1, r2, r3, timestamp, r5, width, r7, red, green, blue, alpha] = fields[..] else {
        return Err(RecordError::FieldCount {
            expected: METADATA_FIELD_COUNT,
            found: fields.len(),
        });
    };

    Ok(StrokeMetadata {
        reserved_0: r0.to_string(),
        reserved_1: r1.to_string(),
        reserved_2: r2.to_string(),
        reserved_3: r3.to_string(),
        timestamp: parse_number("timestamp", timestamp)?,
        reserved_5: r5.to_string(),
        width: parse_number("stroke width", width)?,
        reserved_7: r7.to_string(),
        color: StrokeColor {
            red: red.to_string(),
            green: green.to_string(),
            blue: blue.to_string(),
        },
        alpha: alpha.to_string(),
    })
}

/// Decode an `x0,y0,x1,y1,...` point string
pub fn parse_points(packed: &str) -> Result<Vec<Point>, RecordError> {
    let values = split_packed(packed)
        .into_iter()
        .map(|token| parse_number("point list", token))
        .collect::<Result<Vec<_>, _>>()?;

    pair_values(&values)
}

/// Pair a flat coordinate list into points
pub fn pair_values(values: &[f64]) -> Result<Vec<Point>, RecordError> {
    if values.len() % 2 != 0 {
        return Err(RecordError::OddPointCount(values.len()));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}
