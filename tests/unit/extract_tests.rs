/*!
 * Tests for stroke extraction from both drawing shapes
 */

use notes2ipe::drawing::{
    extract_strokes, Drawing, ExtractOptions, LegacyStroke, PackedRecord, Point,
};
use notes2ipe::errors::RecordError;

fn legacy(points: &[f64]) -> LegacyStroke {
    LegacyStroke { points: points.to_vec() }
}

/// Test the legacy flip uses the canvas height
#[test]
fn test_extract_legacy_withDefaultHeight_shouldFlipY() {
    let drawing = Drawing::Legacy(vec![vec![legacy(&[0.0, 100.0, 0.0, 541.0])]]);
    let strokes = extract_strokes(&drawing, &ExtractOptions::default()).unwrap();

    assert_eq!(strokes.len(), 1);
    let ys: Vec<f64> = strokes[0].points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![541.0, 100.0]);
    assert!(strokes[0].metadata.is_none());
}

/// Test the canvas height can be overridden
#[test]
fn test_extract_legacy_withCustomHeight_shouldUseIt() {
    let drawing = Drawing::Legacy(vec![vec![legacy(&[1.0, 10.0, 2.0, 20.0])]]);
    let options = ExtractOptions { legacy_canvas_height: 100.0 };
    let strokes = extract_strokes(&drawing, &options).unwrap();
    assert_eq!(strokes[0].points, vec![Point::new(1.0, 90.0), Point::new(2.0, 80.0)]);
}

/// Test legacy strokes with a single point are dropped
#[test]
fn test_extract_legacy_withShortStrokes_shouldDropThem() {
    let drawing = Drawing::Legacy(vec![
        vec![legacy(&[1.0, 1.0]), legacy(&[]), legacy(&[0.0, 0.0, 1.0, 1.0])],
        vec![legacy(&[5.0, 5.0])],
    ]);
    let strokes = extract_strokes(&drawing, &ExtractOptions::default()).unwrap();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points.len(), 2);
}

/// Test a legacy stroke with an odd value count is malformed
#[test]
fn test_extract_legacy_withOddValues_shouldFail() {
    let drawing = Drawing::Legacy(vec![vec![legacy(&[0.0, 1.0, 2.0])]]);
    let err = extract_strokes(&drawing, &ExtractOptions::default()).unwrap_err();
    assert_eq!(err, RecordError::OddPointCount(3));
}

/// Test brief strokes are decoded and y-negated
#[test]
fn test_extract_brief_withReferenceRecord_shouldNegateY() {
    let drawing = Drawing::Brief(vec![vec![PackedRecord::new(
        "a,b,c,d,1000,e,2.5,f,255,0,0,1,",
        "0,0,10,0,10,10,",
    )]]);
    let strokes = extract_strokes(&drawing, &ExtractOptions::default()).unwrap();

    assert_eq!(
        strokes[0].points,
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, -10.0)]
    );
    assert_eq!(strokes[0].color().unwrap().red, "255");
}

/// Test brief strokes keep group-then-record order and drop single points
#[test]
fn test_extract_brief_withSeveralGroups_shouldPreserveOrder() {
    let meta = "a,b,c,d,1,e,1,f,0,0,0,1,";
    let drawing = Drawing::Brief(vec![
        vec![PackedRecord::new(meta, "1,1,2,2,"), PackedRecord::new(meta, "9,9,")],
        vec![PackedRecord::new(meta, "3,3,4,4,")],
    ]);
    let strokes = extract_strokes(&drawing, &ExtractOptions::default()).unwrap();

    let firsts: Vec<f64> = strokes.iter().map(|s| s.points[0].x).collect();
    assert_eq!(firsts, vec![1.0, 3.0]);
}

/// Test one bad record aborts the whole extraction
#[test]
fn test_extract_brief_withMalformedRecord_shouldFail() {
    let drawing = Drawing::Brief(vec![vec![
        PackedRecord::new("a,b,c,d,1,e,1,f,0,0,0,1,", "1,1,2,2,"),
        PackedRecord::new("a,b,c,d,1,e,1,f,0,0,0,", "1,1,2,2,"),
    ]]);
    let result = extract_strokes(&drawing, &ExtractOptions::default());
    assert!(matches!(result, Err(RecordError::FieldCount { found: 11, .. })));
}

/// Test an empty drawing extracts to nothing without error
#[test]
fn test_extract_withEmptyDrawing_shouldReturnEmpty() {
    let strokes = extract_strokes(&Drawing::Brief(vec![vec![]]), &ExtractOptions::default()).unwrap();
    assert!(strokes.is_empty());
}
