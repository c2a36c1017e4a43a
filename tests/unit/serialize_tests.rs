/*!
 * Tests for Ipe path markup
 */

use notes2ipe::drawing::record::parse_record;
use notes2ipe::drawing::serialize::write_path;
use notes2ipe::drawing::{serialize_paths, PathStyle, Point, Stroke, StrokeColor};

fn square() -> Stroke {
    Stroke::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.5)])
}

/// Test a stroke without metadata uses the default color
#[test]
fn test_write_path_withoutMetadata_shouldUseDefaultColor() {
    let mut out = String::new();
    let written = write_path(&square(), &PathStyle::default(), &mut out);

    assert!(written);
    assert_eq!(
        out,
        "<path stroke=\"black\" pen=\"fat\">\n0 0 m\n10 0 l\n10 10.5 l\n</path>\n"
    );
}

/// Test metadata colors are joined with spaces
#[test]
fn test_write_path_withMetadata_shouldUseStrokeColor() {
    let stroke = parse_record("a,b,c,d,1000,e,2.5,f,255,0,0,1,", "1,2,3,4,").unwrap();
    let mut out = String::new();
    write_path(&stroke, &PathStyle::default(), &mut out);

    assert!(out.starts_with("<path stroke=\"255 0 0\" pen=\"fat\">\n"));
    assert!(out.contains("1 2 m\n3 4 l\n"));
}

/// Test markup characters in opaque color tokens are escaped
#[test]
fn test_write_path_withMarkupInColor_shouldEscape() {
    let mut stroke = square();
    stroke.metadata = parse_record("a,b,c,d,1,e,1,f,\"red\",<g>,&,1,", "").unwrap().metadata;
    let mut out = String::new();
    write_path(&stroke, &PathStyle::default(), &mut out);

    assert!(out.starts_with("<path stroke=\"&quot;red&quot; &lt;g&gt; &amp;\""));
}

/// Test degenerate strokes produce no markup
#[test]
fn test_write_path_withSinglePoint_shouldSkip() {
    let mut out = String::new();
    let stroke = Stroke::new(vec![Point::new(1.0, 1.0)]);
    assert!(!write_path(&stroke, &PathStyle::default(), &mut out));
    assert!(out.is_empty());
}

/// Test several strokes are concatenated in order and degenerate ones vanish
#[test]
fn test_serialize_paths_withMixedStrokes_shouldEmitOnlyDrawable() {
    let strokes = vec![
        square(),
        Stroke::new(vec![Point::new(5.0, 5.0)]),
        Stroke::new(vec![Point::new(-1.0, -2.0), Point::new(3.0, 4.0)]),
    ];
    let style = PathStyle {
        pen: "heavier".to_string(),
        default_color: "blue".to_string(),
    };
    let markup = serialize_paths(&strokes, &style);

    assert_eq!(markup.matches("<path ").count(), 2);
    assert_eq!(markup.matches("</path>\n").count(), 2);
    assert!(markup.contains("pen=\"heavier\""));
    assert!(markup.find("10 10.5 l").unwrap() < markup.find("-1 -2 m").unwrap());
    assert!(!markup.contains("5 5 m"));
}

/// Test a color built directly renders the same way
#[test]
fn test_color_attribute_withChannels_shouldJoinWithSpaces() {
    let color = StrokeColor {
        red: "1".to_string(),
        green: "0.5".to_string(),
        blue: "0".to_string(),
    };
    assert_eq!(color.to_attribute(), "1 0.5 0");
}

/// Test integral coordinates carry no fractional part and negative zero is plain
#[test]
fn test_write_path_withIntegralAndNegativeZero_shouldUseShortestForm() {
    let stroke = Stroke::new(vec![Point::new(441.0, -0.0), Point::new(297.5, 421.0)]);
    let mut out = String::new();
    write_path(&stroke, &PathStyle::default(), &mut out);

    assert!(out.contains("\n441 0 m\n297.5 421 l\n"));
}

/// Test the batch rendering equals appending each path in turn
#[test]
fn test_serialize_paths_withStrokes_shouldMatchSequentialWrites() {
    let strokes = vec![square(), Stroke::new(vec![Point::new(2.0, 2.0)]), square()];
    let style = PathStyle::default();

    let mut expected = String::new();
    for stroke in &strokes {
        write_path(stroke, &style, &mut expected);
    }

    assert_eq!(serialize_paths(&strokes, &style), expected);
}
