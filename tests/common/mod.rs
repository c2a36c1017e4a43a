/*!
 * Common test utilities for the notes2ipe test suite
 */

use anyhow::Result;
use plist::{Dictionary, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use notes2ipe::app_controller::Collaborators;
use notes2ipe::external::mock::{MockConverter, MockEncoder, RecordingSink};

/// Metadata string of a red, 2.5 wide stroke
pub const RED_META: &str = "a,b,c,d,1000,e,2.5,f,255,0,0,1,";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Route library logs through env_logger, once
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A brief stroke record as stored in the property list
pub fn brief_record(meta: &str, points: &str) -> Value {
    let mut record = Dictionary::new();
    record.insert("metaStr".to_string(), Value::String(meta.to_string()));
    record.insert("ptsStr".to_string(), Value::String(points.to_string()));
    Value::Dictionary(record)
}

/// A `drawing` dictionary with `briefStrokeGroups`
pub fn brief_drawing(groups: Vec<Vec<Value>>) -> Value {
    let groups = groups.into_iter().map(Value::Array).collect();
    let mut drawing = Dictionary::new();
    drawing.insert("briefStrokeGroups".to_string(), Value::Array(groups));
    Value::Dictionary(drawing)
}

/// A `drawing` dictionary with legacy `strokeGroups`
pub fn legacy_drawing(groups: Vec<Vec<Vec<f64>>>) -> Value {
    let groups = groups
        .into_iter()
        .map(|group| {
            Value::Array(
                group
                    .into_iter()
                    .map(|points| {
                        let mut stroke = Dictionary::new();
                        stroke.insert(
                            "points".to_string(),
                            Value::Array(points.into_iter().map(Value::Real).collect()),
                        );
                        Value::Dictionary(stroke)
                    })
                    .collect(),
            )
        })
        .collect();
    let mut drawing = Dictionary::new();
    drawing.insert("strokeGroups".to_string(), Value::Array(groups));
    Value::Dictionary(drawing)
}

/// Serialize a note document as an XML property list
pub fn note_plist(app_version: &str, drawing: Value, record_files: &[&str], rtf: Option<&[u8]>) -> Result<Vec<u8>> {
    let mut root = Dictionary::new();
    root.insert("app_version".to_string(), Value::String(app_version.to_string()));
    root.insert("drawing".to_string(), drawing);
    root.insert(
        "recordFileNames".to_string(),
        Value::Array(record_files.iter().map(|n| Value::String(n.to_string())).collect()),
    );
    if let Some(rtf) = rtf {
        root.insert("RTFData".to_string(), Value::Data(rtf.to_vec()));
    }

    let mut bytes = Vec::new();
    Value::Dictionary(root).to_writer_xml(&mut bytes)?;
    Ok(bytes)
}

/// Write an uncompressed tar archive with the given members
pub fn build_archive(dir: &Path, name: &str, members: &[(&str, &[u8])]) -> Result<PathBuf> {
    let mut builder = tar::Builder::new(Vec::new());
    for (member, data) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, member, *data)?;
    }
    let bytes = builder.into_inner()?;

    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// A note with two brief strokes, two audio fragments and rich text
pub fn sample_brief_archive(dir: &Path) -> Result<PathBuf> {
    let drawing = brief_drawing(vec![
        vec![brief_record(RED_META, "0,0,10,0,10,10,")],
        vec![
            brief_record("a,b,c,d,1001,e,1,f,0,0,255,1,", "20,20,30,40,"),
            // Single point, dropped
            brief_record("a,b,c,d,1002,e,1,f,0,0,0,1,", "5,5,"),
        ],
    ]);
    let plist = note_plist(
        "5.2.1",
        drawing,
        &["audio/0.caf", "audio/1.caf"],
        Some(b"{\\rtf1 hello}".as_slice()),
    )?;

    build_archive(
        dir,
        "note.tar",
        &[
            ("audio/0.caf", b"first-".as_slice()),
            ("audio/1.caf", b"second".as_slice()),
            ("note/content.xml", plist.as_slice()),
        ],
    )
}

/// Handles on the fakes wired into a controller
pub struct MockTools {
    pub clipboard: RecordingSink,
    pub stdout: RecordingSink,
    pub converter: MockConverter,
    pub encoder: MockEncoder,
}

impl MockTools {
    pub fn working() -> Self {
        Self {
            clipboard: RecordingSink::new(),
            stdout: RecordingSink::new(),
            converter: MockConverter::working(),
            encoder: MockEncoder::working(),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            clipboard: Arc::new(self.clipboard.clone()),
            stdout: Arc::new(self.stdout.clone()),
            converter: Arc::new(self.converter.clone()),
            encoder: Arc::new(self.encoder.clone()),
        }
    }
}
