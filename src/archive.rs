use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use plist::{Dictionary, Value};

use crate::drawing::{Drawing, LegacyStroke, PackedRecord};
use crate::errors::ArchiveError;

// @module: Note archive access and property list decoding

// @const: Plist keys of the note document
const KEY_APP_VERSION: &str = "app_version";
const KEY_DRAWING: &str = "drawing";
const KEY_RECORD_FILES: &str = "recordFileNames";
const KEY_RTF: &str = "RTFData";
const KEY_LEGACY_GROUPS: &str = "strokeGroups";
const KEY_BRIEF_GROUPS: &str = "briefStrokeGroups";

/// Decoded contents of the note's property list
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDocument {
    /// Version of the app that wrote the archive
    pub app_version: String,

    /// Stored pen strokes
    pub drawing: Drawing,

    /// Archive members holding the audio fragments, in playback order
    pub record_file_names: Vec<String>,

    /// Rich text attached to the note, if any
    pub rtf_data: Option<Vec<u8>>,
}

impl NoteDocument {
    /// Decode a property list (XML or binary) into a note document
    pub fn from_plist_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let value = Value::from_reader(Cursor::new(bytes))
            .map_err(|e| ArchiveError::Plist(e.to_string()))?;
        Self::from_plist(&value)
    }

    /// Build a note document from an already decoded plist value
    pub fn from_plist(value: &Value) -> Result<Self, ArchiveError> {
        let root = value
            .as_dictionary()
            .ok_or_else(|| schema("top level is not a dictionary"))?;

        let app_version = root
            .get(KEY_APP_VERSION)
            .and_then(Value::as_string)
            .ok_or_else(|| schema(format!("missing string '{}'", KEY_APP_VERSION)))?
            .to_string();

        let drawing = root
            .get(KEY_DRAWING)
            .and_then(Value::as_dictionary)
            .ok_or_else(|| schema(format!("missing dictionary '{}'", KEY_DRAWING)))?;
        let drawing = decode_drawing(drawing)?;

        let record_file_names = match root.get(KEY_RECORD_FILES) {
            None => Vec::new(),
            Some(value) => array(value, KEY_RECORD_FILES)?
                .iter()
                .map(|name| {
                    name.as_string()
                        .map(str::to_string)
                        .ok_or_else(|| schema(format!("non-string entry in '{}'", KEY_RECORD_FILES)))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let rtf_data = match root.get(KEY_RTF) {
            None => None,
            Some(value) => Some(
                value
                    .as_data()
                    .ok_or_else(|| schema(format!("'{}' is not a data blob", KEY_RTF)))?
                    .to_vec(),
            ),
        };

        Ok(NoteDocument {
            app_version,
            drawing,
            record_file_names,
            rtf_data,
        })
    }

    /// Compare against the known app version.
    ///
    /// A mismatch is only a warning; conversion goes ahead.
    pub fn check_version(&self, expected: &str) -> bool {
        if self.app_version == expected {
            return true;
        }
        warn!(
            "Unknown app version {} (expected {}), output may be incomplete",
            self.app_version, expected
        );
        false
    }
}

fn schema<S: Into<String>>(message: S) -> ArchiveError {
    ArchiveError::Schema(message.into())
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, ArchiveError> {
    value
        .as_array()
        .ok_or_else(|| schema(format!("'{}' is not an array", what)))
}

fn number(value: &Value) -> Option<f64> {
    value
        .as_real()
        .or_else(|| value.as_signed_integer().map(|i| i as f64))
}

/// Pick the drawing variant by which group key is present
fn decode_drawing(drawing: &Dictionary) -> Result<Drawing, ArchiveError> {
    if let Some(groups) = drawing.get(KEY_BRIEF_GROUPS) {
        let groups = array(groups, KEY_BRIEF_GROUPS)?
            .iter()
            .map(|group| {
                array(group, "brief stroke group")?
                    .iter()
                    .map(decode_packed_record)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Drawing::Brief(groups));
    }

    if let Some(groups) = drawing.get(KEY_LEGACY_GROUPS) {
        let groups = array(groups, KEY_LEGACY_GROUPS)?
            .iter()
            .map(|group| {
                array(group, "stroke group")?
                    .iter()
                    .map(decode_legacy_stroke)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Drawing::Legacy(groups));
    }

    Err(schema(format!(
        "drawing has neither '{}' nor '{}'",
        KEY_BRIEF_GROUPS, KEY_LEGACY_GROUPS
    )))
}

fn decode_legacy_stroke(value: &Value) -> Result<LegacyStroke, ArchiveError> {
    let stroke = value
        .as_dictionary()
        .ok_or_else(|| schema("legacy stroke is not a dictionary"))?;
    let points = stroke
        .get("points")
        .ok_or_else(|| schema("legacy stroke has no 'points'"))?;
    let points = array(points, "points")?
        .iter()
        .map(|v| number(v).ok_or_else(|| schema("non-numeric legacy point value")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LegacyStroke { points })
}

fn decode_packed_record(value: &Value) -> Result<PackedRecord, ArchiveError> {
    let record = value
        .as_dictionary()
        .ok_or_else(|| schema("brief stroke is not a dictionary"))?;
    let text = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_string)
            .map(str::to_string)
            .ok_or_else(|| schema(format!("brief stroke has no string '{}'", key)))
    };

    Ok(PackedRecord {
        meta: text("metaStr")?,
        points: text("ptsStr")?,
        anchor_char: record.get("anchorChar").and_then(Value::as_string).map(str::to_string),
        anchor_y_loc: record.get("anchorYLoc").and_then(number),
    })
}

/// Read-only handle on an uncompressed note archive
#[derive(Debug, Clone)]
pub struct NoteArchive {
    path: PathBuf,
}

impl NoteArchive {
    /// Open an archive on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("archive does not exist: {}", path.display()),
            )));
        }
        Ok(NoteArchive { path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn archive(&self) -> Result<tar::Archive<File>, ArchiveError> {
        Ok(tar::Archive::new(File::open(&self.path)?))
    }

    /// All member names, in archive order
    pub fn member_names(&self) -> Result<Vec<String>, ArchiveError> {
        let mut archive = self.archive()?;
        let mut names = Vec::new();
        for entry in archive.entries()? {
            let entry = entry?;
            names.push(entry.path()?.to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// Read one member fully into memory
    pub fn read_member(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut archive = self.archive()?;
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.path()?.to_string_lossy() == name {
                let mut bytes = Vec::new();
                entry.read_to_end(&mut bytes)?;
                return Ok(bytes);
            }
        }
        Err(ArchiveError::MissingMember(name.to_string()))
    }

    /// Copy one member's bytes to `dest`
    pub fn extract_member<P: AsRef<Path>>(&self, name: &str, dest: P) -> Result<(), ArchiveError> {
        let bytes = self.read_member(name)?;
        std::fs::write(dest.as_ref(), bytes)?;
        debug!("Extracted {} to {:?}", name, dest.as_ref());
        Ok(())
    }

    /// Find the markup member by extension and decode its property list
    pub fn load_document(&self, markup_extension: &str) -> Result<NoteDocument, ArchiveError> {
        let suffix = format!(".{}", markup_extension.trim_start_matches('.'));
        let member = self
            .member_names()?
            .into_iter()
            .find(|name| name.ends_with(&suffix))
            .ok_or_else(|| ArchiveError::MissingMember(format!("*{}", suffix)))?;

        debug!("Decoding note document from member {}", member);
        NoteDocument::from_plist_bytes(&self.read_member(&member)?)
    }
}
