/*!
 * Tests for error types and conversions
 */

use notes2ipe::errors::{
    AppError, ArchiveError, ConversionError, ExternalToolError, RecordError, SinkError,
};

#[test]
fn test_recordError_fieldCount_shouldDisplayBothCounts() {
    let error = RecordError::FieldCount { expected: 12, found: 11 };
    let display = format!("{}", error);
    assert!(display.contains("11 fields"));
    assert!(display.contains("expected 12"));
}

#[test]
fn test_recordError_invalidNumber_shouldNameFieldAndToken() {
    let error = RecordError::InvalidNumber {
        field: "timestamp",
        token: "abc".to_string(),
    };
    assert_eq!(format!("{}", error), "Invalid number 'abc' in timestamp");
}

#[test]
fn test_conversionError_fromRecordError_shouldWrap() {
    let error: ConversionError = RecordError::OddPointCount(5).into();
    assert_eq!(error, ConversionError::Record(RecordError::OddPointCount(5)));
    assert!(format!("{}", error).contains("odd number of values (5)"));
}

#[test]
fn test_externalToolError_exitStatus_shouldDisplayCode() {
    let error = ExternalToolError::ExitStatus {
        tool: "ffmpeg".to_string(),
        status: Some(1),
    };
    assert_eq!(format!("{}", error), "ffmpeg exited with status 1");
}

#[test]
fn test_externalToolError_killedBySignal_shouldSayNoStatus() {
    let error = ExternalToolError::ExitStatus {
        tool: "ipetoipe".to_string(),
        status: None,
    };
    assert!(format!("{}", error).contains("terminated by signal"));
}

#[test]
fn test_archiveError_missingMember_shouldDisplayPattern() {
    let error = ArchiveError::MissingMember("*.xml".to_string());
    assert!(format!("{}", error).contains("'*.xml'"));
}

#[test]
fn test_appError_fromRecordError_shouldBecomeConversion() {
    let error: AppError = RecordError::OddPointCount(3).into();
    assert!(matches!(error, AppError::Conversion(ConversionError::Record(_))));
    assert!(format!("{}", error).starts_with("Conversion error:"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFile() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(ref msg) if msg == "gone"));
}

#[test]
fn test_appError_fromSinkError_shouldWrap() {
    let error: AppError = SinkError::Clipboard("no display".to_string()).into();
    assert_eq!(format!("{}", error), "Output error: Clipboard error: no display");
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "something odd"));
}
