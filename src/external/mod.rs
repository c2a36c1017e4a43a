/*!
 * Interfaces to everything outside the conversion pipeline.
 *
 * The controller only talks to these traits, so tests can swap in the
 * recording fakes from `mock`:
 * - `OutputSink`: where a selection fragment goes (clipboard, stdout)
 * - `ExternalConverter`: turns a native `.ipe` file into another format
 * - `AudioEncoder`: joins audio fragments into one file
 */

use async_trait::async_trait;
use log::{debug, error};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::errors::{ExternalToolError, SinkError};

/// Destination for a finished text artifact
pub trait OutputSink: Send + Sync + Debug {
    /// Hand the full content over to the destination
    fn deliver(&self, content: &str) -> Result<(), SinkError>;
}

/// Converter from the native drawing format to another file format
#[async_trait]
pub trait ExternalConverter: Send + Sync + Debug {
    /// Convert `input` into `output`, where `format` is the target extension
    /// without the leading dot
    ///
    /// # Returns
    /// * `Result<(), ExternalToolError>` - Ok once the output file is written
    async fn convert(&self, input: &Path, output: &Path, format: &str) -> Result<(), ExternalToolError>;
}

/// Encoder that concatenates audio fragments into one file
#[async_trait]
pub trait AudioEncoder: Send + Sync + Debug {
    /// Encode `fragments`, in order, into `output`
    ///
    /// The output extension selects the codec.
    async fn encode(&self, fragments: &[PathBuf], output: &Path) -> Result<(), ExternalToolError>;
}

/// Run a program to completion, failing on a non-zero exit
pub(crate) async fn run_tool(program: &str, args: &[String]) -> Result<(), ExternalToolError> {
    debug!("Running {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| ExternalToolError::Spawn {
            tool: program.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        error!("{} failed: {}", program, last_line.trim());
        return Err(ExternalToolError::ExitStatus {
            tool: program.to_string(),
            status: output.status.code(),
        });
    }

    Ok(())
}

pub mod clipboard;
pub mod ffmpeg;
pub mod ipetoipe;
pub mod mock;

pub use clipboard::{ClipboardSink, StdoutSink};
pub use ffmpeg::Ffmpeg;
pub use ipetoipe::IpeToIpe;
