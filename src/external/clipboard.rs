use arboard::Clipboard;
use log::info;
use std::io::Write;

use crate::errors::SinkError;
use crate::external::OutputSink;

/// Puts content on the system clipboard
#[derive(Debug, Default)]
pub struct ClipboardSink;

impl OutputSink for ClipboardSink {
    fn deliver(&self, content: &str) -> Result<(), SinkError> {
        let mut clipboard = Clipboard::new().map_err(|e| SinkError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(content)
            .map_err(|e| SinkError::Clipboard(e.to_string()))?;
        info!("Copied selection to clipboard ({} bytes)", content.len());
        Ok(())
    }
}

/// Prints content on standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn deliver(&self, content: &str) -> Result<(), SinkError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
