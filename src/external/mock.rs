/*!
 * Mock collaborators for testing.
 *
 * - `RecordingSink` - keeps every delivered fragment
 * - `MockConverter` - copies the input to the output, or fails with a status
 * - `MockEncoder` - concatenates fragment bytes into the output, or fails
 *
 * All of them record their calls so tests can assert on what the controller
 * asked for.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{ExternalToolError, SinkError};
use crate::external::{AudioEncoder, ExternalConverter, OutputSink};

/// Behavior mode for the mock tools
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds and writes the output file
    Working,
    /// Always fails with the given exit status
    Failing { status: i32 },
}

/// Sink that remembers everything delivered to it
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    delivered: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails
    pub fn failing() -> Self {
        Self {
            delivered: Arc::default(),
            fail: true,
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().clone()
    }
}

impl OutputSink for RecordingSink {
    fn deliver(&self, content: &str) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Clipboard("mock sink unavailable".to_string()));
        }
        self.delivered.lock().push(content.to_string());
        Ok(())
    }
}

/// One recorded conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertCall {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: String,
}

/// Converter fake
#[derive(Debug, Clone)]
pub struct MockConverter {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<ConvertCall>>>,
}

impl MockConverter {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::default(),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing(status: i32) -> Self {
        Self::new(MockBehavior::Failing { status })
    }

    pub fn calls(&self) -> Vec<ConvertCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ExternalConverter for MockConverter {
    async fn convert(&self, input: &Path, output: &Path, format: &str) -> Result<(), ExternalToolError> {
        self.calls.lock().push(ConvertCall {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            format: format.to_string(),
        });

        match self.behavior {
            MockBehavior::Working => std::fs::copy(input, output)
                .map(|_| ())
                .map_err(|e| ExternalToolError::Spawn {
                    tool: "mock-converter".to_string(),
                    message: e.to_string(),
                }),
            MockBehavior::Failing { status } => Err(ExternalToolError::ExitStatus {
                tool: "mock-converter".to_string(),
                status: Some(status),
            }),
        }
    }
}

/// Encoder fake
#[derive(Debug, Clone)]
pub struct MockEncoder {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<(Vec<PathBuf>, PathBuf)>>>,
}

impl MockEncoder {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::default(),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing(status: i32) -> Self {
        Self::new(MockBehavior::Failing { status })
    }

    /// Recorded `(fragments, output)` pairs
    pub fn calls(&self) -> Vec<(Vec<PathBuf>, PathBuf)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AudioEncoder for MockEncoder {
    async fn encode(&self, fragments: &[PathBuf], output: &Path) -> Result<(), ExternalToolError> {
        self.calls.lock().push((fragments.to_vec(), output.to_path_buf()));

        match self.behavior {
            MockBehavior::Working => {
                let mut joined = Vec::new();
                for fragment in fragments {
                    let bytes = std::fs::read(fragment).map_err(|e| ExternalToolError::Spawn {
                        tool: "mock-encoder".to_string(),
                        message: e.to_string(),
                    })?;
                    joined.extend(bytes);
                }
                std::fs::write(output, joined).map_err(|e| ExternalToolError::Spawn {
                    tool: "mock-encoder".to_string(),
                    message: e.to_string(),
                })
            }
            MockBehavior::Failing { status } => Err(ExternalToolError::ExitStatus {
                tool: "mock-encoder".to_string(),
                status: Some(status),
            }),
        }
    }
}
