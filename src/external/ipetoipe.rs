use async_trait::async_trait;
use std::path::Path;

use crate::errors::ExternalToolError;
use crate::external::{ExternalConverter, run_tool};

/// Format conversion through Ipe's `ipetoipe` command line tool
#[derive(Debug, Clone)]
pub struct IpeToIpe {
    program: String,
}

impl IpeToIpe {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    // @returns: Arguments for `ipetoipe -<format> <input> <output>`
    pub fn build_args(input: &Path, output: &Path, format: &str) -> Vec<String> {
        vec![
            format!("-{}", format.trim_start_matches('.')),
            input.to_string_lossy().into_owned(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for IpeToIpe {
    fn default() -> Self {
        Self::new("ipetoipe")
    }
}

#[async_trait]
impl ExternalConverter for IpeToIpe {
    async fn convert(&self, input: &Path, output: &Path, format: &str) -> Result<(), ExternalToolError> {
        run_tool(&self.program, &Self::build_args(input, output, format)).await
    }
}
