use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::ExternalToolError;
use crate::external::{AudioEncoder, run_tool};

// @const: libmp3lame VBR quality used when none is configured
pub const DEFAULT_MP3_QUALITY: u8 = 5;

/// Audio concatenation and encoding through `ffmpeg`
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: String,
    mp3_quality: u8,
}

impl Ffmpeg {
    pub fn new<S: Into<String>>(program: S, mp3_quality: u8) -> Self {
        Self {
            program: program.into(),
            mp3_quality,
        }
    }

    /// Build the ffmpeg argument list.
    ///
    /// Several inputs are joined with the `concat` filter in input order. An
    /// `.mp3` output is re-encoded with libmp3lame.
    pub fn build_args(fragments: &[PathBuf], output: &Path, mp3_quality: u8) -> Vec<String> {
        let mut args = vec!["-y".to_string()];

        for fragment in fragments {
            args.push("-i".to_string());
            args.push(fragment.to_string_lossy().into_owned());
        }

        if fragments.len() > 1 {
            let inputs: String = (0..fragments.len()).map(|i| format!("[{}:a]", i)).collect();
            args.push("-filter_complex".to_string());
            args.push(format!("{}concat=n={}:v=0:a=1", inputs, fragments.len()));
        }

        let is_mp3 = output
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("mp3"));
        if is_mp3 {
            args.extend([
                "-acodec".to_string(),
                "libmp3lame".to_string(),
                "-q:a".to_string(),
                mp3_quality.to_string(),
            ]);
        }

        args.push(output.to_string_lossy().into_owned());
        args
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg", DEFAULT_MP3_QUALITY)
    }
}

#[async_trait]
impl AudioEncoder for Ffmpeg {
    async fn encode(&self, fragments: &[PathBuf], output: &Path) -> Result<(), ExternalToolError> {
        run_tool(&self.program, &Self::build_args(fragments, output, self.mp3_quality)).await
    }
}
