use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::archive::{NoteArchive, NoteDocument};
use crate::drawing::{Point, RenderedDrawing, render_page, render_selection};
use crate::external::{
    AudioEncoder, ClipboardSink, ExternalConverter, Ffmpeg, IpeToIpe, OutputSink, StdoutSink,
};
use crate::file_utils::FileManager;

// @module: Application controller for note conversion

/// Outputs requested for one conversion run
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    /// Standalone drawing; any extension other than `.ipe` goes through the converter
    pub page: Option<PathBuf>,

    /// Concatenated audio
    pub sound: Option<PathBuf>,

    /// Rich text passthrough
    pub rtf: Option<PathBuf>,

    /// Copy the selection fragment to the clipboard
    pub clipboard: bool,

    /// Print the selection fragment on stdout
    pub print_selection: bool,

    /// Explicit selection center; defaults to the drawing's own half extent
    pub anchor: Option<Point>,

    pub force_overwrite: bool,
}

impl OutputTargets {
    pub fn wants_selection(&self) -> bool {
        self.clipboard || self.print_selection
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.sound.is_none() && self.rtf.is_none() && !self.wants_selection()
    }
}

/// External programs and sinks used by the controller
#[derive(Debug, Clone)]
pub struct Collaborators {
    pub clipboard: Arc<dyn OutputSink>,
    pub stdout: Arc<dyn OutputSink>,
    pub converter: Arc<dyn ExternalConverter>,
    pub encoder: Arc<dyn AudioEncoder>,
}

impl Collaborators {
    /// Real clipboard, stdout and command line tools named in the config
    pub fn from_config(config: &Config) -> Self {
        Self {
            clipboard: Arc::new(ClipboardSink),
            stdout: Arc::new(StdoutSink),
            converter: Arc::new(IpeToIpe::new(config.tools.ipetoipe_path.clone())),
            encoder: Arc::new(Ffmpeg::new(config.tools.ffmpeg_path.clone(), config.tools.mp3_quality)),
        }
    }
}

/// What a finished run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionSummary {
    /// Whether the archive's app version was the expected one
    pub version_matched: bool,

    /// Paths drawn, if any drawing output was requested
    pub stroke_count: Option<usize>,

    /// Files written, in the order they were produced
    pub written: Vec<PathBuf>,

    /// Outputs left alone because they already existed or had no source data
    pub skipped: Vec<PathBuf>,

    /// Number of sinks the selection fragment went to
    pub selection_deliveries: usize,
}

/// Main application controller for note conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Sinks and external tools
    collaborators: Collaborators,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let collaborators = Collaborators::from_config(&config);
        Self::with_collaborators(config, collaborators)
    }

    /// Create a controller with explicit collaborators, e.g. test doubles
    pub fn with_collaborators(config: Config, collaborators: Collaborators) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config, collaborators })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one archive into every requested output.
    ///
    /// All drawing markup is rendered before anything is written, so a
    /// malformed stroke record leaves no partial output behind.
    pub async fn run(&self, input_file: &Path, targets: &OutputTargets) -> Result<ConversionSummary> {
        let start_time = std::time::Instant::now();

        let (archive, document) = self.load_archive(input_file).await?;

        let mut summary = ConversionSummary {
            version_matched: document.check_version(&self.config.expected_app_version),
            ..Default::default()
        };

        info!(
            "Loaded {} drawing with {} stored strokes, {} audio fragment(s)",
            document.drawing.kind(),
            document.drawing.raw_stroke_count(),
            document.record_file_names.len()
        );

        let (selection, page) = self.render(&document, targets)?;
        summary.stroke_count = selection.as_ref().or(page.as_ref()).map(|r| r.stroke_count);

        if let (Some(path), Some(page)) = (&targets.page, &page) {
            self.write_page(path, page, targets.force_overwrite, &mut summary).await?;
        }

        if let Some(selection) = &selection {
            self.deliver_selection(selection, targets, &mut summary)?;
        }

        if let Some(path) = &targets.sound {
            self.write_sound(&archive, &document, path, targets.force_overwrite, &mut summary)
                .await?;
        }

        if let Some(path) = &targets.rtf {
            self.write_rtf(&document, path, targets.force_overwrite, &mut summary)?;
        }

        info!(
            "Conversion completed in {}.",
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Open the archive and decode its document on the blocking pool
    async fn load_archive(&self, input_file: &Path) -> Result<(NoteArchive, NoteDocument)> {
        let input = input_file.to_path_buf();
        let extension = self.config.drawing_member_extension.clone();

        tokio::task::spawn_blocking(move || -> Result<(NoteArchive, NoteDocument)> {
            let archive = NoteArchive::open(&input)
                .with_context(|| format!("Failed to open note archive: {:?}", input))?;
            let document = archive
                .load_document(&extension)
                .with_context(|| format!("Failed to read note archive: {:?}", input))?;
            Ok((archive, document))
        })
        .await
        .context("Archive reader task failed")?
    }

    /// Render the selection fragment and the page document, if requested
    fn render(
        &self,
        document: &NoteDocument,
        targets: &OutputTargets,
    ) -> Result<(Option<RenderedDrawing>, Option<RenderedDrawing>)> {
        let options = self.config.render_options();

        let selection = if targets.wants_selection() {
            Some(render_selection(&document.drawing, &options, targets.anchor)?)
        } else {
            None
        };

        let page = if targets.page.is_some() {
            Some(render_page(
                &document.drawing,
                &options,
                self.config.page.width,
                self.config.page.height,
            )?)
        } else {
            None
        };

        Ok((selection, page))
    }

    async fn write_page(
        &self,
        path: &Path,
        page: &RenderedDrawing,
        force_overwrite: bool,
        summary: &mut ConversionSummary,
    ) -> Result<()> {
        let format = FileManager::extension_of(path);
        let native = if format == "ipe" {
            path.to_path_buf()
        } else {
            FileManager::with_extension(path, "ipe")
        };

        // The native sibling of a converted page is an output too
        if !FileManager::may_write(path, force_overwrite)
            || (native != path && !FileManager::may_write(&native, force_overwrite))
        {
            summary.skipped.push(path.to_path_buf());
            return Ok(());
        }

        FileManager::write_to_file(&native, &page.markup)?;
        debug!("Wrote {} paths to {:?}", page.stroke_count, native);

        if format.is_empty() || format == "ipe" {
            summary.written.push(native);
            return Ok(());
        }

        info!("Converting {:?} to {}", native, format);
        self.collaborators
            .converter
            .convert(&native, path, &format)
            .await
            .with_context(|| format!("Failed to convert drawing to {}", format))?;

        summary.written.push(native);
        summary.written.push(path.to_path_buf());
        Ok(())
    }

    fn deliver_selection(
        &self,
        selection: &RenderedDrawing,
        targets: &OutputTargets,
        summary: &mut ConversionSummary,
    ) -> Result<()> {
        if targets.print_selection {
            self.collaborators
                .stdout
                .deliver(&selection.markup)
                .context("Failed to print selection")?;
            summary.selection_deliveries += 1;
        }

        if targets.clipboard {
            self.collaborators
                .clipboard
                .deliver(&selection.markup)
                .context("Failed to copy selection to clipboard")?;
            summary.selection_deliveries += 1;
        }

        Ok(())
    }

    async fn write_sound(
        &self,
        archive: &NoteArchive,
        document: &NoteDocument,
        path: &Path,
        force_overwrite: bool,
        summary: &mut ConversionSummary,
    ) -> Result<()> {
        if document.record_file_names.is_empty() {
            warn!("Note has no audio fragments, not writing {:?}", path);
            summary.skipped.push(path.to_path_buf());
            return Ok(());
        }

        if !FileManager::may_write(path, force_overwrite) {
            summary.skipped.push(path.to_path_buf());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        // Fragments only need to live until the encoder returns
        let work_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let reader = archive.clone();
        let names = document.record_file_names.clone();
        let dir = work_dir.path().to_path_buf();
        let extension = self.config.tools.fragment_extension.clone();
        let fragments = tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
            let mut fragments = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let part = dir.join(format!("part_{}.{}", i, extension));
                reader
                    .extract_member(name, &part)
                    .with_context(|| format!("Failed to extract audio fragment {}", name))?;
                fragments.push(part);
            }
            Ok(fragments)
        })
        .await
        .context("Fragment extraction task failed")??;

        info!("Encoding {} audio fragment(s) into {:?}", fragments.len(), path);
        self.collaborators
            .encoder
            .encode(&fragments, path)
            .await
            .context("Failed to encode audio")?;

        summary.written.push(path.to_path_buf());
        Ok(())
    }

    fn write_rtf(
        &self,
        document: &NoteDocument,
        path: &Path,
        force_overwrite: bool,
        summary: &mut ConversionSummary,
    ) -> Result<()> {
        let Some(rtf) = &document.rtf_data else {
            warn!("Note has no rich text, not writing {:?}", path);
            summary.skipped.push(path.to_path_buf());
            return Ok(());
        };

        if !FileManager::may_write(path, force_overwrite) {
            summary.skipped.push(path.to_path_buf());
            return Ok(());
        }

        FileManager::write_bytes(path, rtf)?;
        summary.written.push(path.to_path_buf());
        Ok(())
    }

    /// Format a duration as seconds with millisecond precision
    fn format_duration(duration: std::time::Duration) -> String {
        let secs = duration.as_secs();
        if secs >= 60 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}.{:03}s", secs, duration.subsec_millis())
        }
    }
}
