//! Sequential batch conversion with a per-file console transcript

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::audio::{FilterChain, InputFormat};
use crate::config::Config;
use crate::conversion::{ConversionResult, Discovery, FailureReason, JobRunner, JobTemplate};
use crate::error::Result;
use crate::tool::ToolPath;

/// Counters for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

pub struct BatchConverter<R: JobRunner> {
    input_dir: PathBuf,
    template: JobTemplate,
    runner: R,
}

impl<R: JobRunner> BatchConverter<R> {
    pub fn new(input_dir: impl Into<PathBuf>, template: JobTemplate, runner: R) -> Self {
        Self {
            input_dir: input_dir.into(),
            template,
            runner,
        }
    }

    /// Converter for the configured folders and filter settings
    pub fn from_config(config: &Config, tool: ToolPath, runner: R) -> Self {
        let template = JobTemplate::new(
            tool,
            FilterChain::from_settings(config.silence_trim()),
            &config.output_dir,
        );
        Self::new(&config.input_dir, template, runner)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.template.output_dir
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Convert every eligible file, writing the transcript to `out`.
    ///
    /// Per-file failures are reported and skipped. An input folder that
    /// cannot be read counts as empty; only creating the output folder or
    /// writing the transcript can fail the run.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BatchSummary> {
        std::fs::create_dir_all(&self.template.output_dir)?;

        let discovery = Discovery::scan(&self.input_dir);
        if discovery.is_empty() {
            writeln!(out, "No audio files (m4a, ogg, mp3) found in folder {}", self.input_dir.display())?;
            return Ok(BatchSummary::default());
        }

        let total = discovery.total();
        writeln!(
            out,
            "Found {} files to convert (m4a: {}, ogg: {}, mp3: {})\n",
            total,
            discovery.count(InputFormat::M4a),
            discovery.count(InputFormat::Ogg),
            discovery.count(InputFormat::Mp3),
        )?;
        if !self.template.filters.is_empty() {
            debug!("Filter stages: {}", self.template.filters.stage_names().join(", "));
        }

        let mut summary = BatchSummary { total, ..Default::default() };
        for (i, input) in discovery.files().enumerate() {
            write!(out, "[{}/{}] Converting {}... ", i + 1, total, input.file_name())?;
            out.flush()?;

            let result = match self.template.build(input) {
                Ok(job) => self.runner.run(&job),
                Err(e) => ConversionResult::from_error(e),
            };

            match result {
                ConversionResult::Converted { output } => {
                    summary.converted += 1;
                    debug!("Wrote {}", output.display());
                    writeln!(out, "✓")?;
                }
                ConversionResult::Failed(reason) => {
                    summary.failed += 1;
                    debug!("{} not converted: {}", input.path.display(), reason);
                    match reason {
                        FailureReason::ToolExit { diagnostic, .. } => {
                            writeln!(out, "✗")?;
                            writeln!(out, "  ffmpeg error: {}", diagnostic)?;
                        }
                        FailureReason::Error(e) => writeln!(out, "✗ Error: {}", e)?,
                    }
                }
            }
        }

        writeln!(out, "\nConverted {} of {} files ({} failed)", summary.converted, summary.total, summary.failed)?;
        writeln!(out, "Done! Files saved to {}", self.template.output_dir.display())?;

        Ok(summary)
    }
}
