//! Job execution and typed per-job outcome

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use log::debug;

use crate::conversion::ConversionJob;
use crate::error::ConvertError;

/// Maximum number of characters kept from the tool's error stream
pub const DIAGNOSTIC_LIMIT: usize = 200;

/// Why a single file was not converted
#[derive(Debug)]
pub enum FailureReason {
    /// Tool ran and exited non-zero
    ToolExit { code: Option<i32>, diagnostic: String },
    /// Job could not be prepared or the tool could not be started
    Error(ConvertError),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolExit { code: Some(code), diagnostic } => write!(f, "exit code {code}: {diagnostic}"),
            Self::ToolExit { code: None, diagnostic } => write!(f, "terminated by signal: {diagnostic}"),
            Self::Error(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug)]
pub enum ConversionResult {
    Converted { output: PathBuf },
    Failed(FailureReason),
}

impl ConversionResult {
    pub fn from_error(err: ConvertError) -> Self {
        Self::Failed(FailureReason::Error(err))
    }
}

/// First `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Executes conversion jobs
pub trait JobRunner {
    fn run(&mut self, job: &ConversionJob) -> ConversionResult;
}

/// Runs the tool as a child process, capturing both output streams
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn interpret(job: &ConversionJob, output: Output) -> ConversionResult {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            debug!("Converted {} ({} bytes of tool output)", job.output.display(), output.stdout.len() + output.stderr.len());
            ConversionResult::Converted { output: job.output.clone() }
        } else {
            ConversionResult::Failed(FailureReason::ToolExit {
                code: output.status.code(),
                diagnostic: truncate_chars(&stderr, DIAGNOSTIC_LIMIT).to_string(),
            })
        }
    }
}

impl JobRunner for ProcessRunner {
    fn run(&mut self, job: &ConversionJob) -> ConversionResult {
        debug!("Running: {}", job.command_line());

        let mut command = Command::new(job.program.program());
        command.args(&job.args).stdin(Stdio::null());
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        match command.output() {
            Ok(output) => Self::interpret(job, output),
            Err(e) => ConversionResult::from_error(ConvertError::launch(
                job.program.program().display().to_string(),
                e,
            )),
        }
    }
}
