//! Per-file conversion job: output path and full argument list

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::audio::{EncodingProfile, FilterChain, OUTPUT_EXTENSION};
use crate::conversion::InputFile;
use crate::error::{ConvertError, Result};
use crate::tool::ToolPath;

/// Output location for an input stem, keeping the stem's bytes as they are
pub fn output_path_for(output_dir: &Path, stem: &OsStr) -> PathBuf {
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

/// Everything a job needs apart from the input file
#[derive(Debug, Clone)]
pub struct JobTemplate {
    pub tool: ToolPath,
    pub filters: FilterChain,
    pub profile: EncodingProfile,
    pub output_dir: PathBuf,
}

impl JobTemplate {
    pub fn new(tool: ToolPath, filters: FilterChain, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            filters,
            profile: EncodingProfile::default(),
            output_dir: output_dir.into(),
        }
    }

    pub fn build(&self, input: &InputFile) -> Result<ConversionJob> {
        let input_path = absolute(&input.path)?;
        let output_path = absolute(&output_path_for(&self.output_dir, &input.stem))?;

        let mut args: Vec<OsString> = Vec::with_capacity(16);
        args.push("-i".into());
        args.push(input_path.clone().into_os_string());
        args.extend(self.filters.to_args().into_iter().map(OsString::from));
        args.extend(self.profile.to_args().into_iter().map(OsString::from));
        args.push("-y".into());
        args.push(output_path.clone().into_os_string());

        Ok(ConversionJob {
            program: self.tool.clone(),
            input: input_path,
            output: output_path,
            args,
        })
    }
}

/// One invocation of the tool
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub program: ToolPath,
    pub input: PathBuf,
    pub output: PathBuf,
    pub args: Vec<OsString>,
}

impl ConversionJob {
    /// Printable command line, for logging
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.program().as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| ConvertError::path(format!("Cannot make {} absolute: {}", path.display(), e)))
}
