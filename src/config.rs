//! Configuration management for batch conversion

use crate::error::{ConvertError, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound for the tool probe timeout (seconds)
const MAX_PROBE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tool: ToolConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub strategy: LocatorStrategy,
    /// Command name probed on PATH by the search strategy
    pub command: String,
    /// Tool path used by the fixed strategy; relative paths resolve against the executable's directory
    pub fixed_path: Option<PathBuf>,
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub silence_trim: bool,
    pub verbose: bool,
}

/// How the external tool is located at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LocatorStrategy {
    /// PATH probe, then well-known locations next to the executable
    #[default]
    Search,
    /// A single path next to the executable (or configured explicitly)
    Fixed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            tool: ToolConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            strategy: LocatorStrategy::Search,
            command: "ffmpeg".to_string(),
            fixed_path: None,
            probe_timeout_secs: 5,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            silence_trim: true,
            verbose: false,
        }
    }
}

impl Config {
    /// Get verbose mode (convenience method)
    pub fn verbose(&self) -> bool {
        self.processing.verbose
    }

    /// Get silence trimming flag (convenience method)
    pub fn silence_trim(&self) -> bool {
        self.processing.silence_trim
    }

    /// Get probe timeout as a `Duration`
    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tool.probe_timeout_secs)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "oggbatch", about = "Batch convert m4a/ogg/mp3 files into mono 44.1kHz Ogg Vorbis", version, author)]
pub struct Args {
    /// Input folder (requires OUTPUT_DIR as well)
    #[arg(value_name = "INPUT_DIR", requires = "output_dir")]
    pub input_dir: Option<PathBuf>,

    /// Output folder
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(long = "ffmpeg", value_name = "PATH", help = "Use this ffmpeg binary (implies --strategy fixed)")]
    pub ffmpeg: Option<PathBuf>,

    #[arg(long = "strategy", value_enum, help = "How to locate ffmpeg")]
    pub strategy: Option<LocatorStrategy>,

    #[arg(long = "no-silence-trim", help = "Do not trim leading/trailing silence")]
    pub no_silence_trim: bool,

    #[arg(long = "probe-timeout", value_name = "SECS", help = "Timeout for the `ffmpeg -version` probe")]
    pub probe_timeout: Option<u64>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(long = "check", help = "Only locate ffmpeg and report it, do not convert")]
    pub check: bool,

    #[arg(long = "print-config", help = "Print the effective configuration as TOML and exit")]
    pub print_config: bool,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: &Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        if let (Some(input), Some(output)) = (&args.input_dir, &args.output_dir) {
            config.input_dir = input.clone();
            config.output_dir = output.clone();
        }
        if let Some(strategy) = args.strategy {
            config.tool.strategy = strategy;
        }
        if let Some(path) = &args.ffmpeg {
            config.tool.strategy = LocatorStrategy::Fixed;
            config.tool.fixed_path = Some(path.clone());
        }
        if let Some(secs) = args.probe_timeout {
            config.tool.probe_timeout_secs = secs;
        }
        if args.no_silence_trim {
            config.processing.silence_trim = false;
        }
        if args.verbose {
            config.processing.verbose = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConvertError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConvertError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration parameter validity
    pub fn validate(&self) -> Result<()> {
        if self.tool.command.trim().is_empty() {
            return Err(ConvertError::config("Tool command must not be empty"));
        }

        if self.tool.probe_timeout_secs == 0 {
            return Err(ConvertError::config("Probe timeout must be greater than 0"));
        }
        if self.tool.probe_timeout_secs > MAX_PROBE_TIMEOUT_SECS {
            return Err(ConvertError::config(format!(
                "Probe timeout cannot exceed {} seconds", MAX_PROBE_TIMEOUT_SECS
            )));
        }

        if let Some(path) = &self.tool.fixed_path {
            if path.as_os_str().is_empty() {
                return Err(ConvertError::config("Fixed tool path must not be empty"));
            }
        }

        if self.input_dir.as_os_str().is_empty() || self.output_dir.as_os_str().is_empty() {
            return Err(ConvertError::config("Input and output folders must not be empty"));
        }

        Ok(())
    }

    /// Render config as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConvertError::config(format!("Failed to serialize config: {}", e)))
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;

        std::fs::write(path, content)
            .map_err(|e| ConvertError::config(format!("Failed to write config file: {}", e)))
    }
}
