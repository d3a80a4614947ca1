//! Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{command} not found (searched: {})", display_paths(.searched))]
    ToolNotFound { command: String, searched: Vec<PathBuf> },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Path error: {message}")]
    Path { message: String },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn path<S: Into<String>>(msg: S) -> Self { Self::Path { message: msg.into() } }

    pub fn tool_not_found<S: Into<String>>(command: S, searched: Vec<PathBuf>) -> Self {
        Self::ToolNotFound { command: command.into(), searched }
    }

    pub fn launch<S: Into<String>>(program: S, source: std::io::Error) -> Self {
        Self::Launch { program: program.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = ConvertError::config("test");
        assert!(e.to_string().contains("Config"));
    }

    #[test]
    fn test_tool_not_found_lists_candidates() {
        let e = ConvertError::tool_not_found(
            "ffmpeg",
            vec![PathBuf::from("ffmpeg"), PathBuf::from("/opt/app/bin/ffmpeg")],
        );
        let text = e.to_string();
        assert!(text.starts_with("ffmpeg not found"));
        assert!(text.contains("/opt/app/bin/ffmpeg"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: ConvertError = io.into();
        assert!(matches!(e, ConvertError::Io(_)));
    }

    #[test]
    fn test_io_message_not_repeated_in_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = anyhow::Error::from(ConvertError::from(io)).context("Failed to create output");
        let text = format!("{:#}", err);
        assert_eq!(text, "Failed to create output: denied");
        assert_eq!(text.matches("denied").count(), 1);
    }
}
