//! External Tool Module
//!
//! Locates the ffmpeg-compatible binary every conversion is delegated to.

pub mod locator;

pub use locator::{ToolLocator, ToolPath, ToolSource, executable_dir};
