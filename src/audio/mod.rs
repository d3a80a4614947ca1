//! Audio Settings Module
//!
//! Describes what the external tool is asked to do: the optional filter
//! chain applied before encoding and the fixed output encoding profile.

pub mod encoding;
pub mod filter;

pub use encoding::{EncodingProfile, InputFormat, OUTPUT_EXTENSION};
pub use filter::{FilterChain, FilterStage, SilenceTrim};
