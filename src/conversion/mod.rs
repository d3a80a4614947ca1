//! Conversion Pipeline
//!
//! Input discovery, job construction, tool invocation and the batch loop.

pub mod batch;
pub mod discovery;
pub mod job;
pub mod runner;

pub use batch::{BatchConverter, BatchSummary};
pub use discovery::{Discovery, InputFile};
pub use job::{ConversionJob, JobTemplate, output_path_for};
pub use runner::{ConversionResult, FailureReason, JobRunner, ProcessRunner, DIAGNOSTIC_LIMIT};
