//! Tubescribe - A Rust CLI tool for fetching YouTube transcripts
//!
//! This library fetches video/playlist metadata through the YouTube Data API,
//! pulls caption transcripts, restores punctuation via an external pretrained
//! model, applies a fixed table of lexical corrections, and writes the results
//! to a JSON file.

pub mod captions;
pub mod cli;
pub mod config;
pub mod corrections;
pub mod output;
pub mod pipeline;
pub mod punctuate;
pub mod resolver;

pub use cli::{Cli, Commands};
pub use config::{Config, FetchRequest};
pub use corrections::CorrectionTable;
pub use pipeline::TranscriptPipeline;
pub use resolver::{VideoRecord, VideoResolver};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to tubescribe
#[derive(thiserror::Error, Debug)]
pub enum TubescribeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Punctuation model failed to load: {0}")]
    ModelLoad(String),

    #[error("YouTube API request failed: {0}")]
    Api(String),

    #[error("File operation failed: {0}")]
    File(String),
}
