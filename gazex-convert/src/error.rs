//! Error types for one converter run.
//!
//! Errors carry the 1-based input line or the destination path, enough to
//! locate a failure without re-running.

use std::io;
use std::path::PathBuf;

use gazex_core::SampleParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source stream cannot be opened.
    #[error("cannot open input {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input stream failed mid-read.
    #[error("read failed at line {line}: {source}")]
    ReadInput {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A block ended inside its seven-line metadata header.
    #[error("block {block} truncated in header at line {line}")]
    TruncatedHeader { block: usize, line: usize },

    /// A sample line failed to parse as `int; int; float`.
    #[error("malformed sample at line {line}: {source}")]
    MalformedSample {
        line: usize,
        #[source]
        source: SampleParseError,
    },

    /// The output directory cannot be created.
    #[error("cannot create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fixation file cannot be created or written.
    #[error("cannot write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
