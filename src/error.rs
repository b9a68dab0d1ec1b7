//! Error type for the extractor.
//!
//! Only problems with the input source or the output sink are errors.
//! A line that matches no rule is not: it is classified as
//! [`Action::Skip`](crate::parser::Action::Skip) and produces no output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocuError {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input exists but could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing Markdown to the output failed.
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DocuError>;
