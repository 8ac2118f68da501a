//! Typed error types for header generation.

use std::io;
use std::path::PathBuf;

use crate::layout::LayoutError;

/// Failures that abort a generation run.
///
/// Every variant is fatal: the generator never retries or recovers, so the
/// surrounding build stops on the first anomaly.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The IDL source could not be opened or read.
    #[error("failed to read IDL source {}", path.display())]
    ReadSource {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The source contained no declaration matching the role grammar.
    #[error("no role declarations found in {origin}")]
    NoDeclarations {
        /// Where the scanned text came from (a path or a label).
        origin: String,
    },

    /// The same constant name was declared twice.
    #[error("duplicate role {name} in {origin}: line {first_line} and line {line}")]
    DuplicateName {
        /// The emitted name (prefix stripped).
        name: String,
        /// Where the scanned text came from.
        origin: String,
        /// Line of the first declaration.
        first_line: usize,
        /// Line of the repeated declaration.
        line: usize,
    },

    /// The header layout is unusable.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Writing the generated header failed.
    #[error("failed to write generated header")]
    Write(#[source] io::Error),

    /// Reading or replacing an existing output file failed.
    #[error("failed to update output file {}", path.display())]
    Output {
        /// Destination file.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}
