// src/error.rs

//! Crate-wide error types

use thiserror::Error;

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing and building a recipe
#[derive(Error, Debug)]
pub enum Error {
    /// A %package directive with no usable name
    #[error("Malformed %package directive at line {line_number}: '{line}' names no subpackage")]
    MalformedSubpackage { line_number: usize, line: String },

    /// Macro expansion or macro table failure
    #[error("Macro error: {0}")]
    MacroError(String),

    /// I/O error reading a recipe or macro file
    #[error("I/O error: {0}")]
    IoError(String),

    /// Package assembly failure reported by the downstream packager
    #[error("Assembly error: {0}")]
    AssemblyError(String),
}
