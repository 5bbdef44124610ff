//! Error types for jheadgen

use std::io;
use std::path::PathBuf;

/// Result type alias for jheadgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing inputs or writing generated output
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error reading a source file or writing generated output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing a JNI type descriptor
    #[error("failed to parse descriptor: {0}")]
    ParseFailed(String),

    /// Error parsing a Java source file
    #[error("failed to parse {}: {message}", .file.display())]
    ParseJava {
        /// Source file the declaration came from
        file: PathBuf,
        /// What went wrong, including the offending declaration
        message: String,
    },

    /// A Java source type that cannot be mapped to a JNI descriptor
    #[error("cannot map Java type `{0}` to a JNI descriptor")]
    UnknownType(String),

    /// Input contains no class, interface or enum declaration
    #[error("no class declaration found in {}", .0.display())]
    NoClass(PathBuf),
}
