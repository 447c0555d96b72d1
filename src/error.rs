//! Error types for SVG conversion

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting an SVG
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input exists but could not be read
    #[error("Failed to read input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input does not carry an `.svg` extension
    #[error("Input file must have a .svg extension: {}", .0.display())]
    InputWrongExtension(PathBuf),

    /// A numeric option is out of range
    #[error("Invalid {name}: {value}")]
    InvalidOption { name: &'static str, value: f64 },

    /// Neither width/height nor a usable viewBox was found
    #[error("Could not determine SVG dimensions")]
    DimensionsUnavailable,

    /// Background specification has an unrecognized shape
    #[error("Invalid background color: {0}")]
    InvalidBackground(String),

    /// Failed to start the browser
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    /// The renderer failed to load or capture the page
    #[error("Rendering failed: {0}")]
    RenderFailure(String),

    /// Failed to write the output image
    #[error("Failed to write output file {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::RenderFailure(err.to_string())
    }
}
