//! Error types for deck building.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a slide deck.
///
/// Slide extraction itself never fails; malformed Markdown degrades to
/// empty regions instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the Markdown source.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The document produced no slides.
    #[error("Presentation is empty: no slides to assemble")]
    EmptyPresentation,

    /// The target canvas has a non-positive or non-finite dimension.
    #[error("Invalid canvas size: {0}")]
    InvalidCanvas(String),
}
