use thiserror::Error;

/// Represents errors that can occur while translating an HTML document into a slide.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// One or more content-rule or geometry violations found in the HTML document.
    /// The message is either the sole violation, or an aggregate of the form
    /// `"Multiple validation errors found:\n  1. ...\n  2. ..."`.
    #[error("{0}")]
    Validation(String),

    /// A failure reported by the headless-browser host (launch, navigation,
    /// evaluation, screenshot). These surface immediately.
    #[error("{0}")]
    Host(String),

    /// The in-page snapshot script returned JSON that does not match the
    /// expected shape.
    #[error("Failed to decode page snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// An I/O error occurred, typically while writing rasterized images or
    /// resolving the HTML file path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result<T, TranslateError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, TranslateError>;
