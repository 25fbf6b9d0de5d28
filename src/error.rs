//! Initialisation errors
//!
//! The card cannot do anything useful without its page elements, so every
//! failure here is fatal at startup.

use thiserror::Error;

/// Startup failure while locating the page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// No global `window` (not running in a browser)
    #[error("no window available")]
    NoWindow,

    /// Window has no document
    #[error("window has no document")]
    NoDocument,

    /// Document has no body
    #[error("document has no body")]
    NoBody,

    /// A required element is missing from the page
    #[error("required element not found: {0}")]
    MissingElement(&'static str),

    /// Element exists but is not an HTML element
    #[error("element is not an HTML element: {0}")]
    WrongElementType(&'static str),
}
