//! The owner's editing workflow: a scratch copy of the document, the
//! per-section mutations applied to it, and the admin session around it.

pub mod draft;
pub mod handlers;
pub mod ids;
pub mod image;
pub mod session;
pub mod text;

use thiserror::Error;

pub use draft::{Draft, ImageTarget, ListKind};
pub use session::{AdminConsole, Section, SessionError};

/// Rejections of a draft edit. None of these change the draft.
#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("Unknown field '{field}' for {target}")]
    UnknownField { target: &'static str, field: String },

    #[error("Unknown image target '{0}'")]
    UnknownImageTarget(String),

    #[error("Unsupported image type '{0}'")]
    UnsupportedImage(String),

    #[error("Uploaded image is empty")]
    EmptyImage,

    #[error("Image is {size} bytes; the limit is {limit}")]
    ImageTooLarge { size: usize, limit: usize },
}
