//! Data URI Wire Format
//!
//! Provides the MIME type model and the explicit Data URI grammar shared
//! by the encoder and decoder.

pub mod mime;
pub mod parser;

pub use mime::{MimeType, FALLBACK_EXTENSION};
pub use parser::{DataUri, RawDataUri};
