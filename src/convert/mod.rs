//! Conversion Engine
//!
//! The two sides of the tool: binary-to-Data-URI encoding and
//! Data-URI-to-binary decoding with resource lifecycle management.

pub mod decoder;
pub mod encoder;
pub mod resource;

pub use decoder::{Decoder, DecoderState, UriReport};
pub use encoder::{Encoder, SourceFile};
pub use resource::{AudioPreview, DecodedAudioResource, DOWNLOAD_STEM};
