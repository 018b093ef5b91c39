//! Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the encode operation.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The source does not declare an `audio/*` MIME type.
    #[error("invalid file type: expected an audio file, got {}", found.as_deref().unwrap_or("no recognizable type"))]
    InvalidFileType { found: Option<String> },

    /// The source bytes could not be read.
    #[error("failed to read {name}: {source}")]
    ReadFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the decode pipeline, in pipeline order.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input is empty: paste a Base64 audio Data URI")]
    EmptyInput,

    #[error("malformed Data URI: expected 'data:<mime>;base64,<payload>'")]
    MalformedDataUri,

    #[error("could not determine MIME type from Data URI header")]
    MissingMimeType,

    #[error("the provided data is not audio (MIME type '{0}')")]
    NotAudioContent(String),

    #[error("payload is not valid Base64: {0}")]
    InvalidBase64Payload(#[from] base64::DecodeError),

    /// Materializing the decoded bytes into a handle failed. This is an
    /// environment fault, not an input-validation failure.
    #[error("failed to materialize decoded audio: {0}")]
    ResourceFailure(#[source] std::io::Error),
}

/// Main error type
#[derive(Debug, Error)]
pub enum Audio64Error {
    #[error("config error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Audio64Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config { message: msg.into() }
    }

    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Audio64Error>;
