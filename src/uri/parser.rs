//! Data URI wire format
//!
//! Fixed grammar, replacing the ad hoc split/regex pipeline this tool
//! started from:
//!
//! ```text
//! data-uri  = "data:" mime-type [";" marker] "," payload
//! mime-type = type "/" subtype
//! marker    = "base64"
//! payload   = Base64 text, standard alphabet, "=" padding
//! ```
//!
//! The first `,` is the split point between header and payload; a Base64
//! payload never contains a comma.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::DecodeError;
use crate::uri::mime::MimeType;

pub const SCHEME: &str = "data:";
pub const BASE64_MARKER: &str = "base64";

/// Borrowed fields of a structurally valid Data URI.
///
/// Only structure is checked here; MIME semantics (`audio/` gating) and
/// payload decoding are separate pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDataUri<'a> {
    pub mime_type: &'a str,
    pub marker: Option<&'a str>,
    pub payload: &'a str,
}

/// Split a Data URI into its grammar productions.
///
/// The `;base64` marker is optional on input; when present it must read
/// exactly `base64`. The payload is returned undecoded.
pub fn parse(text: &str) -> Result<RawDataUri<'_>, DecodeError> {
    let (header, payload) = text.split_once(',').ok_or(DecodeError::MalformedDataUri)?;

    let rest = header.strip_prefix(SCHEME).ok_or(DecodeError::MissingMimeType)?;
    let (mime_type, marker) = match rest.split_once(';') {
        Some((mime, marker)) => (mime, Some(marker)),
        None => (rest, None),
    };

    if mime_type.is_empty() {
        return Err(DecodeError::MissingMimeType);
    }

    if let Some(marker) = marker {
        if marker != BASE64_MARKER {
            return Err(DecodeError::MalformedDataUri);
        }
    }

    Ok(RawDataUri { mime_type, marker, payload })
}

/// An immutable, well-formed Data URI string.
///
/// Produced by the Encoder; the only artifact this tool persists or
/// exchanges. Construction guarantees the wire format
/// `data:<mime>;base64,<payload>` with no wrapping or whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri(String);

impl DataUri {
    /// Build a Data URI from a MIME type and raw bytes.
    pub fn from_parts(mime_type: &MimeType, bytes: &[u8]) -> Self {
        let payload = STANDARD.encode(bytes);
        Self(format!("{SCHEME}{mime_type};{BASE64_MARKER},{payload}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DataUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
