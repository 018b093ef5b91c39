//! MIME type handling
//!
//! The declared MIME string is preserved exactly as given; no normalization
//! or codec detection happens here.

use std::fmt;

/// Extension used when the subtype yields no usable hint.
pub const FALLBACK_EXTENSION: &str = "mp3";

/// A validated `type/subtype` content-type label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MimeType(String);

impl MimeType {
    /// Parse a MIME type of the shape `type/subtype`.
    ///
    /// The subtype may be empty (`audio/`), the type may not. The text is
    /// kept verbatim.
    pub fn parse(s: &str) -> Option<Self> {
        let (top, _subtype) = s.split_once('/')?;
        if top.is_empty() || top.contains(char::is_whitespace) {
            return None;
        }
        Some(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this type is in the `audio/` domain.
    pub fn is_audio(&self) -> bool {
        self.0.starts_with("audio/")
    }

    /// The text after the first `/`.
    pub fn subtype(&self) -> &str {
        self.0.split_once('/').map(|(_, s)| s).unwrap_or("")
    }

    /// File-extension hint derived from the subtype.
    ///
    /// Only a short alphanumeric subtype is accepted as an extension;
    /// empty or structured subtypes fall back to `mp3`. The hint names
    /// the downloaded file and never affects the decoded bytes.
    pub fn extension_hint(&self) -> &str {
        let subtype = self.subtype();
        let usable = !subtype.is_empty()
            && subtype.len() <= 5
            && subtype.chars().all(|c| c.is_ascii_alphanumeric());
        if usable { subtype } else { FALLBACK_EXTENSION }
    }

    /// Look up the conventional MIME type for an audio file extension.
    ///
    /// This stands in for the content type a browser would report for a
    /// picked file. Unknown extensions yield `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let mime = match ext.to_ascii_lowercase().as_str() {
            "mp3" => "audio/mpeg",
            "wav" | "wave" => "audio/wav",
            "ogg" | "oga" => "audio/ogg",
            "opus" => "audio/opus",
            "flac" => "audio/flac",
            "m4a" | "mp4" => "audio/mp4",
            "aac" => "audio/aac",
            "webm" => "audio/webm",
            "mid" | "midi" => "audio/midi",
            "aiff" | "aif" => "audio/aiff",
            "wma" => "audio/x-ms-wma",
            "amr" => "audio/amr",
            _ => return None,
        };
        Some(Self(mime.to_string()))
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MimeType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
