//! Binary-to-Data-URI encoding

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::EncodeError;
use crate::uri::{DataUri, MimeType};

#[derive(Debug, Clone)]
enum SourceContents {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// An opaque binary blob with a declared MIME type and a display name.
///
/// The blob is owned transiently by one encode operation; nothing is read
/// from disk until [`Encoder::encode`] runs.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    mime_type: Option<MimeType>,
    contents: SourceContents,
}

impl SourceFile {
    /// Describe a file on disk. The MIME type is inferred from the file
    /// extension, standing in for the type a file picker would report.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = path
            .extension()
            .and_then(|ext| MimeType::from_extension(&ext.to_string_lossy()));

        Self {
            name,
            mime_type,
            contents: SourceContents::Path(path.to_path_buf()),
        }
    }

    /// Wrap in-memory bytes with a declared type and display name.
    pub fn from_bytes<S: Into<String>>(name: S, mime_type: Option<MimeType>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            contents: SourceContents::Bytes(bytes),
        }
    }

    /// Replace the declared MIME type (the CLI `--mime` override).
    pub fn with_mime_type(mut self, mime_type: MimeType) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> Option<&MimeType> {
        self.mime_type.as_ref()
    }

    fn read_bytes(&self) -> io::Result<Cow<'_, [u8]>> {
        match &self.contents {
            SourceContents::Path(path) => fs::read(path).map(Cow::Owned),
            SourceContents::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

/// Turns an audio [`SourceFile`] into a Base64 [`DataUri`].
///
/// Stateless; every call is independent and leaves no residue.
#[derive(Debug, Default)]
pub struct Encoder;

impl Encoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode the file's full binary content as a Data URI.
    ///
    /// The declared MIME type must be `audio/*`; it is carried into the
    /// URI header exactly as declared. The payload is standard Base64
    /// with padding, no wrapping, no whitespace.
    pub fn encode(&self, file: &SourceFile) -> Result<DataUri, EncodeError> {
        let mime_type = match file.mime_type() {
            Some(m) if m.is_audio() => m.clone(),
            other => {
                return Err(EncodeError::InvalidFileType {
                    found: other.map(|m| m.as_str().to_string()),
                });
            }
        };

        let bytes = file.read_bytes().map_err(|source| EncodeError::ReadFailure {
            name: file.name().to_string(),
            source,
        })?;

        log::debug!(
            "encoded {} ({} bytes) as {}",
            file.name(),
            bytes.len(),
            mime_type
        );

        Ok(DataUri::from_parts(&mime_type, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn audio_mime(s: &str) -> MimeType {
        MimeType::parse(s).unwrap()
    }

    #[test]
    fn test_encode_from_bytes() {
        let file = SourceFile::from_bytes("clip.mp3", Some(audio_mime("audio/mpeg")), b"abc".to_vec());
        let uri = Encoder::new().encode(&file).unwrap();
        assert_eq!(uri.as_str(), "data:audio/mpeg;base64,YWJj");
    }

    #[test]
    fn test_encode_rejects_non_audio() {
        let file = SourceFile::from_bytes("x.txt", Some(audio_mime("text/plain")), b"hello".to_vec());
        let err = Encoder::new().encode(&file).unwrap_err();
        match err {
            EncodeError::InvalidFileType { found } => assert_eq!(found.as_deref(), Some("text/plain")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_rejects_unknown_type() {
        let file = SourceFile::from_bytes("mystery.bin", None, vec![1, 2, 3]);
        let err = Encoder::new().encode(&file).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidFileType { found: None }));
    }

    #[test]
    fn test_encode_reads_from_disk() {
        let mut tmp = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        tmp.write_all(&[0u8, 255, 16, 32]).unwrap();
        tmp.flush().unwrap();

        let file = SourceFile::open(tmp.path());
        assert_eq!(file.mime_type().unwrap().as_str(), "audio/wav");

        let uri = Encoder::new().encode(&file).unwrap();
        assert!(uri.as_str().starts_with("data:audio/wav;base64,"));
    }

    #[test]
    fn test_encode_read_failure() {
        let file = SourceFile::open("/nonexistent/definitely-missing.mp3");
        let err = Encoder::new().encode(&file).unwrap_err();
        match err {
            EncodeError::ReadFailure { name, .. } => assert_eq!(name, "definitely-missing.mp3"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mime_override() {
        let file = SourceFile::from_bytes("clip.bin", None, b"x".to_vec())
            .with_mime_type(audio_mime("audio/flac"));
        let uri = Encoder::new().encode(&file).unwrap();
        assert!(uri.as_str().starts_with("data:audio/flac;"));
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let encoder = Encoder::new();
        let a = SourceFile::from_bytes("a.ogg", Some(audio_mime("audio/ogg")), vec![1]);
        let b = SourceFile::from_bytes("b.ogg", Some(audio_mime("audio/ogg")), vec![2]);

        let uri_a1 = encoder.encode(&a).unwrap();
        let uri_b = encoder.encode(&b).unwrap();
        let uri_a2 = encoder.encode(&a).unwrap();

        assert_eq!(uri_a1, uri_a2);
        assert_ne!(uri_a1, uri_b);
    }
}
