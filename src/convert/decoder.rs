//! Data-URI-to-binary decoding
//!
//! The validation pipeline runs in a fixed order, each step
//! short-circuiting: emptiness, structural split, MIME extraction, audio
//! domain gate, extension inference, Base64 decode, materialization.

use std::io;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::convert::resource::DecodedAudioResource;
use crate::error::DecodeError;
use crate::uri::{MimeType, parser};

/// Observable states of a [`Decoder`] instance.
///
/// `Decoding` is only visible while a decode call is on the stack; decode
/// is synchronous with respect to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Idle,
    Decoding,
    Ready,
    Failed,
}

/// Decodes audio Data URIs and owns the single live resource slot.
///
/// At most one [`DecodedAudioResource`] is live per instance; a successful
/// decode releases the previous handle as part of installing the new one.
#[derive(Debug, Default)]
pub struct Decoder {
    resource: Option<DecodedAudioResource>,
    state: DecoderState,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the validation pipeline and materialize the decoded resource.
    ///
    /// On failure no resource is created or replaced: a previously
    /// decoded resource stays live (stale-but-valid policy). A new decode
    /// is always permitted afterwards.
    pub fn decode(&mut self, text: &str) -> Result<&DecodedAudioResource, DecodeError> {
        self.state = DecoderState::Decoding;

        match Self::validate(text).and_then(|(mime_type, bytes)| {
            DecodedAudioResource::materialize(bytes, mime_type)
        }) {
            Ok(resource) => {
                // Installing the replacement drops the prior handle.
                self.resource = Some(resource);
                self.state = DecoderState::Ready;
                Ok(self.resource.as_ref().expect("resource just installed"))
            }
            Err(err) => {
                self.state = DecoderState::Failed;
                Err(err)
            }
        }
    }

    /// Run the pipeline without materializing a resource.
    ///
    /// Touches no Decoder state; the CLI `inspect` command and callers
    /// that only want validation use this.
    pub fn inspect(text: &str) -> Result<UriReport, DecodeError> {
        let payload_chars = text.trim().split_once(',').map(|(_, p)| p.len()).unwrap_or(0);
        let (mime_type, bytes) = Self::validate(text)?;

        Ok(UriReport {
            extension: mime_type.extension_hint().to_string(),
            mime_type,
            payload_chars,
            decoded_bytes: bytes.len(),
        })
    }

    /// Pipeline steps 1-6: emptiness, split, MIME, domain gate, Base64.
    fn validate(text: &str) -> Result<(MimeType, Vec<u8>), DecodeError> {
        // Surrounding whitespace is tolerated (file and stdin input carry
        // trailing newlines); whitespace inside the payload is not.
        let text = text.trim();
        if text.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let raw = parser::parse(text)?;

        let mime_type = MimeType::parse(raw.mime_type).ok_or(DecodeError::MissingMimeType)?;
        if !mime_type.is_audio() {
            return Err(DecodeError::NotAudioContent(mime_type.as_str().to_string()));
        }

        let bytes = STANDARD.decode(raw.payload)?;
        log::debug!("decoded {} bytes of {}", bytes.len(), mime_type);

        Ok((mime_type, bytes))
    }

    /// The live resource, if any. Untouched by failed decode attempts.
    pub fn resource(&self) -> Option<&DecodedAudioResource> {
        self.resource.as_ref()
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Release the live resource's handle and return to `Idle`.
    pub fn release(&mut self) -> io::Result<()> {
        self.state = DecoderState::Idle;
        match self.resource.take() {
            Some(resource) => resource.release(),
            None => Ok(()),
        }
    }
}

/// What [`Decoder::inspect`] reports about a valid Data URI.
#[derive(Debug, Clone)]
pub struct UriReport {
    pub mime_type: MimeType,
    pub extension: String,
    pub payload_chars: usize,
    pub decoded_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::encoder::{Encoder, SourceFile};

    #[test]
    fn test_initial_state() {
        let decoder = Decoder::new();
        assert_eq!(decoder.state(), DecoderState::Idle);
        assert!(decoder.resource().is_none());
    }

    #[test]
    fn test_decode_empty_input() {
        let mut decoder = Decoder::new();
        assert!(matches!(decoder.decode(""), Err(DecodeError::EmptyInput)));
        assert!(matches!(decoder.decode("   "), Err(DecodeError::EmptyInput)));
        assert_eq!(decoder.state(), DecoderState::Failed);
    }

    #[test]
    fn test_decode_malformed() {
        let mut decoder = Decoder::new();
        assert!(matches!(
            decoder.decode("not a data uri"),
            Err(DecodeError::MalformedDataUri)
        ));
    }

    #[test]
    fn test_decode_missing_mime() {
        let mut decoder = Decoder::new();
        assert!(matches!(
            decoder.decode("data:;base64,AAA="),
            Err(DecodeError::MissingMimeType)
        ));
    }

    #[test]
    fn test_decode_rejects_non_audio() {
        let mut decoder = Decoder::new();
        let err = decoder.decode("data:image/png;base64,iVBORw0KGgo=").unwrap_err();
        match err {
            DecodeError::NotAudioContent(mime) => assert_eq!(mime, "image/png"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_invalid_base64() {
        let mut decoder = Decoder::new();
        assert!(matches!(
            decoder.decode("data:audio/mpeg;base64,!!!not-base64!!!"),
            Err(DecodeError::InvalidBase64Payload(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let source = SourceFile::from_bytes(
            "clip.ogg",
            MimeType::parse("audio/ogg"),
            bytes.clone(),
        );
        let uri = Encoder::new().encode(&source).unwrap();

        let mut decoder = Decoder::new();
        let resource = decoder.decode(uri.as_str()).unwrap();

        assert_eq!(resource.bytes(), bytes.as_slice());
        assert_eq!(resource.mime_type().as_str(), "audio/ogg");
        assert_eq!(decoder.state(), DecoderState::Ready);
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let mut decoder = Decoder::new();
        let resource = decoder.decode("  data:audio/ogg;base64,AAA=\n").unwrap();
        assert_eq!(resource.extension(), "ogg");
        assert_eq!(resource.bytes().len(), 2);
    }

    #[test]
    fn test_extension_fallback_on_empty_payload() {
        let mut decoder = Decoder::new();
        let resource = decoder.decode("data:audio/unknown-subtype-missing-data,").unwrap();
        assert_eq!(resource.extension(), "mp3");
        assert!(resource.is_empty());
        assert_eq!(decoder.state(), DecoderState::Ready);
    }

    #[test]
    fn test_idempotent_decode_replaces_handle() {
        let mut decoder = Decoder::new();
        let text = "data:audio/wav;base64,AQIDBA==";

        let first_path = decoder.decode(text).unwrap().handle_path().to_path_buf();
        let first_bytes = decoder.resource().unwrap().bytes().to_vec();

        let second = decoder.decode(text).unwrap();
        assert_eq!(second.bytes(), first_bytes.as_slice());
        assert_ne!(second.handle_path(), first_path.as_path());
        // The first handle was released on replacement.
        assert!(!first_path.exists());
    }

    #[test]
    fn test_failed_decode_preserves_prior_resource() {
        let mut decoder = Decoder::new();
        decoder.decode("data:audio/wav;base64,AQID").unwrap();
        let prior_path = decoder.resource().unwrap().handle_path().to_path_buf();

        assert!(decoder.decode("garbage with no comma").is_err());

        assert_eq!(decoder.state(), DecoderState::Failed);
        let prior = decoder.resource().expect("prior resource kept");
        assert_eq!(prior.handle_path(), prior_path.as_path());
        assert!(prior_path.exists());

        // Recovery from Failed is unrestricted.
        decoder.decode("data:audio/wav;base64,AQID").unwrap();
        assert_eq!(decoder.state(), DecoderState::Ready);
        assert!(!prior_path.exists());
    }

    #[test]
    fn test_release() {
        let mut decoder = Decoder::new();
        decoder.decode("data:audio/ogg;base64,AAA=").unwrap();
        let path = decoder.resource().unwrap().handle_path().to_path_buf();

        decoder.release().unwrap();

        assert_eq!(decoder.state(), DecoderState::Idle);
        assert!(decoder.resource().is_none());
        assert!(!path.exists());

        // Releasing with nothing live is a no-op.
        decoder.release().unwrap();
    }

    #[test]
    fn test_inspect_reports_without_materializing() {
        let report = Decoder::inspect("data:audio/ogg;base64,AAAA").unwrap();
        assert_eq!(report.mime_type.as_str(), "audio/ogg");
        assert_eq!(report.extension, "ogg");
        assert_eq!(report.payload_chars, 4);
        assert_eq!(report.decoded_bytes, 3);
    }

    #[test]
    fn test_inspect_rejects_like_decode() {
        assert!(matches!(Decoder::inspect(""), Err(DecodeError::EmptyInput)));
        assert!(matches!(
            Decoder::inspect("data:image/png;base64,AAAA"),
            Err(DecodeError::NotAudioContent(_))
        ));
    }
}
