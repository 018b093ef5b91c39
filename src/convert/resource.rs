//! Decoded audio resources
//!
//! A [`DecodedAudioResource`] is the decoded bytes plus an addressable
//! handle: a named temporary file the host can hand to a player or file
//! manager. The handle occupies filesystem storage and is deleted when the
//! resource is released or dropped, on every exit path.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::DecodeError;
use crate::uri::MimeType;

/// Stem of the file name used by [`DecodedAudioResource::download`].
pub const DOWNLOAD_STEM: &str = "decoded_audio";

/// A decoded binary buffer with its MIME type, extension hint, and a live
/// temp-file handle.
#[derive(Debug)]
pub struct DecodedAudioResource {
    bytes: Vec<u8>,
    mime_type: MimeType,
    extension: String,
    handle: NamedTempFile,
}

impl DecodedAudioResource {
    /// Write the decoded bytes into a fresh named handle.
    pub(crate) fn materialize(bytes: Vec<u8>, mime_type: MimeType) -> Result<Self, DecodeError> {
        let extension = mime_type.extension_hint().to_string();

        let mut handle = tempfile::Builder::new()
            .prefix("audio64-")
            .suffix(&format!(".{extension}"))
            .tempfile()
            .map_err(DecodeError::ResourceFailure)?;
        handle.write_all(&bytes).map_err(DecodeError::ResourceFailure)?;
        handle.flush().map_err(DecodeError::ResourceFailure)?;

        log::debug!(
            "materialized {} bytes of {} at {}",
            bytes.len(),
            mime_type,
            handle.path().display()
        );

        Ok(Self { bytes, mime_type, extension, handle })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// Extension hint inferred from the MIME subtype (`mp3` fallback).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the live handle, valid until the resource is released.
    pub fn handle_path(&self) -> &Path {
        self.handle.path()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read-only exposure for a playback surface. No ownership transfer.
    pub fn preview(&self) -> AudioPreview<'_> {
        AudioPreview {
            bytes: &self.bytes,
            mime_type: &self.mime_type,
            handle: self.handle.path(),
        }
    }

    /// Default name for a saved copy: `decoded_audio.<extension>`.
    pub fn download_file_name(&self) -> String {
        format!("{DOWNLOAD_STEM}.{}", self.extension)
    }

    /// Persist the bytes as `decoded_audio.<extension>` inside `dir`.
    ///
    /// Idempotent; repeat calls rewrite the same target and leave the
    /// resource's lifetime untouched.
    pub fn download<P: AsRef<Path>>(&self, dir: P) -> io::Result<PathBuf> {
        let target = dir.as_ref().join(self.download_file_name());
        fs::write(&target, &self.bytes)?;
        Ok(target)
    }

    /// Invalidate the handle, deleting its temp file eagerly.
    ///
    /// Dropping the resource has the same effect; this form surfaces the
    /// deletion error instead of swallowing it.
    pub fn release(self) -> io::Result<()> {
        self.handle.close()
    }
}

/// Read-only view of a live resource for playback collaborators.
#[derive(Debug, Clone, Copy)]
pub struct AudioPreview<'a> {
    pub bytes: &'a [u8],
    pub mime_type: &'a MimeType,
    pub handle: &'a Path,
}
