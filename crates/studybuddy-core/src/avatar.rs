//! Profile picture selection.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::auth::FormError;
use crate::error::{Error, Result};

/// Largest accepted picture, inclusive.
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// Checks a picture's type and size before it is read.
pub fn check_avatar(mime_type: &str, size: u64) -> std::result::Result<(), FormError> {
    if !mime_type.starts_with("image/") {
        return Err(FormError::NotAnImage);
    }
    if size > MAX_AVATAR_BYTES {
        return Err(FormError::ImageTooLarge);
    }
    Ok(())
}

/// Guesses the MIME type from the file extension.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// A picture the user picked, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    /// Reads a picture from disk.
    ///
    /// Returns `Error::InvalidInput` carrying the [`FormError`] text when the
    /// file is not an image or is too large; the size is checked from the
    /// file metadata before the contents are read.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = guess_mime_type(path);
        let size = tokio::fs::metadata(path).await?.len();
        check_avatar(&mime_type, size).map_err(|error| Error::InvalidInput(error.to_string()))?;

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(%file_name, %mime_type, size = bytes.len(), "Loaded profile picture");
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// `data:<mime>;base64,<payload>`, usable both as preview source and as
    /// the `avatar` field sent to the backend.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}
