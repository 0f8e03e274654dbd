//! Profile Use Cases
//!
//! Profile view and profile picture upload.

use std::path::PathBuf;

use platform::storage::write_atomic;

use crate::application::authenticator::Authenticator;
use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Accepted profile picture formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    const PNG_MAGIC: &'static [u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG_MAGIC: &'static [u8] = &[0xFF, 0xD8, 0xFF];

    /// Format from a `Content-Type` value
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
        match mime.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Format from the leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(Self::PNG_MAGIC) {
            Some(Self::Png)
        } else if bytes.starts_with(Self::JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// Current record for the signed-in user
    pub async fn profile(&self, username: &UserName) -> AuthResult<UserRecord> {
        self.find_user(username).await.ok_or(AuthError::UserNotFound)
    }

    /// Store a profile picture as `<profile_pics_dir>/<username>.<ext>`
    ///
    /// The declared content type must agree with the file signature.
    pub async fn set_profile_image(
        &self,
        username: &UserName,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> AuthResult<PathBuf> {
        let max_bytes = self.config.max_profile_picture_bytes;
        if bytes.len() > max_bytes {
            return Err(AuthError::ImageTooLarge { max_bytes });
        }

        let sniffed = ImageFormat::sniff(bytes).ok_or(AuthError::UnsupportedImage)?;
        if let Some(declared) = content_type
            && ImageFormat::from_content_type(declared) != Some(sniffed)
        {
            return Err(AuthError::UnsupportedImage);
        }

        if self.find_user(username).await.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let path = self
            .config
            .profile_pics_dir
            .join(format!("{}.{}", username, sniffed.extension()));
        write_atomic(&path, bytes).await?;

        let recorded = path.clone();
        self.mutate(move |store| {
            store
                .set_profile_image(username, recorded)
                .map_err(Into::into)
        })
        .await?;

        tracing::info!(
            username = %username,
            path = %path.display(),
            bytes = bytes.len(),
            "Profile picture updated"
        );

        Ok(path)
    }
}
