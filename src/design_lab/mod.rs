//! Design Lab
//!
//! Edits a sneaker photo from a free-text instruction using a generative image
//! model. One request at a time; there is no retry, dedup or cancellation.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;

pub mod errors;
pub mod gemini;

pub use errors::DesignLabError;
pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, GeminiImageEditor};

/// MIME type of both the uploaded and the edited image.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// A generated image. Always treated as JPEG.
#[derive(Clone, PartialEq, Eq)]
pub struct EditedImage {
    bytes: Vec<u8>,
}

impl EditedImage {
    /// Wrap raw image bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode base64 image data.
    ///
    /// # Errors
    ///
    /// Returns [`DesignLabError::InvalidImage`] if `data` is not valid base64.
    pub fn from_base64(data: &str) -> Result<Self, DesignLabError> {
        Ok(Self::new(BASE64.decode(data)?))
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Base64 image data.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// `data:image/jpeg;base64,...`, ready for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{IMAGE_MIME_TYPE};base64,{}", self.to_base64())
    }
}

impl Debug for EditedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("EditedImage")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Base64-encode an image for [`ImageEditor::edit`].
pub fn encode_image(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Applies a free-text edit to an image.
#[automock]
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Edit the base64-encoded JPEG `image_base64` following `instruction`.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignLabError`] whose message can be shown to the user.
    async fn edit(
        &self,
        image_base64: &str,
        instruction: &str,
    ) -> Result<EditedImage, DesignLabError>;
}
