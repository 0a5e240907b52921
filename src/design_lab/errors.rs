//! Design lab errors.

use thiserror::Error;

/// Image editing failures. Every variant renders as a message fit for the user.
#[derive(Debug, Error)]
pub enum DesignLabError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-2xx response or unexpected body.
    #[error("unexpected response from image service: {0}")]
    UnexpectedResponse(String),

    /// The response carried no image.
    #[error("no image data returned from the image service")]
    NoImage,

    /// Image data was not valid base64.
    #[error("invalid image data: {0}")]
    InvalidImage(#[from] base64::DecodeError),
}
