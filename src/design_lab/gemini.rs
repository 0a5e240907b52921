//! Gemini `generateContent` client for image edits.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::design_lab::{DesignLabError, EditedImage, IMAGE_MIME_TYPE, ImageEditor};

/// Public Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Image editing model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

const INSTRUCTION_PREAMBLE: &str = "Edit this shoe image based on the following instruction. \
     Maintain the shape and perspective of the shoe strictly. Instruction: ";

/// Configuration for connecting to the Gemini API.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API root, e.g. `"https://generativelanguage.googleapis.com"`.
    pub base_url: String,

    /// API key.
    pub api_key: String,

    /// Model name.
    pub model: String,
}

impl GeminiConfig {
    /// Default endpoint and model with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// HTTP client editing images through Gemini.
#[derive(Debug, Clone)]
pub struct GeminiImageEditor {
    config: GeminiConfig,
    http: Client,
}

impl GeminiImageEditor {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ImageEditor for GeminiImageEditor {
    async fn edit(
        &self,
        image_base64: &str,
        instruction: &str,
    ) -> Result<EditedImage, DesignLabError> {
        let url = self.config.endpoint();
        let body = edit_request(image_base64, instruction);

        debug!(model = %self.config.model, "requesting image edit");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            warn!(%status, "image edit request failed");

            return Err(DesignLabError::UnexpectedResponse(format!(
                "generateContent failed with status {status}: {text}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        first_image(parsed)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 2],
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Image {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<&'a str>,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<D> {
    #[serde(default)]
    mime_type: String,
    data: D,
}

fn edit_request<'a>(image_base64: &'a str, instruction: &str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: [RequestContent {
            role: "user",
            parts: [
                RequestPart::Image {
                    inline_data: InlineData {
                        mime_type: IMAGE_MIME_TYPE.to_string(),
                        data: image_base64,
                    },
                },
                RequestPart::Text {
                    text: format!("{INSTRUCTION_PREAMBLE}{instruction}"),
                },
            ],
        }],
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData<Option<String>>>,
}

/// The first non-empty inline image of the first candidate.
fn first_image(response: GenerateContentResponse) -> Result<EditedImage, DesignLabError> {
    let data = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .into_iter()
        .flat_map(|content| content.parts)
        .filter_map(|part| part.inline_data)
        .find_map(|inline| inline.data.filter(|data| !data.is_empty()))
        .ok_or(DesignLabError::NoImage)?;

    EditedImage::from_base64(&data)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    fn parse(value: &Value) -> Result<GenerateContentResponse, serde_json::Error> {
        GenerateContentResponse::deserialize(value)
    }

    #[test]
    fn endpoint_includes_model() {
        let mut config = GeminiConfig::new("key");
        config.base_url = "http://localhost:8080/".to_string();

        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn debug_hides_the_api_key() {
        let printed = format!("{:?}", GeminiConfig::new("very-secret"));

        assert!(!printed.contains("very-secret"), "api key leaked: {printed}");
    }

    #[test]
    fn request_carries_image_then_wrapped_instruction() -> TestResult {
        let body = serde_json::to_value(edit_request("QUJD", "make it neon green"))?;

        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } },
                        { "text": "Edit this shoe image based on the following instruction. \
                            Maintain the shape and perspective of the shoe strictly. \
                            Instruction: make it neon green" },
                    ]
                }]
            })
        );

        Ok(())
    }

    #[test]
    fn picks_first_inline_image_after_text_parts() -> TestResult {
        let response = parse(&json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your shoe" },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } },
                        { "inlineData": { "mimeType": "image/png", "data": "REVG" } },
                    ]
                }
            }]
        }))?;

        let image = first_image(response)?;

        assert_eq!(image.bytes(), b"ABC");

        Ok(())
    }

    #[test]
    fn no_candidates_means_no_image() -> TestResult {
        let result = first_image(parse(&json!({}))?);

        assert!(
            matches!(result, Err(DesignLabError::NoImage)),
            "expected NoImage, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn text_only_reply_means_no_image() -> TestResult {
        let response = parse(&json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't do that" }] } }]
        }))?;

        let result = first_image(response);

        assert!(
            matches!(result, Err(DesignLabError::NoImage)),
            "expected NoImage, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn malformed_image_data_is_invalid() -> TestResult {
        let response = parse(&json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "%%%" } }] }
            }]
        }))?;

        let result = first_image(response);

        assert!(
            matches!(result, Err(DesignLabError::InvalidImage(_))),
            "expected InvalidImage, got {result:?}"
        );

        Ok(())
    }
}
