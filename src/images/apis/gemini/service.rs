use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Response};

use crate::{
    app::{env::Envy, models::api_error::ApiError},
    images::{
        errors::ImagesApiError,
        models::generated_image::ImageData,
        provider::ImageProvider,
        util::prompt::{enhance_prompt, preview},
    },
};

use super::{
    config::{API_KEY_HEADER, GENERATE_CONTENT_PATH},
    models::input_spec::InputSpec,
    structs::gemini_generate_content_response::GeminiGenerateContentResponse,
};

pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_envy(envy: &Envy) -> Self {
        let client = Self::new(
            envy.gemini_api_url(),
            &envy.gemini_api_key,
            envy.gemini_model(),
        );
        tracing::info!("gemini client initialized for model {}", client.model);

        client
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}{}/{}:generateContent",
            self.api_url, GENERATE_CONTENT_PATH, self.model
        )
    }

    async fn generate_content(
        &self,
        input_spec: &InputSpec,
    ) -> Result<GeminiGenerateContentResponse, ApiError> {
        let result = self
            .client
            .post(self.generate_content_url())
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .header(API_KEY_HEADER, &self.api_key)
            .json(input_spec)
            .send()
            .await;

        match result {
            Ok(res) => parse_response_to_gemini_generate_content_response(res).await,
            Err(e) => {
                tracing::error!(%e);
                Err(ImagesApiError::GenerationError.value())
            }
        }
    }
}

#[async_trait]
impl ImageProvider for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        style: &str,
        aspect: &str,
    ) -> Result<Option<ImageData>, ApiError> {
        let enhanced_prompt = enhance_prompt(prompt, style, aspect);
        tracing::info!(
            "generating image with enhanced prompt: {}...",
            preview(&enhanced_prompt, 100)
        );

        let response = self
            .generate_content(&InputSpec::image(&enhanced_prompt))
            .await?;

        extract_image(response)
    }

    async fn test_connection(&self) -> bool {
        match self.generate_content(&InputSpec::connection_test()).await {
            Ok(response) => !response.candidates.is_empty(),
            Err(e) => {
                tracing::error!("connection test failed: {}", e.message);
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

async fn parse_response_to_gemini_generate_content_response(
    res: Response,
) -> Result<GeminiGenerateContentResponse, ApiError> {
    let status = res.status();

    match res.text().await {
        Ok(text) => {
            if !status.is_success() {
                tracing::error!(%status, %text, "gemini request failed");
                return Err(ImagesApiError::GenerationError.value());
            }

            match serde_json::from_str(&text) {
                Ok(gemini_generate_content_response) => Ok(gemini_generate_content_response),
                Err(_) => {
                    tracing::error!(%text);
                    Err(ImagesApiError::GenerationError.value())
                }
            }
        }
        Err(e) => {
            tracing::error!(%e);
            Err(ImagesApiError::GenerationError.value())
        }
    }
}

/// Returns the first inline image of the first candidate. Text parts that
/// come before it are logged and skipped.
fn extract_image(response: GeminiGenerateContentResponse) -> Result<Option<ImageData>, ApiError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        tracing::error!("no candidates returned from gemini");
        return Ok(None);
    };

    let parts = match candidate.content {
        Some(content) if !content.parts.is_empty() => content.parts,
        _ => {
            tracing::error!(
                "no content parts returned from gemini (finish reason: {:?})",
                candidate.finish_reason
            );
            return Ok(None);
        }
    };

    for part in parts {
        if let Some(text) = part.text.filter(|t| !t.is_empty()) {
            tracing::info!("generated text: {}...", preview(&text, 100));
            continue;
        }

        let Some(inline_data) = part.inline_data.filter(|d| !d.data.is_empty()) else {
            continue;
        };

        tracing::info!("image data found in response");

        return match base64::decode(&inline_data.data) {
            Ok(bytes) => Ok(Some(ImageData {
                bytes: Bytes::from(bytes),
                mime_type: inline_data
                    .mime_type
                    .unwrap_or_else(|| mime::IMAGE_PNG.to_string()),
            })),
            Err(e) => {
                tracing::error!(%e, "could not decode image data");
                Err(ImagesApiError::GenerationError.value())
            }
        };
    }

    tracing::error!("no image data found in response");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const MODEL_PATH: &str = "/v1beta/models/gemini-2.0-flash-exp:generateContent";

    fn client(url: &str) -> GeminiClient {
        GeminiClient::new(url, "test-key", "gemini-2.0-flash-exp")
    }

    fn image_response(parts: serde_json::Value) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_image_returns_first_inline_image() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", MODEL_PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{
                    "text": "a red fox, cartoon style, animated, colorful, fun, HD quality, \
                             square format, 1024x1024 resolution, ultra high definition, \
                             crystal clear, sharp details, professional quality, HD"
                }] }],
                "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(image_response(json!([
                { "text": "Here is your fox." },
                { "inlineData": { "mimeType": "image/jpeg", "data": base64::encode(b"first") } },
                { "inlineData": { "mimeType": "image/png", "data": base64::encode(b"second") } }
            ])))
            .create_async()
            .await;

        let image = client(&server.url())
            .generate_image("a red fox", "cartoon", "1:1")
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(image.bytes, Bytes::from_static(b"first"));
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_missing_mime_type_defaults_to_png() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_body(image_response(json!([
                { "inlineData": { "data": base64::encode(b"png") } }
            ])))
            .create_async()
            .await;

        let image = client(&server.url())
            .generate_image("a red fox", "realistic", "medium")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_text_only_response_is_none() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_body(image_response(json!([{ "text": "I can't draw that." }])))
            .create_async()
            .await;

        let image = client(&server.url())
            .generate_image("a red fox", "realistic", "medium")
            .await
            .unwrap();

        assert!(image.is_none());
    }

    #[tokio::test]
    async fn test_no_candidates_is_none() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string())
            .create_async()
            .await;

        let image = client(&server.url())
            .generate_image("a red fox", "realistic", "medium")
            .await
            .unwrap();

        assert!(image.is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_err() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(403)
            .with_body(json!({ "error": { "code": 403, "message": "API key not valid" } }).to_string())
            .create_async()
            .await;

        let err = client(&server.url())
            .generate_image("a red fox", "realistic", "medium")
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message,
            "An unexpected error occurred during image generation"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_err() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = client(&server.url())
            .generate_image("a red fox", "realistic", "medium")
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_undecodable_image_is_err() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(200)
            .with_body(image_response(json!([
                { "inlineData": { "mimeType": "image/png", "data": "%%%not-base64%%%" } }
            ])))
            .create_async()
            .await;

        let result = client(&server.url())
            .generate_image("a red fox", "realistic", "medium")
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connection_succeeds_with_candidates() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", MODEL_PATH)
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "Hello, world!" }] }],
                "generationConfig": { "responseModalities": ["TEXT"], "maxOutputTokens": 10 }
            })))
            .with_status(200)
            .with_body(image_response(json!([{ "text": "Hi!" }])))
            .create_async()
            .await;

        assert!(client(&server.url()).test_connection().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_fails_on_error_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", MODEL_PATH)
            .with_status(500)
            .create_async()
            .await;

        assert!(!client(&server.url()).test_connection().await);
    }

    #[test]
    fn test_generate_content_url_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:1234/", "k", "some-model");

        assert_eq!(
            client.generate_content_url(),
            "http://localhost:1234/v1beta/models/some-model:generateContent"
        );
    }
}
