use serde::Serialize;

use crate::images::apis::gemini::config::{
    CONNECTION_TEST_MAX_OUTPUT_TOKENS, CONNECTION_TEST_PROMPT, MAX_OUTPUT_TOKENS, TEMPERATURE,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    pub contents: Vec<InputContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct InputContent {
    pub parts: Vec<InputPart>,
}

#[derive(Debug, Serialize)]
pub struct InputPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub max_output_tokens: u32,
}

impl InputSpec {
    fn from_text(
        text: &str,
        response_modalities: &[&str],
        temperature: Option<f32>,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            contents: vec![InputContent {
                parts: vec![InputPart {
                    text: text.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: response_modalities
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
                temperature,
                max_output_tokens,
            },
        }
    }

    pub fn image(prompt: &str) -> Self {
        Self::from_text(
            prompt,
            &["TEXT", "IMAGE"],
            Some(TEMPERATURE),
            MAX_OUTPUT_TOKENS,
        )
    }

    pub fn connection_test() -> Self {
        Self::from_text(
            CONNECTION_TEST_PROMPT,
            &["TEXT"],
            None,
            CONNECTION_TEST_MAX_OUTPUT_TOKENS,
        )
    }
}
