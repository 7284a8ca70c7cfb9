use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError},
    images::{
        enums::{image_size::ImageSize, image_style::ImageStyle},
        errors::ImagesApiError,
    },
};

pub const MAX_PROMPT_CHARS: usize = 1000;

const MISSING_PROMPT: &str = "missing_prompt";
const PROMPT_TOO_LONG: &str = "prompt_too_long";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateImageDto {
    #[serde(default)]
    #[validate(custom = "validate_prompt")]
    pub prompt: String,
    pub style: Option<String>,
    pub size: Option<String>,
    pub ratio: Option<String>,
}

fn validate_prompt(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(MISSING_PROMPT));
    }

    if value.chars().count() > MAX_PROMPT_CHARS {
        return Err(ValidationError::new(PROMPT_TOO_LONG));
    }

    Ok(())
}

impl GenerateImageDto {
    /// Reads a POST body. Empty bodies (`{}`, `[]`, `null`, `""`, `0`,
    /// `false`) and bodies of the wrong shape are an invalid request format
    /// rather than a missing prompt.
    pub fn from_json_body(body: Value) -> Result<Self, ApiError> {
        if is_empty_json(&body) {
            return Err(DefaultApiError::InvalidRequestFormat.value());
        }

        serde_json::from_value(body).map_err(|e| {
            tracing::debug!("rejected json body: {}", e);
            DefaultApiError::InvalidRequestFormat.value()
        })
    }

    /// Trims the prompt and fills in the default style and size.
    pub fn sanitized(&self) -> Self {
        Self {
            prompt: self.prompt.trim().to_string(),
            style: Some(
                self.style
                    .clone()
                    .unwrap_or_else(|| ImageStyle::DEFAULT.to_string()),
            ),
            size: Some(
                self.size
                    .clone()
                    .unwrap_or_else(|| ImageSize::DEFAULT.to_string()),
            ),
            ratio: self.ratio.clone(),
        }
    }

    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or(ImageStyle::DEFAULT)
    }

    pub fn size(&self) -> &str {
        self.size.as_deref().unwrap_or(ImageSize::DEFAULT)
    }

    /// Aspect used for prompt enhancement: an explicit ratio wins over size.
    pub fn aspect(&self) -> &str {
        self.ratio.as_deref().unwrap_or_else(|| self.size())
    }

    pub fn validated(&self) -> Result<(), ApiError> {
        self.validate().map_err(|e| to_api_error(&e))
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn to_api_error(errors: &ValidationErrors) -> ApiError {
    let code = errors
        .field_errors()
        .get("prompt")
        .and_then(|e| e.first())
        .map(|e| e.code.to_string());

    match code.as_deref() {
        Some(PROMPT_TOO_LONG) => ImagesApiError::PromptTooLong.value(),
        _ => ImagesApiError::MissingPrompt.value(),
    }
}
