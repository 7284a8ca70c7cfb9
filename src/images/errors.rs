use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum ImagesApiError {
    MissingPrompt,
    PromptTooLong,
    GenerationFailed,
    GenerationError,
}

impl ImagesApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::MissingPrompt => ApiError {
                code: StatusCode::BAD_REQUEST,
                error: "Missing prompt".to_string(),
                message: "Please provide a text prompt for image generation".to_string(),
            },
            Self::PromptTooLong => ApiError {
                code: StatusCode::BAD_REQUEST,
                error: "Prompt too long".to_string(),
                message: "Prompt must be less than 1000 characters".to_string(),
            },
            Self::GenerationFailed => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Generation failed".to_string(),
                message: "Failed to generate image. Please try again.".to_string(),
            },
            Self::GenerationError => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Internal server error".to_string(),
                message: "An unexpected error occurred during image generation".to_string(),
            },
        }
    }
}
