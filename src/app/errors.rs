use axum::http::StatusCode;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    InternalServerError,
    InvalidRequestFormat,
    InvalidQuery,
    NotFound,
    RateLimitExceeded,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::InternalServerError => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Internal server error".to_string(),
                message: "An unexpected error occurred".to_string(),
            },
            Self::InvalidRequestFormat => ApiError {
                code: StatusCode::BAD_REQUEST,
                error: "Invalid request format".to_string(),
                message: "Request must contain JSON data".to_string(),
            },
            Self::InvalidQuery => ApiError {
                code: StatusCode::BAD_REQUEST,
                error: "Invalid request format".to_string(),
                message: "Request query string could not be parsed".to_string(),
            },
            Self::NotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                error: "Not found".to_string(),
                message: "The requested endpoint was not found".to_string(),
            },
            Self::RateLimitExceeded => ApiError {
                code: StatusCode::TOO_MANY_REQUESTS,
                error: "Rate limit exceeded".to_string(),
                message: "Too many requests. Please try again later.".to_string(),
            },
        }
    }
}
