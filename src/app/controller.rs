use std::any::Any;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{app::util::time, AppState};

use super::{errors::DefaultApiError, models::api_error::ApiError};

pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn get_root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "environment": state.envy.app_env,
        "endpoints": [
            { "method": "GET", "path": "/api/health" },
            { "method": "GET", "path": "/api/generate", "params": ["prompt", "style", "size", "ratio"] },
            { "method": "POST", "path": "/api/generate", "body": ["prompt", "style", "size", "ratio"] },
            { "method": "GET", "path": "/api/styles" },
            { "method": "GET", "path": "/api/sizes" },
            { "method": "GET", "path": "/api/ratios" }
        ]
    }))
}

pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": time::current_time_in_secs_f64(),
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
    }))
}

pub async fn fallback() -> ApiError {
    DefaultApiError::NotFound.value()
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!("internal server error: {}", details);

    DefaultApiError::InternalServerError.value().into_response()
}
