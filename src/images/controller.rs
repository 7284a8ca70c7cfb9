use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    app::{
        models::api_error::ApiError,
        structs::{json_from_request::JsonFromRequest, query_from_request::QueryFromRequest},
    },
    AppState,
};

use super::{
    dtos::generate_image_dto::GenerateImageDto, models::generated_image::GeneratedImage, service,
};

pub async fn generate_image(
    State(state): State<AppState>,
    JsonFromRequest(body): JsonFromRequest<Value>,
) -> Result<Json<GeneratedImage>, ApiError> {
    let dto = GenerateImageDto::from_json_body(body)?;

    match service::generate_image(&dto, state.provider.as_ref()).await {
        Ok(image) => Ok(Json(image)),
        Err(e) => Err(e),
    }
}

pub async fn generate_image_from_query(
    State(state): State<AppState>,
    QueryFromRequest(dto): QueryFromRequest<GenerateImageDto>,
) -> Result<Json<GeneratedImage>, ApiError> {
    match service::generate_image(&dto, state.provider.as_ref()).await {
        Ok(image) => Ok(Json(image)),
        Err(e) => Err(e),
    }
}

pub async fn get_styles() -> Json<Value> {
    Json(service::get_styles())
}

pub async fn get_sizes() -> Json<Value> {
    Json(service::get_sizes())
}

pub async fn get_ratios() -> Json<Value> {
    Json(service::get_ratios())
}
