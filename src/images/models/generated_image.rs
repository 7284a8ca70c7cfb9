use bytes::Bytes;
use serde::Serialize;

use crate::{app::util::time, images::dtos::generate_image_dto::GenerateImageDto};

#[derive(Debug, Serialize)]
pub struct GeneratedImage {
    pub success: bool,
    pub image: String,
    pub mime_type: String,
    pub prompt: String,
    pub style: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    pub generated_at: f64,
}

/// Raw bytes handed back by an image provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn new(dto: &GenerateImageDto, data: &ImageData) -> Self {
        Self {
            success: true,
            image: base64::encode(&data.bytes),
            mime_type: data.mime_type.to_string(),
            prompt: dto.prompt.to_string(),
            style: dto.style().to_string(),
            size: dto.size().to_string(),
            ratio: dto.ratio.clone(),
            generated_at: time::current_time_in_secs_f64(),
        }
    }
}
