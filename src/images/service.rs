use serde_json::{json, Value};

use crate::{
    app::models::api_error::ApiError,
    images::{
        dtos::generate_image_dto::GenerateImageDto,
        enums::{image_ratio::ImageRatio, image_size::ImageSize, image_style::ImageStyle},
        errors::ImagesApiError,
        models::generated_image::GeneratedImage,
        provider::ImageProvider,
        util::prompt::preview,
    },
};

pub async fn generate_image(
    dto: &GenerateImageDto,
    provider: &dyn ImageProvider,
) -> Result<GeneratedImage, ApiError> {
    let dto = dto.sanitized();
    dto.validated()?;

    tracing::info!(
        "generating image for prompt: {}...",
        preview(&dto.prompt, 50)
    );

    match provider
        .generate_image(&dto.prompt, dto.style(), dto.aspect())
        .await
    {
        Ok(Some(data)) => Ok(GeneratedImage::new(&dto, &data)),
        Ok(None) => {
            tracing::error!("{} returned no image", provider.name());
            Err(ImagesApiError::GenerationFailed.value())
        }
        Err(e) => {
            tracing::error!("error generating image: {}", e.message);
            Err(e)
        }
    }
}

pub fn get_styles() -> Value {
    json!({ "styles": ImageStyle::OPTIONS })
}

pub fn get_sizes() -> Value {
    json!({ "sizes": ImageSize::OPTIONS })
}

pub fn get_ratios() -> Value {
    json!({ "ratios": ImageRatio::OPTIONS })
}
