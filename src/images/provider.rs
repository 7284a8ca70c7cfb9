use async_trait::async_trait;

use crate::app::models::api_error::ApiError;

use super::models::generated_image::ImageData;

/// An external text-to-image backend.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates one image for `prompt`.
    ///
    /// `Ok(None)` means the provider answered but produced no image.
    /// Transport and upstream failures are `Err`. Calls are never retried.
    async fn generate_image(
        &self,
        prompt: &str,
        style: &str,
        aspect: &str,
    ) -> Result<Option<ImageData>, ApiError>;

    /// Cheap round trip to confirm the provider is reachable and the key works.
    async fn test_connection(&self) -> bool;

    fn name(&self) -> &'static str;
}
