// Image Generation Service
//
// Wraps the provider's image endpoint. Models that only produce one image
// per request (dall-e-3) get batches as sequential single-image calls,
// aggregated in call order; any single failure aborts the whole batch.

use super::{openai_provider, AiError, AiResult, SharedAiProvider};
use crate::config::OpenAiConfig;
use crate::models::image::ImageOptions;

/// Image generation service
#[derive(Clone)]
pub struct ImageService {
    provider: SharedAiProvider,
}

impl ImageService {
    pub fn new(provider: SharedAiProvider) -> Self {
        Self { provider }
    }

    /// Create a service backed by the OpenAI provider
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self::new(openai_provider(config))
    }

    /// Generate a single image and return its URL
    pub async fn generate(&self, prompt: &str, options: &ImageOptions) -> AiResult<String> {
        let images = self.provider.generate_images(prompt, 1, options).await?;
        images
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or_else(|| AiError::ApiError("image response contained no images".to_string()))
    }

    /// Generate `count` images and return their URLs in generation order
    pub async fn generate_batch(
        &self,
        prompt: &str,
        count: u32,
        options: &ImageOptions,
    ) -> AiResult<Vec<String>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let per_request = options.model.max_images_per_request();
        if count > per_request && per_request == 1 {
            log::debug!(
                "model {} is limited to one image per request, issuing {} sequential calls",
                options.model,
                count
            );
            let mut urls = Vec::with_capacity(count as usize);
            for _ in 0..count {
                urls.push(self.generate(prompt, options).await?);
            }
            return Ok(urls);
        }

        let images = self.provider.generate_images(prompt, count, options).await?;
        Ok(images.into_iter().map(|image| image.url).collect())
    }
}
