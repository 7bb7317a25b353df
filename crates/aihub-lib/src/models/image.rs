// Image generation data models

use serde::{Deserialize, Serialize};

/// Supported image generation models
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    DallE2,
    #[default]
    #[serde(rename = "dall-e-3")]
    DallE3,
}

impl ImageModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::DallE2 => "dall-e-2",
            ImageModel::DallE3 => "dall-e-3",
        }
    }

    /// How many images a single request may produce.
    ///
    /// dall-e-3 only accepts n=1; larger batches are issued as repeated
    /// single-image requests.
    pub fn max_images_per_request(&self) -> u32 {
        match self {
            ImageModel::DallE2 => 10,
            ImageModel::DallE3 => 1,
        }
    }

    /// Default output size when the caller does not pick one
    pub fn default_size(&self) -> ImageSize {
        match self {
            ImageModel::DallE2 => ImageSize::Square512,
            ImageModel::DallE3 => ImageSize::Square1024,
        }
    }

    /// Whether this model accepts a quality setting
    pub fn supports_quality(&self) -> bool {
        matches!(self, ImageModel::DallE3)
    }
}

impl std::fmt::Display for ImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output image dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Square256,
    #[serde(rename = "512x512")]
    Square512,
    #[serde(rename = "1024x1024")]
    Square1024,
    #[serde(rename = "1792x1024")]
    Wide1792,
    #[serde(rename = "1024x1792")]
    Tall1792,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square256 => "256x256",
            ImageSize::Square512 => "512x512",
            ImageSize::Square1024 => "1024x1024",
            ImageSize::Wide1792 => "1792x1024",
            ImageSize::Tall1792 => "1024x1792",
        }
    }
}

/// Output image quality (dall-e-3 only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

/// Options for image generation requests
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Generation model
    pub model: ImageModel,
    /// Output size; falls back to the model default
    pub size: Option<ImageSize>,
    /// Output quality
    pub quality: ImageQuality,
}

impl ImageOptions {
    /// The size sent to the provider
    pub fn resolved_size(&self) -> ImageSize {
        self.size.unwrap_or_else(|| self.model.default_size())
    }
}

/// A generated image returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// Remote URL of the generated image
    pub url: String,
    /// Prompt rewrite applied by the provider, when reported
    pub revised_prompt: Option<String>,
}
