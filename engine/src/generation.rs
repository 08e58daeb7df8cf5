use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use color_eyre::{
    Result,
    eyre::{WrapErr as _, eyre},
};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::{
    SharedImageModel,
    config::Config,
    error::GenerationError,
    image_model::{AspectRatio, Image, ImageModel, Imagen},
};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Failed to generate image.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub id: Uuid,
    /// `data:` URI with the image bytes embedded, displayable without another request.
    pub url: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub timestamp: DateTime<Utc>,
}

impl GeneratedImage {
    fn new(image: Image, prompt: &str, aspect_ratio: AspectRatio) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: format!("data:{};base64,{}", image.mime_type, image.base64_data),
            prompt: prompt.into(),
            aspect_ratio,
            timestamp: Utc::now(),
        }
    }

    pub fn download_file_name(&self) -> String {
        format!("luminagen-{}.jpg", self.timestamp.timestamp_millis())
    }

    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let (_, data) = self
            .url
            .split_once(";base64,")
            .ok_or(eyre!("Image url is not a base64 data url"))?;
        Ok(STANDARD.decode(data)?)
    }
}

/// Writes the image into `dir` under its download name and returns the full path.
pub fn save_image(image: &GeneratedImage, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(image.download_file_name());
    fs::write(&path, image.decode_bytes()?)
        .wrap_err_with(|| format!("Couldn't write {}", path.display()))?;
    info!("Saved image {} to {}", image.id, path.display());
    Ok(path)
}

/// Issues generation calls. Cheap to clone, clones share the underlying model.
#[derive(Clone)]
pub struct GenerationClient {
    model: Option<SharedImageModel>,
}

impl GenerationClient {
    /// Without a credential the client is built anyway, every call then fails with
    /// [`GenerationError::Configuration`].
    pub fn from_config(cfg: &Config) -> Self {
        let model = cfg.credential().map(|key| {
            let imagen = Imagen::new(cfg.model, key.into()).with_api_base(cfg.api_base.clone());
            Arc::new(imagen) as SharedImageModel
        });
        if model.is_none() {
            warn!("No API key configured, image generation is unavailable");
        }
        Self { model }
    }

    pub fn with_model(model: impl ImageModel + Send + Sync + 'static) -> Self {
        let model: SharedImageModel = Arc::new(model);
        Self { model: Some(model) }
    }

    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage, GenerationError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(GenerationError::missing_credential)?;

        debug!("Generating {aspect_ratio} image with {}", model.model());
        match model.get_image(prompt, aspect_ratio).await {
            Ok(image) => {
                let generated = GeneratedImage::new(image, prompt, aspect_ratio);
                info!("Generated image {}", generated.id);
                Ok(generated)
            }
            Err(e) => {
                warn!("Image generation failed: {e:?}");
                Err(normalize(e))
            }
        }
    }

    pub async fn run(&self, request: GenerationRequest) -> Result<GeneratedImage, GenerationError> {
        self.generate(&request.prompt, request.aspect_ratio).await
    }
}

/// Flattens the whole cause chain into one line, a bare service message stays as it is.
fn normalize(e: color_eyre::Report) -> GenerationError {
    let message = format!("{e:#}");
    if message.trim().is_empty() {
        GenerationError::Generation(FALLBACK_MESSAGE.into())
    } else {
        GenerationError::Generation(message)
    }
}
