use std::pin::Pin;

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

pub mod imagen;
pub use imagen::Imagen;

#[cfg(test)]
pub(crate) mod fake;

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Model {
    #[default]
    #[strum(to_string = "Imagen 4")]
    Imagen4,
    #[strum(to_string = "Imagen 4 Fast")]
    Imagen4Fast,
    #[strum(to_string = "Imagen 4 Ultra")]
    Imagen4Ultra,
}

impl Model {
    /// The identifier the service expects in the request path.
    pub fn id(&self) -> &'static str {
        match self {
            Model::Imagen4 => "imagen-4.0-generate-001",
            Model::Imagen4Fast => "imagen-4.0-fast-generate-001",
            Model::Imagen4Ultra => "imagen-4.0-ultra-generate-001",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    IntoStaticStr,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum AspectRatio {
    #[default]
    #[strum(to_string = "1:1")]
    #[serde(rename = "1:1")]
    #[value(name = "1:1")]
    Square,

    #[strum(to_string = "3:4")]
    #[serde(rename = "3:4")]
    #[value(name = "3:4")]
    Portrait,

    #[strum(to_string = "9:16")]
    #[serde(rename = "9:16")]
    #[value(name = "9:16")]
    Story,

    #[strum(to_string = "4:3")]
    #[serde(rename = "4:3")]
    #[value(name = "4:3")]
    Landscape,

    #[strum(to_string = "16:9")]
    #[serde(rename = "16:9")]
    #[value(name = "16:9")]
    Cinematic,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Portrait => "Portrait (3:4)",
            AspectRatio::Story => "Story (9:16)",
            AspectRatio::Landscape => "Landscape (4:3)",
            AspectRatio::Cinematic => "Cinematic (16:9)",
        }
    }
}

/// Raw payload of one generated image, still base64 encoded as the service sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub base64_data: String,
    pub mime_type: String,
}

pub trait ImageModel {
    fn get_image<'a>(
        &'a self,
        prompt: &'a str,
        aspect_ratio: AspectRatio,
    ) -> Pin<Box<dyn Future<Output = Result<Image>> + Send + 'a>>;

    fn model(&self) -> Model;
}
