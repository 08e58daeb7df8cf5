use std::sync::Arc;

use crate::image_model::ImageModel;

pub mod config;
pub mod error;
pub mod gallery;
pub mod generation;
pub mod image_model;
pub mod studio;

pub use error::GenerationError;
pub use gallery::Gallery;
pub use generation::{GeneratedImage, GenerationClient, GenerationRequest};
pub use image_model::AspectRatio;
pub use studio::Studio;

pub type SharedImageModel = Arc<dyn ImageModel + Send + Sync>;

pub const APP_NAME: &str = "LuminaGen";
