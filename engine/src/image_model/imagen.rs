use std::pin::Pin;

use color_eyre::Result;
use log::debug;

use crate::{
    config::DEFAULT_API_BASE,
    image_model::{AspectRatio, Image, ImageModel, Model},
};

pub mod imagen_api;

/// Google Imagen through the Generative Language `:predict` endpoint.
#[derive(Clone)]
pub struct Imagen {
    model: Model,
    api_key: String,
    api_base: String,
    client: reqwest::Client,
}

impl Imagen {
    pub fn new(model: Model, api_key: String) -> Self {
        Self {
            model,
            api_key,
            api_base: DEFAULT_API_BASE.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl ImageModel for Imagen {
    fn get_image<'a>(
        &'a self,
        prompt: &'a str,
        aspect_ratio: AspectRatio,
    ) -> Pin<Box<dyn Future<Output = Result<Image>> + Send + 'a>> {
        Box::pin(async move {
            let body = imagen_api::RequestBody::single_jpeg(prompt, aspect_ratio);
            let url = imagen_api::predict_url(&self.api_base, self.model.id());
            debug!("Requesting {aspect_ratio} image from {url}");

            let response = imagen_api::predict(&body, &url, &self.api_key, &self.client).await?;
            debug!("Got {} prediction(s)", response.predictions.len());
            response.into_first_image()
        })
    }

    fn model(&self) -> Model {
        self.model
    }
}
