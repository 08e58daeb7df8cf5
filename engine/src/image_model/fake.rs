//! In-process stand-in for the service, used by the client and controller tests.

use std::{
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use color_eyre::{Result, eyre::eyre};

use crate::image_model::{AspectRatio, Image, ImageModel, Model};

/// A tiny but valid base64 payload (the JPEG SOI marker).
pub const FAKE_JPEG_BASE64: &str = "/9j/4AAQ";

#[derive(Clone)]
pub enum Outcome {
    Image,
    Fail(String),
}

#[derive(Clone)]
pub struct FakeModel {
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
}

impl FakeModel {
    pub fn succeeding() -> Self {
        Self::with_outcome(Outcome::Image)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(message.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, stays valid after the model was moved into a client.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ImageModel for FakeModel {
    fn get_image<'a>(
        &'a self,
        _prompt: &'a str,
        _aspect_ratio: AspectRatio,
    ) -> Pin<Box<dyn Future<Output = Result<Image>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone();
        Box::pin(async move {
            match outcome {
                Outcome::Image => Ok(Image {
                    base64_data: FAKE_JPEG_BASE64.into(),
                    mime_type: "image/jpeg".into(),
                }),
                Outcome::Fail(message) => Err(eyre!(message)),
            }
        })
    }

    fn model(&self) -> Model {
        Model::Imagen4
    }
}
