use log::{debug, warn};
use uuid::Uuid;

use crate::{
    error::GenerationError,
    gallery::Gallery,
    generation::{GeneratedImage, GenerationClient, GenerationRequest},
    image_model::AspectRatio,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
}

/// Everything the user interacts with: the prompt, the chosen ratio, the gallery, and
/// whether a generation call is pending.
///
/// A submission is split into [`Studio::begin_submit`], which hands out the request to
/// run, and [`Studio::finish`], which takes its result. Between the two the studio is
/// [`Phase::InFlight`] and refuses further submissions.
#[derive(Debug, Default)]
pub struct Studio {
    prompt: String,
    aspect_ratio: AspectRatio,
    phase: Phase,
    error: Option<String>,
    gallery: Gallery,
}

impl Studio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Ignored while a call is pending, the pending request already carries its ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        if self.is_in_flight() {
            debug!("Ignoring ratio change to {aspect_ratio} while generating");
            return;
        }
        self.aspect_ratio = aspect_ratio;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::InFlight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle && !self.prompt.trim().is_empty()
    }

    /// Moves to [`Phase::InFlight`] and returns the request to send, or `None` if a
    /// call is already pending or the prompt is blank. In that case nothing changes.
    pub fn begin_submit(&mut self) -> Option<GenerationRequest> {
        if !self.can_submit() {
            debug!("Submission ignored (phase: {:?})", self.phase);
            return None;
        }

        self.phase = Phase::InFlight;
        self.error = None;
        Some(GenerationRequest {
            prompt: self.prompt.clone(),
            aspect_ratio: self.aspect_ratio,
        })
    }

    pub fn finish(&mut self, result: Result<GeneratedImage, GenerationError>) {
        if !self.is_in_flight() {
            warn!("Got a generation result without a pending request, dropping it");
            return;
        }

        self.phase = Phase::Idle;
        match result {
            Ok(image) => self.gallery.insert_front(image),
            Err(e) => self.error = Some(e.message().to_string()),
        }
    }

    /// Allowed in any phase, the pending result is not in the gallery yet.
    pub fn delete(&mut self, id: Uuid) -> bool {
        self.gallery.remove_by_id(id)
    }

    /// Runs a whole submission against `client`. Returns whether a call was made.
    pub async fn submit_with(&mut self, client: &GenerationClient) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = client.run(request).await;
        self.finish(result);
        true
    }
}
