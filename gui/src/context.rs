use std::collections::HashMap;

use engine::{GeneratedImage, GenerationClient, config::Config};
use iced::widget::image::Handle as ImgHandle;
use log::error;
use uuid::Uuid;

/// Long lived things the view needs besides the studio itself.
pub struct Context {
    pub config: Config,
    pub client: GenerationClient,
    handles: HashMap<Uuid, ImgHandle>,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        let client = GenerationClient::from_config(&config);
        Self {
            config,
            client,
            handles: HashMap::new(),
        }
    }

    /// Decodes the embedded bytes once, so `view` doesn't redo it every frame.
    pub fn cache_handle(&mut self, image: &GeneratedImage) {
        match image.decode_bytes() {
            Ok(bytes) => {
                self.handles.insert(image.id, ImgHandle::from_bytes(bytes));
            }
            Err(e) => error!("Couldn't decode image {}: {e:?}", image.id),
        }
    }

    pub fn handle(&self, id: Uuid) -> Option<&ImgHandle> {
        self.handles.get(&id)
    }

    pub fn forget(&mut self, id: Uuid) {
        self.handles.remove(&id);
    }
}
