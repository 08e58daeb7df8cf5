use derive_more::From;
use engine::{AspectRatio, GeneratedImage, GenerationError};
use iced::widget::text_editor;
use uuid::Uuid;

#[derive(Debug, Clone, From)]
pub enum Message {
    Controls(Controls),
    Gallery(GalleryAction),
    #[from(ignore)]
    GenerationFinished(Result<GeneratedImage, GenerationError>),
}

#[derive(Debug, Clone)]
pub enum Controls {
    EditPrompt(text_editor::Action),
    SelectRatio(AspectRatio),
    Submit,
}

#[derive(Debug, Clone)]
pub enum GalleryAction {
    Delete(Uuid),
    Download(Uuid),
}
