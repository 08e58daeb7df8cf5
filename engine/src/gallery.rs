use uuid::Uuid;

use crate::generation::GeneratedImage;

/// Generated images of the current session, newest first.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<GeneratedImage>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_front(&mut self, image: GeneratedImage) {
        self.images.insert(0, image);
    }

    /// Returns whether something was removed. Unknown ids are ignored.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        let len_before = self.images.len();
        self.images.retain(|img| img.id != id);
        self.images.len() != len_before
    }

    pub fn list(&self) -> &[GeneratedImage] {
        &self.images
    }

    pub fn get(&self, id: Uuid) -> Option<&GeneratedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::image_model::AspectRatio;

    fn image(prompt: &str) -> GeneratedImage {
        GeneratedImage {
            id: Uuid::new_v4(),
            url: "data:image/jpeg;base64,AAAA".into(),
            prompt: prompt.into(),
            aspect_ratio: AspectRatio::Square,
            timestamp: Utc::now(),
        }
    }

    fn prompts(gallery: &Gallery) -> Vec<&str> {
        gallery.list().iter().map(|i| i.prompt.as_str()).collect()
    }

    #[test]
    fn newest_first() {
        let mut gallery = Gallery::new();
        for p in ["one", "two", "three"] {
            gallery.insert_front(image(p));
            assert_eq!(gallery.list()[0].prompt, p);
        }
        assert_eq!(prompts(&gallery), ["three", "two", "one"]);
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn removing_twice_is_a_noop() {
        let mut gallery = Gallery::new();
        let victim = image("two");
        let id = victim.id;
        gallery.insert_front(image("one"));
        gallery.insert_front(victim);
        gallery.insert_front(image("three"));

        assert!(gallery.remove_by_id(id));
        let after_first = gallery.list().to_vec();

        assert!(!gallery.remove_by_id(id));
        assert_eq!(gallery.list(), after_first.as_slice());
        assert_eq!(prompts(&gallery), ["three", "one"]);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut gallery = Gallery::new();
        assert!(!gallery.remove_by_id(Uuid::new_v4()));
        assert!(gallery.is_empty());

        let img = image("kept");
        let id = img.id;
        gallery.insert_front(img);
        assert!(!gallery.remove_by_id(Uuid::new_v4()));
        assert_eq!(gallery.get(id).map(|i| i.prompt.as_str()), Some("kept"));
    }
}
