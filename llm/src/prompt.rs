use vision::Raster;

/// Payload for a single model call.
#[derive(Clone, Debug)]
pub enum Prompt {
    /// Instruction text only.
    Text(String),
    /// Instruction text with one attached picture.
    TextPlusImage(String, Raster),
}

impl Prompt {
    /// Instruction text regardless of modality.
    pub fn text(&self) -> &str {
        match self {
            Prompt::Text(text) | Prompt::TextPlusImage(text, _) => text,
        }
    }

    pub fn image(&self) -> Option<&Raster> {
        match self {
            Prompt::Text(_) => None,
            Prompt::TextPlusImage(_, image) => Some(image),
        }
    }

    pub fn is_multimodal(&self) -> bool {
        self.image().is_some()
    }

    /// Short label for logs: `text` or `text+image`.
    pub fn modality(&self) -> &'static str {
        if self.is_multimodal() {
            "text+image"
        } else {
            "text"
        }
    }
}
