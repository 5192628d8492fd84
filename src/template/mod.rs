pub mod replacer;

pub use replacer::{Escape, PlaceholderReplacer, MARKUP_NAME_TOKEN, NAME_TOKEN};

use std::path::Path;

use log::debug;

use crate::error::Result;

/// Text with a name placeholder, read verbatim from disk.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    replacer: PlaceholderReplacer,
}

impl Template {
    pub fn new(text: impl Into<String>, replacer: PlaceholderReplacer) -> Self {
        Self {
            text: text.into(),
            replacer,
        }
    }

    pub fn load(path: impl AsRef<Path>, replacer: PlaceholderReplacer) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!("Loaded template {} ({} bytes)", path.display(), text.len());
        Ok(Self::new(text, replacer))
    }

    pub fn render(&self, name: &str) -> String {
        self.replacer.replace(&self.text, name)
    }
}
