//! End-to-end deck building: normalize, split, extract, lay out, assemble.

use crate::deck::{self, Deck};
use crate::error::Result;
use crate::extract::SlideExtractor;
use crate::front_matter;
use crate::layout::{LayoutAssigner, LayoutMode};
use crate::splitter;
use crate::theme::Theme;
use crate::types::{Size, SlideModel};
use std::path::Path;

/// Read a Markdown slide document from disk.
pub fn read_markdown(path: impl AsRef<Path>) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Builds decks from Markdown slide documents.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    /// Theme to apply; `None` uses the document's own `theme:` directive.
    theme: Option<String>,
    canvas: Size,
    layout_mode: LayoutMode,
}

impl DeckBuilder {
    /// Create a builder for a widescreen canvas with stacked layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a theme, overriding any the document declares.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Set the canvas that positions are computed for.
    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set how content blocks sharing a slide are positioned.
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// The theme that applies to a document.
    ///
    /// A configured theme wins, then the document's front matter, then
    /// the default theme.
    pub fn theme_for(&self, markdown: &str) -> String {
        if let Some(theme) = &self.theme {
            return theme.clone();
        }

        front_matter::parse(markdown)
            .and_then(|fm| fm.theme().map(str::to_string))
            .unwrap_or_else(|| Theme::Default.id().to_string())
    }

    /// Normalized Markdown, ready for an HTML slide renderer.
    pub fn normalized_markdown(&self, markdown: &str) -> String {
        front_matter::normalize(markdown, &self.theme_for(markdown))
    }

    /// Extract and lay out every slide of a document.
    pub fn slides(&self, markdown: &str) -> Vec<SlideModel> {
        let normalized = self.normalized_markdown(markdown);
        let extractor = SlideExtractor::new();
        let assigner = LayoutAssigner::new(self.canvas).with_mode(self.layout_mode);

        splitter::split(&normalized)
            .iter()
            .enumerate()
            .map(|(index, text)| assigner.layout(extractor.extract(index, text)))
            .collect()
    }

    /// Build a complete deck from a document.
    pub fn build(&self, markdown: &str) -> Result<Deck> {
        let theme = self.theme_for(markdown);
        let slides = self.slides(markdown);
        deck::assemble(slides, &theme)
    }
}
