//! Deck assembly.

use crate::error::{Error, Result};
use crate::theme::{Palette, Theme};
use crate::types::SlideModel;
use serde::{Deserialize, Serialize};

/// A complete, laid-out presentation ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Theme identifier the deck was built with.
    pub theme: String,

    /// Colors resolved from the theme.
    pub palette: Palette,

    /// Slides in presentation order.
    pub slides: Vec<SlideModel>,
}

impl Deck {
    /// Total number of slides.
    pub fn total(&self) -> usize {
        self.slides.len()
    }

    /// Pagination text such as `"2 / 5"`; the cover slide has none.
    pub fn page_label(&self, slide: &SlideModel) -> Option<String> {
        if slide.is_cover {
            None
        } else {
            Some(format!("{} / {}", slide.index + 1, self.total()))
        }
    }

    /// The resolved built-in theme.
    pub fn theme(&self) -> Theme {
        Theme::from_id(&self.theme)
    }
}

/// Assemble laid-out slides into a deck.
///
/// Slide order is preserved. Fails with [`Error::EmptyPresentation`] when
/// there is nothing to present.
pub fn assemble(slides: Vec<SlideModel>, theme_id: &str) -> Result<Deck> {
    if slides.is_empty() {
        return Err(Error::EmptyPresentation);
    }

    if slides.iter().enumerate().any(|(pos, slide)| slide.index != pos) {
        log::warn!("Slide indices do not match deck order; page labels follow the indices");
    }
    log::debug!("Assembled deck of {} slides with theme '{}'", slides.len(), theme_id);

    Ok(Deck {
        theme: theme_id.to_string(),
        palette: crate::theme::resolve(theme_id),
        slides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_deck_is_rejected() {
        let result = assemble(Vec::new(), "default");
        assert!(matches!(result, Err(Error::EmptyPresentation)));
    }

    #[test]
    fn test_assemble_keeps_order_and_palette() {
        let slides = vec![SlideModel::new(0), SlideModel::new(1), SlideModel::new(2)];
        let deck = assemble(slides, "gaia").unwrap();

        assert_eq!(deck.total(), 3);
        assert_eq!(deck.theme, "gaia");
        assert_eq!(deck.theme(), Theme::Gaia);
        assert_eq!(deck.palette, Theme::Gaia.palette());
        let indices: Vec<usize> = deck.slides.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_theme_keeps_id_with_default_palette() {
        let deck = assemble(vec![SlideModel::new(0)], "neon").unwrap();
        assert_eq!(deck.theme, "neon");
        assert_eq!(deck.palette, Theme::Default.palette());
    }

    #[test]
    fn test_page_labels() {
        let mut cover = SlideModel::new(0);
        cover.is_cover = true;
        let deck = assemble(vec![cover, SlideModel::new(1)], "default").unwrap();

        assert_eq!(deck.page_label(&deck.slides[0]), None);
        assert_eq!(deck.page_label(&deck.slides[1]).as_deref(), Some("2 / 2"));
    }
}
