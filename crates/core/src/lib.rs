//! Core slide content model for Markdown slide decks: front matter
//! normalization, slide splitting, content extraction, layout, and theming.

pub mod deck;
pub mod error;
pub mod extract;
pub mod front_matter;
pub mod layout;
pub mod pipeline;
pub mod splitter;
pub mod theme;
pub mod types;

pub use deck::{assemble, Deck};
pub use error::{Error, Result};
pub use extract::SlideExtractor;
pub use layout::{LayoutAssigner, LayoutMode};
pub use pipeline::DeckBuilder;
pub use theme::{Palette, Theme};
pub use types::{Align, ListBlock, Placement, Rect, Region, Size, SlideModel, Table};
