//! Domain types for representing structured slide content.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Items of a single bulleted or numbered list, in source order.
pub type ListBlock = Vec<String>;

/// Structured content of one slide.
///
/// Produced by [`SlideExtractor`](crate::SlideExtractor); `is_cover` and
/// `layout` stay at their defaults until a
/// [`LayoutAssigner`](crate::LayoutAssigner) has run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideModel {
    /// 0-based position in the deck.
    pub index: usize,

    /// First level-1 heading of the slide.
    pub title: Option<String>,

    /// First level-2 heading of the slide.
    pub subtitle: Option<String>,

    /// Plain text left over once every other region has been claimed.
    pub body_text: Option<String>,

    /// Bulleted lists, in order of appearance.
    pub unordered_lists: Vec<ListBlock>,

    /// Numbered lists, in order of appearance.
    pub ordered_lists: Vec<ListBlock>,

    /// Pipe tables, in order of appearance.
    pub tables: Vec<Table>,

    /// Image URLs or paths, in order of appearance.
    pub images: Vec<String>,

    /// Whether this is the deck's cover slide.
    pub is_cover: bool,

    /// Positioned regions, computed by the layout assigner.
    pub layout: Vec<Placement>,
}

impl SlideModel {
    /// Create an empty slide at the given deck position.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Whether anything besides the title was extracted.
    pub fn has_content_besides_title(&self) -> bool {
        self.subtitle.is_some() || self.has_body_content()
    }

    /// Whether any body region (text, lists, tables, images) is populated.
    pub fn has_body_content(&self) -> bool {
        self.body_text.is_some()
            || !self.unordered_lists.is_empty()
            || !self.ordered_lists.is_empty()
            || !self.tables.is_empty()
            || !self.images.is_empty()
    }

    /// Whether the slide carries no extracted content at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && !self.has_content_besides_title()
    }

    /// Look up the placement computed for a region.
    pub fn placement(&self, region: Region) -> Option<&Placement> {
        self.layout.iter().find(|p| p.region == region)
    }
}

/// A pipe table.
///
/// The second source row is dropped only when it is a `---` delimiter row;
/// otherwise it is kept as the first data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells.
    pub header: Vec<String>,

    /// Data rows; may be empty for a header-only table.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns, taken from the header.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of rendered rows, header included.
    pub fn row_count(&self) -> usize {
        1 + self.rows.len()
    }
}

/// A slide region that receives a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Region {
    Title,
    Subtitle,
    Body,
    UnorderedList(usize),
    OrderedList(usize),
    Table(usize),
    Image(usize),
    PageNumber,
}

/// Horizontal text alignment inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A region's computed rectangle and rendering hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub region: Region,
    pub rect: Rect,
    pub align: Align,
    /// Suggested font size in points; `None` for images.
    pub font_size: Option<f64>,
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Target canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// 16:9 slide, 10 x 5.625 inches.
    pub const WIDESCREEN: Size = Size {
        width: 10.0,
        height: 5.625,
    };

    /// Create a canvas size, rejecting non-positive or non-finite dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::InvalidCanvas(format!("{} x {}", width, height)));
        }
        Ok(Self { width, height })
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}
