//! Layout assignment for extracted slides.
//!
//! Positions are computed as fractions of the canvas and scaled to the
//! target size, so the same rules serve inches, points or pixels. The
//! fractions follow a 10 x 5.625 inch widescreen slide.

use crate::types::{Align, Placement, Rect, Region, Size, SlideModel};

/// Left and right inset as a fraction of the canvas width.
const INSET_X: f64 = 0.05;
/// Width of every content region as a fraction of the canvas width.
const CONTENT_WIDTH: f64 = 0.9;

const TITLE_TOP: f64 = 0.09;
const COVER_TITLE_CENTER: f64 = 0.44;
const TITLE_HEIGHT: f64 = 0.12;
const COVER_TITLE_HEIGHT: f64 = 0.16;
const SUBTITLE_TOP: f64 = 0.21;
const SUBTITLE_HEIGHT: f64 = 0.11;

const CONTENT_TOP_AFTER_SUBTITLE: f64 = 0.36;
const CONTENT_TOP_AFTER_TITLE: f64 = 0.27;
/// Content stops above the page number badge.
const CONTENT_BOTTOM: f64 = 0.92;

const PAGE_NUMBER_LEFT: f64 = 0.85;
const PAGE_NUMBER_TOP: f64 = 0.93;
const PAGE_NUMBER_WIDTH: f64 = 0.1;
const PAGE_NUMBER_HEIGHT: f64 = 0.05;

/// Estimated height of a text line or list item.
const LINE_HEIGHT: f64 = 0.06;
/// Estimated height of a table row.
const ROW_HEIGHT: f64 = 0.075;
const IMAGE_HEIGHT: f64 = 0.4;
const BLOCK_GAP: f64 = 0.025;
/// Characters that fit on one body line before wrapping.
const CHARS_PER_LINE: usize = 90;

// Positions used by the legacy mode, where content blocks overlap.
const LEGACY_TEXT_HEIGHT: f64 = 0.53;
const LEGACY_MEDIA_TOP_AFTER_SUBTITLE: f64 = 0.44;
const LEGACY_MEDIA_TOP_AFTER_TITLE: f64 = 0.36;
const LEGACY_MEDIA_TOP: f64 = 0.18;
const LEGACY_IMAGE_HEIGHT: f64 = 0.89;

const COVER_TITLE_FONT: f64 = 36.0;
const TITLE_FONT: f64 = 24.0;
const SUBTITLE_FONT: f64 = 20.0;
const BODY_FONT: f64 = 14.0;
const TABLE_FONT: f64 = 12.0;
const PAGE_NUMBER_FONT: f64 = 10.0;

/// How content blocks sharing a slide are positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Lists, tables, images and body text stack top to bottom, scaled down
    /// together when they would run into the page number.
    #[default]
    Stacked,
    /// Every text block starts at the same y, and tables and images share a
    /// second y; blocks overlap when a slide mixes content kinds.
    Legacy,
}

/// Assigns cover status and region rectangles to extracted slides.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutAssigner {
    canvas: Size,
    mode: LayoutMode,
}

/// A content block waiting for a vertical slot, in canvas fractions.
struct Block {
    region: Region,
    height: f64,
    font_size: Option<f64>,
}

impl LayoutAssigner {
    /// Create a layout assigner for the given canvas.
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            mode: LayoutMode::default(),
        }
    }

    /// Set how content blocks are positioned.
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Detect the cover slide and compute every populated region's
    /// placement.
    pub fn layout(&self, mut model: SlideModel) -> SlideModel {
        model.is_cover = is_cover(&model);

        let mut layout = Vec::new();
        self.place_headings(&model, &mut layout);

        let content_top = content_top(&model);
        match self.mode {
            LayoutMode::Stacked => self.place_stacked(&model, content_top, &mut layout),
            LayoutMode::Legacy => self.place_legacy(&model, content_top, &mut layout),
        }

        if !model.is_cover {
            layout.push(self.placement(
                Region::PageNumber,
                PAGE_NUMBER_LEFT,
                PAGE_NUMBER_TOP,
                PAGE_NUMBER_WIDTH,
                PAGE_NUMBER_HEIGHT,
                Align::Right,
                Some(PAGE_NUMBER_FONT),
            ));
        }

        model.layout = layout;
        model
    }

    fn place_headings(&self, model: &SlideModel, layout: &mut Vec<Placement>) {
        let align = if model.is_cover {
            Align::Center
        } else {
            Align::Left
        };

        if model.title.is_some() {
            let (top, height, font) = if model.is_cover {
                (
                    COVER_TITLE_CENTER - COVER_TITLE_HEIGHT / 2.0,
                    COVER_TITLE_HEIGHT,
                    COVER_TITLE_FONT,
                )
            } else {
                (TITLE_TOP, TITLE_HEIGHT, TITLE_FONT)
            };
            layout.push(self.placement(
                Region::Title,
                INSET_X,
                top,
                CONTENT_WIDTH,
                height,
                align,
                Some(font),
            ));
        }

        if model.subtitle.is_some() {
            let top = if model.title.is_some() {
                SUBTITLE_TOP
            } else {
                TITLE_TOP
            };
            layout.push(self.placement(
                Region::Subtitle,
                INSET_X,
                top,
                CONTENT_WIDTH,
                SUBTITLE_HEIGHT,
                align,
                Some(SUBTITLE_FONT),
            ));
        }
    }

    fn place_stacked(&self, model: &SlideModel, top: f64, layout: &mut Vec<Placement>) {
        let blocks = content_blocks(model);
        if blocks.is_empty() {
            return;
        }

        let gaps = BLOCK_GAP * (blocks.len() - 1) as f64;
        let total: f64 = blocks.iter().map(|b| b.height).sum::<f64>() + gaps;
        let available = CONTENT_BOTTOM - top;
        let scale = if total > available {
            log::debug!(
                "Slide {} content overflows ({:.2} > {:.2}); scaling down",
                model.index,
                total,
                available
            );
            available / total
        } else {
            1.0
        };

        let mut cursor = top;
        for block in blocks {
            let height = block.height * scale;
            layout.push(self.placement(
                block.region,
                INSET_X,
                cursor,
                CONTENT_WIDTH,
                height,
                Align::Left,
                block.font_size,
            ));
            cursor += height + BLOCK_GAP * scale;
        }
    }

    fn place_legacy(&self, model: &SlideModel, text_top: f64, layout: &mut Vec<Placement>) {
        let media_top = match (model.title.is_some(), model.subtitle.is_some()) {
            (true, true) => LEGACY_MEDIA_TOP_AFTER_SUBTITLE,
            (true, false) => LEGACY_MEDIA_TOP_AFTER_TITLE,
            (false, _) => LEGACY_MEDIA_TOP,
        };

        for block in content_blocks(model) {
            let (top, height) = match block.region {
                Region::Table(_) => (media_top, block.height),
                Region::Image(_) => (media_top, LEGACY_IMAGE_HEIGHT),
                _ => (text_top, LEGACY_TEXT_HEIGHT),
            };
            layout.push(self.placement(
                block.region,
                INSET_X,
                top,
                CONTENT_WIDTH,
                height,
                Align::Left,
                block.font_size,
            ));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn placement(
        &self,
        region: Region,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        align: Align,
        font_size: Option<f64>,
    ) -> Placement {
        Placement {
            region,
            rect: Rect::new(
                x * self.canvas.width,
                y * self.canvas.height,
                width * self.canvas.width,
                height * self.canvas.height,
            ),
            align,
            font_size,
        }
    }
}

/// A cover is the first slide when it holds a title and nothing else.
pub fn is_cover(model: &SlideModel) -> bool {
    model.index == 0 && model.title.is_some() && !model.has_content_besides_title()
}

/// Where body content starts, given which headings are present.
fn content_top(model: &SlideModel) -> f64 {
    match (model.title.is_some(), model.subtitle.is_some()) {
        (true, true) => CONTENT_TOP_AFTER_SUBTITLE,
        (true, false) | (false, true) => CONTENT_TOP_AFTER_TITLE,
        (false, false) => TITLE_TOP,
    }
}

/// Content blocks in stacking order: lists, numbered lists, tables,
/// images, then body text.
fn content_blocks(model: &SlideModel) -> Vec<Block> {
    let mut blocks = Vec::new();

    for (i, list) in model.unordered_lists.iter().enumerate() {
        blocks.push(Block {
            region: Region::UnorderedList(i),
            height: list.len().max(1) as f64 * LINE_HEIGHT,
            font_size: Some(BODY_FONT),
        });
    }
    for (i, list) in model.ordered_lists.iter().enumerate() {
        blocks.push(Block {
            region: Region::OrderedList(i),
            height: list.len().max(1) as f64 * LINE_HEIGHT,
            font_size: Some(BODY_FONT),
        });
    }
    for (i, table) in model.tables.iter().enumerate() {
        blocks.push(Block {
            region: Region::Table(i),
            height: table.row_count() as f64 * ROW_HEIGHT,
            font_size: Some(TABLE_FONT),
        });
    }
    for i in 0..model.images.len() {
        blocks.push(Block {
            region: Region::Image(i),
            height: IMAGE_HEIGHT,
            font_size: None,
        });
    }
    if let Some(body) = &model.body_text {
        blocks.push(Block {
            region: Region::Body,
            height: wrapped_line_count(body) as f64 * LINE_HEIGHT,
            font_size: Some(BODY_FONT),
        });
    }

    blocks
}

/// Rough number of rendered lines for a block of body text.
fn wrapped_line_count(text: &str) -> usize {
    text.lines()
        .map(|line| line.chars().count().div_ceil(CHARS_PER_LINE).max(1))
        .sum::<usize>()
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Table;

    const EPSILON: f64 = 1e-9;

    fn titled(index: usize) -> SlideModel {
        SlideModel {
            title: Some("Title".to_string()),
            ..SlideModel::new(index)
        }
    }

    #[test]
    fn test_cover_detection() {
        let assigner = LayoutAssigner::default();

        assert!(assigner.layout(titled(0)).is_cover);
        assert!(!assigner.layout(titled(1)).is_cover);

        let mut with_subtitle = titled(0);
        with_subtitle.subtitle = Some("Sub".to_string());
        assert!(!assigner.layout(with_subtitle).is_cover);

        let mut with_body = titled(0);
        with_body.body_text = Some("text".to_string());
        assert!(!assigner.layout(with_body).is_cover);

        assert!(!assigner.layout(SlideModel::new(0)).is_cover);
    }

    #[test]
    fn test_cover_title_is_centered_without_page_number() {
        let slide = LayoutAssigner::default().layout(titled(0));
        let title = slide.placement(Region::Title).unwrap();

        assert_eq!(title.align, Align::Center);
        assert_eq!(title.font_size, Some(COVER_TITLE_FONT));
        let center = title.rect.y + title.rect.height / 2.0;
        assert!((center - 0.44 * 5.625).abs() < EPSILON);
        assert!(slide.placement(Region::PageNumber).is_none());
    }

    #[test]
    fn test_regular_title_is_top_left_with_page_number() {
        let slide = LayoutAssigner::default().layout(titled(1));
        let title = slide.placement(Region::Title).unwrap();

        assert_eq!(title.align, Align::Left);
        assert!((title.rect.x - 0.5).abs() < EPSILON);
        assert!((title.rect.width - 9.0).abs() < EPSILON);
        assert!(title.rect.y < 0.1 * 5.625);

        let page = slide.placement(Region::PageNumber).unwrap();
        assert_eq!(page.align, Align::Right);
        assert!(page.rect.y > title.rect.y);
    }

    #[test]
    fn test_subtitle_takes_title_slot_without_title() {
        let mut slide = SlideModel::new(1);
        slide.subtitle = Some("Sub".to_string());
        let slide = LayoutAssigner::default().layout(slide);

        let subtitle = slide.placement(Region::Subtitle).unwrap();
        assert!((subtitle.rect.y - TITLE_TOP * 5.625).abs() < EPSILON);
    }

    #[test]
    fn test_subtitle_below_title() {
        let mut slide = titled(1);
        slide.subtitle = Some("Sub".to_string());
        let slide = LayoutAssigner::default().layout(slide);

        let title = slide.placement(Region::Title).unwrap();
        let subtitle = slide.placement(Region::Subtitle).unwrap();
        assert!(subtitle.rect.y >= title.rect.bottom() - EPSILON);
    }

    fn mixed_slide() -> SlideModel {
        let mut slide = titled(1);
        slide.subtitle = Some("Sub".to_string());
        slide.unordered_lists = vec![vec!["a".to_string(), "b".to_string()]];
        slide.tables = vec![Table {
            header: vec!["h".to_string()],
            rows: vec![vec!["1".to_string()]],
        }];
        slide.images = vec!["pic.png".to_string()];
        slide.body_text = Some("closing words".to_string());
        slide
    }

    #[test]
    fn test_stacked_blocks_do_not_overlap() {
        let slide = LayoutAssigner::default().layout(mixed_slide());

        let order = [
            Region::Subtitle,
            Region::UnorderedList(0),
            Region::Table(0),
            Region::Image(0),
            Region::Body,
        ];
        for pair in order.windows(2) {
            let upper = slide.placement(pair[0]).unwrap();
            let lower = slide.placement(pair[1]).unwrap();
            assert!(
                lower.rect.y >= upper.rect.bottom() - EPSILON,
                "{:?} overlaps {:?}",
                pair[1],
                pair[0]
            );
        }

        let body = slide.placement(Region::Body).unwrap();
        assert!(body.rect.bottom() <= CONTENT_BOTTOM * 5.625 + EPSILON);
    }

    #[test]
    fn test_stacked_overflow_is_scaled_into_canvas() {
        let mut slide = titled(1);
        slide.unordered_lists = vec![(0..40).map(|i| i.to_string()).collect()];
        slide.images = vec!["a.png".to_string(), "b.png".to_string()];
        let slide = LayoutAssigner::default().layout(slide);

        let last = slide.placement(Region::Image(1)).unwrap();
        assert!(last.rect.bottom() <= CONTENT_BOTTOM * 5.625 + EPSILON);
    }

    #[test]
    fn test_legacy_blocks_share_y() {
        let slide = LayoutAssigner::default()
            .with_mode(LayoutMode::Legacy)
            .layout(mixed_slide());

        let list = slide.placement(Region::UnorderedList(0)).unwrap();
        let body = slide.placement(Region::Body).unwrap();
        let table = slide.placement(Region::Table(0)).unwrap();
        let image = slide.placement(Region::Image(0)).unwrap();

        assert_eq!(list.rect.y, body.rect.y);
        assert_eq!(table.rect.y, image.rect.y);
        assert!((list.rect.y - CONTENT_TOP_AFTER_SUBTITLE * 5.625).abs() < EPSILON);
        assert!((table.rect.y - LEGACY_MEDIA_TOP_AFTER_SUBTITLE * 5.625).abs() < EPSILON);
    }

    #[test]
    fn test_positions_scale_with_canvas() {
        let canvas = Size::new(1920.0, 1080.0).unwrap();
        let slide = LayoutAssigner::new(canvas).layout(titled(2));
        let title = slide.placement(Region::Title).unwrap();

        assert!((title.rect.x - 96.0).abs() < EPSILON);
        assert!((title.rect.width - 1728.0).abs() < EPSILON);
    }

    #[test]
    fn test_content_without_headings_starts_at_top() {
        let mut slide = SlideModel::new(3);
        slide.body_text = Some("just text".to_string());
        let slide = LayoutAssigner::default().layout(slide);

        let body = slide.placement(Region::Body).unwrap();
        assert!((body.rect.y - TITLE_TOP * 5.625).abs() < EPSILON);
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count(""), 1);
        assert_eq!(wrapped_line_count("short\nlines"), 2);
        assert_eq!(wrapped_line_count(&"x".repeat(CHARS_PER_LINE + 1)), 2);
    }
}
