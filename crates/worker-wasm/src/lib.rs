//! WASM-compatible wrapper for Markdown deck building.
//!
//! This crate exposes the deck pipeline to JavaScript for use in the
//! browser editor and in Cloudflare Workers.

use deck_core::{Deck, DeckBuilder, LayoutMode, Size, Theme};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Options accepted by [`build_deck`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    /// Canvas width; defaults to a 10 inch widescreen slide.
    pub width: Option<f64>,
    /// Canvas height; defaults to 5.625 inches.
    pub height: Option<f64>,
    /// Reproduce the legacy overlapping layout.
    pub legacy_layout: bool,
}

/// Result of building a deck.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    /// The laid-out deck.
    pub deck: Deck,
    /// Number of slides in the deck.
    pub slide_count: usize,
    /// Pagination text per slide; `None` for the cover.
    pub page_labels: Vec<Option<String>>,
}

/// A theme entry for theme pickers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
}

/// Add presentation front matter to a Markdown document.
///
/// The result is what an HTML slide renderer expects as input.
#[wasm_bindgen]
pub fn normalize_markdown(markdown: &str, theme: &str) -> String {
    deck_core::front_matter::normalize(markdown, theme)
}

/// Build a laid-out deck from a Markdown document.
///
/// # Arguments
/// * `markdown` - The slide document
/// * `theme` - Theme identifier; empty uses the document's own theme
/// * `options` - Optional `{ width, height, legacyLayout }` object
///
/// # Returns
/// A JavaScript object with the deck, or throws on error.
#[wasm_bindgen]
pub fn build_deck(markdown: &str, theme: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options: BuildOptions = if options.is_undefined() || options.is_null() {
        BuildOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
    };

    let result = build_deck_impl(markdown, theme, &options).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn build_deck_impl(markdown: &str, theme: &str, options: &BuildOptions) -> Result<BuildResult, String> {
    let canvas = Size::new(
        options.width.unwrap_or(Size::WIDESCREEN.width),
        options.height.unwrap_or(Size::WIDESCREEN.height),
    )
    .map_err(|e| e.to_string())?;

    let mut builder = DeckBuilder::new().with_canvas(canvas);
    if !theme.trim().is_empty() {
        builder = builder.with_theme(theme.trim());
    }
    if options.legacy_layout {
        builder = builder.with_layout_mode(LayoutMode::Legacy);
    }

    let deck = builder.build(markdown).map_err(|e| e.to_string())?;
    let page_labels = deck.slides.iter().map(|s| deck.page_label(s)).collect();

    Ok(BuildResult {
        slide_count: deck.total(),
        page_labels,
        deck,
    })
}

/// List the built-in themes as `{ id, name }` objects.
#[wasm_bindgen]
pub fn available_themes() -> Result<js_sys::Array, JsValue> {
    let themes = js_sys::Array::new();
    for info in theme_infos() {
        let value = serde_wasm_bindgen::to_value(&info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
        themes.push(&value);
    }
    Ok(themes)
}

fn theme_infos() -> Vec<ThemeInfo> {
    Theme::ALL
        .iter()
        .map(|theme| ThemeInfo {
            id: theme.id().to_string(),
            name: theme.display_name().to_string(),
        })
        .collect()
}

/// Sample slide document for previewing a theme.
#[wasm_bindgen]
pub fn theme_sample(theme: &str) -> String {
    deck_core::theme::sample_markdown(Theme::from_id(theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_deck_impl() {
        let result = build_deck_impl(
            "# Title\n\n---\n\n## Sub\n- a\n- b",
            "gaia",
            &BuildOptions::default(),
        )
        .unwrap();

        assert_eq!(result.slide_count, 2);
        assert_eq!(result.deck.theme, "gaia");
        assert_eq!(result.page_labels, vec![None, Some("2 / 2".to_string())]);
    }

    #[test]
    fn test_build_deck_impl_errors() {
        let err = build_deck_impl("", "default", &BuildOptions::default()).unwrap_err();
        assert!(err.contains("empty"));

        let options = BuildOptions {
            width: Some(0.0),
            ..BuildOptions::default()
        };
        let err = build_deck_impl("# A", "default", &options).unwrap_err();
        assert!(err.contains("Invalid canvas"));
    }

    #[test]
    fn test_theme_infos() {
        let infos = theme_infos();
        assert_eq!(infos.len(), 4);
        assert_eq!(infos[0].id, "default");
        assert_eq!(infos[3].name, "Modern Minimal");
    }

    #[test]
    fn test_theme_sample_falls_back() {
        assert!(theme_sample("unknown").contains("theme: default\n"));
    }
}
