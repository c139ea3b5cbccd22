//! CLI tool for turning Markdown slide documents into structured decks.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{Deck, DeckBuilder, LayoutMode, Size, Theme};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert Markdown slide documents for HTML renderers or document writers.
#[derive(Parser, Debug)]
#[command(name = "md-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Markdown file(s)
    #[arg(required_unless_present = "list_themes")]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Theme to apply (default: the document's own theme, else "default")
    #[arg(short, long)]
    theme: Option<String>,

    /// What to produce
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Deck)]
    format: OutputFormat,

    /// Canvas width used for layout positions
    #[arg(long, default_value_t = Size::WIDESCREEN.width)]
    width: f64,

    /// Canvas height used for layout positions
    #[arg(long, default_value_t = Size::WIDESCREEN.height)]
    height: f64,

    /// Reproduce the legacy overlapping layout instead of stacking content
    #[arg(long)]
    legacy_layout: bool,

    /// List the built-in themes and exit
    #[arg(long)]
    list_themes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output produced for each input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Markdown with presentation front matter, for an HTML slide renderer
    Normalized,
    /// Laid-out deck as JSON, for a slide document writer
    Deck,
    /// Plain-text outline of the extracted slide content
    Outline,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Normalized => "marp.md",
            Self::Deck => "deck.json",
            Self::Outline => "outline.txt",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.list_themes {
        for theme in Theme::ALL {
            println!("{:<10} {}", theme.id(), theme.display_name());
        }
        return Ok(());
    }

    let canvas = Size::new(args.width, args.height).context("Invalid canvas size")?;
    let mut builder = DeckBuilder::new().with_canvas(canvas);
    if let Some(theme) = &args.theme {
        builder = builder.with_theme(theme);
    }
    if args.legacy_layout {
        builder = builder.with_layout_mode(LayoutMode::Legacy);
    }

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &builder) {
            Ok(output) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), args.format)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Process a single Markdown file.
fn process_file(input_path: &Path, args: &Args, builder: &DeckBuilder) -> Result<String> {
    let markdown = deck_core::pipeline::read_markdown(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    if args.format == OutputFormat::Normalized {
        return Ok(builder.normalized_markdown(&markdown));
    }

    let deck = builder.build(&markdown)?;

    if args.verbose {
        eprintln!("  Found {} slides (theme: {})", deck.total(), deck.theme);
    }

    match args.format {
        OutputFormat::Deck => {
            let json = serde_json::to_string_pretty(&deck).context("Failed to serialize deck")?;
            Ok(format!("{}\n", json))
        }
        _ => Ok(render_outline(&deck)),
    }
}

/// Render a deck as a readable plain-text outline.
fn render_outline(deck: &Deck) -> String {
    let mut out = String::new();

    for slide in &deck.slides {
        let label = deck
            .page_label(slide)
            .unwrap_or_else(|| "cover".to_string());
        out.push_str(&format!("== Slide {} ({})\n", slide.index + 1, label));

        if let Some(title) = &slide.title {
            out.push_str(&format!("# {}\n", title));
        }
        if let Some(subtitle) = &slide.subtitle {
            out.push_str(&format!("## {}\n", subtitle));
        }
        for list in &slide.unordered_lists {
            for item in list {
                out.push_str(&format!("  - {}\n", item));
            }
        }
        for list in &slide.ordered_lists {
            for (n, item) in list.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", n + 1, item));
            }
        }
        for table in &slide.tables {
            out.push_str(&format!("  [{}]\n", table.header.join(" | ")));
            for row in &table.rows {
                out.push_str(&format!("   {}\n", row.join(" | ")));
            }
        }
        for image in &slide.images {
            out.push_str(&format!("  [image] {}\n", image));
        }
        if let Some(body) = &slide.body_text {
            for line in body.lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }
        out.push('\n');
    }

    out
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let path = get_output_path(Path::new("talks/intro.md"), None, OutputFormat::Deck).unwrap();
        assert_eq!(path, PathBuf::from("talks/intro.deck.json"));

        let path =
            get_output_path(Path::new("intro.md"), None, OutputFormat::Normalized).unwrap();
        assert_eq!(path, PathBuf::from("intro.marp.md"));
    }

    #[test]
    fn test_render_outline() {
        let deck = DeckBuilder::new()
            .build("# Welcome\n\n---\n\n## Agenda\n1. Intro\n2. Demo\n\n![chart](c.png)\n\nThanks")
            .unwrap();
        let outline = render_outline(&deck);

        assert!(outline.starts_with("== Slide 1 (cover)\n# Welcome\n"));
        assert!(outline.contains("== Slide 2 (2 / 2)\n## Agenda\n  1. Intro\n  2. Demo\n"));
        assert!(outline.contains("  [image] c.png\n"));
        assert!(outline.contains("  Thanks\n"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["md-deck", "deck.md", "-f", "outline", "--theme", "gaia"])
            .unwrap();
        assert_eq!(args.format, OutputFormat::Outline);
        assert_eq!(args.theme.as_deref(), Some("gaia"));
        assert_eq!(args.width, 10.0);

        assert!(Args::try_parse_from(["md-deck", "--list-themes"]).is_ok());
        assert!(Args::try_parse_from(["md-deck"]).is_err());
    }
}
