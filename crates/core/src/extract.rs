//! Slide content extraction.
//!
//! Turns the raw Markdown of one slide into a [`SlideModel`]. Extraction is
//! a fixed sequence of stages, each claiming its matches and handing the
//! unclaimed remainder to the next stage:
//!
//! 1. title (`# heading`)
//! 2. subtitle (`## heading`)
//! 3. bulleted lists
//! 4. numbered lists
//! 5. pipe tables
//! 6. images
//! 7. residual body text, with inline markup reduced to plain text
//!
//! Because claimed text is removed before later stages run, a fragment is
//! never assigned to two regions, and earlier stages win any ambiguity.

use crate::types::{ListBlock, SlideModel, Table};
use regex::Regex;
use std::sync::LazyLock;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.*\S)[ \t]*$").unwrap());

static SUBTITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.*\S)[ \t]*$").unwrap());

/// `- item`, `* item` or `+ item`, optionally indented.
static BULLET_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[-*+][ \t]+(.*\S)[ \t]*$").unwrap());

/// `1. item`, optionally indented.
static NUMBERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\d+\.[ \t]+(.*\S)[ \t]*$").unwrap());

/// Delimiter cell such as `---`, `:--` or `:-:`.
static DELIMITER_CELL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// `![alt](url)` with an optional quoted title.
static IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[[^\]]*\]\([ \t]*<?([^)\s>]+)>?(?:[ \t]+(?:"[^"]*"|'[^']*'))?[ \t]*\)"#)
        .unwrap()
});

static HEADING_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*#{1,6}[ \t]+").unwrap());

static STRONG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").unwrap());

static EMPHASIS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// `_em_` only at word edges, so `snake_case_names` survive.
static UNDERSCORE_EMPHASIS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_\n]+?)_\b").unwrap());

static CODE_SPAN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());

/// Extractor for slide content.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideExtractor;

impl SlideExtractor {
    /// Create a new slide extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the structured content of one slide.
    ///
    /// Never fails: anything that matches no block construct ends up in
    /// `body_text`. Cover detection and layout are left to the layout
    /// assigner.
    pub fn extract(&self, index: usize, text: &str) -> SlideModel {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let (title, rest) = take_heading(&TITLE_REGEX, &text);
        let (subtitle, rest) = take_heading(&SUBTITLE_REGEX, &rest);
        let (unordered_lists, rest) = take_lists(&BULLET_ITEM_REGEX, &rest);
        let (ordered_lists, rest) = take_lists(&NUMBERED_ITEM_REGEX, &rest);
        let (tables, rest) = take_tables(&rest);
        let (images, rest) = take_images(&rest);
        let body_text = residual_text(&rest);

        log::debug!(
            "Slide {}: title={} subtitle={} lists={}+{} tables={} images={} body={}",
            index,
            title.is_some(),
            subtitle.is_some(),
            unordered_lists.len(),
            ordered_lists.len(),
            tables.len(),
            images.len(),
            body_text.is_some()
        );

        SlideModel {
            index,
            title,
            subtitle,
            body_text,
            unordered_lists,
            ordered_lists,
            tables,
            images,
            ..SlideModel::default()
        }
    }
}

/// Claim the first line matching a heading pattern.
///
/// The whole line, including its newline, leaves the remainder.
fn take_heading(regex: &Regex, text: &str) -> (Option<String>, String) {
    let Some(caps) = regex.captures(text) else {
        return (None, text.to_string());
    };

    let (Some(line), Some(heading)) = (caps.get(0), caps.get(1)) else {
        return (None, text.to_string());
    };
    let mut end = line.end();
    if text[end..].starts_with('\n') {
        end += 1;
    }

    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..line.start()]);
    remainder.push_str(&text[end..]);

    (Some(heading.as_str().to_string()), remainder)
}

/// Claim every run of list item lines; each run becomes one list.
fn take_lists(item_regex: &Regex, text: &str) -> (Vec<ListBlock>, String) {
    let scan = RunScanner {
        min_len: 1,
        bridge_blank_lines: true,
    };
    let (runs, remainder) = scan.claim(text, |line| item_regex.is_match(line));

    let lists = runs
        .into_iter()
        .map(|run| {
            run.iter()
                .filter_map(|line| item_regex.captures(line))
                .map(|caps| caps[1].trim().to_string())
                .collect()
        })
        .collect();

    (lists, remainder)
}

/// Claim pipe tables: runs of at least two consecutive table rows.
fn take_tables(text: &str) -> (Vec<Table>, String) {
    let scan = RunScanner {
        min_len: 2,
        bridge_blank_lines: false,
    };
    let (runs, remainder) = scan.claim(text, is_table_row);

    let tables = runs.into_iter().map(|run| build_table(&run)).collect();
    (tables, remainder)
}

/// Claim every image reference, keeping only its URL.
fn take_images(text: &str) -> (Vec<String>, String) {
    let images = IMAGE_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();
    let remainder = IMAGE_REGEX.replace_all(text, "").into_owned();
    (images, remainder)
}

/// Reduce whatever no other stage claimed to plain text.
fn residual_text(text: &str) -> Option<String> {
    let text = STRONG_REGEX.replace_all(text, "${1}${2}");
    let text = EMPHASIS_REGEX.replace_all(&text, "${1}");
    let text = UNDERSCORE_EMPHASIS_REGEX.replace_all(&text, "${1}");
    let text = CODE_SPAN_REGEX.replace_all(&text, "${1}");
    let text = LINK_REGEX.replace_all(&text, "${1}");

    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    for line in text.lines() {
        let line = unmark_line(line).trim_end();
        if line.trim().is_empty() {
            if !previous_blank {
                lines.push("");
            }
            previous_blank = true;
        } else {
            lines.push(line);
            previous_blank = false;
        }
    }

    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip leading heading and list markers until none are left.
///
/// Removing one marker can expose another (`### 1. Intro`, `## # B`), and
/// body text must not read as a block an earlier stage would have claimed.
fn unmark_line(line: &str) -> &str {
    let mut line = line;
    loop {
        if let Some(marker) = HEADING_MARKER_REGEX.find(line) {
            line = &line[marker.end()..];
            continue;
        }

        let item = BULLET_ITEM_REGEX
            .captures(line)
            .or_else(|| NUMBERED_ITEM_REGEX.captures(line))
            .and_then(|caps| caps.get(1));
        match item {
            Some(item) => line = item.as_str(),
            None => return line,
        }
    }
}

/// Groups consecutive lines that satisfy a predicate.
#[derive(Debug, Clone, Copy)]
struct RunScanner {
    /// Shorter runs are handed back to the remainder.
    min_len: usize,
    /// Let blank lines sit between members of one run.
    bridge_blank_lines: bool,
}

impl RunScanner {
    /// Split `text` into claimed runs (lines without newlines) and the
    /// unclaimed remainder.
    fn claim<'a>(
        &self,
        text: &'a str,
        is_member: impl Fn(&str) -> bool,
    ) -> (Vec<Vec<&'a str>>, String) {
        let mut runs = Vec::new();
        let mut remainder = String::with_capacity(text.len());
        let mut run: Vec<&'a str> = Vec::new();
        let mut pending_blanks: Vec<&'a str> = Vec::new();

        for line in text.split_inclusive('\n') {
            let content = line.trim_end_matches('\n');

            if is_member(content) {
                // Blank lines between two members are part of the run.
                pending_blanks.clear();
                run.push(line);
                continue;
            }

            if self.bridge_blank_lines && !run.is_empty() && content.trim().is_empty() {
                pending_blanks.push(line);
                continue;
            }

            self.flush(&mut runs, &mut remainder, &mut run);
            for blank in pending_blanks.drain(..) {
                remainder.push_str(blank);
            }
            remainder.push_str(line);
        }

        self.flush(&mut runs, &mut remainder, &mut run);
        for blank in pending_blanks.drain(..) {
            remainder.push_str(blank);
        }

        (runs, remainder)
    }

    fn flush<'a>(
        &self,
        runs: &mut Vec<Vec<&'a str>>,
        remainder: &mut String,
        run: &mut Vec<&'a str>,
    ) {
        if run.is_empty() {
            return;
        }

        if run.len() >= self.min_len {
            runs.push(run.drain(..).map(|l| l.trim_end_matches('\n')).collect());
        } else {
            for line in run.drain(..) {
                remainder.push_str(line);
            }
        }
    }
}

/// Whether a line is a row of at least two pipe-delimited cells.
fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('|') && split_cells(trimmed).len() >= 2
}

/// Split a table row into trimmed cells.
///
/// Outer pipes do not produce empty edge cells, and `\|` is a literal pipe.
fn split_cells(row: &str) -> Vec<String> {
    let mut row = row.trim();
    if let Some(stripped) = row.strip_prefix('|') {
        row = stripped;
    }
    if row.ends_with('|') && !row.ends_with("\\|") {
        row = &row[..row.len() - 1];
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = row.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(c),
        }
    }
    cells.push(cell);

    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

/// Whether every cell is a `---` style alignment marker.
fn is_delimiter_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| DELIMITER_CELL_REGEX.is_match(c))
}

fn build_table(run: &[&str]) -> Table {
    let mut rows = run.iter().map(|line| split_cells(line));
    let header = rows.next().unwrap_or_default();

    let mut data: Vec<Vec<String>> = rows.collect();
    if data.first().is_some_and(|row| is_delimiter_row(row)) {
        data.remove(0);
    } else {
        log::debug!("Table without delimiter row; keeping second row as data");
    }

    Table {
        header,
        rows: data,
    }
}
