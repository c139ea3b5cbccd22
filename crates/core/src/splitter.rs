//! Slide splitting.
//!
//! A normalized document is cut into per-slide text blocks on `---` lines.
//! The leading front matter block is skipped first, so its delimiters never
//! produce slides of their own.

use crate::front_matter;

/// Whether a line opens or closes a fenced code block.
fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Whether a line separates two slides.
fn is_separator(line: &str) -> bool {
    line.trim() == front_matter::DELIMITER
}

/// Split a document into raw slide texts, in order.
///
/// Whitespace-only fragments are dropped. Separator lines inside fenced
/// code blocks are kept as content.
pub fn split(markdown: &str) -> Vec<String> {
    let body = front_matter::strip(markdown);

    let mut slides = Vec::new();
    let mut current = String::new();
    let mut in_fence = false;

    for line in body.split_inclusive('\n') {
        if is_fence(line) {
            in_fence = !in_fence;
        }

        if !in_fence && is_separator(line) {
            push_fragment(&mut slides, &mut current);
            continue;
        }

        current.push_str(line);
    }
    push_fragment(&mut slides, &mut current);

    log::debug!("Split document into {} slides", slides.len());
    slides
}

fn push_fragment(slides: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        slides.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let slides = split("# One\n\n---\n\n# Two\n");
        assert_eq!(slides, vec!["# One\n\n", "\n# Two\n"]);
    }

    #[test]
    fn test_split_skips_front_matter() {
        let doc = "---\nmarp: true\ntheme: default\npaginate: true\n---\n\n# Title\n\n---\n\n## Sub\n";
        let slides = split(doc);
        assert_eq!(slides.len(), 2);
        assert!(slides[0].contains("# Title"));
        assert!(!slides[0].contains("marp"));
        assert!(slides[1].contains("## Sub"));
    }

    #[test]
    fn test_split_drops_empty_fragments() {
        let slides = split("\n---\n# A\n---\n   \n---\n");
        assert_eq!(slides, vec!["# A\n"]);
    }

    #[test]
    fn test_table_delimiter_does_not_split() {
        let slides = split("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_separator_inside_code_fence_is_content() {
        let slides = split("# A\n```yaml\n---\nkey: v\n```\n---\n# B");
        assert_eq!(slides.len(), 2);
        assert!(slides[0].contains("key: v"));
        assert_eq!(slides[1], "# B");
    }

    #[test]
    fn test_split_empty_document() {
        assert!(split("").is_empty());
        assert!(split("   \n\n").is_empty());
    }
}
