//! Front matter handling for Marp-style slide documents.
//!
//! A slide document starts with a `---` delimited block of `key: value`
//! directives. The normalizer guarantees that block exists and carries the
//! three directives the HTML renderer needs: `marp`, `theme` and `paginate`.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Line that opens and closes the front matter block.
pub const DELIMITER: &str = "---";

/// A top-level `key: value` line.
static DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)[ \t]*:[ \t]*(.*?)[ \t]*$").unwrap());

/// Directives managed by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Enables slide rendering for the document.
    Marp,
    /// Theme identifier.
    Theme,
    /// Page number display.
    Paginate,
}

impl Directive {
    /// The directive's key as written in the block.
    pub fn key(self) -> &'static str {
        match self {
            Self::Marp => "marp",
            Self::Theme => "theme",
            Self::Paginate => "paginate",
        }
    }
}

/// Byte ranges of a front matter block inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockSpan {
    /// Lines between the two delimiters.
    inner: Range<usize>,
    /// Offset just past the closing delimiter line.
    end: usize,
}

/// Find the leading front matter block, if the document has a complete one.
fn locate(markdown: &str) -> Option<BlockSpan> {
    let mut lines = markdown.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER || !first.ends_with('\n') {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(BlockSpan {
                inner: start..offset,
                end: offset + line.len(),
            });
        }
        offset += line.len();
    }

    None
}

/// Key of a top-level directive line; indented and comment lines have none.
fn directive_key(line: &str) -> Option<&str> {
    DIRECTIVE_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn has_directive(lines: &[String], directive: Directive) -> bool {
    lines
        .iter()
        .any(|l| directive_key(l) == Some(directive.key()))
}

/// Ensure the document carries `marp`, `theme` and `paginate` directives.
///
/// Without a front matter block a complete one is prepended. With one, the
/// missing `marp: true` and `paginate: true` lines are inserted and the
/// first `theme:` line is overwritten (or inserted). Unrelated keys are kept
/// as they are, and the function is idempotent.
pub fn normalize(markdown: &str, theme: &str) -> String {
    let markdown = markdown.replace("\r\n", "\n").replace('\r', "\n");

    let Some(span) = locate(&markdown) else {
        if markdown.starts_with(DELIMITER) {
            log::warn!("Leading '---' has no closing delimiter; treating it as a slide separator");
        }
        return format!(
            "{DELIMITER}\nmarp: true\ntheme: {theme}\npaginate: true\n{DELIMITER}\n\n{markdown}"
        );
    };

    let mut lines: Vec<String> = markdown[span.inner.clone()]
        .lines()
        .map(str::to_string)
        .collect();

    let mut missing = Vec::new();
    if !has_directive(&lines, Directive::Marp) {
        missing.push(format!("{}: true", Directive::Marp.key()));
    }
    let theme_line = format!("{}: {}", Directive::Theme.key(), theme);
    match lines
        .iter()
        .position(|l| directive_key(l) == Some(Directive::Theme.key()))
    {
        Some(idx) => lines[idx] = theme_line,
        None => missing.push(theme_line),
    }
    if !has_directive(&lines, Directive::Paginate) {
        missing.push(format!("{}: true", Directive::Paginate.key()));
    }

    if !missing.is_empty() {
        log::debug!("Inserting front matter directives: {:?}", missing);
    }

    let mut output = String::with_capacity(markdown.len() + 64);
    output.push_str(DELIMITER);
    output.push('\n');
    for line in missing.iter().chain(lines.iter()) {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&markdown[span.inner.end..]);
    output
}

/// Directives read from a document's front matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, String)>,
}

impl FrontMatter {
    /// Value of the first directive with this key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The declared theme, if any.
    pub fn theme(&self) -> Option<&str> {
        self.get(Directive::Theme.key()).filter(|t| !t.is_empty())
    }

    /// Whether pagination is switched on.
    pub fn paginate(&self) -> bool {
        self.get(Directive::Paginate.key()) == Some("true")
    }

    /// All directives in declaration order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// Read the directives of the leading front matter block.
///
/// Returns `None` when the document has no complete block. Quoted values
/// are unquoted; nested YAML structures are not interpreted.
pub fn parse(markdown: &str) -> Option<FrontMatter> {
    let span = locate(markdown)?;
    let entries = markdown[span.inner]
        .lines()
        .filter_map(|line| {
            let caps = DIRECTIVE_REGEX.captures(line.trim_end_matches('\r'))?;
            let value = caps[2].trim_matches(|c| c == '"' || c == '\'');
            Some((caps[1].to_string(), value.to_string()))
        })
        .collect();
    Some(FrontMatter { entries })
}

/// The document body after the leading front matter block.
pub fn strip(markdown: &str) -> &str {
    match locate(markdown) {
        Some(span) => &markdown[span.end..],
        None => markdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_block_when_missing() {
        let result = normalize("# Hello", "gaia");
        assert_eq!(
            result,
            "---\nmarp: true\ntheme: gaia\npaginate: true\n---\n\n# Hello"
        );
    }

    #[test]
    fn test_inserts_missing_directives() {
        let input = "---\ntitle: Demo\n---\n\n# Hello\n";
        let result = normalize(input, "uncover");
        assert_eq!(
            result,
            "---\nmarp: true\ntheme: uncover\npaginate: true\ntitle: Demo\n---\n\n# Hello\n"
        );
    }

    #[test]
    fn test_overwrites_whole_theme_line() {
        let input = "---\nmarp: true\ntheme: default   # old\npaginate: false\n---\n# A\n";
        let result = normalize(input, "bespoke");
        assert_eq!(
            result,
            "---\nmarp: true\ntheme: bespoke\npaginate: false\n---\n# A\n"
        );
    }

    #[test]
    fn test_keeps_existing_flags() {
        let input = "---\nmarp: false\npaginate: false\ntheme: gaia\n---\n";
        let result = normalize(input, "gaia");
        assert_eq!(result, input);
    }

    #[test]
    fn test_theme_only_replaced_inside_block() {
        let input = "---\nmarp: true\n---\n\ntheme: not a directive\n";
        let result = normalize(input, "gaia");
        assert!(result.contains("\ntheme: not a directive\n"));
        assert!(result.starts_with("---\ntheme: gaia\npaginate: true\nmarp: true\n---"));
    }

    #[test]
    fn test_theme_line_at_end_of_block_without_newline() {
        let input = "---\ntheme: default\n---";
        let result = normalize(input, "gaia");
        assert_eq!(result, "---\nmarp: true\npaginate: true\ntheme: gaia\n---");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "# Title\n\n---\n\n## Sub\n- a\n- b",
            "---\ntitle: x\n---\n# A",
            "---\ntheme: gaia\n---\n",
            "",
            "---\n# Unterminated",
        ];
        for input in inputs {
            let once = normalize(input, "default");
            let twice = normalize(&once, "default");
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_normalizes_line_endings() {
        let result = normalize("# A\r\n\r\nText", "default");
        assert!(result.ends_with("# A\n\nText"));
    }

    #[test]
    fn test_unterminated_block_is_treated_as_body() {
        let result = normalize("---\n# A", "default");
        assert!(result.starts_with("---\nmarp: true\n"));
        assert!(result.ends_with("---\n\n---\n# A"));
    }

    #[test]
    fn test_parse_reads_directives() {
        let fm = parse("---\nmarp: true\ntheme: \"gaia\"\npaginate: true\n  nested: x\n---\n# A")
            .unwrap();
        assert_eq!(fm.theme(), Some("gaia"));
        assert!(fm.paginate());
        assert_eq!(fm.get("marp"), Some("true"));
        assert_eq!(fm.get("nested"), None);
        assert_eq!(fm.entries().len(), 3);
    }

    #[test]
    fn test_parse_without_block() {
        assert!(parse("# A\n---\n# B").is_none());
    }

    #[test]
    fn test_strip_returns_body() {
        assert_eq!(strip("---\nmarp: true\n---\n\n# A"), "\n# A");
        assert_eq!(strip("# A"), "# A");
    }
}
