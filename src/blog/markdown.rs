//! Markdown text helpers used to derive post metadata.

use once_cell::sync::Lazy;
use regex::Regex;

/// Words per minute for whitespace-separated text
const WORDS_PER_MINUTE: f64 = 200.0;
/// Characters per minute for CJK text
const CJK_CHARS_PER_MINUTE: f64 = 300.0;

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("Invalid code block regex"));
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("Invalid image regex"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("Invalid link regex"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}\s+").expect("Invalid heading regex"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("Invalid italic regex"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]*)`").expect("Invalid inline code regex"));
static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("Invalid newline regex"));

static SLUG_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("Invalid slug regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("Invalid hyphen regex"));

/// Strips markdown syntax and returns at most `max_len` characters of plain
/// text, followed by `...` when truncated.
///
/// Truncation prefers the last space when it falls in the final fifth of the
/// cut, so words are not split needlessly.
pub fn extract_excerpt(content: &str, max_len: usize) -> String {
    let text = CODE_BLOCK.replace_all(content, "");
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = NEWLINES.replace_all(&text, " ");
    let plain = text.trim();

    if plain.chars().count() <= max_len {
        return plain.to_string();
    }

    let truncated: String = plain.chars().take(max_len).collect();
    let threshold = max_len as f64 * 0.8;
    match truncated.rfind(' ') {
        Some(byte_idx) if truncated[..byte_idx].chars().count() as f64 > threshold => {
            format!("{}...", &truncated[..byte_idx])
        }
        _ => format!("{truncated}..."),
    }
}

/// Estimates reading time in whole minutes, never less than one.
///
/// CJK ideographs are counted per character, everything else per
/// whitespace-separated word.
pub fn estimate_reading_time(content: &str) -> u32 {
    let cjk_chars = content.chars().filter(|c| is_cjk(*c)).count();
    let words = content
        .split_whitespace()
        .filter(|word| word.chars().any(|c| !is_cjk(c)))
        .count();

    let minutes = cjk_chars as f64 / CJK_CHARS_PER_MINUTE + words as f64 / WORDS_PER_MINUTE;
    (minutes.round() as u32).max(1)
}

/// Turns a title into a lowercase, hyphen-separated ASCII slug.
pub fn generate_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    let kept = SLUG_DISALLOWED.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(kept.trim(), "-");
    HYPHENS
        .replace_all(&hyphenated, "-")
        .trim_matches('-')
        .to_string()
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_strips_markdown() {
        let content = "## Title\n\nSome **bold**, *italic* and `code`.\n\n\
                       ```rust\nfn main() {}\n```\n\
                       See [the docs](https://example.com) ![logo](logo.png)";

        assert_eq!(
            extract_excerpt(content, 200),
            "Title Some bold, italic and code. See the docs"
        );
    }

    #[test]
    fn test_excerpt_short_content_untouched() {
        assert_eq!(extract_excerpt("  hello world  ", 200), "hello world");
        assert_eq!(extract_excerpt("", 200), "");
    }

    #[test]
    fn test_excerpt_cuts_at_late_space() {
        // Last space inside the cut sits at index 9, beyond 80% of 10
        let content = "aaaa bbbb cccc";
        assert_eq!(extract_excerpt(content, 10), "aaaa bbbb...");
    }

    #[test]
    fn test_excerpt_hard_cut_without_late_space() {
        let content = "aaaa bbbbbbbbbbbb";
        assert_eq!(extract_excerpt(content, 10), "aaaa bbbbb...");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let content = "一二三四五六七八九十十一";
        assert_eq!(extract_excerpt(content, 10), "一二三四五六七八九十...");
    }

    #[test]
    fn test_reading_time_minimum_one_minute() {
        assert_eq!(estimate_reading_time(""), 1);
        assert_eq!(estimate_reading_time("just a few words"), 1);
    }

    #[test]
    fn test_reading_time_english_words() {
        let content = "word ".repeat(1000);
        assert_eq!(estimate_reading_time(&content), 5);
    }

    #[test]
    fn test_reading_time_mixed_content() {
        // 900 CJK chars (3 min) + 400 words (2 min)
        let content = format!("{} {}", "字".repeat(900), "word ".repeat(400));
        assert_eq!(estimate_reading_time(&content), 5);
    }

    #[test]
    fn test_slug_generation() {
        assert_eq!(generate_slug("Hello World!"), "hello-world");
        assert_eq!(generate_slug("  Rust -- async   traits "), "rust-async-traits");
        assert_eq!(generate_slug("snake_case stays"), "snake_case-stays");
        assert_eq!(generate_slug("中文 title"), "title");
    }

    #[test]
    fn test_slug_trims_edge_hyphens() {
        assert_eq!(generate_slug("Rust 学习笔记"), "rust");
        assert_eq!(generate_slug(" Hello "), "hello");
        assert_eq!(generate_slug("学习笔记"), "");
    }
}
