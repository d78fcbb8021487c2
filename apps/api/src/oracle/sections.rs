//! Response Structurer: splits generated text into `【heading】body` sections.
//!
//! Parsing is lenient: generator output carries no schema guarantee.
//! - Text before the first heading is dropped.
//! - `【】` is not a heading; its text stays in the surrounding body.
//! - A heading whose title trims to nothing is skipped together with its body.
//! - No usable heading at all → one `結果` section holding the whole text.
//! - Empty or whitespace-only input → no sections.

use serde::Serialize;

pub const OPEN_BRACKET: char = '【';
pub const CLOSE_BRACKET: char = '】';

/// Title used when the text carries no headings.
pub const FALLBACK_TITLE: &str = "結果";

/// Substrings that mark a section as a list of action hints.
const HINT_KEYWORDS: &[&str] = &["行動のヒント", "ヒント", "アクション"];

/// Bullet glyphs stripped from the start of a hint line.
const BULLETS: &[char] = &['・', '-', '•'];

/// A single one of these may follow the bullet.
const BULLET_GAPS: &[char] = &[' ', '\u{3000}'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// A section as returned to clients, with hint items split out where applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredSection {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

struct Heading<'a> {
    start: usize,
    title: &'a str,
    end: usize,
}

/// Finds the next `【…】` at or after `from` with at least one character inside.
fn next_heading(src: &str, from: usize) -> Option<Heading<'_>> {
    let mut cursor = from;
    while let Some(rel) = src[cursor..].find(OPEN_BRACKET) {
        let start = cursor + rel;
        let inner = start + OPEN_BRACKET.len_utf8();
        match src[inner..].find(CLOSE_BRACKET) {
            // `【】`: not a heading, keep scanning after the open bracket
            Some(0) => cursor = inner,
            Some(len) => {
                return Some(Heading {
                    start,
                    title: &src[inner..inner + len],
                    end: inner + len + CLOSE_BRACKET.len_utf8(),
                })
            }
            // No closing bracket anywhere after this point
            None => return None,
        }
    }
    None
}

/// Splits raw generated text into sections in order of appearance.
pub fn parse(raw: &str) -> Vec<Section> {
    let src = raw.trim();
    if src.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut current = next_heading(src, 0);

    while let Some(heading) = current {
        let next = next_heading(src, heading.end);
        let body_end = next.as_ref().map_or(src.len(), |n| n.start);

        let title = heading.title.trim();
        if !title.is_empty() {
            sections.push(Section {
                title: title.to_string(),
                body: src[heading.end..body_end].trim().to_string(),
            });
        }
        current = next;
    }

    if sections.is_empty() {
        sections.push(Section {
            title: FALLBACK_TITLE.to_string(),
            body: src.to_string(),
        });
    }
    sections
}

/// True for titles naming an action-hint section.
pub fn is_hint_title(title: &str) -> bool {
    HINT_KEYWORDS.iter().any(|k| title.contains(k))
}

/// Splits a hint body into items: one per non-empty line, with a single
/// leading bullet (and one following space) removed. Order is preserved.
pub fn split_hints(body: &str) -> Vec<String> {
    body.split('\n')
        .map(|line| {
            let stripped = line
                .strip_prefix(BULLETS)
                .map(|rest| rest.strip_prefix(BULLET_GAPS).unwrap_or(rest))
                .unwrap_or(line);
            stripped.trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// `parse` followed by hint splitting for hint-titled sections.
pub fn structure(raw: &str) -> Vec<StructuredSection> {
    parse(raw)
        .into_iter()
        .map(|s| {
            let hints = is_hint_title(&s.title).then(|| split_hints(&s.body));
            StructuredSection {
                title: s.title,
                body: s.body,
                hints,
            }
        })
        .collect()
}
