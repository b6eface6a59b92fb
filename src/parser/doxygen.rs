//! Doxygen tag extraction from a raw comment block.
//!
//! The block is flattened to one line of text: delimiters and the leading
//! `*` decoration are removed, blank lines dropped, the rest joined with
//! spaces. A tag is `@name` at the start of a word and runs until the next
//! tag. `@brief`, `@param` and `@member` are kept; every other tag is
//! dropped along with its text. The description is whatever precedes the
//! first tag.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)@([A-Za-z_]\w*)").unwrap());

static RE_NAMED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\[[^\]]*\])?\s*(\w+)\s*(.*)$").unwrap());

/// Tags pulled from one comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub brief: String,
    pub description: String,
    /// `@param name text`, keyed by name.
    pub params: HashMap<String, String>,
    /// `@member name text`, keyed by name.
    pub members: HashMap<String, String>,
    /// Every tag name seen, in order.
    pub tags: Vec<String>,
}

impl DocBlock {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn member(&self, name: &str) -> &str {
        self.members.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Parse the tags out of a raw `/** ... */` block.
pub fn parse_comment(raw: &str) -> DocBlock {
    let text = flatten(raw);
    let mut doc = DocBlock::default();

    let tags: Vec<(usize, usize, &str)> = RE_TAG
        .captures_iter(&text)
        .filter_map(|caps| {
            // The match may begin with the whitespace before `@`.
            let name = caps.get(1)?;
            Some((name.start() - 1, name.end(), name.as_str()))
        })
        .collect();

    let leading_end = tags.first().map_or(text.len(), |t| t.0);
    doc.description = clean(&text[..leading_end]);

    for (i, &(_, body_start, name)) in tags.iter().enumerate() {
        let body_end = tags.get(i + 1).map_or(text.len(), |next| next.0);
        let body = text[body_start..body_end].trim();
        doc.tags.push(name.to_string());

        match name {
            "brief" if doc.brief.is_empty() => doc.brief = clean(body),
            "param" => insert_named(&mut doc.params, body),
            "member" => insert_named(&mut doc.members, body),
            _ => {}
        }
    }

    doc
}

fn insert_named(map: &mut HashMap<String, String>, body: &str) {
    if let Some(caps) = RE_NAMED_ENTRY.captures(body) {
        map.insert(caps[1].to_string(), clean(&caps[2]));
    }
}

/// Strip delimiters and decoration, drop blank lines, join with spaces.
fn flatten(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("/**").unwrap_or(line);
            let line = line.strip_suffix("*/").unwrap_or(line);
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse runs of whitespace and trim.
fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
