//! Function prototype parser.
//!
//! A declaration span is collapsed to one line, split into a head and the
//! outermost parameter list, and the head is matched against [`SHAPE_RULES`]
//! in order. The first rule that matches decides the return type and name.

use super::decompose::{decompose_param, is_identifier, split_top_level};
use super::doxygen::DocBlock;
use crate::config::ExtractOptions;
use crate::model::{FunctionInfo, FunctionParam};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_TRAILING_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*__attribute__\s*\(\(.*\)\)$").unwrap());

/// Words that can precede `(` without naming a function.
const NOT_FUNCTION_NAMES: &[&str] = &["if", "while", "for", "switch", "return", "sizeof"];

/// Head shapes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `<ret> <name>`
    Plain,
    /// `<ret ending in *> <name>`
    PointerReturn,
    /// `<ret> *<name>`
    PointerName,
    /// `<ret><name>` split at the last non-word character.
    Tolerant,
}

pub struct ShapeRule {
    pub shape: Shape,
    pattern: Regex,
}

impl ShapeRule {
    fn new(shape: Shape, pattern: &str) -> Self {
        Self {
            shape,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// `(return_type, name)` when the head has this shape.
    fn apply(&self, head: &str) -> Option<(String, String)> {
        let caps = self.pattern.captures(head)?;
        let (ret, name) = self.extract(&caps);
        if ret.is_empty() || !ret.chars().any(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some((ret, name))
    }

    fn extract(&self, caps: &Captures<'_>) -> (String, String) {
        let ret = caps["ret"].trim();
        let name = caps["name"].to_string();
        match self.shape {
            Shape::PointerName => (format!("{} {}", ret, &caps["stars"]), name),
            Shape::Plain | Shape::PointerReturn | Shape::Tolerant => (ret.to_string(), name),
        }
    }
}

pub static SHAPE_RULES: LazyLock<Vec<ShapeRule>> = LazyLock::new(|| {
    vec![
        ShapeRule::new(Shape::Plain, r"^(?P<ret>.*[^\s*])\s+(?P<name>[A-Za-z_]\w*)$"),
        ShapeRule::new(Shape::PointerReturn, r"^(?P<ret>.+?\*+)\s+(?P<name>[A-Za-z_]\w*)$"),
        ShapeRule::new(
            Shape::PointerName,
            r"^(?P<ret>.+?)\s+(?P<stars>\*+)\s*(?P<name>[A-Za-z_]\w*)$",
        ),
        ShapeRule::new(Shape::Tolerant, r"^(?P<ret>.*?\W)\s*(?P<name>[A-Za-z_]\w*)$"),
    ]
});

/// Match a head against the rules; the first match wins.
pub fn match_shape(head: &str) -> Option<(Shape, String, String)> {
    SHAPE_RULES.iter().find_map(|rule| {
        rule.apply(head)
            .map(|(ret, name)| (rule.shape, ret, name))
    })
}

/// Whether a function name is hidden unless private items are requested.
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_') || name.to_lowercase().contains("internal")
}

/// Split `<head>(<params>)` at the parameter list that closes the text.
fn split_signature(body: &str) -> Option<(&str, &str)> {
    if !body.ends_with(')') {
        return None;
    }
    let mut depth = 0i32;
    for (i, c) in body.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    let head = body[..i].trim_end();
                    let params = &body[i + 1..body.len() - 1];
                    return Some((head, params.trim()));
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a collected function declaration. Returns `None` when the text has
/// no recognizable shape or the function is filtered out as private.
pub fn parse_function(
    decl: &str,
    doc: &DocBlock,
    file: &str,
    line: usize,
    options: &ExtractOptions,
) -> Option<FunctionInfo> {
    let collapsed = RE_WHITESPACE.replace_all(decl, " ");
    let body = collapsed.trim().strip_suffix(';')?.trim_end();
    let body = RE_TRAILING_ATTRIBUTE.replace(body, "");

    let Some((head, params)) = split_signature(&body) else {
        tracing::debug!(line, "declaration has no parameter list");
        return None;
    };
    let Some((shape, return_type, name)) = match_shape(head) else {
        tracing::debug!(line, head, "unrecognized function declaration shape");
        return None;
    };
    if !is_identifier(&name) || NOT_FUNCTION_NAMES.contains(&name.as_str()) {
        return None;
    }
    if !options.include_private && is_private_name(&name) {
        tracing::debug!(%name, "skipping private function");
        return None;
    }
    tracing::trace!(%name, ?shape, "parsed function");

    Some(FunctionInfo {
        parameters: parse_parameters(params, doc),
        name,
        return_type,
        brief: doc.brief.clone(),
        description: doc.description.clone(),
        file: file.to_string(),
        line,
    })
}

fn parse_parameters(params: &str, doc: &DocBlock) -> Vec<FunctionParam> {
    if params.is_empty() || params == "void" {
        return Vec::new();
    }
    split_top_level(params)
        .iter()
        .map(|raw| decompose_param(raw))
        .filter(|(param_type, _)| !param_type.is_empty())
        .map(|(param_type, name)| FunctionParam {
            description: doc.param(&name).to_string(),
            param_type,
            name,
        })
        .collect()
}
