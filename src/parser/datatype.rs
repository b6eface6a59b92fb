//! Struct, enum, union and typedef declarations.

use super::boundary::{strip_inline_comments, Span};
use super::doxygen::DocBlock;
use crate::model::{DataTypeInfo, DataTypeKind, StructMember};
use regex::Regex;
use std::sync::LazyLock;

static RE_CLOSING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*(\w+)[^{}]*;\s*$").unwrap());

static RE_LAST_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\s*;\s*$").unwrap());

static RE_FN_PTR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\*\s*(\w+)\s*\)\s*\(").unwrap());

static RE_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static RE_ATTRIBUTE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:__attribute__|__declspec)\s*\(").unwrap());

/// Where a rule takes the type's name from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameSource {
    /// First capture of the seed pattern.
    Seed,
    /// Identifier after the final `}`.
    AfterClosingBrace,
    /// Identifier right before the final `;`.
    BeforeSemicolon,
    /// `(*Name)` of a function-pointer typedef.
    FunctionPointer,
}

pub struct TypeRule {
    pub kind: DataTypeKind,
    seed: Regex,
    name_from: NameSource,
}

impl TypeRule {
    fn new(kind: DataTypeKind, seed: &str, name_from: NameSource) -> Self {
        Self {
            kind,
            seed: Regex::new(seed).unwrap(),
            name_from,
        }
    }

    fn name(&self, seed_line: &str, code: &str) -> Option<String> {
        let seed = self.seed.captures(seed_line)?;
        let found = match self.name_from {
            NameSource::Seed => seed.get(1),
            NameSource::AfterClosingBrace => RE_CLOSING_NAME.captures(code).and_then(|c| c.get(1)),
            NameSource::BeforeSemicolon => RE_LAST_TOKEN.captures(code).and_then(|c| c.get(1)),
            NameSource::FunctionPointer => RE_FN_PTR_NAME.captures(code).and_then(|c| c.get(1)),
        };
        found.map(|m| m.as_str().to_string())
    }
}

/// Classification rules, in precedence order.
pub static TYPE_RULES: LazyLock<Vec<TypeRule>> = LazyLock::new(|| {
    use DataTypeKind::*;
    vec![
        TypeRule::new(Struct, r"\bstruct\s+(\w+)", NameSource::Seed),
        TypeRule::new(Struct, r"^\s*typedef\s+struct\b", NameSource::AfterClosingBrace),
        TypeRule::new(Enum, r"\benum\s+(\w+)", NameSource::Seed),
        TypeRule::new(Enum, r"^\s*typedef\s+enum\b", NameSource::AfterClosingBrace),
        TypeRule::new(Union, r"\bunion\s+(\w+)", NameSource::Seed),
        TypeRule::new(Typedef, r"^\s*typedef\b", NameSource::BeforeSemicolon),
        TypeRule::new(Typedef, r"^\s*typedef\b", NameSource::FunctionPointer),
    ]
});

/// Classify a type declaration and build its record.
pub fn parse_data_type(
    seed_line: &str,
    span: &Span,
    doc: &DocBlock,
    file: &str,
    line: usize,
) -> Option<DataTypeInfo> {
    let code = span
        .text
        .lines()
        .map(strip_inline_comments)
        .collect::<Vec<_>>()
        .join("\n");
    let code = strip_attributes(&code);
    let code = code.trim();
    let seed = strip_attributes(seed_line);

    let Some((kind, name)) = TYPE_RULES
        .iter()
        .find_map(|rule| rule.name(&seed, code).map(|name| (rule.kind, name)))
    else {
        tracing::debug!(line, seed = seed_line.trim(), "unrecognized type declaration");
        return None;
    };

    let members = match kind {
        DataTypeKind::Struct => parse_struct_members(&span.text, doc),
        _ => Vec::new(),
    };

    Some(DataTypeInfo {
        name,
        kind,
        definition: span.text.trim().to_string(),
        brief: doc.brief.clone(),
        description: doc.description.clone(),
        members,
        file: file.to_string(),
        line,
    })
}

/// Remove `__attribute__((..))` and `__declspec(..)` so they are never
/// taken for a type name. Unbalanced parentheses drop the rest of the text.
fn strip_attributes(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut rest = code;
    while let Some(found) = RE_ATTRIBUTE_START.find(rest) {
        out.push_str(&rest[..found.start()]);
        let mut depth = 0i32;
        let mut end = rest.len();
        for (offset, c) in rest[found.end() - 1..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = found.end() + offset;
                        break;
                    }
                }
                _ => {}
            }
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Members of a struct body: one per line holding a `;` inside the braces.
///
/// Only lines after the opening brace are read. The declarator is split at
/// its last whitespace: the final token, array suffix removed, is the name
/// (`char *name` gives `*name`). A line declaring several names (`int a, b;`)
/// gives one member named after its last token.
pub fn parse_struct_members(definition: &str, doc: &DocBlock) -> Vec<StructMember> {
    let lines: Vec<&str> = definition.lines().collect();
    let Some(open) = lines.iter().position(|l| l.contains('{')) else {
        return Vec::new();
    };

    let mut depth = brace_delta(&strip_inline_comments(lines[open]));
    let mut members = Vec::new();

    for raw in &lines[open + 1..] {
        if depth <= 0 {
            break;
        }
        let line = strip_inline_comments(raw);
        let line = line.trim();
        depth += brace_delta(line);

        if line.is_empty()
            || line.starts_with("/*")
            || line.starts_with('*')
            || line.starts_with('}')
            || line == "{"
        {
            continue;
        }
        if depth <= 0 {
            break;
        }

        if let Some((declarator, _)) = line.split_once(';') {
            if let Some(member) = decompose_member(declarator.trim(), doc) {
                members.push(member);
            }
        }
    }
    members
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

fn decompose_member(declarator: &str, doc: &DocBlock) -> Option<StructMember> {
    let (member_type, last) = declarator.rsplit_once(char::is_whitespace)?;
    let name = RE_ARRAY.replace_all(last, "").into_owned();
    Some(StructMember {
        description: doc.member(&name).to_string(),
        member_type: member_type.trim().to_string(),
        name,
    })
}
