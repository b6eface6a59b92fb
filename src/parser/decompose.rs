//! Parameter and declarator decomposition into `(type, name)`.

use regex::Regex;
use std::sync::LazyLock;

/// `<ret> (*name)(` — start of a function-pointer declarator.
static RE_FN_PTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?\(\s*\*+\s*\w*\s*\)\s*\(").unwrap());

/// Trailing `[..]` groups.
static RE_ARRAY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*(?:\[[^\]]*\]\s*)+$").unwrap());

/// Type followed by a trailing identifier, split after the last space or `*`.
static RE_TYPED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<ty>.*[\s*])(?P<name>[A-Za-z_]\w*)$").unwrap());

/// Words that cannot stand as a complete type on their own.
const QUALIFIERS: &[&str] = &[
    "const", "volatile", "static", "extern", "register", "auto", "restrict", "inline", "struct",
    "enum", "union",
];

/// Words that are always part of a type, never a name.
const TYPE_WORDS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "_Bool",
    "bool",
];

fn is_qualifier(word: &str) -> bool {
    QUALIFIERS.contains(&word)
}

fn is_type_word(word: &str) -> bool {
    TYPE_WORDS.contains(&word) || is_qualifier(word)
}

pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a parameter list on commas outside `()`, `[]` and `<>`.
pub fn split_top_level(list: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let (mut paren, mut bracket, mut angle) = (0i32, 0i32, 0i32);

    for c in list.chars() {
        match c {
            '(' => paren += 1,
            ')' => paren -= 1,
            '[' => bracket += 1,
            ']' => bracket -= 1,
            '<' => angle += 1,
            '>' => angle -= 1,
            ',' if paren == 0 && bracket == 0 && angle == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Decompose one parameter (or member declarator) into `(type, name)`.
///
/// The name is empty when none can be recovered. Array suffixes are dropped.
pub fn decompose_param(param: &str) -> (String, String) {
    let param = param.trim();
    if param.is_empty() {
        return (String::new(), String::new());
    }
    if let Some(split) = function_pointer(param) {
        return split;
    }
    if param.contains('<') && param.contains('>') {
        return generic(param);
    }
    general(param)
}

/// `<ret> (*name)(<args>) [ident]`. The type runs through the argument list;
/// only an identifier after it is a name, so `(*name)` alone gives none.
fn function_pointer(param: &str) -> Option<(String, String)> {
    let args_open = RE_FN_PTR.find(param)?.end() - 1;

    let mut depth = 0i32;
    let mut args_close = None;
    for (offset, c) in param[args_open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    args_close = Some(args_open + offset);
                    break;
                }
            }
            _ => {}
        }
    }
    let args_close = args_close?;

    let param_type = param[..=args_close].trim().to_string();
    let trailing = param[args_close + 1..].trim();
    let name = if is_identifier(trailing) { trailing } else { "" };
    Some((param_type, name.to_string()))
}

/// Template-like shape: last word is the name when it is an identifier.
fn generic(param: &str) -> (String, String) {
    let words: Vec<&str> = param.split_whitespace().collect();
    match words.split_last() {
        Some((last, rest)) if !rest.is_empty() && is_identifier(last) => {
            (rest.join(" "), (*last).to_string())
        }
        _ => (param.to_string(), String::new()),
    }
}

fn general(param: &str) -> (String, String) {
    let base = RE_ARRAY_SUFFIX
        .captures(param)
        .and_then(|caps| caps.get(1))
        .map_or(param, |m| m.as_str())
        .trim();

    if let Some(caps) = RE_TYPED_NAME.captures(base) {
        let ty = caps["ty"].trim();
        let name = &caps["name"];
        let complete_type = ty
            .split(|c: char| c.is_whitespace() || c == '*')
            .filter(|w| !w.is_empty())
            .any(|w| !is_qualifier(w));
        if complete_type && !is_type_word(name) {
            return (ty.to_string(), name.to_string());
        }
    }

    token_scan(base)
}

/// Qualifier and pointer words plus the first base word are type; the next
/// plain identifier starts the name.
fn token_scan(base: &str) -> (String, String) {
    let words: Vec<&str> = base.split_whitespace().collect();
    let mut seen_base = false;

    for (i, word) in words.iter().enumerate() {
        let bare = word.trim_start_matches('*');
        if is_qualifier(word) || bare.is_empty() {
            continue;
        }
        if !seen_base {
            seen_base = true;
            continue;
        }
        if is_identifier(bare) && !is_type_word(bare) {
            let stars = &word[..word.len() - bare.len()];
            let mut ty = words[..i].join(" ");
            if !stars.is_empty() {
                ty.push(' ');
                ty.push_str(stars);
            }
            let mut name = vec![bare];
            name.extend_from_slice(&words[i + 1..]);
            return (ty, name.join(" "));
        }
    }

    (base.to_string(), String::new())
}
