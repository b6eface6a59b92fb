//! Markdown API page renderer.
//!
//! One page per header: file summary, an index of functions and types, then
//! a section per entity. Anchors are the lower-cased entity name prefixed
//! with `api-` (functions) or `type-` (data types).

use crate::model::*;
use crate::render::Renderer;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, header: &HeaderFile) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}\n", header.filename()));
        push_docs(&mut lines, header.brief(), header.description());

        if !header.is_empty() {
            lines.push("## Index\n".to_string());
            for func in header.functions() {
                lines.push(format!("* [{}](#{})", func.name, function_anchor(&func.name)));
            }
            for ty in header.data_types() {
                lines.push(format!(
                    "* [{}](#{}) ({})",
                    ty.name,
                    type_anchor(&ty.name),
                    ty.kind
                ));
            }
            lines.push(String::new());
        }

        if !header.functions().is_empty() {
            lines.push("## Functions\n".to_string());
            for func in header.functions() {
                render_function(&mut lines, func);
            }
        }

        if !header.data_types().is_empty() {
            lines.push("## Data Types\n".to_string());
            for ty in header.data_types() {
                render_data_type(&mut lines, ty);
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

pub fn function_anchor(name: &str) -> String {
    format!("api-{}", name.to_lowercase())
}

pub fn type_anchor(name: &str) -> String {
    format!("type-{}", name.to_lowercase())
}

fn push_docs(lines: &mut Vec<String>, brief: &str, description: &str) {
    if !brief.is_empty() {
        lines.push(format!("{}\n", brief));
    }
    if !description.is_empty() {
        lines.push(format!("{}\n", description));
    }
}

fn render_function(lines: &mut Vec<String>, func: &FunctionInfo) {
    lines.push(format!("<a id=\"{}\"></a>", function_anchor(&func.name)));
    lines.push(format!("### {}\n", func.name));
    push_docs(lines, &func.brief, &func.description);

    lines.push("```c".to_string());
    lines.push(signature(func));
    lines.push("```\n".to_string());

    if !func.parameters.is_empty() {
        lines.push("#### Parameters\n".to_string());
        push_table_header(lines);
        for param in &func.parameters {
            lines.push(table_row(&param.name, &param.param_type, &param.description));
        }
        lines.push(String::new());
    }

    lines.push(format!("**Returns:** `{}`\n", func.return_type));
    lines.push(format!("_Declared in {} line {}._\n", func.file, func.line));
}

fn render_data_type(lines: &mut Vec<String>, ty: &DataTypeInfo) {
    lines.push(format!("<a id=\"{}\"></a>", type_anchor(&ty.name)));
    lines.push(format!("### {} ({})\n", ty.name, ty.kind));
    push_docs(lines, &ty.brief, &ty.description);

    lines.push("```c".to_string());
    lines.push(ty.definition.clone());
    lines.push("```\n".to_string());

    if !ty.members.is_empty() {
        lines.push("#### Members\n".to_string());
        push_table_header(lines);
        for member in &ty.members {
            lines.push(table_row(&member.name, &member.member_type, &member.description));
        }
        lines.push(String::new());
    }

    lines.push(format!("_Declared in {} line {}._\n", ty.file, ty.line));
}

fn push_table_header(lines: &mut Vec<String>) {
    lines.push("| Name | Type | Description |".to_string());
    lines.push("|------|------|-------------|".to_string());
}

fn table_row(name: &str, ty: &str, description: &str) -> String {
    format!("| {} | `{}` | {} |", cell(name), ty, cell(description))
}

/// Escape pipes so text stays inside its table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// One-line prototype rebuilt from the parsed pieces.
fn signature(func: &FunctionInfo) -> String {
    let params = if func.parameters.is_empty() {
        "void".to_string()
    } else {
        func.parameters
            .iter()
            .map(|p| declarator(&p.param_type, &p.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{}({});", declarator(&func.return_type, &func.name), params)
}

/// `type name`, without a space after `*` and without repeating a name the
/// type already carries (function pointers).
fn declarator(ty: &str, name: &str) -> String {
    if name.is_empty() || ty.contains("(*") {
        ty.to_string()
    } else if ty.ends_with('*') {
        format!("{}{}", ty, name)
    } else {
        format!("{} {}", ty, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractOptions;
    use crate::parser::parse_header;

    const SRC: &str = r#"/**
 * @file button.h
 * @brief Buttons.
 */

/**
 * @brief Creates a button.
 * @param label Caption | text
 * @param cb Handler
 */
GooeyButton *GooeyButton_Create(const char *label, void (*cb)(int));

/**
 * @brief Button state.
 * @member pressed Whether it is down
 */
typedef struct {
    int pressed;
} GooeyButtonState;
"#;

    fn page() -> String {
        let header = parse_header(SRC, "button.h", "button.h", &ExtractOptions::default());
        MarkdownRenderer.render(&header).unwrap()
    }

    #[test]
    fn index_links_use_lowercased_anchors() {
        let page = page();
        assert!(page.starts_with("# button.h\n\nButtons.\n"));
        assert!(page.contains("* [GooeyButton_Create](#api-gooeybutton_create)"));
        assert!(page.contains("* [GooeyButtonState](#type-gooeybuttonstate) (struct)"));
        assert!(page.contains("<a id=\"api-gooeybutton_create\"></a>"));
        assert!(page.contains("<a id=\"type-gooeybuttonstate\"></a>"));
    }

    #[test]
    fn function_section() {
        let page = page();
        assert!(page
            .contains("GooeyButton *GooeyButton_Create(const char *label, void (*cb)(int));"));
        assert!(page.contains("| label | `const char *` | Caption \\| text |"));
        assert!(page.contains("|  | `void (*cb)(int)` |  |"));
        assert!(page.contains("**Returns:** `GooeyButton *`"));
    }

    #[test]
    fn struct_members_table() {
        let page = page();
        assert!(page.contains("#### Members"));
        assert!(page.contains("| pressed | `int` | Whether it is down |"));
    }

    #[test]
    fn empty_header_has_no_index() {
        let header = parse_header("int x;\n", "empty.h", "empty.h", &ExtractOptions::default());
        assert_eq!(MarkdownRenderer.render(&header).unwrap(), "# empty.h\n\n");
    }

    #[test]
    fn declarator_spacing() {
        assert_eq!(declarator("int", "a"), "int a");
        assert_eq!(declarator("char *", "s"), "char *s");
        assert_eq!(declarator("void (*cb)(int)", "cb"), "void (*cb)(int)");
        assert_eq!(declarator("int", ""), "int");
    }
}
