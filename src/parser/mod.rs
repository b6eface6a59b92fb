//! Header parser — one synchronous pass over a file's text.

pub mod boundary;
pub mod comment;
pub mod cursor;
pub mod datatype;
pub mod decompose;
pub mod doxygen;
pub mod function;

use crate::config::ExtractOptions;
use crate::error::ExtractError;
use crate::model::HeaderFile;
use boundary::SeedKind;
use comment::DocComments;
use std::fs;
use std::path::Path;

/// Parse a header's full text.
///
/// Each documentation comment is attached to the declaration that follows
/// it. Comments without a recognizable declaration produce nothing. The
/// first comment carrying `@file` documents the file itself.
pub fn parse_header(
    text: &str,
    filename: &str,
    file_path: &str,
    options: &ExtractOptions,
) -> HeaderFile {
    let lines: Vec<&str> = text.lines().collect();
    let mut functions = Vec::new();
    let mut data_types = Vec::new();
    let mut file_doc = None;

    let mut comments = DocComments::new(&lines);
    while let Some(comment) = comments.next() {
        let doc = doxygen::parse_comment(&comment.text);
        if doc.has_tag("file") {
            if file_doc.is_none() {
                file_doc = Some(doc);
            }
            continue;
        }

        let Some(seed) = boundary::locate_seed(&lines, comment.next_line) else {
            tracing::debug!(line = comment.start_line + 1, "comment has no following declaration");
            continue;
        };
        let seed_line_no = seed.line + 1;

        match seed.kind {
            SeedKind::Function => {
                let Some(span) = boundary::function_span(&lines, seed.line) else {
                    continue;
                };
                if let Some(func) =
                    function::parse_function(&span.text, &doc, filename, seed_line_no, options)
                {
                    functions.push(func);
                    comments.skip_to(span.end);
                }
            }
            SeedKind::DataType => {
                let span = boundary::type_span(&lines, seed.line);
                if let Some(data_type) = datatype::parse_data_type(
                    lines[seed.line],
                    &span,
                    &doc,
                    filename,
                    seed_line_no,
                ) {
                    data_types.push(data_type);
                    comments.skip_to(span.end);
                }
            }
        }
    }

    let (brief, description) = file_doc
        .map(|doc| (doc.brief, doc.description))
        .unwrap_or_default();
    HeaderFile::new(filename, file_path, brief, description, functions, data_types)
}

/// Read and parse a header from disk.
pub fn read_header(path: &Path, options: &ExtractOptions) -> Result<HeaderFile, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ExtractError::Decode {
        path: path.to_path_buf(),
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(parse_header(&text, &filename, &path.to_string_lossy(), options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataTypeKind;
    use pretty_assertions::assert_eq;

    const WIDGET_H: &str = r#"/**
 * @file widget.h
 * @brief Widget helpers.
 * @author Someone
 */

#ifndef WIDGET_H
#define WIDGET_H

/**
 * @brief A rectangle.
 * @member w Width
 * @member h Height
 */
typedef struct {
    int w;
    int h;
} Rect;

/**
 * @brief Creates a widget.
 * @param name Widget name.
 * @param on_click Click handler.
 */
Widget *widget_create(const char *name,
                      void (*on_click)(Widget *, int));

/** @brief Internal helper. */
void _widget_internal_reset(Widget *w);

/** @brief Orphan comment with nothing after it. */

#endif
"#;

    #[test]
    fn parses_functions_types_and_file_docs() {
        let header = parse_header(WIDGET_H, "widget.h", "include/widget.h", &ExtractOptions::default());
        assert_eq!(header.filename(), "widget.h");
        assert_eq!(header.file_path(), "include/widget.h");
        assert_eq!(header.brief(), "Widget helpers.");

        assert_eq!(header.functions().len(), 1);
        let create = header.function("widget_create").unwrap();
        assert_eq!(create.return_type, "Widget *");
        assert_eq!(create.line, 25);
        assert_eq!(create.parameters[0].description, "Widget name.");
        assert_eq!(create.parameters[1].param_type, "void (*on_click)(Widget *, int)");
        assert_eq!(create.parameters[1].name, "");
        assert_eq!(create.parameters[1].description, "");

        let rect = header.data_type("Rect").unwrap();
        assert_eq!(rect.kind, DataTypeKind::Struct);
        assert_eq!(rect.members[0].description, "Width");
        assert_eq!(rect.members[1].description, "Height");
    }

    #[test]
    fn include_private_keeps_underscored() {
        let open = ExtractOptions {
            include_private: true,
        };
        let header = parse_header(WIDGET_H, "widget.h", "widget.h", &open);
        let names: Vec<_> = header.functions().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["_widget_internal_reset", "widget_create"]);
    }

    #[test]
    fn trailing_member_doc_keeps_function_and_attaches_nothing() {
        let src = "/** @brief Adds */\nint add(int a, int b); /**< sum */\nint sub(int a, int b);\n";
        let header = parse_header(src, "math.h", "math.h", &ExtractOptions::default());
        let names: Vec<_> = header.functions().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["add"]);
        assert_eq!(header.function("add").unwrap().brief, "Adds");
        assert_eq!(header.function("add").unwrap().description, "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let options = ExtractOptions::default();
        assert_eq!(
            parse_header(WIDGET_H, "widget.h", "widget.h", &options),
            parse_header(WIDGET_H, "widget.h", "widget.h", &options)
        );
    }

    #[test]
    fn read_header_reports_missing_file() {
        let err = read_header(Path::new("/nonexistent/nope.h"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }

    #[test]
    fn read_header_rejects_invalid_utf8() {
        let file = tempfile::NamedTempFile::with_suffix(".h").unwrap();
        fs::write(file.path(), [0x2f, 0x2a, 0xff, 0xfe]).unwrap();
        let err = read_header(file.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Decode { .. }));
    }
}
