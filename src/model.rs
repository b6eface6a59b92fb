//! Data model for an extracted header — format-agnostic.
//!
//! Entities are plain values built in one shot once every field is known.
//! A [`HeaderFile`] owns everything parsed from one file and never changes
//! after construction.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// One parsed header file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFile {
    filename: String,
    #[serde(rename = "path")]
    file_path: String,
    brief: String,
    description: String,
    functions: Vec<FunctionInfo>,
    data_types: Vec<DataTypeInfo>,
}

impl HeaderFile {
    /// Assemble a header. Names are made unique (first occurrence wins) and
    /// both entity lists are sorted by name.
    pub fn new(
        filename: impl Into<String>,
        file_path: impl Into<String>,
        brief: impl Into<String>,
        description: impl Into<String>,
        functions: Vec<FunctionInfo>,
        data_types: Vec<DataTypeInfo>,
    ) -> Self {
        let mut functions = unique_by_name(functions, |f| &f.name);
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        let mut data_types = unique_by_name(data_types, |t| &t.name);
        data_types.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            filename: filename.into(),
            file_path: file_path.into(),
            brief: brief.into(),
            description: description.into(),
            functions,
            data_types,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path the header was read from (`<stdin>` for piped input).
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn brief(&self) -> &str {
        &self.brief
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Documented functions, sorted by name.
    pub fn functions(&self) -> &[FunctionInfo] {
        &self.functions
    }

    /// Documented data types, sorted by name.
    pub fn data_types(&self) -> &[DataTypeInfo] {
        &self.data_types
    }

    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn data_type(&self, name: &str) -> Option<&DataTypeInfo> {
        self.data_types.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.data_types.is_empty()
    }
}

fn unique_by_name<T>(items: Vec<T>, name: impl Fn(&T) -> &String) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(name(item).clone()))
        .collect()
}

/// A documented function prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Raw return type expression, not normalized.
    pub return_type: String,
    pub parameters: Vec<FunctionParam>,
    pub brief: String,
    pub description: String,
    /// Filename of the header that declared it.
    pub file: String,
    /// 1-based line of the declaration's first line.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionParam {
    #[serde(rename = "type")]
    pub param_type: String,
    pub name: String,
    /// Text of the matching `@param`, empty when unmatched.
    pub description: String,
}

/// Kind of a data type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTypeKind {
    Struct,
    Enum,
    Union,
    Typedef,
}

impl DataTypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DataTypeKind::Struct => "struct",
            DataTypeKind::Enum => "enum",
            DataTypeKind::Union => "union",
            DataTypeKind::Typedef => "typedef",
        }
    }
}

impl fmt::Display for DataTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documented struct, enum, union or typedef.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTypeInfo {
    pub name: String,
    pub kind: DataTypeKind,
    /// Declaration text exactly as written.
    pub definition: String,
    pub brief: String,
    pub description: String,
    /// Populated only for structs.
    pub members: Vec<StructMember>,
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructMember {
    #[serde(rename = "type")]
    pub member_type: String,
    /// Declarator name with array suffixes stripped.
    pub name: String,
    /// Text of the matching `@member`, empty when unmatched.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str) -> FunctionInfo {
        FunctionInfo {
            name: name.to_string(),
            return_type: "void".to_string(),
            parameters: Vec::new(),
            brief: String::new(),
            description: String::new(),
            file: "a.h".to_string(),
            line: 1,
        }
    }

    #[test]
    fn functions_sorted_by_name() {
        let header = HeaderFile::new(
            "a.h",
            "include/a.h",
            "",
            "",
            vec![func("zeta"), func("Alpha"), func("beta")],
            Vec::new(),
        );
        let names: Vec<_> = header.functions().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn duplicate_names_keep_first() {
        let mut first = func("dup");
        first.brief = "first".to_string();
        let mut second = func("dup");
        second.brief = "second".to_string();

        let header = HeaderFile::new("a.h", "a.h", "", "", vec![first, second], Vec::new());
        assert_eq!(header.functions().len(), 1);
        assert_eq!(header.functions()[0].brief, "first");
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&DataTypeKind::Typedef).unwrap();
        assert_eq!(json, "\"typedef\"");
        assert_eq!(DataTypeKind::Struct.to_string(), "struct");
    }
}
