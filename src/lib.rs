//! hdrdoc — extract the documented API surface of C headers.
//!
//! Each `/** ... */` comment is attached to the declaration that follows it.
//! Functions are decomposed into return type, name and parameters; structs,
//! enums, unions and typedefs keep their definition text, and structs also
//! get a member list. Prose comes from `@brief`, `@param` and `@member`.
//!
//! ```
//! use hdrdoc::{parse_header, ExtractOptions};
//!
//! let src = "/** @brief Adds. @param a first */\nint add(int a, int b);\n";
//! let header = parse_header(src, "math.h", "math.h", &ExtractOptions::default());
//! let add = header.function("add").unwrap();
//! assert_eq!(add.return_type, "int");
//! assert_eq!(add.parameters[0].description, "first");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use catalog::Catalog;
pub use config::{ExtractOptions, Settings};
pub use error::ExtractError;
pub use model::{DataTypeInfo, DataTypeKind, FunctionInfo, FunctionParam, HeaderFile, StructMember};
pub use parser::{parse_header, read_header};
