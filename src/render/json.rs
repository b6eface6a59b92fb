//! JSON renderer: the header record as pretty-printed JSON.

use crate::model::HeaderFile;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, header: &HeaderFile) -> Result<String> {
        to_pretty(header)
    }

    /// A single array of records.
    fn render_all(&self, headers: &[HeaderFile]) -> Result<String> {
        to_pretty(&headers)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn to_pretty<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("failed to serialize header")?;
    out.push('\n');
    Ok(out)
}
