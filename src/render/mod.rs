//! Output formats for parsed headers.

pub mod json;
pub mod markdown;

use crate::model::HeaderFile;
use anyhow::{anyhow, Result};

/// Renders a parsed header into one output document.
pub trait Renderer {
    fn render(&self, header: &HeaderFile) -> Result<String>;

    /// Render every header into a single document for stdout.
    fn render_all(&self, headers: &[HeaderFile]) -> Result<String> {
        let pages = headers
            .iter()
            .map(|h| self.render(h))
            .collect::<Result<Vec<_>>>()?;
        Ok(pages.join("\n"))
    }

    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use json or markdown", format)),
    }
}
