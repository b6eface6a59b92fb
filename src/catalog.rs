//! The set of parsed headers for one run.
//!
//! Files are independent: an unreadable file is reported and left out, and
//! a second file with an already-seen filename is skipped (first wins).

use crate::config::ExtractOptions;
use crate::error::ExtractError;
use crate::model::HeaderFile;
use crate::parser;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Why an input did not make it into the catalog.
#[derive(Debug)]
pub enum Skipped {
    Unreadable { path: PathBuf, error: ExtractError },
    Duplicate { path: PathBuf, filename: String },
}

impl Skipped {
    pub fn path(&self) -> &Path {
        match self {
            Skipped::Unreadable { path, .. } | Skipped::Duplicate { path, .. } => path,
        }
    }
}

/// Parsed headers in input order, unique by filename.
#[derive(Debug, Default)]
pub struct Catalog {
    headers: Vec<HeaderFile>,
    filenames: HashSet<String>,
    skipped: Vec<Skipped>,
}

impl Catalog {
    /// Read and parse every path in order.
    pub fn build<P: AsRef<Path>>(paths: &[P], options: &ExtractOptions) -> Self {
        let mut catalog = Self::default();
        for path in paths {
            let path = path.as_ref();
            match parser::read_header(path, options) {
                Ok(header) => {
                    catalog.insert(header, path);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable header");
                    catalog.skipped.push(Skipped::Unreadable {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }
        catalog
    }

    /// Add a parsed header. Returns false when its filename was already taken.
    pub fn insert(&mut self, header: HeaderFile, path: &Path) -> bool {
        if !self.filenames.insert(header.filename().to_string()) {
            tracing::warn!(
                filename = header.filename(),
                path = %path.display(),
                "skipping duplicate file"
            );
            self.skipped.push(Skipped::Duplicate {
                path: path.to_path_buf(),
                filename: header.filename().to_string(),
            });
            return false;
        }
        self.headers.push(header);
        true
    }

    pub fn headers(&self) -> &[HeaderFile] {
        &self.headers
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn into_headers(self) -> Vec<HeaderFile> {
        self.headers
    }
}
