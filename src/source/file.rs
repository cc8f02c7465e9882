//! Fixture files on disk (JSON or TOML)

use std::path::{Path, PathBuf};

use super::{GraphDocument, GraphSource, SourceError, SourceResult};

/// Serialization format of a graph document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` files are TOML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }

    pub fn parse(&self, content: &str) -> SourceResult<GraphDocument> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Toml => Ok(toml::from_str(content)?),
        }
    }
}

/// Graph document read from a file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_document(&self) -> SourceResult<GraphDocument> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        DocumentFormat::from_path(&self.path).parse(&content)
    }
}
