//! Template and rendered-document I/O.
//!
//! Templates are document trees serialized as JSON. Loading distinguishes a
//! missing file from an unparsable one; both are fatal for the generation
//! request that needed the template.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::node::Document;

/// Loads a template document from a JSON file.
///
/// Returns [`EngineError::TemplateNotFound`] when the file cannot be read
/// and [`EngineError::TemplateParseError`] when its contents are not a
/// valid document tree.
pub fn load_template(path: &Path) -> EngineResult<Document> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::TemplateNotFound {
        path: path_str.clone(),
    })?;

    serde_json::from_str(&content).map_err(|e| EngineError::TemplateParseError {
        path: path_str,
        message: e.to_string(),
    })
}

/// Writes a rendered document to the given path as pretty-printed JSON.
pub fn write_document(path: &Path, document: &Document) -> EngineResult<()> {
    let path_str = path.display().to_string();

    let content =
        serde_json::to_string_pretty(document).map_err(|e| EngineError::DocumentWriteError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

    fs::write(path, content).map_err(|e| EngineError::DocumentWriteError {
        path: path_str,
        message: e.to_string(),
    })
}
