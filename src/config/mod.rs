//! Engine configuration: storage directories and invoice template locations.
//!
//! Configuration is loaded from a single YAML file. Every field has a
//! default, so a missing or partial file still yields a working setup
//! rooted in the current directory.
//!
//! # Example
//!
//! ```no_run
//! use invoice_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load("./engine.yaml").unwrap();
//! config.ensure_directories().unwrap();
//! println!("uploads land in {}", config.upload_dir.display());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Jurisdiction;

/// Template file names, one per billing jurisdiction, resolved relative
/// to [`EngineConfig::templates_dir`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateFiles {
    /// Template for companies in the same state as the issuer.
    pub same_state: String,
    /// Template for domestic companies in a different state.
    pub other_state: String,
    /// Template for foreign companies billed hourly in USD.
    pub foreign: String,
}

impl Default for TemplateFiles {
    fn default() -> Self {
        Self {
            same_state: "same_state.json".to_string(),
            other_state: "inr_invoice.json".to_string(),
            foreign: "usd_invoice.json".to_string(),
        }
    }
}

/// Runtime configuration for the invoice engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory where uploaded timesheet files are read from.
    pub upload_dir: PathBuf,
    /// Directory where rendered invoice documents are written.
    pub documents_dir: PathBuf,
    /// Directory holding the invoice document templates.
    pub templates_dir: PathBuf,
    /// Per-jurisdiction template file names.
    pub templates: TemplateFiles,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            documents_dir: PathBuf::from("documents"),
            templates_dir: PathBuf::from("templates"),
            templates: TemplateFiles::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file cannot be read
    /// and [`EngineError::ConfigParseError`] if it is not valid YAML for
    /// this structure.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the template file path for the given jurisdiction.
    pub fn template_path(&self, jurisdiction: Jurisdiction) -> PathBuf {
        let file_name = match jurisdiction {
            Jurisdiction::SameState => &self.templates.same_state,
            Jurisdiction::OtherState => &self.templates.other_state,
            Jurisdiction::Foreign => &self.templates.foreign,
        };
        self.templates_dir.join(file_name)
    }

    /// Returns the storage path for a rendered invoice document.
    pub fn document_path(&self, invoice_number: &str) -> PathBuf {
        self.documents_dir
            .join(crate::models::Invoice::artifact_name(invoice_number))
    }

    /// Creates the upload and document directories if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DirectoryCreateError`] if a directory cannot
    /// be created.
    pub fn ensure_directories(&self) -> EngineResult<()> {
        for dir in [&self.upload_dir, &self.documents_dir] {
            fs::create_dir_all(dir).map_err(|e| EngineError::DirectoryCreateError {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_root_in_current_directory() {
        let config = EngineConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.documents_dir, PathBuf::from("documents"));
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.templates.same_state, "same_state.json");
        assert_eq!(config.templates.other_state, "inr_invoice.json");
        assert_eq!(config.templates.foreign, "usd_invoice.json");
    }

    #[test]
    fn test_loads_full_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "upload_dir: /data/in").unwrap();
        writeln!(file, "documents_dir: /data/out").unwrap();
        writeln!(file, "templates_dir: /data/tpl").unwrap();
        writeln!(file, "templates:").unwrap();
        writeln!(file, "  same_state: local.json").unwrap();
        writeln!(file, "  other_state: national.json").unwrap();
        writeln!(file, "  foreign: export.json").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.upload_dir, PathBuf::from("/data/in"));
        assert_eq!(config.documents_dir, PathBuf::from("/data/out"));
        assert_eq!(config.templates.foreign, "export.json");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        fs::write(&path, "upload_dir: incoming\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.upload_dir, PathBuf::from("incoming"));
        assert_eq!(config.documents_dir, PathBuf::from("documents"));
        assert_eq!(config.templates.same_state, "same_state.json");
    }

    #[test]
    fn test_missing_file_reports_config_not_found() {
        let result = EngineConfig::load("/nonexistent/engine.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        fs::write(&path, "upload_dir: [unterminated\n").unwrap();

        let result = EngineConfig::load(&path);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_template_path_selects_file_by_jurisdiction() {
        let config = EngineConfig::default();
        assert_eq!(
            config.template_path(Jurisdiction::SameState),
            PathBuf::from("templates/same_state.json")
        );
        assert_eq!(
            config.template_path(Jurisdiction::OtherState),
            PathBuf::from("templates/inr_invoice.json")
        );
        assert_eq!(
            config.template_path(Jurisdiction::Foreign),
            PathBuf::from("templates/usd_invoice.json")
        );
    }

    #[test]
    fn test_document_path_uses_artifact_naming() {
        let config = EngineConfig::default();
        assert_eq!(
            config.document_path("INV-1-2-202601-120000"),
            PathBuf::from("documents/Invoice_INV-1-2-202601-120000.json")
        );
    }

    #[test]
    fn test_ensure_directories_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            upload_dir: dir.path().join("up"),
            documents_dir: dir.path().join("docs"),
            templates_dir: dir.path().join("tpl"),
            templates: TemplateFiles::default(),
        };

        config.ensure_directories().unwrap();
        assert!(config.upload_dir.is_dir());
        assert!(config.documents_dir.is_dir());
        // Templates are provisioned externally, not created here.
        assert!(!config.templates_dir.exists());
    }
}
