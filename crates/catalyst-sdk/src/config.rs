use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Where records live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Process-local map; contents vanish on exit.
    Memory,
    /// One JSON file per record under `data_dir`.
    #[default]
    File,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalystConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub seed_on_open: bool,
}

impl Default for CatalystConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            data_dir: PathBuf::from("./catalyst-data"),
            default_page_size: 12,
            max_page_size: 100,
            seed_on_open: false,
        }
    }
}

impl CatalystConfig {
    /// In-memory configuration, mostly for tests.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory,
            ..Self::default()
        }
    }

    /// File-backed configuration rooted at `dir`.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File,
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Parse and validate. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.default_page_size == 0 {
            return Err(SdkError::Config("default_page_size must be at least 1".into()));
        }
        if self.max_page_size < self.default_page_size {
            return Err(SdkError::Config(format!(
                "max_page_size ({}) is smaller than default_page_size ({})",
                self.max_page_size, self.default_page_size
            )));
        }
        if self.backend == Backend::File && self.data_dir.as_os_str().is_empty() {
            return Err(SdkError::Config("data_dir is required for the file backend".into()));
        }
        Ok(())
    }

    /// Effective page size for a request: default when absent, clamped to
    /// `1..=max_page_size`.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CatalystConfig::default();
        assert_eq!(c.backend, Backend::File);
        assert_eq!(c.data_dir, PathBuf::from("./catalyst-data"));
        assert_eq!(c.default_page_size, 12);
        assert_eq!(c.max_page_size, 100);
        assert!(!c.seed_on_open);
        c.validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = CatalystConfig::from_toml_str(
            r#"
            backend = "memory"
            default_page_size = 5
            "#,
        )
        .unwrap();
        assert_eq!(c.backend, Backend::Memory);
        assert_eq!(c.default_page_size, 5);
        assert_eq!(c.max_page_size, 100);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            CatalystConfig::from_toml_str("default_page_size = 0"),
            Err(SdkError::Config(_))
        ));
        assert!(matches!(
            CatalystConfig::from_toml_str("default_page_size = 20\nmax_page_size = 10"),
            Err(SdkError::Config(_))
        ));
        assert!(matches!(
            CatalystConfig::from_toml_str("backend = \"s3\""),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn page_size_clamps() {
        let c = CatalystConfig::default();
        assert_eq!(c.page_size(None), 12);
        assert_eq!(c.page_size(Some(0)), 1);
        assert_eq!(c.page_size(Some(50)), 50);
        assert_eq!(c.page_size(Some(5000)), 100);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalyst.toml");
        std::fs::write(&path, "seed_on_open = true\ndata_dir = \"/var/lib/catalyst\"").unwrap();
        let c = CatalystConfig::load(&path).unwrap();
        assert!(c.seed_on_open);
        assert_eq!(c.data_dir, PathBuf::from("/var/lib/catalyst"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CatalystConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SdkError::Io(_)));
    }
}
