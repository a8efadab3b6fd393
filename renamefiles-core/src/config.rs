use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::operation::OperationMode;

/// Name of the config file searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "renamefiles.toml";

/// Fully resolved settings for one invocation.
///
/// Built once by the caller (flags, environment and config file already
/// merged) and handed to the core by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Glob pattern selecting the manifest file(s)
    pub csv_pattern: String,
    /// Prefix for column 0, empty or ending in exactly one `/`
    pub src_base: String,
    /// Prefix for column 1, empty or ending in exactly one `/`
    pub dst_base: String,
    /// Copy files instead of renaming them
    pub copy_only: bool,
    /// Expand the pattern and mark manifests `.processed` / `.errors`
    pub bookkeeping: bool,
}

impl Config {
    pub fn new(csv_pattern: impl Into<String>) -> Self {
        Self {
            csv_pattern: csv_pattern.into(),
            src_base: String::new(),
            dst_base: String::new(),
            copy_only: false,
            bookkeeping: true,
        }
    }

    #[must_use]
    pub fn with_src_base(mut self, base: &str) -> Self {
        self.src_base = normalize_base(base);
        self
    }

    #[must_use]
    pub fn with_dst_base(mut self, base: &str) -> Self {
        self.dst_base = normalize_base(base);
        self
    }

    #[must_use]
    pub fn with_copy_only(mut self, copy_only: bool) -> Self {
        self.copy_only = copy_only;
        self
    }

    #[must_use]
    pub fn with_bookkeeping(mut self, bookkeeping: bool) -> Self {
        self.bookkeeping = bookkeeping;
        self
    }

    pub fn mode(&self) -> OperationMode {
        if self.copy_only {
            OperationMode::Copy
        } else {
            OperationMode::Rename
        }
    }
}

/// Make a non-empty base end with exactly one `/`.
///
/// A base made only of separators collapses to the filesystem root.
pub fn normalize_base(base: &str) -> String {
    if base.is_empty() {
        return String::new();
    }
    let trimmed = base.trim_end_matches('/');
    format!("{trimmed}/")
}

/// On-disk configuration (`renamefiles.toml`). Every key is optional so a
/// file only needs to mention what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    #[serde(default)]
    pub csv: Option<String>,

    #[serde(default)]
    pub src_base: Option<String>,

    #[serde(default)]
    pub dst_base: Option<String>,

    #[serde(default)]
    pub copy_only: Option<bool>,

    /// Set to false to process a single manifest without markers
    #[serde(default)]
    pub bookkeeping: Option<bool>,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// debug, info, warn or error
    #[serde(default)]
    pub level: Option<String>,
}

impl FileConfig {
    /// Load config from the first directory in `search_dirs` holding a
    /// `renamefiles.toml`. Returns the default config if none does.
    pub fn discover(search_dirs: &[PathBuf]) -> Result<(Self, Option<PathBuf>)> {
        for dir in search_dirs {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::load_from_path(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::new("*.csv");
        assert_eq!(config.csv_pattern, "*.csv");
        assert_eq!(config.src_base, "");
        assert_eq!(config.dst_base, "");
        assert!(!config.copy_only);
        assert!(config.bookkeeping);
        assert_eq!(config.mode(), OperationMode::Rename);
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("in"), "in/");
        assert_eq!(normalize_base("in/"), "in/");
        assert_eq!(normalize_base("in///"), "in/");
        assert_eq!(normalize_base("/data/in"), "/data/in/");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base("///"), "/");
    }

    #[test]
    fn test_builder_normalizes_bases() {
        let config = Config::new("a.csv")
            .with_src_base("in//")
            .with_dst_base("out")
            .with_copy_only(true);
        assert_eq!(config.src_base, "in/");
        assert_eq!(config.dst_base, "out/");
        assert_eq!(config.mode(), OperationMode::Copy);
    }

    #[test]
    fn test_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            "csv = \"batch/*.csv\"\nsrc-base = \"/srv/in\"\ncopy-only = true\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let loaded = FileConfig::load_from_path(&config_path).unwrap();
        assert_eq!(
            loaded,
            FileConfig {
                csv: Some("batch/*.csv".to_string()),
                src_base: Some("/srv/in".to_string()),
                copy_only: Some(true),
                log: LogConfig {
                    level: Some("debug".to_string()),
                },
                ..FileConfig::default()
            }
        );
    }

    #[test]
    fn test_partial_config_uses_kebab_keys() {
        let toml_content = r#"
csv = "*.csv"
dst-base = "out"
copy-only = true

[log]
level = "warn"
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.csv.as_deref(), Some("*.csv"));
        assert_eq!(config.dst_base.as_deref(), Some("out"));
        assert_eq!(config.copy_only, Some(true));
        assert_eq!(config.src_base, None);
        assert_eq!(config.bookkeeping, None);
        assert_eq!(config.log.level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_discover_prefers_first_directory() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join(CONFIG_FILE_NAME), "csv = \"home.csv\"").unwrap();

        let (config, found) =
            FileConfig::discover(&[first.path().to_path_buf(), second.path().to_path_buf()])
                .unwrap();
        assert_eq!(config.csv.as_deref(), Some("home.csv"));
        assert_eq!(found, Some(second.path().join(CONFIG_FILE_NAME)));

        fs::write(first.path().join(CONFIG_FILE_NAME), "csv = \"local.csv\"").unwrap();
        let (config, _) =
            FileConfig::discover(&[first.path().to_path_buf(), second.path().to_path_buf()])
                .unwrap();
        assert_eq!(config.csv.as_deref(), Some("local.csv"));
    }

    #[test]
    fn test_discover_without_file_is_default() {
        let dir = TempDir::new().unwrap();
        let (config, found) = FileConfig::discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(found.is_none());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "csv = [").unwrap();

        let err = FileConfig::load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    proptest! {
        #[test]
        fn normalize_base_is_idempotent(base in "[a-z/]{0,12}") {
            let once = normalize_base(&base);
            prop_assert_eq!(normalize_base(&once), once.clone());
            if !base.is_empty() {
                prop_assert!(once.ends_with('/'));
                prop_assert!(!once.ends_with("//"));
            }
        }
    }
}
