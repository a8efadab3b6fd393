use anyhow::{anyhow, Result};
use renamefiles_core::{Config, FileConfig, CONFIG_FILE_NAME};
use std::path::PathBuf;

use crate::cli::{Cli, LogLevel};

/// Everything the run needs, resolved once from flags, environment and
/// config file (in that order of precedence).
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub log_level: LogLevel,
    pub config_file: Option<PathBuf>,
}

/// Directories searched for `renamefiles.toml` when `--config` is absent
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs
}

pub fn resolve(cli: &Cli, search_dirs: &[PathBuf]) -> Result<Settings> {
    let (file, config_file) = match &cli.config {
        Some(path) => (FileConfig::load_from_path(path)?, Some(path.clone())),
        None => FileConfig::discover(search_dirs)?,
    };

    let csv = non_empty(cli.csv.as_deref())
        .or_else(|| non_empty(file.csv.as_deref()))
        .ok_or_else(|| {
            anyhow!(
                "No CSV pattern given: pass --csv, set RENAMEFILES_CSV or add `csv` to {}",
                CONFIG_FILE_NAME
            )
        })?;

    let src_base = cli.src_base.as_deref().or(file.src_base.as_deref()).unwrap_or("");
    let dst_base = cli.dst_base.as_deref().or(file.dst_base.as_deref()).unwrap_or("");

    let config = Config::new(csv)
        .with_src_base(src_base)
        .with_dst_base(dst_base)
        .with_copy_only(cli.copy_only.or(file.copy_only).unwrap_or(false))
        .with_bookkeeping(
            cli.no_bookkeeping
                .map(|skip| !skip)
                .or(file.bookkeeping)
                .unwrap_or(true),
        );

    let log_level = cli
        .log_level
        .as_deref()
        .or(file.log.level.as_deref())
        .map_or_else(LogLevel::default, LogLevel::parse_lenient);

    Ok(Settings {
        config,
        log_level,
        config_file,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
