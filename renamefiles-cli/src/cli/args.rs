use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

use super::types::OutputFormat;

/// Rename files based on a CSV.
///
/// Each row of the CSV names a file in column 0 and its new name in column 1.
/// Successful manifests are renamed to `<name>.processed`; failed rows are
/// listed in `<name>.errors` next to the manifest, which is left in place.
#[derive(Parser, Debug)]
#[command(name = "renamefiles")]
#[command(author, version, about)]
pub struct Cli {
    /// The CSV file(s) to use for renaming. Wildcards are expanded.
    #[arg(long, env = "RENAMEFILES_CSV", value_name = "PATTERN")]
    pub csv: Option<String>,

    /// Optional base path for source files
    #[arg(long, env = "RENAMEFILES_SRC_BASE", value_name = "DIR")]
    pub src_base: Option<String>,

    /// Optional base path for destination files
    #[arg(long, env = "RENAMEFILES_DST_BASE", value_name = "DIR")]
    pub dst_base: Option<String>,

    /// Copy files instead of moving them (`--copy-only=false` overrides the config file)
    #[arg(
        long,
        env = "RENAMEFILES_COPY_ONLY",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub copy_only: Option<bool>,

    /// Treat --csv as a single literal path and skip the .processed/.errors markers
    #[arg(
        long,
        env = "RENAMEFILES_NO_BOOKKEEPING",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub no_bookkeeping: Option<bool>,

    /// Config file (default is renamefiles.toml in the current directory or $HOME/)
    #[arg(short = 'c', long, env = "RENAMEFILES_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, env = "RENAMEFILES_LOGLEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Format of the report printed after the run
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = BoolishValueParser::new())]
    pub no_color: bool,
}
