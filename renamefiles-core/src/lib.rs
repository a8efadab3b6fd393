#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod finalize;
pub mod manifest;
pub mod operation;
pub mod operations;
pub mod output;
pub mod resolver;
pub mod sink;

pub use config::{normalize_base, Config, FileConfig, LogConfig, CONFIG_FILE_NAME};
pub use error::{RecordError, RowError, RunError};
pub use finalize::{errors_path, finalize_manifest, processed_path, Disposition};
pub use manifest::{process_manifest, ManifestOutcome, ManifestRow};
pub use operation::{OperationMode, ResolvedOperation};
pub use operations::run_operation;
pub use output::{ManifestReport, OutputFormat, OutputFormatter, RunReport};
pub use resolver::resolve_manifests;
pub use sink::{Level, LogSink, MemorySink, TracingSink};
