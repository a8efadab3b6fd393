use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::ManifestOutcome;
use crate::operation::write_file;
use crate::sink::LogSink;

pub const PROCESSED_SUFFIX: &str = ".processed";
pub const ERRORS_SUFFIX: &str = ".errors";

/// What happened to a manifest once its rows were attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    /// Renamed to `<name>.processed`
    Processed,
    /// Clean run, but the `.processed` rename failed
    MarkerFailed,
    /// `<name>.errors` written (or attempted); manifest left in place
    ErrorReport,
    /// Bookkeeping disabled
    Untracked,
}

/// `path` with `suffix` appended to its final component.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

pub fn processed_path(manifest: &Path) -> PathBuf {
    sibling_path(manifest, PROCESSED_SUFFIX)
}

pub fn errors_path(manifest: &Path) -> PathBuf {
    sibling_path(manifest, ERRORS_SUFFIX)
}

/// Mark a manifest as done, or write its error report.
///
/// Failures here are logged and never abort the run.
pub fn finalize_manifest(outcome: &ManifestOutcome, sink: &dyn LogSink) -> Disposition {
    let manifest = outcome.manifest.as_path();

    if outcome.is_success() {
        let target = processed_path(manifest);
        if let Err(e) = fs::rename(manifest, &target) {
            sink.error(&format!(
                "Failed to rename {} to {}: {}",
                manifest.display(),
                target.display(),
                e
            ));
            return Disposition::MarkerFailed;
        }
        return Disposition::Processed;
    }

    let target = errors_path(manifest);
    let report = outcome.errors.join("\n");
    if let Err(e) = write_file(&target, report.as_bytes()) {
        sink.error(&format!("Failed to write {}: {}", target.display(), e));
    }
    Disposition::ErrorReport
}
