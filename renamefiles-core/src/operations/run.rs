use std::path::PathBuf;

use crate::config::Config;
use crate::error::RunError;
use crate::finalize::{finalize_manifest, Disposition};
use crate::manifest::process_manifest;
use crate::output::{ManifestReport, RunReport};
use crate::resolver::resolve_manifests;
use crate::sink::LogSink;

/// High-level run - equivalent to invoking `renamefiles`.
///
/// Manifests are handled one at a time in resolver order. A fatal condition
/// is logged through `sink` and returned at once; manifests not yet reached
/// are left alone.
pub fn run_operation(config: &Config, sink: &dyn LogSink) -> Result<RunReport, RunError> {
    run_manifests(config, sink).inspect_err(|err| sink.fatal(&fatal_message(err)))
}

fn run_manifests(config: &Config, sink: &dyn LogSink) -> Result<RunReport, RunError> {
    let manifests = if config.bookkeeping {
        resolve_manifests(&config.csv_pattern)?
    } else {
        vec![PathBuf::from(&config.csv_pattern)]
    };

    let mut report = RunReport {
        mode: config.mode(),
        bookkeeping: config.bookkeeping,
        manifests: Vec::with_capacity(manifests.len()),
    };

    for manifest in &manifests {
        let outcome = process_manifest(manifest, config, sink)?;
        let disposition = if config.bookkeeping {
            finalize_manifest(&outcome, sink)
        } else {
            Disposition::Untracked
        };
        report.manifests.push(ManifestReport::new(outcome, disposition));
    }

    Ok(report)
}

fn fatal_message(err: &RunError) -> String {
    match std::error::Error::source(err) {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    }
}
