use nu_ansi_term::Color;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

use crate::finalize::{errors_path, processed_path, Disposition};
use crate::manifest::ManifestOutcome;
use crate::operation::OperationMode;

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Per-manifest line of a run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    pub manifest: PathBuf,
    pub rows: usize,
    pub errors: Vec<String>,
    pub disposition: Disposition,
}

impl ManifestReport {
    pub fn new(outcome: ManifestOutcome, disposition: Disposition) -> Self {
        Self {
            manifest: outcome.manifest,
            rows: outcome.rows,
            errors: outcome.errors,
            disposition,
        }
    }

    /// Where the manifest, or its report, can be found after the run
    pub fn artifact(&self) -> Option<PathBuf> {
        match self.disposition {
            Disposition::Processed => Some(processed_path(&self.manifest)),
            Disposition::ErrorReport => Some(errors_path(&self.manifest)),
            Disposition::MarkerFailed | Disposition::Untracked => None,
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub mode: OperationMode,
    pub bookkeeping: bool,
    pub manifests: Vec<ManifestReport>,
}

impl RunReport {
    pub fn total_rows(&self) -> usize {
        self.manifests.iter().map(|m| m.rows).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.manifests.iter().map(|m| m.errors.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_errors() == 0
    }

    pub fn format_summary_with_color(&self, use_color: bool) -> String {
        let paint = |color: Color, text: &str| {
            if use_color {
                color.paint(text).to_string()
            } else {
                text.to_string()
            }
        };

        let mut output = String::new();
        for report in &self.manifests {
            let (mark, color) = if report.errors.is_empty() {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };

            let _ = write!(
                output,
                "{} {}: {} rows",
                paint(color, mark),
                report.manifest.display(),
                report.rows
            );
            if !report.errors.is_empty() {
                let _ = write!(output, ", {} errors", report.errors.len());
            }
            match (report.disposition, report.artifact()) {
                (_, Some(artifact)) => {
                    let _ = write!(output, " -> {}", artifact.display());
                },
                (Disposition::MarkerFailed, None) => {
                    let _ = write!(output, " {}", paint(Color::Yellow, "(not marked processed)"));
                },
                _ => {},
            }
            output.push('\n');
        }

        let verb = match self.mode {
            OperationMode::Rename => "Renamed",
            OperationMode::Copy => "Copied",
        };
        let _ = writeln!(
            output,
            "{} {} of {} rows across {} manifests",
            verb,
            self.total_rows().saturating_sub(self.total_errors()),
            self.total_rows(),
            self.manifests.len()
        );

        output
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    mode: OperationMode,
    bookkeeping: bool,
    summary: JsonSummary,
    manifests: &'a [ManifestReport],
}

#[derive(Serialize)]
struct JsonSummary {
    manifests: usize,
    rows: usize,
    errors: usize,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RunReport {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        let document = JsonReport {
            success: self.is_clean(),
            mode: self.mode,
            bookkeeping: self.bookkeeping,
            summary: JsonSummary {
                manifests: self.manifests.len(),
                rows: self.total_rows(),
                errors: self.total_errors(),
            },
            manifests: &self.manifests,
        };

        serde_json::to_string(&document).unwrap_or_else(|e| {
            json!({
                "success": false,
                "error": format!("Failed to serialize report: {e}"),
            })
            .to_string()
        })
    }

    fn format_summary(&self) -> String {
        self.format_summary_with_color(false)
    }
}
