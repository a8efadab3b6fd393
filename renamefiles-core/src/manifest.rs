use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{RecordError, RowError, RunError};
use crate::operation::ResolvedOperation;
use crate::sink::LogSink;

/// A parsed manifest record with its 1-based record number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub line_number: usize,
    pub columns: Vec<String>,
}

impl ManifestRow {
    pub fn from_record(line_number: usize, record: &StringRecord) -> Self {
        Self {
            line_number,
            columns: record.iter().map(str::to_string).collect(),
        }
    }

    /// Build the filesystem action for this row. Columns past the second are
    /// ignored.
    pub fn resolve(&self, config: &Config) -> Result<ResolvedOperation, RowError> {
        match self.columns.as_slice() {
            [source, destination, ..] => Ok(ResolvedOperation {
                line_number: self.line_number,
                from: PathBuf::from(format!("{}{}", config.src_base, source)),
                to: PathBuf::from(format!("{}{}", config.dst_base, destination)),
                mode: config.mode(),
            }),
            _ => Err(RowError::TooFewColumns {
                line: self.line_number,
            }),
        }
    }
}

/// Result of processing one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestOutcome {
    pub manifest: PathBuf,
    /// Records read, valid or not
    pub rows: usize,
    pub errors: Vec<String>,
}

impl ManifestOutcome {
    pub fn new(manifest: &Path) -> Self {
        Self {
            manifest: manifest.to_path_buf(),
            rows: 0,
            errors: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Locate the first quoting violation in raw manifest bytes.
///
/// The CSV reader accepts stray quotes leniently; manifests must not. Returns
/// the byte offset the offending record covers, along with the reason.
fn find_quoting_error(bytes: &[u8]) -> Option<(usize, RecordError)> {
    let start = if bytes.starts_with(b"\xef\xbb\xbf") { 3 } else { 0 };
    let mut state = QuoteState::FieldStart;
    let mut opened_at = 0;

    for (offset, &byte) in bytes.iter().enumerate().skip(start) {
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = offset;
                QuoteState::Quoted
            },
            (QuoteState::FieldStart | QuoteState::Unquoted, b',' | b'\r' | b'\n') => {
                QuoteState::FieldStart
            },
            (QuoteState::Unquoted, b'"') => {
                return Some((offset, RecordError::BareQuote { offset }));
            },
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',' | b'\r' | b'\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, _) => {
                return Some((offset, RecordError::TextAfterQuote { offset }));
            },
        };
    }

    match state {
        QuoteState::Quoted => Some((opened_at, RecordError::UnterminatedQuote)),
        _ => None,
    }
}

/// Apply every row of one manifest in file order.
///
/// Row failures are logged and collected, never returned. An unreadable
/// manifest or a malformed record (broken quoting, invalid UTF-8) ends
/// processing with a [`RunError`]; rows applied before that point stay
/// applied.
pub fn process_manifest(
    path: &Path,
    config: &Config,
    sink: &dyn LogSink,
) -> Result<ManifestOutcome, RunError> {
    sink.info(&format!("Reading CSV file: {}", path.display()));

    let contents = fs::read(path).map_err(|source| RunError::OpenManifest {
        path: path.to_path_buf(),
        source,
    })?;
    let mut quoting_error = find_quoting_error(&contents);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_slice());

    let mut outcome = ManifestOutcome::new(path);
    let mut record = StringRecord::new();

    loop {
        let malformed = match reader.read_record(&mut record) {
            Ok(true) => {
                let end = reader.position().byte();
                match quoting_error.take() {
                    Some((offset, err)) if end > offset as u64 => Some(err),
                    pending => {
                        quoting_error = pending;
                        None
                    },
                }
            },
            Ok(false) => break,
            Err(err) => Some(RecordError::from(err)),
        };
        if let Some(source) = malformed {
            return Err(RunError::MalformedRecord {
                path: path.to_path_buf(),
                line: outcome.rows,
                source,
            });
        }

        outcome.rows += 1;
        let row = ManifestRow::from_record(outcome.rows, &record);

        let operation = match row.resolve(config) {
            Ok(operation) => operation,
            Err(err) => {
                sink.warn(&err.to_string());
                outcome.errors.push(err.to_string());
                continue;
            },
        };

        sink.info(&operation.describe());

        if let Err(err) = operation.execute() {
            sink.error(&err.detailed());
            outcome.errors.push(err.to_string());
        }
    }

    Ok(outcome)
}
