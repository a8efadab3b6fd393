use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid CSV pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("No CSV files found matching {pattern:?}")]
    NoManifests { pattern: String },

    #[error("Failed to open CSV file {}", path.display())]
    OpenManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read CSV file {} after line {line}", path.display())]
    MalformedRecord {
        path: PathBuf,
        /// Last row that parsed cleanly
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Why a manifest record could not be parsed.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("bare \" in non-quoted field at byte {offset}")]
    BareQuote { offset: usize },

    #[error("extraneous text after closing \" at byte {offset}")]
    TextAfterQuote { offset: usize },

    #[error("quoted field not closed before end of file")]
    UnterminatedQuote,
}

/// A failed manifest row. `Display` is the text written to the `.errors`
/// report; the underlying cause is only logged.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Line {line}: CSV row does not have at least two columns")]
    TooFewColumns { line: usize },

    #[error("Line {line}: Failed to read {}", path.display())]
    Read {
        line: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: Failed to write {}", path.display())]
    Write {
        line: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: Failed to rename {} to {}", from.display(), to.display())]
    Rename {
        line: usize,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RowError {
    /// Report text followed by the cause, for the log line
    pub fn detailed(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) => format!("{self}: {cause}"),
            None => self.to_string(),
        }
    }
}
