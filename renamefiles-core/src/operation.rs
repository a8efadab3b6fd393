use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::RowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    Rename,
    Copy,
}

impl OperationMode {
    /// Verb used in the per-row log line
    pub fn verb(self) -> &'static str {
        match self {
            Self::Rename => "Renaming",
            Self::Copy => "Copying",
        }
    }
}

/// One manifest row turned into a concrete filesystem action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation {
    pub line_number: usize,
    pub from: PathBuf,
    pub to: PathBuf,
    pub mode: OperationMode,
}

impl ResolvedOperation {
    pub fn describe(&self) -> String {
        format!(
            "Line {}: {} {} to {}",
            self.line_number,
            self.mode.verb(),
            self.from.display(),
            self.to.display()
        )
    }

    pub fn execute(&self) -> Result<(), RowError> {
        match self.mode {
            OperationMode::Rename => fs::rename(&self.from, &self.to).map_err(|source| {
                RowError::Rename {
                    line: self.line_number,
                    from: self.from.clone(),
                    to: self.to.clone(),
                    source,
                }
            }),
            OperationMode::Copy => {
                let contents = fs::read(&self.from).map_err(|source| RowError::Read {
                    line: self.line_number,
                    path: self.from.clone(),
                    source,
                })?;
                write_file(&self.to, &contents).map_err(|source| RowError::Write {
                    line: self.line_number,
                    path: self.to.clone(),
                    source,
                })
            },
        }
    }
}

/// Write `contents` to `path`, creating it as 0644 on unix or truncating it.
pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}
