use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    pub fn path(&self) -> &Path {
        match self {
            EmitError::Open { path, .. } | EmitError::Write { path, .. } => path,
        }
    }
}

/// Append-only CSV log. Holds only the path; every append opens and closes
/// the file so no handle outlives a tick.
#[derive(Debug, Clone)]
pub struct TelemetryLog {
    path: PathBuf,
}

impl TelemetryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens for append, creating the file if it is missing.
    pub fn open(&self) -> Result<LogHandle<'_>, EmitError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| EmitError::Open {
                path: self.path.clone(),
                source,
            })?;
        Ok(LogHandle {
            file,
            path: &self.path,
        })
    }
}

/// An open append handle. Dropping it closes the file.
pub struct LogHandle<'a> {
    file: File,
    path: &'a Path,
}

impl LogHandle<'_> {
    pub fn append_line(&mut self, line: &str) -> Result<(), EmitError> {
        self.file
            .write_all(line.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|source| EmitError::Write {
                path: self.path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_append_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "existing\n").unwrap();

        let log = TelemetryLog::new(&path);
        log.open().unwrap().append_line("a\n").unwrap();
        log.open().unwrap().append_line("b\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\na\nb\n");
    }

    #[test]
    fn test_open_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let log = TelemetryLog::new(dir.path());
        let err = log.open().err().unwrap();
        assert!(matches!(err, EmitError::Open { .. }));
        assert_eq!(err.path(), dir.path());
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }
}
