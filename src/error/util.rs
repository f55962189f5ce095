//! Utility functions for error handling
//!
//! File access helpers that attach the path and the reason for the access
//! to any IO failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SurveyError};

fn io_error(path: &Path, purpose: &str, source: io::Error) -> SurveyError {
    SurveyError::Io {
        path: path.to_path_buf(),
        purpose: purpose.to_string(),
        source,
    }
}

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(io_error(
            path,
            purpose,
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        ));
    }

    if !path.is_file() {
        return Err(io_error(
            path,
            purpose,
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| io_error(path, purpose, e))
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let e = match e.kind() {
                io::ErrorKind::InvalidData => io::Error::new(
                    io::ErrorKind::InvalidData,
                    "file contains invalid UTF-8 data",
                ),
                _ => e,
            };
            Err(io_error(path, purpose, e))
        }
    }
}
