//! File I/O utilities with atomic writes
//!
//! The ledger is written to a temp sibling and renamed into place, so a
//! failed write never leaves a half-written ledger behind. A permission
//! failure on the destination is reported as [`PassbookError::FileLocked`]:
//! on Windows that is what a spreadsheet holding the CSV open looks like.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PassbookError, PassbookResult};

/// Temp file used while writing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file atomically (write to temp, then rename)
pub fn write_atomic<P, F>(path: P, write: F) -> PassbookResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> PassbookResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                PassbookError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let temp_path = temp_path(path);

    let file = File::create(&temp_path).map_err(|e| locked_or(e, path, "create temp file"))?;

    let mut writer = BufWriter::new(file);
    let written = write(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| PassbookError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| PassbookError::Storage(format!("Failed to sync data: {}", e)))
    });
    drop(writer);

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        locked_or(e, path, "replace")
    })?;

    Ok(())
}

fn locked_or(err: io::Error, path: &Path, what: &str) -> PassbookError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        PassbookError::FileLocked(path.to_path_buf())
    } else {
        PassbookError::Storage(format!("Failed to {} {}: {}", what, path.display(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");

        write_atomic(&path, |w| {
            w.write_all(b"DATE,AMT\n")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "DATE,AMT\n");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");

        write_atomic(&path, |w| {
            w.write_all(b"x")?;
            Ok(())
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_failed_write_keeps_original() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");
        fs::write(&path, "original").unwrap();

        let result = write_atomic(&path, |_| Err(PassbookError::Storage("boom".into())));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("ledger.csv");

        write_atomic(&path, |w| {
            w.write_all(b"x")?;
            Ok(())
        })
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/bank_account_testing_won.csv");
        assert_eq!(
            temp_path(path),
            PathBuf::from("/data/bank_account_testing_won.csv.tmp")
        );
    }

    #[test]
    fn test_permission_denied_maps_to_locked() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "in use");
        assert!(locked_or(err, Path::new("a.csv"), "replace").is_file_locked());
        let other = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(!locked_or(other, Path::new("a.csv"), "replace").is_file_locked());
    }
}
