use crate::ports::outbound::DocumentReader;
use crate::shared::error::OvalError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_DOCUMENT_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for loading OVAL documents from disk
///
/// Returns raw bytes; UTF-8 decoding is left to the parser so that an
/// undecodable file is reported as malformed rather than unreadable.
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_DOCUMENT_SIZE,
        }
    }

    /// Overrides the size ceiling
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for FileSystemReader {
    fn read_document(&self, path: &Path) -> Result<Vec<u8>> {
        // follows symlinks; a dangling link counts as not found
        if fs::metadata(path).is_err() {
            return Err(OvalError::DocumentNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let size = validate_regular_file(path, "OVAL document")?;
        validate_file_size(size, path, self.max_size)?;

        fs::read(path).map_err(|e| {
            OvalError::DocumentReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rhel-7.oval.xml");
        fs::write(&path, "<oval_definitions/>").unwrap();

        let reader = FileSystemReader::new();
        let content = reader.read_document(&path).unwrap();

        assert_eq!(content, b"<oval_definitions/>");
    }

    #[test]
    fn test_read_document_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_document(&temp_dir.path().join("missing.xml"));

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OvalError>(),
            Some(OvalError::DocumentNotFound { .. })
        ));
        assert!(err.to_string().contains("OVAL document not found"));
    }

    #[test]
    fn test_read_document_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_document(temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("is not a regular file"));
    }

    #[test]
    fn test_read_document_rejects_oversized_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.xml");
        fs::write(&path, vec![b' '; 64]).unwrap();

        let reader = FileSystemReader::new().with_max_size(16);
        let err = reader.read_document(&path).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OvalError>(),
            Some(OvalError::SecurityError { .. })
        ));
    }

    #[test]
    fn test_read_document_returns_non_utf8_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.xml");
        fs::write(&path, [0x3c, 0xe9, 0x3e]).unwrap();

        let content = FileSystemReader::new().read_document(&path).unwrap();
        assert_eq!(content, vec![0x3c, 0xe9, 0x3e]);
    }

    #[cfg(unix)]
    #[test]
    fn test_read_document_through_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("rhel-9.oval.xml");
        let link = temp_dir.path().join("current.xml");
        fs::write(&target, "<oval_definitions/>").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let content = FileSystemReader::new().read_document(&link).unwrap();
        assert_eq!(content, b"<oval_definitions/>");
    }

    #[cfg(unix)]
    #[test]
    fn test_read_document_dangling_symlink_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("current.xml");
        std::os::unix::fs::symlink(temp_dir.path().join("gone.xml"), &link).unwrap();

        let err = FileSystemReader::new().read_document(&link).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OvalError>(),
            Some(OvalError::DocumentNotFound { .. })
        ));
    }
}
