use crate::shared::error::OvalError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum OVAL document size (512 MB)
///
/// Vendor feeds for a whole distribution release run to a few hundred megabytes
/// uncompressed; anything larger is refused before it is loaded into memory.
pub const MAX_DOCUMENT_SIZE: u64 = 512 * 1024 * 1024;

/// Validates that a path exists and resolves to a regular file
///
/// Symbolic links are followed, so `current.xml -> rhel-9.oval.xml` is accepted
/// as long as the target is a regular file.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "OVAL document", "config file")
///
/// # Errors
/// Returns an error if:
/// - The path (or the link target) doesn't exist
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| OvalError::DocumentReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if !metadata.is_file() {
        return Err(OvalError::DocumentReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", path.display()),
        }
        .into());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(OvalError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the feed or pass a per-release OVAL file".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("oval.xml");
        fs::write(&file_path, "<oval_definitions/>").unwrap();

        let size = validate_regular_file(&file_path, "OVAL document").unwrap();
        assert_eq!(size, 19);
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "OVAL document");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/oval.xml");
        let result = validate_regular_file(&path, "OVAL document");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read OVAL document metadata"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_regular_file_follows_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.xml");
        fs::write(&target, "<oval_definitions/>").unwrap();
        let link = temp_dir.path().join("link.xml");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let size = validate_regular_file(&link, "OVAL document").unwrap();
        assert_eq!(size, 19);
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_regular_file_symlink_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("feeds");
        std::os::unix::fs::symlink(temp_dir.path(), &link).unwrap();

        let result = validate_regular_file(&link, "OVAL document");
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_file_size_within_limit() {
        let path = PathBuf::from("/test/oval.xml");
        assert!(validate_file_size(1000, &path, MAX_DOCUMENT_SIZE).is_ok());
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/oval.xml");
        let result = validate_file_size(MAX_DOCUMENT_SIZE + 1, &path, MAX_DOCUMENT_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }
}
