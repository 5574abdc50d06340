use crate::shared::Result;
use std::path::Path;

/// DocumentReader port for loading raw OVAL document bytes
///
/// This port abstracts where the document comes from (local file today).
/// The bytes are handed to a `DocumentParser` untouched.
pub trait DocumentReader {
    /// Reads the complete document at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The document does not exist
    /// - The path is not a regular file or is a symbolic link
    /// - The file exceeds the size limit or cannot be read
    fn read_document(&self, path: &Path) -> Result<Vec<u8>>;
}
