use oval_rpm::prelude::*;
use std::path::Path;

/// Mock DocumentReader serving in-memory XML
pub struct MockDocumentReader {
    content: Vec<u8>,
    should_fail: bool,
}

impl MockDocumentReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into().into_bytes(),
            should_fail: false,
        }
    }

    pub fn from_bytes(content: Vec<u8>) -> Self {
        Self {
            content,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: Vec::new(),
            should_fail: true,
        }
    }
}

impl DocumentReader for MockDocumentReader {
    fn read_document(&self, path: &Path) -> Result<Vec<u8>> {
        if self.should_fail {
            return Err(OvalError::DocumentReadError {
                path: path.to_path_buf(),
                details: "Mock read failure".to_string(),
            }
            .into());
        }
        Ok(self.content.clone())
    }
}
