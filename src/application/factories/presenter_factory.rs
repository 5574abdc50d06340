use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for PresenterType {
    fn from(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => PresenterType::File(path),
            None => PresenterType::Stdout,
        }
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use oval_rpm::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presenter_type_from_output_option() {
        assert_eq!(PresenterType::from(None::<PathBuf>), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from(Some(PathBuf::from("report.md"))),
            PresenterType::File(PathBuf::from("report.md"))
        );
    }

    #[test]
    fn test_create_file_presenter_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");

        PresenterFactory::create(PresenterType::File(path.clone()))
            .present("No definitions found.\n")
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "No definitions found.\n"
        );
    }

    #[test]
    fn test_create_stdout_presenter() {
        let presenter = PresenterFactory::create(PresenterType::Stdout);
        assert!(presenter.present("").is_ok());
    }
}
