/// OVAL default for the `operation` attribute when a producer omits it
pub const DEFAULT_OPERATION: &str = "equals";

/// Requested comparison against the package's epoch:version-release
///
/// Only records what was asked for. Computing the comparison is left to an
/// external evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvrComparison {
    datatype: Option<String>,
    operation: String,
    value: String,
}

impl EvrComparison {
    pub fn new(
        datatype: Option<String>,
        operation: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            datatype,
            operation: operation.into(),
            value: value.into(),
        }
    }

    /// Usually `evr_string`
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Requested comparison against the plain package version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComparison {
    operation: String,
    value: String,
}

impl VersionComparison {
    pub fn new(operation: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            value: value.into(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An `rpminfo_state`: the version condition a test checks
///
/// Both axes are optional. `None` means the axis is not compared at all, it never
/// means "matches anything".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmInfoState {
    id: String,
    version: Option<String>,
    evr: Option<EvrComparison>,
    version_check: Option<VersionComparison>,
}

impl RpmInfoState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
            evr: None,
            version_check: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_evr(mut self, evr: EvrComparison) -> Self {
        self.evr = Some(evr);
        self
    }

    pub fn with_version_check(mut self, version_check: VersionComparison) -> Self {
        self.version_check = Some(version_check);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn evr(&self) -> Option<&EvrComparison> {
        self.evr.as_ref()
    }

    pub fn version_check(&self) -> Option<&VersionComparison> {
        self.version_check.as_ref()
    }

    /// True when neither the EVR nor the version axis is compared
    pub fn has_no_comparison(&self) -> bool {
        self.evr.is_none() && self.version_check.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_with_evr_only() {
        let state = RpmInfoState::new("ste:1").with_evr(EvrComparison::new(
            Some("evr_string".to_string()),
            "less than",
            "0:1.0.2k-16.el7",
        ));

        let evr = state.evr().unwrap();
        assert_eq!(evr.datatype(), Some("evr_string"));
        assert_eq!(evr.operation(), "less than");
        assert_eq!(evr.value(), "0:1.0.2k-16.el7");
        assert!(state.version_check().is_none());
        assert!(!state.has_no_comparison());
    }

    #[test]
    fn test_state_without_comparisons() {
        let state = RpmInfoState::new("ste:2").with_version("1");
        assert!(state.has_no_comparison());
        assert_eq!(state.version(), Some("1"));
    }

    #[test]
    fn test_state_with_version_check() {
        let state =
            RpmInfoState::new("ste:3").with_version_check(VersionComparison::new("pattern match", "^7[^\\d]"));
        let check = state.version_check().unwrap();
        assert_eq!(check.operation(), "pattern match");
        assert_eq!(check.value(), "^7[^\\d]");
    }
}
