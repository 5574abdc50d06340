/// An `rpminfo_object`: the package to inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmInfoObject {
    id: String,
    version: Option<String>,
    name: String,
}

impl RpmInfoObject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
            name: name.into(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// RPM package name, e.g. `openssl-libs`
    pub fn name(&self) -> &str {
        &self.name
    }
}
