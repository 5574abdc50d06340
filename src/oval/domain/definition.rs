use super::Criteria;

/// External reference attached to a definition (informational, never resolved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    source: String,
    ref_id: Option<String>,
    ref_url: Option<String>,
}

impl Reference {
    pub fn new(source: impl Into<String>, ref_id: Option<String>, ref_url: Option<String>) -> Self {
        Self {
            source: source.into(),
            ref_id,
            ref_url,
        }
    }

    /// Reference source label, e.g. `RHSA` or `CVE`
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.as_deref()
    }

    pub fn ref_url(&self) -> Option<&str> {
        self.ref_url.as_deref()
    }
}

/// CVE entry listed inside a vendor advisory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryCve {
    id: String,
    href: Option<String>,
}

impl AdvisoryCve {
    pub fn new(id: impl Into<String>, href: Option<String>) -> Self {
        Self {
            id: id.into(),
            href,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }
}

/// Vendor advisory block (Red Hat and SUSE emit this inside metadata)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advisory {
    from: Option<String>,
    severity: Option<String>,
    rights: Option<String>,
    issued: Option<String>,
    updated: Option<String>,
    cves: Vec<AdvisoryCve>,
}

impl Advisory {
    pub fn new(from: Option<String>, severity: Option<String>) -> Self {
        Self {
            from,
            severity,
            ..Self::default()
        }
    }

    pub fn with_rights(mut self, rights: Option<String>) -> Self {
        self.rights = rights;
        self
    }

    /// Sets the `issued` and `updated` dates
    pub fn with_dates(mut self, issued: Option<String>, updated: Option<String>) -> Self {
        self.issued = issued;
        self.updated = updated;
        self
    }

    pub fn with_cves(mut self, cves: Vec<AdvisoryCve>) -> Self {
        self.cves = cves;
        self
    }

    /// Issuing contact, e.g. `secalert@redhat.com`
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    pub fn rights(&self) -> Option<&str> {
        self.rights.as_deref()
    }

    pub fn issued(&self) -> Option<&str> {
        self.issued.as_deref()
    }

    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    pub fn cves(&self) -> &[AdvisoryCve] {
        &self.cves
    }
}

/// Descriptive metadata of a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    title: String,
    description: String,
    references: Vec<Reference>,
    advisory: Option<Advisory>,
}

impl Metadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        references: Vec<Reference>,
        advisory: Option<Advisory>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            references,
            advisory,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }
}

/// One vulnerability definition: metadata plus the root of its criteria tree
///
/// Only deprecated definitions may lack a tree; the parser rejects any other
/// definition without `<criteria>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    id: Option<String>,
    class: Option<String>,
    version: Option<String>,
    deprecated: bool,
    metadata: Metadata,
    criteria: Option<Criteria>,
}

impl Definition {
    pub fn new(metadata: Metadata, criteria: Criteria) -> Self {
        Self {
            id: None,
            class: None,
            version: None,
            deprecated: false,
            metadata,
            criteria: Some(criteria),
        }
    }

    /// A deprecated definition that carries metadata only
    pub fn deprecated_without_criteria(metadata: Metadata) -> Self {
        Self {
            id: None,
            class: None,
            version: None,
            deprecated: true,
            metadata,
            criteria: None,
        }
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Attaches the `id`, `class` and `version` attributes used in diagnostics
    pub fn with_attributes(
        mut self,
        id: Option<String>,
        class: Option<String>,
        version: Option<String>,
    ) -> Self {
        self.id = id;
        self.class = class;
        self.version = version;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Definition class, e.g. `patch` or `vulnerability`
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn title(&self) -> &str {
        self.metadata.title()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Root of the criteria tree; `None` only for deprecated definitions
    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    /// Identifier for messages: the `id` attribute when present, the title otherwise
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or_else(|| self.metadata.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oval::domain::{CriteriaOperator, Criterion, CriteriaChild};

    fn definition() -> Definition {
        let metadata = Metadata::new(
            "RHSA-2019:2304: openssl security and bug fix update (Moderate)",
            "OpenSSL is a toolkit",
            vec![Reference::new(
                "RHSA",
                Some("RHSA-2019:2304".to_string()),
                Some("https://access.redhat.com/errata/RHSA-2019:2304".to_string()),
            )],
            None,
        );
        let criteria = Criteria::new(
            CriteriaOperator::And,
            vec![CriteriaChild::Criterion(Criterion::new("tst:1", "openssl"))],
        );
        Definition::new(metadata, criteria)
    }

    #[test]
    fn test_label_falls_back_to_title() {
        let def = definition();
        assert!(def.id().is_none());
        assert_eq!(def.label(), def.title());
    }

    #[test]
    fn test_label_prefers_id() {
        let def = definition().with_attributes(
            Some("oval:com.redhat.rhsa:def:20192304".to_string()),
            Some("patch".to_string()),
            Some("601".to_string()),
        );
        assert_eq!(def.label(), "oval:com.redhat.rhsa:def:20192304");
        assert_eq!(def.class(), Some("patch"));
        assert_eq!(def.version(), Some("601"));
    }

    #[test]
    fn test_metadata_references() {
        let def = definition();
        let reference = &def.metadata().references()[0];
        assert_eq!(reference.source(), "RHSA");
        assert_eq!(reference.ref_id(), Some("RHSA-2019:2304"));
        assert!(reference.ref_url().unwrap().contains("errata"));
        assert!(def.metadata().advisory().is_none());
    }

    #[test]
    fn test_advisory_builder() {
        let advisory = Advisory::new(
            Some("secalert@redhat.com".to_string()),
            Some("Moderate".to_string()),
        )
        .with_dates(Some("2019-08-06".to_string()), None)
        .with_cves(vec![AdvisoryCve::new("CVE-2018-0734", None)]);

        assert_eq!(advisory.from(), Some("secalert@redhat.com"));
        assert_eq!(advisory.severity(), Some("Moderate"));
        assert!(advisory.rights().is_none());
        assert_eq!(advisory.issued(), Some("2019-08-06"));
        assert!(advisory.updated().is_none());
        assert_eq!(advisory.cves()[0].id(), "CVE-2018-0734");
    }

    #[test]
    fn test_deprecated_definition_without_criteria() {
        let def = Definition::deprecated_without_criteria(Metadata::new(
            "legacy entry",
            "",
            vec![],
            None,
        ))
        .with_attributes(Some("def:1".to_string()), None, None);

        assert!(def.is_deprecated());
        assert!(def.criteria().is_none());
        assert_eq!(def.label(), "def:1");
    }
}
