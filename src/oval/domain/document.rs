use super::{Definition, RpmInfoObject, RpmInfoState, RpmInfoTest};

/// Producer metadata from the `<generator>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generator {
    product_name: Option<String>,
    product_version: Option<String>,
    schema_version: Option<String>,
    timestamp: Option<String>,
}

impl Generator {
    pub fn new(product_name: Option<String>, product_version: Option<String>) -> Self {
        Self {
            product_name,
            product_version,
            ..Self::default()
        }
    }

    pub fn with_schema_version(mut self, schema_version: Option<String>) -> Self {
        self.schema_version = schema_version;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn product_version(&self) -> Option<&str> {
        self.product_version.as_deref()
    }

    /// OVAL schema version the producer targeted, e.g. `5.10`
    pub fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// Document aggregate: everything parsed from one OVAL definitions file
///
/// Built once per parse and read-only afterwards. Identifiers inside `tests`,
/// `objects` and `states` are lookup keys; uniqueness is checked when the
/// `DocumentIndex` is built, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    generator: Option<Generator>,
    definitions: Vec<Definition>,
    tests: Vec<RpmInfoTest>,
    objects: Vec<RpmInfoObject>,
    states: Vec<RpmInfoState>,
}

impl Document {
    pub fn new(
        generator: Option<Generator>,
        definitions: Vec<Definition>,
        tests: Vec<RpmInfoTest>,
        objects: Vec<RpmInfoObject>,
        states: Vec<RpmInfoState>,
    ) -> Self {
        Self {
            generator,
            definitions,
            tests,
            objects,
            states,
        }
    }

    pub fn generator(&self) -> Option<&Generator> {
        self.generator.as_ref()
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn tests(&self) -> &[RpmInfoTest] {
        &self.tests
    }

    pub fn objects(&self) -> &[RpmInfoObject] {
        &self.objects
    }

    pub fn states(&self) -> &[RpmInfoState] {
        &self.states
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
            && self.tests.is_empty()
            && self.objects.is_empty()
            && self.states.is_empty()
    }
}
