use crate::oval::domain::{Document, EntityKind, RpmInfoObject, RpmInfoState, RpmInfoTest};
use crate::shared::error::OvalError;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

/// An identifier declared more than once within one collection
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("duplicate {kind} identifier '{id}'")]
pub struct DuplicateIdentifier {
    pub kind: EntityKind,
    pub id: String,
}

impl DuplicateIdentifier {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Identifier → entity lookup over a parsed document
///
/// Borrows from the `Document` it was built from and never changes afterwards.
#[derive(Debug)]
pub struct DocumentIndex<'doc> {
    tests: HashMap<&'doc str, &'doc RpmInfoTest>,
    objects: HashMap<&'doc str, &'doc RpmInfoObject>,
    states: HashMap<&'doc str, &'doc RpmInfoState>,
}

impl<'doc> DocumentIndex<'doc> {
    /// Builds the three lookup tables
    ///
    /// All collections are scanned completely before failing, so the returned
    /// `OvalError::DuplicateIdentifiers` lists every duplicate in the document,
    /// ordered tests, objects, states and then by document position. The first
    /// declaration of an identifier is never overwritten.
    pub fn build(document: &'doc Document) -> Result<Self, OvalError> {
        let mut duplicates = Vec::new();

        let tests = Self::index_collection(
            document.tests(),
            EntityKind::Test,
            RpmInfoTest::id,
            &mut duplicates,
        );
        let objects = Self::index_collection(
            document.objects(),
            EntityKind::Object,
            RpmInfoObject::id,
            &mut duplicates,
        );
        let states = Self::index_collection(
            document.states(),
            EntityKind::State,
            RpmInfoState::id,
            &mut duplicates,
        );

        if !duplicates.is_empty() {
            return Err(OvalError::DuplicateIdentifiers { duplicates });
        }

        Ok(Self {
            tests,
            objects,
            states,
        })
    }

    fn index_collection<T>(
        entities: &'doc [T],
        kind: EntityKind,
        id_of: fn(&T) -> &str,
        duplicates: &mut Vec<DuplicateIdentifier>,
    ) -> HashMap<&'doc str, &'doc T> {
        let mut index = HashMap::with_capacity(entities.len());
        for entity in entities {
            match index.entry(id_of(entity)) {
                Entry::Occupied(entry) => {
                    duplicates.push(DuplicateIdentifier::new(kind, *entry.key()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(entity);
                }
            }
        }
        index
    }

    pub fn test(&self, id: &str) -> Option<&'doc RpmInfoTest> {
        self.tests.get(id).copied()
    }

    pub fn object(&self, id: &str) -> Option<&'doc RpmInfoObject> {
        self.objects.get(id).copied()
    }

    pub fn state(&self, id: &str) -> Option<&'doc RpmInfoState> {
        self.states.get(id).copied()
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
