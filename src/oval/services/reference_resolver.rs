use super::criteria_walker::{CriteriaVisitor, CriteriaWalker};
use super::index_builder::DocumentIndex;
use crate::oval::domain::{
    Criteria, Criterion, Definition, EntityKind, RpmInfoObject, RpmInfoState, RpmInfoTest,
};
use serde::Serialize;
use std::ops::ControlFlow;
use thiserror::Error;

/// A test, object or state identifier that is not declared in the document
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("unresolved {kind} reference '{id}' from {referenced_by}")]
pub struct UnresolvedReference {
    pub kind: EntityKind,
    pub id: String,
    /// The entity holding the dangling reference, e.g. `test 'tst:1'`
    pub referenced_by: String,
}

/// A criterion with its test, object and state dereferenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCheck<'doc> {
    criterion: &'doc Criterion,
    test: &'doc RpmInfoTest,
    object: &'doc RpmInfoObject,
    state: &'doc RpmInfoState,
}

impl<'doc> ResolvedCheck<'doc> {
    pub fn criterion(&self) -> &'doc Criterion {
        self.criterion
    }

    pub fn test(&self) -> &'doc RpmInfoTest {
        self.test
    }

    pub fn object(&self) -> &'doc RpmInfoObject {
        self.object
    }

    pub fn state(&self) -> &'doc RpmInfoState {
        self.state
    }
}

/// What to do when a criterion of a definition cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Keep resolving the remaining criteria and report every broken reference
    #[default]
    CollectAll,
    /// Stop at the first criterion that fails to resolve
    FailFast,
}

/// Outcome of resolving a single criterion
pub type CheckResolution<'doc> = Result<ResolvedCheck<'doc>, Vec<UnresolvedReference>>;

/// Pre-order node of a resolved criteria tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedNode<'doc> {
    Operator {
        criteria: &'doc Criteria,
        depth: usize,
    },
    Check {
        criterion: &'doc Criterion,
        depth: usize,
        resolution: CheckResolution<'doc>,
    },
}

/// Every resolved check and every broken reference of one definition
#[derive(Debug, Clone)]
pub struct DefinitionResolution<'doc> {
    definition: &'doc Definition,
    nodes: Vec<ResolvedNode<'doc>>,
    unresolved: Vec<UnresolvedReference>,
    complete: bool,
}

impl<'doc> DefinitionResolution<'doc> {
    pub fn definition(&self) -> &'doc Definition {
        self.definition
    }

    /// Pre-order traversal, operator before children, children in document order
    pub fn nodes(&self) -> &[ResolvedNode<'doc>] {
        &self.nodes
    }

    pub fn checks(&self) -> impl Iterator<Item = &ResolvedCheck<'doc>> {
        self.nodes.iter().filter_map(|node| match node {
            ResolvedNode::Check {
                resolution: Ok(check),
                ..
            } => Some(check),
            _ => None,
        })
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// False when a fail-fast walk stopped before the end of the tree
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Resolves criterion test references through a `DocumentIndex`
///
/// Pure function of the index: resolving the same criterion twice yields the same
/// result, and a missing identifier never falls back to a default entity.
pub struct ReferenceResolver<'idx, 'doc> {
    index: &'idx DocumentIndex<'doc>,
    policy: ResolutionPolicy,
}

impl<'idx, 'doc> ReferenceResolver<'idx, 'doc> {
    pub fn new(index: &'idx DocumentIndex<'doc>) -> Self {
        Self {
            index,
            policy: ResolutionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Resolves one criterion
    ///
    /// # Errors
    /// Returns every missing identifier: the test alone when the test is missing,
    /// otherwise the object and/or the state the test points at.
    pub fn resolve(&self, criterion: &'doc Criterion) -> CheckResolution<'doc> {
        let Some(test) = self.index.test(criterion.test_ref()) else {
            return Err(vec![UnresolvedReference {
                kind: EntityKind::Test,
                id: criterion.test_ref().to_string(),
                referenced_by: describe_criterion(criterion),
            }]);
        };

        let object = self.index.object(test.object_ref());
        let state = self.index.state(test.state_ref());

        match (object, state) {
            (Some(object), Some(state)) => Ok(ResolvedCheck {
                criterion,
                test,
                object,
                state,
            }),
            (object, state) => {
                let referenced_by = format!("test '{}'", test.id());
                let mut missing = Vec::new();
                if object.is_none() {
                    missing.push(UnresolvedReference {
                        kind: EntityKind::Object,
                        id: test.object_ref().to_string(),
                        referenced_by: referenced_by.clone(),
                    });
                }
                if state.is_none() {
                    missing.push(UnresolvedReference {
                        kind: EntityKind::State,
                        id: test.state_ref().to_string(),
                        referenced_by,
                    });
                }
                Err(missing)
            }
        }
    }

    /// Walks a definition's criteria tree, resolving every criterion on the way
    pub fn resolve_definition(&self, definition: &'doc Definition) -> DefinitionResolution<'doc> {
        let mut collector = ResolvingVisitor {
            resolver: self,
            nodes: Vec::new(),
            unresolved: Vec::new(),
        };
        let flow = match definition.criteria() {
            Some(root) => CriteriaWalker::walk(root, &mut collector),
            None => ControlFlow::Continue(()),
        };

        DefinitionResolution {
            definition,
            nodes: collector.nodes,
            unresolved: collector.unresolved,
            complete: flow.is_continue(),
        }
    }
}

struct ResolvingVisitor<'r, 'idx, 'doc> {
    resolver: &'r ReferenceResolver<'idx, 'doc>,
    nodes: Vec<ResolvedNode<'doc>>,
    unresolved: Vec<UnresolvedReference>,
}

impl<'doc> CriteriaVisitor<'doc> for ResolvingVisitor<'_, '_, 'doc> {
    fn enter_criteria(&mut self, criteria: &'doc Criteria, depth: usize) -> ControlFlow<()> {
        self.nodes.push(ResolvedNode::Operator { criteria, depth });
        ControlFlow::Continue(())
    }

    fn visit_criterion(&mut self, criterion: &'doc Criterion, depth: usize) -> ControlFlow<()> {
        let resolution = self.resolver.resolve(criterion);
        let failed = resolution.is_err();
        if let Err(missing) = &resolution {
            self.unresolved.extend(missing.iter().cloned());
        }
        self.nodes.push(ResolvedNode::Check {
            criterion,
            depth,
            resolution,
        });

        if failed && self.resolver.policy == ResolutionPolicy::FailFast {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

fn describe_criterion(criterion: &Criterion) -> String {
    if criterion.comment().is_empty() {
        "criterion".to_string()
    } else {
        format!("criterion \"{}\"", criterion.comment())
    }
}
