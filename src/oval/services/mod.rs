pub mod criteria_walker;
pub mod index_builder;
pub mod reference_resolver;

pub use criteria_walker::{CriteriaNode, CriteriaVisitor, CriteriaWalker};
pub use index_builder::{DocumentIndex, DuplicateIdentifier};
pub use reference_resolver::{
    CheckResolution, DefinitionResolution, ReferenceResolver, ResolutionPolicy, ResolvedCheck,
    ResolvedNode, UnresolvedReference,
};
