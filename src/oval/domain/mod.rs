pub mod criteria;
pub mod definition;
pub mod document;
pub mod entity_kind;
pub mod rpminfo_object;
pub mod rpminfo_state;

pub use criteria::{Criteria, CriteriaChild, CriteriaOperator, Criterion};
pub use definition::{Advisory, AdvisoryCve, Definition, Metadata, Reference};
pub use document::{Document, Generator};
pub use entity_kind::EntityKind;
pub use rpminfo_object::RpmInfoObject;
pub use rpminfo_state::{EvrComparison, RpmInfoState, VersionComparison, DEFAULT_OPERATION};
pub use rpminfo_test::{CheckEnumeration, RpmInfoTest};
