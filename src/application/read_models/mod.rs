//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized, owned representation of an analyzed document.

pub mod definition_view;
pub mod entity_view;
pub mod report_read_model;
pub mod report_read_model_builder;

pub use definition_view::{
    AdvisoryView, CheckView, CriteriaNodeView, CveView, DefinitionView, ReferenceView,
    ResolutionStatus,
};
pub use entity_view::{ComparisonView, ObjectView, StateView, TestView};
pub use report_read_model::{GeneratorView, ReportMetadataView, ReportReadModel, ReportSummary};
pub use report_read_model_builder::ReportReadModelBuilder;
