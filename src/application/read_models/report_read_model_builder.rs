//! Builder for constructing ReportReadModel from domain objects
//!
//! Turns the parsed document plus the per-definition resolutions into the
//! owned read model consumed by formatters.

use super::definition_view::{
    AdvisoryView, CheckView, CriteriaNodeView, CveView, DefinitionView, ReferenceView,
    ResolutionStatus,
};
use super::entity_view::{ComparisonView, ObjectView, StateView, TestView};
use super::report_read_model::{GeneratorView, ReportMetadataView, ReportReadModel, ReportSummary};
use crate::oval::domain::{
    Advisory, Document, EvrComparison, Generator, RpmInfoObject, RpmInfoState, RpmInfoTest,
    VersionComparison,
};
use crate::oval::services::{DefinitionResolution, ResolvedCheck, ResolvedNode};
use chrono::{SecondsFormat, Utc};
use std::path::Path;

pub struct ReportReadModelBuilder;

impl ReportReadModelBuilder {
    /// Builds the read model
    ///
    /// # Arguments
    /// * `document` - The parsed document (source of the entity collections)
    /// * `resolutions` - One resolution per definition, in document order
    /// * `metadata` - Report metadata, see [`Self::generate_metadata`]
    pub fn build(
        document: &Document,
        resolutions: &[DefinitionResolution<'_>],
        metadata: ReportMetadataView,
    ) -> ReportReadModel {
        let definitions: Vec<DefinitionView> =
            resolutions.iter().map(Self::build_definition).collect();
        let tests: Vec<TestView> = document.tests().iter().map(Self::build_test).collect();
        let objects: Vec<ObjectView> = document.objects().iter().map(Self::build_object).collect();
        let states: Vec<StateView> = document.states().iter().map(Self::build_state).collect();

        let summary = Self::build_summary(resolutions, &definitions, &tests, &objects, &states);

        ReportReadModel {
            metadata,
            generator: document.generator().map(Self::build_generator),
            definitions,
            tests,
            objects,
            states,
            summary,
        }
    }

    /// Generates report metadata stamped with the current time
    pub fn generate_metadata(source: &Path) -> ReportMetadataView {
        ReportMetadataView {
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.display().to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    fn build_generator(generator: &Generator) -> GeneratorView {
        GeneratorView {
            product_name: generator.product_name().map(str::to_string),
            product_version: generator.product_version().map(str::to_string),
            schema_version: generator.schema_version().map(str::to_string),
            timestamp: generator.timestamp().map(str::to_string),
        }
    }

    fn build_definition(resolution: &DefinitionResolution<'_>) -> DefinitionView {
        let definition = resolution.definition();
        let metadata = definition.metadata();

        let status = if resolution.is_fully_resolved() {
            ResolutionStatus::Resolved
        } else {
            ResolutionStatus::PartiallyUnresolved
        };

        DefinitionView {
            id: definition.id().map(str::to_string),
            class: definition.class().map(str::to_string),
            version: definition.version().map(str::to_string),
            title: metadata.title().to_string(),
            description: metadata.description().to_string(),
            references: metadata
                .references()
                .iter()
                .map(|r| ReferenceView {
                    source: r.source().to_string(),
                    ref_id: r.ref_id().map(str::to_string),
                    ref_url: r.ref_url().map(str::to_string),
                })
                .collect(),
            advisory: metadata.advisory().map(Self::build_advisory),
            criteria: resolution.nodes().iter().map(Self::build_node).collect(),
            status,
            deprecated: definition.is_deprecated(),
            truncated: !resolution.is_complete(),
            unresolved: resolution.unresolved().to_vec(),
        }
    }

    fn build_advisory(advisory: &Advisory) -> AdvisoryView {
        AdvisoryView {
            from: advisory.from().map(str::to_string),
            severity: advisory.severity().map(str::to_string),
            rights: advisory.rights().map(str::to_string),
            issued: advisory.issued().map(str::to_string),
            updated: advisory.updated().map(str::to_string),
            cves: advisory
                .cves()
                .iter()
                .map(|cve| CveView {
                    id: cve.id().to_string(),
                    href: cve.href().map(str::to_string),
                })
                .collect(),
        }
    }

    fn build_node(node: &ResolvedNode<'_>) -> CriteriaNodeView {
        match node {
            ResolvedNode::Operator { criteria, depth } => CriteriaNodeView::Operator {
                depth: *depth,
                operator: criteria.operator().to_string(),
                negate: criteria.negate(),
                comment: criteria.comment().map(str::to_string),
            },
            ResolvedNode::Check {
                criterion,
                depth,
                resolution,
            } => {
                let (check, unresolved) = match resolution {
                    Ok(resolved) => (Some(Self::build_check(resolved)), Vec::new()),
                    Err(missing) => (None, missing.clone()),
                };
                CriteriaNodeView::Criterion {
                    depth: *depth,
                    test_ref: criterion.test_ref().to_string(),
                    comment: criterion.comment().to_string(),
                    negate: criterion.negate(),
                    check,
                    unresolved,
                }
            }
        }
    }

    fn build_check(resolved: &ResolvedCheck<'_>) -> CheckView {
        let state = resolved.state();
        CheckView {
            test_id: resolved.test().id().to_string(),
            check: resolved.test().check().to_string(),
            object_id: resolved.object().id().to_string(),
            package: resolved.object().name().to_string(),
            state_id: state.id().to_string(),
            evr: state.evr().map(Self::build_evr),
            version: state.version_check().map(Self::build_version),
        }
    }

    fn build_evr(evr: &EvrComparison) -> ComparisonView {
        ComparisonView {
            datatype: evr.datatype().map(str::to_string),
            operation: evr.operation().to_string(),
            value: evr.value().to_string(),
        }
    }

    fn build_version(version: &VersionComparison) -> ComparisonView {
        ComparisonView {
            datatype: None,
            operation: version.operation().to_string(),
            value: version.value().to_string(),
        }
    }

    fn build_test(test: &RpmInfoTest) -> TestView {
        TestView {
            id: test.id().to_string(),
            version: test.version().map(str::to_string),
            comment: test.comment().map(str::to_string),
            check: test.check().to_string(),
            check_existence: test.check_existence().map(str::to_string),
            object_ref: test.object_ref().to_string(),
            state_ref: test.state_ref().to_string(),
        }
    }

    fn build_object(object: &RpmInfoObject) -> ObjectView {
        ObjectView {
            id: object.id().to_string(),
            version: object.version().map(str::to_string),
            name: object.name().to_string(),
        }
    }

    fn build_state(state: &RpmInfoState) -> StateView {
        StateView {
            id: state.id().to_string(),
            version: state.version().map(str::to_string),
            evr: state.evr().map(Self::build_evr),
            version_check: state.version_check().map(Self::build_version),
        }
    }

    fn build_summary(
        resolutions: &[DefinitionResolution<'_>],
        definitions: &[DefinitionView],
        tests: &[TestView],
        objects: &[ObjectView],
        states: &[StateView],
    ) -> ReportSummary {
        let resolved_definition_count = definitions
            .iter()
            .filter(|d| d.status == ResolutionStatus::Resolved)
            .count();

        ReportSummary {
            definition_count: definitions.len(),
            resolved_definition_count,
            unresolved_definition_count: definitions.len() - resolved_definition_count,
            test_count: tests.len(),
            object_count: objects.len(),
            state_count: states.len(),
            resolved_check_count: resolutions.iter().map(|r| r.checks().count()).sum(),
            unresolved_reference_count: resolutions.iter().map(|r| r.unresolved().len()).sum(),
        }
    }
}
