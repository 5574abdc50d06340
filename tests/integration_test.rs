/// Integration tests for the application layer
mod test_utilities;

use oval_rpm::application::read_models::{CriteriaNodeView, ResolutionStatus};
use std::ops::ControlFlow;
use std::path::PathBuf;
use test_utilities::mocks::*;

use oval_rpm::prelude::*;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn analyze(content: String, policy: ResolutionPolicy) -> (Result<ReportResponse>, MockProgressReporter) {
    let reporter = MockProgressReporter::new();
    let use_case = AnalyzeDocumentUseCase::new(
        MockDocumentReader::new(content),
        OvalXmlParser::new(),
        reporter.clone(),
    );
    let result = use_case.execute(ReportRequest::new(PathBuf::from("feed.xml"), policy));
    (result, reporter)
}

fn criterion_refs(nodes: &[CriteriaNodeView]) -> Vec<(usize, &str)> {
    nodes
        .iter()
        .filter_map(|node| match node {
            CriteriaNodeView::Criterion {
                depth, test_ref, ..
            } => Some((*depth, test_ref.as_str())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_analyze_rhel_sample_resolves_every_check() {
    let (result, reporter) = analyze(fixture("rhel-sample.oval.xml"), ResolutionPolicy::CollectAll);
    let response = result.unwrap();

    assert!(!response.has_unresolved_references);
    let summary = &response.read_model.summary;
    assert_eq!(summary.definition_count, 2);
    assert_eq!(summary.resolved_definition_count, 2);
    assert_eq!(summary.test_count, 4);
    assert_eq!(summary.object_count, 3);
    assert_eq!(summary.state_count, 3);
    assert_eq!(summary.resolved_check_count, 6);
    assert_eq!(summary.unresolved_reference_count, 0);

    assert!(reporter.errors().is_empty());
    let messages = reporter.get_messages();
    assert!(messages.iter().any(|m| m.starts_with("Progress: 2/2")));
}

#[test]
fn test_analyze_rhel_sample_keeps_tree_shape() {
    let (result, _) = analyze(fixture("rhel-sample.oval.xml"), ResolutionPolicy::CollectAll);
    let response = result.unwrap();

    let definition = &response.read_model.definitions[0];
    assert_eq!(definition.id.as_deref(), Some("oval:com.redhat.rhsa:def:20230946"));
    assert_eq!(definition.status, ResolutionStatus::Resolved);

    let operators: Vec<(usize, &str)> = definition
        .criteria
        .iter()
        .filter_map(|node| match node {
            CriteriaNodeView::Operator {
                depth, operator, ..
            } => Some((*depth, operator.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(operators, vec![(0, "OR"), (1, "AND"), (2, "OR")]);

    assert_eq!(
        criterion_refs(&definition.criteria),
        vec![
            (1, "oval:com.redhat.rhba:tst:20191992005"),
            (2, "oval:com.redhat.rhba:tst:20221935001"),
            (3, "oval:com.redhat.rhsa:tst:20230946001"),
            (3, "oval:com.redhat.rhsa:tst:20230946003"),
        ]
    );

    match &definition.criteria[1] {
        CriteriaNodeView::Criterion { negate, check, .. } => {
            assert!(*negate);
            let check = check.as_ref().unwrap();
            assert_eq!(check.package, "redhat-release");
            assert_eq!(check.check, "none satisfy");
        }
        other => panic!("expected criterion, got {:?}", other),
    }
}

#[test]
fn test_analyze_rhel_sample_dereferences_shared_state() {
    let (result, _) = analyze(fixture("rhel-sample.oval.xml"), ResolutionPolicy::CollectAll);
    let response = result.unwrap();

    let checks: Vec<_> = response.read_model.definitions[0]
        .criteria
        .iter()
        .filter_map(|node| match node {
            CriteriaNodeView::Criterion { check, .. } => check.clone(),
            _ => None,
        })
        .collect();

    let openssl_libs = &checks[3];
    assert_eq!(openssl_libs.package, "openssl-libs");
    assert_eq!(openssl_libs.state_id, "oval:com.redhat.rhsa:ste:20230946001");
    let evr = openssl_libs.evr.as_ref().unwrap();
    assert_eq!(evr.operation, "less than");
    assert_eq!(evr.value, "1:3.0.7-6.el9_2");
    assert_eq!(evr.datatype.as_deref(), Some("evr_string"));
}

#[test]
fn test_analyze_dangling_test_is_reported_not_fatal() {
    let (result, reporter) = analyze(fixture("dangling-test.oval.xml"), ResolutionPolicy::CollectAll);
    let response = result.unwrap();

    assert!(response.has_unresolved_references);
    let definition = &response.read_model.definitions[0];
    assert_eq!(definition.status, ResolutionStatus::PartiallyUnresolved);
    assert_eq!(definition.unresolved.len(), 1);
    assert_eq!(definition.unresolved[0].kind, EntityKind::Test);
    assert_eq!(definition.unresolved[0].id, "oval:ex:tst:99");
    assert!(!definition.truncated);
    assert_eq!(response.read_model.summary.resolved_check_count, 1);

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("oval:ex:def:1"));
}

#[test]
fn test_analyze_dangling_test_fail_fast_truncates() {
    let (result, _) = analyze(fixture("dangling-test.oval.xml"), ResolutionPolicy::FailFast);
    let response = result.unwrap();

    let definition = &response.read_model.definitions[0];
    assert!(definition.truncated);
    assert_eq!(definition.unresolved.len(), 1);
    assert_eq!(response.read_model.summary.resolved_check_count, 0);
}

#[test]
fn test_analyze_deprecated_definition_without_criteria() {
    let (result, reporter) = analyze(
        fixture("deprecated-definition.oval.xml"),
        ResolutionPolicy::CollectAll,
    );
    let response = result.unwrap();

    assert!(!response.has_unresolved_references);
    let definitions = &response.read_model.definitions;
    assert_eq!(definitions.len(), 2);
    assert!(definitions[0].deprecated);
    assert!(definitions[0].criteria.is_empty());
    assert_eq!(definitions[0].status, ResolutionStatus::Resolved);
    assert!(!definitions[1].deprecated);
    assert_eq!(response.read_model.summary.resolved_check_count, 1);

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("deprecated definition 'oval:ex:def:1'"));
}

#[test]
fn test_analyze_duplicate_state_fails() {
    let (result, _) = analyze(fixture("duplicate-state.oval.xml"), ResolutionPolicy::CollectAll);
    let err = result.unwrap_err();

    match err.downcast_ref::<OvalError>() {
        Some(OvalError::DuplicateIdentifiers { duplicates }) => {
            assert_eq!(duplicates.len(), 1);
            assert_eq!(duplicates[0].kind, EntityKind::State);
            assert_eq!(duplicates[0].id, "oval:ex:ste:1");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_analyze_missing_operator_is_ambiguous() {
    let (result, _) = analyze(fixture("missing-operator.oval.xml"), ResolutionPolicy::CollectAll);
    let err = result.unwrap_err();

    match err.downcast_ref::<OvalError>() {
        Some(OvalError::AmbiguousOperator { definition, value }) => {
            assert!(definition.contains("oval:ex:def:7"));
            assert!(value.is_none());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_analyze_malformed_xml() {
    let (result, _) = analyze(fixture("malformed.oval.xml"), ResolutionPolicy::CollectAll);
    let err = result.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<OvalError>(),
        Some(OvalError::MalformedDocument { .. })
    ));
}

#[test]
fn test_analyze_invalid_utf8_is_malformed() {
    let reporter = MockProgressReporter::new();
    let use_case = AnalyzeDocumentUseCase::new(
        MockDocumentReader::from_bytes(vec![0x3c, 0xff, 0xfe, 0x3e]),
        OvalXmlParser::new(),
        reporter,
    );

    let err = use_case
        .execute(ReportRequest::new(PathBuf::from("feed.xml"), ResolutionPolicy::CollectAll))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<OvalError>(),
        Some(OvalError::MalformedDocument { .. })
    ));
}

#[test]
fn test_analyze_empty_document() {
    let (result, _) = analyze(fixture("empty.oval.xml"), ResolutionPolicy::CollectAll);
    let response = result.unwrap();

    assert!(response.read_model.definitions.is_empty());
    assert_eq!(response.read_model.summary.definition_count, 0);
    assert!(!response.has_unresolved_references);
}

#[test]
fn test_analyze_reader_failure() {
    let use_case = AnalyzeDocumentUseCase::new(
        MockDocumentReader::with_failure(),
        OvalXmlParser::new(),
        MockProgressReporter::new(),
    );

    let result = use_case.execute(ReportRequest::new(
        PathBuf::from("feed.xml"),
        ResolutionPolicy::CollectAll,
    ));
    assert!(result.is_err());
}

#[test]
fn test_walker_visits_parsed_tree_in_document_order() {
    struct Collector(Vec<String>);

    impl<'doc> CriteriaVisitor<'doc> for Collector {
        fn enter_criteria(&mut self, criteria: &'doc Criteria, depth: usize) -> ControlFlow<()> {
            self.0.push(format!("{}{}", depth, criteria.operator().as_str()));
            ControlFlow::Continue(())
        }

        fn visit_criterion(&mut self, criterion: &'doc Criterion, depth: usize) -> ControlFlow<()> {
            let suffix = criterion.test_ref().rsplit(':').next().unwrap_or_default();
            self.0.push(format!("{}{}", depth, suffix));
            ControlFlow::Continue(())
        }

        fn exit_criteria(&mut self, _criteria: &'doc Criteria, depth: usize) -> ControlFlow<()> {
            self.0.push(format!("{}/", depth));
            ControlFlow::Continue(())
        }
    }

    let document = OvalXmlParser::new()
        .parse(fixture("rhel-sample.oval.xml").as_bytes())
        .unwrap();

    let mut collector = Collector(Vec::new());
    let flow = CriteriaWalker::walk(document.definitions()[0].criteria().unwrap(), &mut collector);

    assert_eq!(flow, ControlFlow::Continue(()));
    assert_eq!(
        collector.0,
        vec![
            "0OR",
            "120191992005",
            "1AND",
            "220221935001",
            "2OR",
            "320230946001",
            "320230946003",
            "2/",
            "1/",
            "0/",
        ]
    );
}

#[test]
fn test_walker_nodes_match_operator_order() {
    let document = OvalXmlParser::new()
        .parse(fixture("rhel-sample.oval.xml").as_bytes())
        .unwrap();
    let root = document.definitions()[0].criteria().unwrap();

    let nodes = CriteriaWalker::nodes(root);
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes.iter().map(CriteriaNode::depth).max(), Some(3));
    assert_eq!(
        CriteriaWalker::operators(root),
        vec![CriteriaOperator::Or, CriteriaOperator::And, CriteriaOperator::Or]
    );
}

#[test]
fn test_resolver_used_directly_with_index() {
    let document = OvalXmlParser::new()
        .parse(fixture("dangling-test.oval.xml").as_bytes())
        .unwrap();
    let index = DocumentIndex::build(&document).unwrap();
    let resolver = ReferenceResolver::new(&index);

    let resolution: DefinitionResolution<'_> = resolver.resolve_definition(&document.definitions()[0]);

    assert!(!resolution.is_fully_resolved());
    assert!(resolution.is_complete());
    let unresolved: &[UnresolvedReference] = resolution.unresolved();
    assert_eq!(unresolved[0].id, "oval:ex:tst:99");
}
