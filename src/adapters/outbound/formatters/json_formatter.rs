use crate::application::read_models::ReportReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter serializing the read model with serde_json
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut json = serde_json::to_string_pretty(model)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{
        CriteriaNodeView, DefinitionView, ReportMetadataView, ReportSummary, ResolutionStatus,
    };
    use crate::oval::domain::EntityKind;
    use crate::oval::services::UnresolvedReference;
    use serde_json::Value;

    fn create_test_read_model() -> ReportReadModel {
        let unresolved = UnresolvedReference {
            kind: EntityKind::State,
            id: "ste:7".to_string(),
            referenced_by: "test 'tst:7'".to_string(),
        };
        ReportReadModel {
            metadata: ReportMetadataView {
                tool_name: "oval-rpm".to_string(),
                tool_version: "0.1.0".to_string(),
                source: "feed.xml".to_string(),
                generated_at: "2026-01-15T10:30:00Z".to_string(),
            },
            generator: None,
            definitions: vec![DefinitionView {
                id: None,
                class: None,
                version: None,
                title: "RHSA-2020:0001".to_string(),
                description: String::new(),
                references: vec![],
                advisory: None,
                criteria: vec![
                    CriteriaNodeView::Operator {
                        depth: 0,
                        operator: "OR".to_string(),
                        negate: false,
                        comment: None,
                    },
                    CriteriaNodeView::Criterion {
                        depth: 1,
                        test_ref: "tst:7".to_string(),
                        comment: "kernel is earlier".to_string(),
                        negate: false,
                        check: None,
                        unresolved: vec![unresolved.clone()],
                    },
                ],
                status: ResolutionStatus::PartiallyUnresolved,
                deprecated: false,
                truncated: false,
                unresolved: vec![unresolved],
            }],
            tests: vec![],
            objects: vec![],
            states: vec![],
            summary: ReportSummary {
                definition_count: 1,
                unresolved_definition_count: 1,
                unresolved_reference_count: 1,
                ..ReportSummary::default()
            },
        }
    }

    #[test]
    fn test_json_format_is_valid_json() {
        let output = JsonFormatter::new().format(&create_test_read_model()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["metadata"]["tool_name"], "oval-rpm");
        assert_eq!(value["summary"]["unresolved_reference_count"], 1);
        assert!(value.get("generator").is_none());
    }

    #[test]
    fn test_json_format_tags_criteria_nodes() {
        let output = JsonFormatter::new().format(&create_test_read_model()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        let criteria = &value["definitions"][0]["criteria"];
        assert_eq!(criteria[0]["node"], "operator");
        assert_eq!(criteria[0]["operator"], "OR");
        assert_eq!(criteria[1]["node"], "criterion");
        assert_eq!(criteria[1]["depth"], 1);
        assert!(criteria[1].get("check").is_none());
        assert_eq!(criteria[1]["unresolved"][0]["kind"], "state");
        assert_eq!(criteria[1]["unresolved"][0]["referenced_by"], "test 'tst:7'");
    }

    #[test]
    fn test_json_format_status_is_snake_case() {
        let output = JsonFormatter::new().format(&create_test_read_model()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["definitions"][0]["status"], "partially_unresolved");
    }
}
