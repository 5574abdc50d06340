use crate::application::read_models::{
    CheckView, CriteriaNodeView, DefinitionView, GeneratorView, ReportReadModel, ReportSummary,
    ResolutionStatus,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for the definitions overview
const TABLE_HEADER: &str = "| Definition | Title | Severity | CVEs | Status |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|------------|-------|----------|------|--------|\n";

/// Markdown table header for unresolved references
const UNRESOLVED_TABLE_HEADER: &str = "| Definition | Kind | Identifier | Referenced by |\n";

/// Markdown table separator line for unresolved references
const UNRESOLVED_TABLE_SEPARATOR: &str = "|------------|------|------------|---------------|\n";

/// MarkdownFormatter adapter for a human-readable Markdown report
///
/// Renders an overview table of definitions, then each definition's criteria
/// tree as a nested list, and finally every unresolved reference.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Inline code span; backticks inside identifiers are swapped for quotes
    fn code(text: &str) -> String {
        format!("`{}`", text.replace('`', "'"))
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &ReportReadModel) {
        output.push_str("# OVAL Definitions Report\n\n");
        output.push_str(&format!(
            "Source: {} (generated by {} {})\n\n",
            Self::code(&model.metadata.source),
            model.metadata.tool_name,
            model.metadata.tool_version
        ));
    }

    fn render_generator(&self, output: &mut String, generator: &GeneratorView) {
        output.push_str("## Generator\n\n");
        let fields = [
            ("Product", &generator.product_name),
            ("Product version", &generator.product_version),
            ("Schema version", &generator.schema_version),
            ("Timestamp", &generator.timestamp),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                output.push_str(&format!("- **{}**: {}\n", label, value));
            }
        }
        output.push('\n');
    }

    fn render_summary(&self, output: &mut String, summary: &ReportSummary) {
        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Count |\n");
        output.push_str("|--------|-------|\n");
        let rows = [
            ("Definitions", summary.definition_count),
            ("Fully resolved definitions", summary.resolved_definition_count),
            (
                "Partially unresolved definitions",
                summary.unresolved_definition_count,
            ),
            ("Tests", summary.test_count),
            ("Objects", summary.object_count),
            ("States", summary.state_count),
            ("Resolved checks", summary.resolved_check_count),
            ("Unresolved references", summary.unresolved_reference_count),
        ];
        for (label, count) in rows {
            output.push_str(&format!("| {} | {} |\n", label, count));
        }
        output.push('\n');
    }

    fn render_overview(&self, output: &mut String, definitions: &[DefinitionView]) {
        output.push_str("## Definitions\n\n");

        if definitions.is_empty() {
            output.push_str("*No definitions found*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for definition in definitions {
            let advisory = definition.advisory.as_ref();
            let severity = advisory
                .and_then(|a| a.severity.as_deref())
                .unwrap_or("N/A");
            let cves = advisory
                .map(|a| {
                    a.cves
                        .iter()
                        .map(|c| c.id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|cves| !cves.is_empty())
                .unwrap_or_else(|| "N/A".to_string());
            let mut status = match definition.status {
                ResolutionStatus::Resolved => "✅ resolved".to_string(),
                ResolutionStatus::PartiallyUnresolved => "⚠️ partially unresolved".to_string(),
            };
            if definition.deprecated {
                status.push_str(" (deprecated)");
            }

            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(definition.label()),
                Self::escape_markdown_table_cell(&definition.title),
                Self::escape_markdown_table_cell(severity),
                Self::escape_markdown_table_cell(&cves),
                status
            ));
        }
        output.push('\n');
    }

    fn render_definition(&self, output: &mut String, definition: &DefinitionView) {
        output.push_str(&format!("### {}\n\n", definition.label()));
        if definition.id.is_some() {
            output.push_str(&format!("**{}**\n\n", definition.title));
        }
        if definition.criteria.is_empty() {
            output.push_str("*No criteria (deprecated definition).*\n");
        }

        for node in &definition.criteria {
            let indent = "  ".repeat(node.depth());
            match node {
                CriteriaNodeView::Operator {
                    operator,
                    negate,
                    comment,
                    ..
                } => {
                    output.push_str(&format!(
                        "{}- **{}{}**",
                        indent,
                        if *negate { "NOT " } else { "" },
                        operator
                    ));
                    if let Some(comment) = comment {
                        output.push_str(&format!(" _({})_", comment));
                    }
                    output.push('\n');
                }
                CriteriaNodeView::Criterion {
                    test_ref,
                    comment,
                    negate,
                    check,
                    unresolved,
                    ..
                } => {
                    output.push_str(&format!(
                        "{}- {}{}",
                        indent,
                        if *negate { "NOT " } else { "" },
                        Self::code(test_ref)
                    ));
                    if !comment.is_empty() {
                        output.push_str(&format!(" {}", comment));
                    }
                    if let Some(check) = check {
                        output.push_str(&format!(": {}", Self::describe_check(check)));
                    }
                    for missing in unresolved {
                        output.push_str(&format!(
                            " ⚠️ UNRESOLVED {} {}",
                            missing.kind,
                            Self::code(&missing.id)
                        ));
                    }
                    output.push('\n');
                }
            }
        }
        if definition.truncated {
            output.push_str("\n*Resolution stopped at the first unresolved criterion.*\n");
        }
        output.push('\n');
    }

    fn describe_check(check: &CheckView) -> String {
        let mut parts = vec![format!("{} ({})", Self::code(&check.package), check.check)];
        if let Some(evr) = &check.evr {
            parts.push(format!("evr {}", evr));
        }
        if let Some(version) = &check.version {
            parts.push(format!("version {}", version));
        }
        parts.join(", ")
    }

    fn render_unresolved(&self, output: &mut String, definitions: &[DefinitionView]) {
        let broken: Vec<&DefinitionView> = definitions
            .iter()
            .filter(|d| !d.unresolved.is_empty())
            .collect();
        if broken.is_empty() {
            return;
        }

        output.push_str("## Unresolved References\n\n");
        output.push_str(UNRESOLVED_TABLE_HEADER);
        output.push_str(UNRESOLVED_TABLE_SEPARATOR);
        for definition in broken {
            for missing in &definition.unresolved {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(definition.label()),
                    missing.kind,
                    Self::escape_markdown_table_cell(&missing.id),
                    Self::escape_markdown_table_cell(&missing.referenced_by)
                ));
            }
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        if let Some(generator) = &model.generator {
            self.render_generator(&mut output, generator);
        }
        self.render_summary(&mut output, &model.summary);
        self.render_overview(&mut output, &model.definitions);

        if !model.definitions.is_empty() {
            output.push_str("## Criteria\n\n");
            for definition in &model.definitions {
                self.render_definition(&mut output, definition);
            }
        }

        self.render_unresolved(&mut output, &model.definitions);

        Ok(output)
    }
}
