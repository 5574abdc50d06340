use crate::application::read_models::{
    AdvisoryView, CheckView, CriteriaNodeView, DefinitionView, GeneratorView, ReportReadModel,
    ReportSummary,
};
use crate::oval::services::UnresolvedReference;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

const INDENT: &str = "  ";

/// TextFormatter adapter for the plain-text report
///
/// Each definition's criteria tree is printed in pre-order, one line per node,
/// indented by depth. The output carries no run timestamp, so the same document
/// always renders to the same bytes.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render_generator(out: &mut String, generator: &GeneratorView) -> std::fmt::Result {
        writeln!(out, "Generator:")?;
        if let Some(name) = &generator.product_name {
            match &generator.product_version {
                Some(version) => writeln!(out, "{INDENT}Product: {} {}", name, version)?,
                None => writeln!(out, "{INDENT}Product: {}", name)?,
            }
        }
        if let Some(schema_version) = &generator.schema_version {
            writeln!(out, "{INDENT}Schema version: {}", schema_version)?;
        }
        if let Some(timestamp) = &generator.timestamp {
            writeln!(out, "{INDENT}Timestamp: {}", timestamp)?;
        }
        writeln!(out)
    }

    fn render_definition(out: &mut String, definition: &DefinitionView) -> std::fmt::Result {
        write!(out, "Definition: {}", definition.label())?;
        let attributes: Vec<String> = [
            definition.class.clone(),
            definition.version.as_ref().map(|v| format!("version {}", v)),
            definition.deprecated.then(|| "deprecated".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !attributes.is_empty() {
            write!(out, " ({})", attributes.join(", "))?;
        }
        writeln!(out)?;

        writeln!(out, "{INDENT}Title: {}", definition.title)?;
        if !definition.description.is_empty() {
            writeln!(out, "{INDENT}Description: {}", single_line(&definition.description))?;
        }

        if !definition.references.is_empty() {
            writeln!(out, "{INDENT}References:")?;
            for reference in &definition.references {
                let parts: Vec<&str> = [
                    Some(reference.source.as_str()),
                    reference.ref_id.as_deref(),
                    reference.ref_url.as_deref(),
                ]
                .into_iter()
                .flatten()
                .collect();
                writeln!(out, "{INDENT}{INDENT}- {}", parts.join(" "))?;
            }
        }

        if let Some(advisory) = &definition.advisory {
            Self::render_advisory(out, advisory)?;
        }

        if definition.criteria.is_empty() {
            writeln!(out, "{INDENT}Criteria: none")?;
        } else {
            writeln!(out, "{INDENT}Criteria:")?;
        }
        for node in &definition.criteria {
            Self::render_node(out, node)?;
        }
        if definition.truncated {
            writeln!(
                out,
                "{INDENT}{INDENT}... (resolution stopped at the first unresolved criterion)"
            )?;
        }

        match definition.unresolved.len() {
            0 => writeln!(out, "{INDENT}Status: {}", definition.status.as_str())?,
            n => writeln!(
                out,
                "{INDENT}Status: {} ({} unresolved reference(s))",
                definition.status.as_str(),
                n
            )?,
        }
        writeln!(out)
    }

    fn render_advisory(out: &mut String, advisory: &AdvisoryView) -> std::fmt::Result {
        writeln!(out, "{INDENT}Advisory:")?;
        let fields = [
            ("From", &advisory.from),
            ("Severity", &advisory.severity),
            ("Rights", &advisory.rights),
            ("Issued", &advisory.issued),
            ("Updated", &advisory.updated),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                writeln!(out, "{INDENT}{INDENT}{}: {}", label, value)?;
            }
        }
        if !advisory.cves.is_empty() {
            let ids: Vec<&str> = advisory.cves.iter().map(|c| c.id.as_str()).collect();
            writeln!(out, "{INDENT}{INDENT}CVEs: {}", ids.join(", "))?;
        }
        Ok(())
    }

    fn render_node(out: &mut String, node: &CriteriaNodeView) -> std::fmt::Result {
        // criteria tree starts one level below the "Criteria:" heading
        let indent = INDENT.repeat(node.depth() + 2);
        match node {
            CriteriaNodeView::Operator {
                operator,
                negate,
                comment,
                ..
            } => {
                write!(out, "{}{}{}", indent, negation(*negate), operator)?;
                if let Some(comment) = comment {
                    write!(out, " ({})", comment)?;
                }
                writeln!(out)
            }
            CriteriaNodeView::Criterion {
                test_ref,
                comment,
                negate,
                check,
                unresolved,
                ..
            } => {
                write!(out, "{}{}[{}]", indent, negation(*negate), test_ref)?;
                if !comment.is_empty() {
                    write!(out, " {}", comment)?;
                }
                writeln!(out)?;

                if let Some(check) = check {
                    writeln!(out, "{}{INDENT}-> {}", indent, describe_check(check))?;
                }
                for missing in unresolved {
                    writeln!(out, "{}{INDENT}UNRESOLVED {}", indent, describe_unresolved(missing))?;
                }
                Ok(())
            }
        }
    }

    fn render_collections(out: &mut String, model: &ReportReadModel) -> std::fmt::Result {
        if !model.tests.is_empty() {
            writeln!(out, "Tests:")?;
            for test in &model.tests {
                writeln!(
                    out,
                    "{INDENT}{} check={} object={} state={}",
                    test.id, test.check, test.object_ref, test.state_ref
                )?;
            }
            writeln!(out)?;
        }

        if !model.states.is_empty() {
            writeln!(out, "States:")?;
            for state in &model.states {
                write!(out, "{INDENT}{}", state.id)?;
                if let Some(evr) = &state.evr {
                    write!(out, " evr {}", evr)?;
                }
                if let Some(version) = &state.version_check {
                    write!(out, " version {}", version)?;
                }
                if state.evr.is_none() && state.version_check.is_none() {
                    write!(out, " (no comparison)")?;
                }
                writeln!(out)?;
            }
            writeln!(out)?;
        }

        if !model.objects.is_empty() {
            writeln!(out, "Objects:")?;
            for object in &model.objects {
                writeln!(out, "{INDENT}{} {}", object.id, object.name)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn render_summary(out: &mut String, summary: &ReportSummary) -> std::fmt::Result {
        writeln!(
            out,
            "Summary: {} definition(s) ({} resolved, {} partially unresolved), \
             {} test(s), {} state(s), {} object(s), \
             {} resolved check(s), {} unresolved reference(s)",
            summary.definition_count,
            summary.resolved_definition_count,
            summary.unresolved_definition_count,
            summary.test_count,
            summary.state_count,
            summary.object_count,
            summary.resolved_check_count,
            summary.unresolved_reference_count
        )
    }

    fn render(model: &ReportReadModel) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();

        if let Some(generator) = &model.generator {
            Self::render_generator(&mut out, generator)?;
        }

        if model.definitions.is_empty() {
            writeln!(out, "No definitions found.")?;
            writeln!(out)?;
        }
        for definition in &model.definitions {
            Self::render_definition(&mut out, definition)?;
        }

        Self::render_collections(&mut out, model)?;
        Self::render_summary(&mut out, &model.summary)?;
        Ok(out)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        Self::render(model).map_err(|e| anyhow::anyhow!("Failed to render text report: {}", e))
    }
}

fn negation(negate: bool) -> &'static str {
    if negate {
        "NOT "
    } else {
        ""
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn describe_check(check: &CheckView) -> String {
    let mut description = format!(
        "test {} ({}): package {} [{}], state {}",
        check.test_id, check.check, check.package, check.object_id, check.state_id
    );
    if let Some(evr) = &check.evr {
        description.push_str(&format!(", evr {}", evr));
    }
    if let Some(version) = &check.version {
        description.push_str(&format!(", version {}", version));
    }
    description
}

fn describe_unresolved(missing: &UnresolvedReference) -> String {
    format!(
        "{} '{}' (referenced by {})",
        missing.kind, missing.id, missing.referenced_by
    )
}
