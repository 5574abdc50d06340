use crate::application::dto::{ReportRequest, ReportResponse};
use crate::application::read_models::ReportReadModelBuilder;
use crate::oval::domain::Document;
use crate::oval::services::{DefinitionResolution, DocumentIndex, ReferenceResolver};
use crate::ports::outbound::{DocumentParser, DocumentReader, ProgressReporter};
use crate::shared::Result;

/// AnalyzeDocumentUseCase - Core use case turning an OVAL file into a report
///
/// Reads bytes, parses them, indexes tests/objects/states and resolves every
/// definition's criteria tree. I/O, parse, duplicate-identifier and operator
/// errors abort the run; unresolved references are collected per definition
/// and travel inside the returned read model.
///
/// # Type Parameters
/// * `DR` - DocumentReader implementation
/// * `DP` - DocumentParser implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDocumentUseCase<DR, DP, PR> {
    document_reader: DR,
    document_parser: DP,
    progress_reporter: PR,
}

impl<DR, DP, PR> AnalyzeDocumentUseCase<DR, DP, PR>
where
    DR: DocumentReader,
    DP: DocumentParser,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeDocumentUseCase with injected dependencies
    pub fn new(document_reader: DR, document_parser: DP, progress_reporter: PR) -> Self {
        Self {
            document_reader,
            document_parser,
            progress_reporter,
        }
    }

    /// Executes the use case
    ///
    /// # Arguments
    /// * `request` - Document path and resolution policy
    ///
    /// # Returns
    /// ReportResponse carrying the read model and the unresolved-reference flag
    pub fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        // Step 1: Read and parse the document
        let document = self.load_document(&request)?;

        // Step 2: Index tests, objects and states (duplicates abort here)
        let index = DocumentIndex::build(&document)?;

        // Step 3: Resolve every definition
        let resolver = ReferenceResolver::new(&index).with_policy(request.policy);
        let resolutions = self.resolve_definitions(&document, &resolver);
        self.report_unresolved(&resolutions);
        self.report_missing_criteria(&document);

        // Step 4: Flatten into the read model
        let metadata = ReportReadModelBuilder::generate_metadata(&request.document_path);
        let read_model = ReportReadModelBuilder::build(&document, &resolutions, metadata);

        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} definition(s): {} check(s), {} unresolved reference(s)",
            read_model.summary.definition_count,
            read_model.summary.resolved_check_count,
            read_model.summary.unresolved_reference_count
        ));

        Ok(ReportResponse::new(read_model))
    }

    fn load_document(&self, request: &ReportRequest) -> Result<Document> {
        self.progress_reporter.report(&format!(
            "📖 Loading OVAL document from: {}",
            request.document_path.display()
        ));

        let bytes = self
            .document_reader
            .read_document(&request.document_path)?;
        let document = self.document_parser.parse(&bytes)?;

        self.progress_reporter.report(&format!(
            "✅ Parsed {} definition(s), {} test(s), {} object(s), {} state(s)",
            document.definitions().len(),
            document.tests().len(),
            document.objects().len(),
            document.states().len()
        ));

        Ok(document)
    }

    fn resolve_definitions<'doc>(
        &self,
        document: &'doc Document,
        resolver: &ReferenceResolver<'_, 'doc>,
    ) -> Vec<DefinitionResolution<'doc>> {
        let total = document.definitions().len();
        if total > 0 {
            self.progress_reporter.report("🔗 Resolving criteria references...");
        }

        document
            .definitions()
            .iter()
            .enumerate()
            .map(|(i, definition)| {
                let resolution = resolver.resolve_definition(definition);
                self.progress_reporter
                    .report_progress(i + 1, total, Some(definition.label()));
                resolution
            })
            .collect()
    }

    fn report_unresolved(&self, resolutions: &[DefinitionResolution<'_>]) {
        for resolution in resolutions.iter().filter(|r| !r.is_fully_resolved()) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: definition '{}' has {} unresolved reference(s)",
                resolution.definition().label(),
                resolution.unresolved().len()
            ));
        }
    }

    fn report_missing_criteria(&self, document: &Document) {
        for definition in document
            .definitions()
            .iter()
            .filter(|d| d.criteria().is_none())
        {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: deprecated definition '{}' has no criteria, nothing to resolve",
                definition.label()
            ));
        }
    }
}
