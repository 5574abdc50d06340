//! oval-rpm - OVAL RPM-info definitions parser and criteria resolver
//!
//! This library parses OVAL definitions documents for RPM-based systems,
//! indexes their tests, objects and states, and resolves every definition's
//! criteria tree down to concrete package/version checks. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`oval`): Document model plus the index, resolver and walker services
//! - **Application Layer** (`application`): Use cases, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use oval_rpm::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let document_reader = FileSystemReader::new();
//! let document_parser = OvalXmlParser::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AnalyzeDocumentUseCase::new(document_reader, document_parser, progress_reporter);
//!
//! // Execute
//! let request = ReportRequest::new(PathBuf::from("rhel-9.oval.xml"), ResolutionPolicy::CollectAll);
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let formatter = TextFormatter::new();
//! let output = formatter.format(&response.read_model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```
//!
//! The domain services can also be driven directly:
//!
//! ```
//! use oval_rpm::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let xml = br#"<oval_definitions>
//!   <definitions>
//!     <definition id="oval:ex:def:1" class="patch" version="1">
//!       <metadata><title>openssl update</title></metadata>
//!       <criteria operator="AND">
//!         <criterion test_ref="oval:ex:tst:1" comment="openssl is earlier than 1:3.0.7-6"/>
//!       </criteria>
//!     </definition>
//!   </definitions>
//!   <tests>
//!     <rpminfo_test id="oval:ex:tst:1" check="at least one" version="1">
//!       <object object_ref="oval:ex:obj:1"/>
//!       <state state_ref="oval:ex:ste:1"/>
//!     </rpminfo_test>
//!   </tests>
//!   <objects>
//!     <rpminfo_object id="oval:ex:obj:1" version="1"><name>openssl</name></rpminfo_object>
//!   </objects>
//!   <states>
//!     <rpminfo_state id="oval:ex:ste:1" version="1">
//!       <evr datatype="evr_string" operation="less than">1:3.0.7-6</evr>
//!     </rpminfo_state>
//!   </states>
//! </oval_definitions>"#;
//!
//! let document = OvalXmlParser::new().parse(xml)?;
//! let index = DocumentIndex::build(&document)?;
//! let resolver = ReferenceResolver::new(&index);
//!
//! let resolution = resolver.resolve_definition(&document.definitions()[0]);
//! assert!(resolution.is_fully_resolved());
//! let check = resolution.checks().next().unwrap();
//! assert_eq!(check.object().name(), "openssl");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod oval;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownFormatter, TextFormatter,
    };
    pub use crate::adapters::outbound::xml::OvalXmlParser;
    pub use crate::application::dto::{OutputFormat, ReportRequest, ReportResponse};
    pub use crate::application::read_models::ReportReadModel;
    pub use crate::application::use_cases::AnalyzeDocumentUseCase;
    pub use crate::oval::domain::{
        Criteria, CriteriaChild, CriteriaOperator, Criterion, Definition, Document, EntityKind,
        RpmInfoObject, RpmInfoState, RpmInfoTest,
    };
    pub use crate::oval::services::{
        CriteriaNode, CriteriaVisitor, CriteriaWalker, DefinitionResolution, DocumentIndex,
        ReferenceResolver, ResolutionPolicy, UnresolvedReference,
    };
    pub use crate::ports::outbound::{
        DocumentParser, DocumentReader, OutputPresenter, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::error::{ExitCode, OvalError};
    pub use crate::shared::Result;
}
