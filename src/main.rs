use oval_rpm::adapters::outbound::console::StderrProgressReporter;
use oval_rpm::adapters::outbound::filesystem::FileSystemReader;
use oval_rpm::adapters::outbound::xml::OvalXmlParser;
use oval_rpm::application::dto::ReportRequest;
use oval_rpm::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use oval_rpm::application::use_cases::AnalyzeDocumentUseCase;
use oval_rpm::cli::Args;
use oval_rpm::config;
use oval_rpm::shared::error::{ExitCode, OvalError};
use oval_rpm::shared::Result;
use std::process;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            exit_code_for(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Explicit --config, or oval-rpm.config.yml next to the document
    let config_file = config::load_for_args(&args)?;
    let options = config::merge_options(&args, config_file.as_ref())?;

    // Create adapters (Dependency Injection)
    let document_reader = FileSystemReader::new();
    let document_parser = OvalXmlParser::new();
    let progress_reporter = if options.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let use_case = AnalyzeDocumentUseCase::new(document_reader, document_parser, progress_reporter);

    let request = ReportRequest::new(args.document.clone(), options.policy);
    let response = use_case.execute(request)?;

    if !options.quiet {
        eprintln!("{}", FormatterFactory::progress_message(options.format));
    }

    let formatter = FormatterFactory::create(options.format);
    let formatted_output = formatter.format(&response.read_model)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output.clone()));
    presenter.present(&formatted_output)?;

    if options.strict && response.has_unresolved_references {
        return Ok(ExitCode::UnresolvedReferences);
    }

    Ok(ExitCode::Success)
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<OvalError>())
        .map(OvalError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}
