use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use dats_tabular::app::App;
use dats_tabular::classify::PatternClassifier;
use dats_tabular::domain::KNOWN_PROJECT_TITLES;
use dats_tabular::error::DatsError;
use dats_tabular::loader;
use dats_tabular::vocab::Vocabulary;

#[derive(Parser)]
#[command(name = "dats-tab")]
#[command(about = "Tabular dump of DATS-encoded genomic study metadata")]
#[command(version, author)]
struct Cli {
    /// Path to a TOPMed or GTEx DATS document.
    dats_file: Utf8PathBuf,

    /// Override the known top-level project titles (repeatable).
    #[arg(long = "project-title")]
    project_titles: Vec<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(dats) = report.downcast_ref::<DatsError>() {
            return ExitCode::from(map_exit_code(dats));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &DatsError) -> u8 {
    match error {
        DatsError::DocumentRead(_) | DatsError::DocumentParse(_) => 2,
        DatsError::TopLevelDatasetCount(_)
        | DatsError::SizeMismatch { .. }
        | DatsError::AnatomicalPartIdCount { .. }
        | DatsError::AnatomicalPartCount { .. }
        | DatsError::UnknownProjectFamily(_)
        | DatsError::UnclassifiedUri(_)
        | DatsError::MissingS3Uri { .. } => 3,
        DatsError::ReportWrite(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let titles = if cli.project_titles.is_empty() {
        KNOWN_PROJECT_TITLES.iter().map(|t| t.to_string()).collect()
    } else {
        cli.project_titles
    };

    // Bare `?` keeps the concrete DatsError inside the report so main can
    // downcast it back out for the exit code.
    let graph = loader::load_document(&cli.dats_file)?;
    let app = App::new(graph, Vocabulary::dats(), PatternClassifier::new());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    app.write_report(&titles, &mut handle)?;
    handle.flush().into_diagnostic()?;
    Ok(())
}
