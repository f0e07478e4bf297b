use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use cloudscope_cli::input::{DiagramSource, load_snapshot};
use cloudscope_cli::orchestrator::{
    ExportKind, ExportOrchestrator, ExportOutcome, OrchestratorConfig,
};
use cloudscope_cli::settings::ExportSettings;
use cloudscope_output::DirectorySink;
use cloudscope_raster::Rasterizer;

use crate::cli::{Cli, Command, DiagramArgs, InputArgs, ReportArgs};

/// What a subcommand asks for, with paths still unread.
struct Job {
    kinds: Vec<ExportKind>,
    input: PathBuf,
    diagram: Option<PathBuf>,
    overlays: Vec<(String, PathBuf)>,
}

impl Job {
    fn from_command(command: &Command) -> Self {
        match command {
            Command::Csv(InputArgs { input }) => Self {
                kinds: vec![ExportKind::Csv],
                input: input.clone(),
                diagram: None,
                overlays: Vec::new(),
            },
            Command::Png(DiagramArgs {
                input,
                diagram,
                overlays,
            }) => Self {
                kinds: vec![ExportKind::Png],
                input: input.input.clone(),
                diagram: Some(diagram.clone()),
                overlays: overlays.clone(),
            },
            Command::Pdf(args) => Self::report(args, vec![ExportKind::Pdf]),
            Command::All(args) => {
                let mut kinds = vec![ExportKind::Csv];
                if args.diagram.is_some() {
                    kinds.push(ExportKind::Png);
                }
                kinds.push(ExportKind::Pdf);
                Self::report(args, kinds)
            }
        }
    }

    fn report(args: &ReportArgs, kinds: Vec<ExportKind>) -> Self {
        Self {
            kinds,
            input: args.input.input.clone(),
            diagram: args.diagram.clone(),
            overlays: args.overlays.clone(),
        }
    }
}

/// Settings file (explicit or default) with command-line overrides applied.
fn resolve_settings(cli: &Cli) -> Result<ExportSettings> {
    let mut settings = match &cli.config {
        Some(path) => ExportSettings::load_from(path)?,
        None => ExportSettings::load()?,
    };
    if let Some(product) = &cli.product {
        settings.product_name.clone_from(product);
    }
    if let Some(dir) = &cli.output_dir {
        settings.output_dir.clone_from(dir);
    }
    Ok(settings)
}

pub async fn run_exports(cli: &Cli) -> Result<Vec<ExportOutcome>> {
    let settings = resolve_settings(cli)?;
    let job = Job::from_command(&cli.command);
    debug!(?settings, kinds = ?job.kinds, "export job resolved");

    let snapshot = load_snapshot(&job.input)?;
    let diagram = match &job.diagram {
        Some(path) => {
            let mut overlays: BTreeMap<String, PathBuf> = settings.overlays.clone();
            overlays.extend(job.overlays.iter().cloned());
            Some(DiagramSource::load(path, &overlays)?)
        }
        None => None,
    };

    let orchestrator = ExportOrchestrator::new(OrchestratorConfig {
        product_name: settings.product_name.clone(),
        rasterizer: Rasterizer::new(
            settings
                .rasterizer_config()
                .context("Invalid rasterizer settings")?,
        ),
    });
    let mut sink = DirectorySink::new(&settings.output_dir);
    Ok(orchestrator
        .run_all(&job.kinds, &snapshot, diagram.as_ref(), &mut sink)
        .await)
}
