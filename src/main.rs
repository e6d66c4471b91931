use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use log::debug;
use scriptfuse_assembler::config::AssemblerConfig;
use scriptfuse_assembler::diagnostics::collector::DiagnosticCollector;
use scriptfuse_assembler::gateway::Reference;

mod command_gateway;
mod pipeline;
mod scene;
mod walk;

use command_gateway::CommandGateway;
use pipeline::{run_build, AssetKind, BuildRequest};

/// Merge game script fragments and scene snapshots into loadable libraries.
#[derive(Parser, Debug)]
#[command(name = "scriptfuse", version, about)]
struct Cli {
    /// Directory of gameplay script fragments (*.src)
    #[arg(long, value_name = "DIR")]
    scripts: Option<PathBuf>,

    /// Output artifact for the scripts build
    #[arg(long, value_name = "FILE", default_value = "scripts.lib")]
    scripts_out: PathBuf,

    /// Directory of engine system fragments (*.src)
    #[arg(long, value_name = "DIR")]
    systems: Option<PathBuf>,

    /// Output artifact for the systems build
    #[arg(long, value_name = "FILE", default_value = "systems.lib")]
    systems_out: PathBuf,

    /// Directory of scene snapshots (*.scene.json)
    #[arg(long, value_name = "DIR")]
    scenes: Option<PathBuf>,

    /// Output artifact for the scenes build
    #[arg(long, value_name = "FILE", default_value = "scenes.lib")]
    scenes_out: PathBuf,

    /// Recurse into subdirectories of each input directory
    #[arg(long)]
    recurse: bool,

    /// Root namespace every unit is assembled under
    #[arg(long, value_name = "NAME", default_value = "Game")]
    root_namespace: String,

    /// External compiler command
    #[arg(long, value_name = "CMD", default_value = "sfc")]
    compiler: String,

    /// Library to hand to the compiler (repeatable)
    #[arg(long = "reference", value_name = "PATH")]
    references: Vec<PathBuf>,

    /// Also write the assembled source next to each artifact
    #[arg(long)]
    emit_source: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut requests = Vec::new();
    if let Some(dir) = &cli.scripts {
        requests.push(BuildRequest {
            kind: AssetKind::Scripts,
            input_dir: dir.clone(),
            output_path: cli.scripts_out.clone(),
            recurse: cli.recurse,
            emit_source: cli.emit_source,
        });
    }
    if let Some(dir) = &cli.systems {
        requests.push(BuildRequest {
            kind: AssetKind::Systems,
            input_dir: dir.clone(),
            output_path: cli.systems_out.clone(),
            recurse: cli.recurse,
            emit_source: cli.emit_source,
        });
    }
    if let Some(dir) = &cli.scenes {
        requests.push(BuildRequest {
            kind: AssetKind::Scenes,
            input_dir: dir.clone(),
            output_path: cli.scenes_out.clone(),
            recurse: cli.recurse,
            emit_source: cli.emit_source,
        });
    }

    if requests.is_empty() {
        eprintln!(
            "{}: no input directories given; see --help",
            "error".bright_red().bold()
        );
        std::process::exit(2);
    }

    let scratch = std::env::temp_dir().join(format!("scriptfuse-{}", std::process::id()));
    let gateway = CommandGateway::new(cli.compiler.as_str(), &scratch);
    debug!("scratch directory: {}", scratch.display());

    let mut failed = false;
    for request in &requests {
        let mut config = AssemblerConfig::with_root_namespace(cli.root_namespace.clone());
        config
            .references
            .extend(cli.references.iter().cloned().map(Reference::new));

        let mut collector = DiagnosticCollector::new();
        match run_build(request, config, &gateway, &mut collector) {
            Ok(artifact_written) => {
                collector.report_all();
                if !artifact_written || collector.has_errors() {
                    failed = true;
                }
            }
            Err(e) => {
                collector.report_all();
                eprintln!(
                    "{}: {} build failed: {}",
                    "error".bright_red().bold(),
                    request.kind.label(),
                    e
                );
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
