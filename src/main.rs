use anyhow::Context;
use clap::Parser;
use layout_automator::{FlowFile, ModelData};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Validate a flow file against a model definition.
///
/// Checks that every region, component, and input the flow references can be
/// resolved before any browser gets involved.
#[derive(Parser)]
#[command(name = "layout-automator", version, about)]
struct Cli {
    /// YAML model definition (regions, menus, components)
    #[arg(long)]
    model_file: PathBuf,

    /// YAML flow file to validate
    #[arg(long)]
    flow_file: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let model_source = std::fs::read_to_string(&cli.model_file)
        .with_context(|| format!("reading {}", cli.model_file.display()))?;
    let model = ModelData::from_yaml(&model_source)
        .with_context(|| format!("parsing {}", cli.model_file.display()))?;

    let flow_source = std::fs::read_to_string(&cli.flow_file)
        .with_context(|| format!("reading {}", cli.flow_file.display()))?;
    let flow = FlowFile::from_yaml(&flow_source)
        .with_context(|| format!("parsing {}", cli.flow_file.display()))?;

    let step_count: usize = flow.tests.iter().map(|test| test.steps.len()).sum();
    match flow.validate(&model) {
        Ok(()) => {
            println!(
                "OK: {} test(s), {} step(s) for site `{}` resolve against the model",
                flow.tests.len(),
                step_count,
                flow.site
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("FAIL: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}
