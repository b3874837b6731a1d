use clap::{Parser, Subcommand};
use sfc_app::{AppResult, Scenario, outputs_to_csv};
use sfc_config::ConfigFile;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sfc-cli")]
#[command(about = "Secondary flight controls - spoiler, trim and aileron droop logic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a controls configuration file
    Validate {
        /// Path to the YAML or JSON config file
        config_path: PathBuf,
    },
    /// Print the default configuration as YAML
    Defaults,
    /// Replay a scenario and print per-frame outputs as CSV
    Replay {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Controls configuration (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Defaults => cmd_defaults(),
        Commands::Replay {
            scenario_path,
            config,
            output,
        } => cmd_replay(&scenario_path, config.as_deref(), output.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = sfc_config::load(config_path)?;
    println!(
        "✓ Config is valid (version {}, {:?} spoilers)",
        config.version, config.controls.spoilers.variant
    );
    Ok(())
}

fn cmd_defaults() -> AppResult<()> {
    print!("{}", sfc_config::to_yaml_string(&ConfigFile::default())?);
    Ok(())
}

fn cmd_replay(scenario_path: &Path, config: Option<&Path>, output: Option<&Path>) -> AppResult<()> {
    let controls = match config {
        Some(path) => sfc_config::load(path)?.controls,
        None => ConfigFile::default().controls,
    };
    let scenario = Scenario::load_yaml(scenario_path)?;
    info!(
        scenario = %scenario_path.display(),
        steps = scenario.step_count(),
        "replaying scenario"
    );

    let outputs = scenario.replay(&controls)?;
    let csv = outputs_to_csv(&outputs);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Wrote {} frames to {}", outputs.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}
