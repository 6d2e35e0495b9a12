use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use relocation_core::calculations::input::parse_manual_rate;
use relocation_core::calculations::{SimulationPercent, compare_rate_scenarios, evaluate_current};
use relocation_core::db::{DbConfig, RepositoryRegistry};
use relocation_core::{
    NewScenario, RegimeTable, RepositoryError, ScenarioInputs, ScenarioRepository,
};
use relocation_db_sqlite::SqliteRepositoryFactory;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use relocation_cli::config::load_regime_table;
use relocation_cli::loader::{load_income_csv, load_scenario};
use relocation_cli::logging::init_logging;
use relocation_cli::report::Report;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Projects the financial outcome of relocating a household abroad.
#[derive(Debug, Parser)]
#[command(name = "relocation-planner", version, about, long_about = None)]
struct Cli {
    /// Log filter: a level (`warn`, `debug`, ...) or an `EnvFilter` directive.
    /// Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Database backend to use.
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `scenarios.db`) or `:memory:`.
    #[arg(long, global = true, default_value = "scenarios.db")]
    db: String,

    /// TOML file with the preferential regime table.
    #[arg(long, global = true)]
    regimes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a scenario file or a stored scenario and print the report.
    Evaluate(EvaluateArgs),

    /// Manage stored scenarios.
    #[command(subcommand)]
    Scenarios(ScenarioCommand),
}

#[derive(Debug, Args)]
struct EvaluateArgs {
    /// Scenario file (`.json` or `.toml`).
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    scenario: Option<PathBuf>,

    /// Name of a stored scenario.
    #[arg(long)]
    name: Option<String>,

    /// Replace the scenario's incomes with declarations from this CSV file.
    #[arg(long)]
    incomes: Option<PathBuf>,

    /// Market rate, in destination units per origin unit.
    #[arg(long)]
    fetched_rate: Option<Decimal>,

    /// Manual rate; enables the override.
    #[arg(long)]
    manual_rate: Option<String>,

    /// Shift the rate by this percentage, between -25 and 25.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_simulation)]
    simulate: Option<SimulationPercent>,

    /// Store the evaluated inputs under this name, replacing any previous one.
    #[arg(long)]
    save: Option<String>,

    /// Print the summary and rate impact as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum ScenarioCommand {
    /// List stored scenarios.
    List,
    /// Print a stored scenario's inputs as JSON.
    Show { name: String },
    /// Delete a stored scenario.
    Delete { name: String },
}

fn parse_simulation(s: &str) -> Result<SimulationPercent, String> {
    let percent: Decimal = s.trim().parse().map_err(|e| format!("{e}"))?;
    SimulationPercent::new(percent).map_err(|e| e.to_string())
}

// ─── helpers ─────────────────────────────────────────────────────────────────

async fn open_repository(cli: &Cli) -> Result<Box<dyn ScenarioRepository>> {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));

    let config = DbConfig {
        backend: cli.backend.clone(),
        connection_string: cli.db.clone(),
    };
    debug!(backend = %config.backend, "opening scenario store");
    registry
        .create(&config)
        .await
        .with_context(|| format!("cannot open scenario store '{}'", config.connection_string))
}

fn regime_table(cli: &Cli) -> Result<RegimeTable> {
    match &cli.regimes {
        Some(path) => load_regime_table(path)
            .with_context(|| format!("cannot load regimes from '{}'", path.display())),
        None => {
            warn!("no regime table given; every income stream will be unprocessed");
            Ok(RegimeTable::default())
        }
    }
}

/// Applies command line overrides on top of the loaded inputs.
fn apply_overrides(
    inputs: &mut ScenarioInputs,
    args: &EvaluateArgs,
) -> Result<()> {
    if let Some(path) = &args.incomes {
        inputs.incomes = load_income_csv(path)
            .with_context(|| format!("cannot load incomes from '{}'", path.display()))?;
    }
    if let Some(rate) = args.fetched_rate {
        inputs.rate.fetched_rate = Some(rate);
    }
    if let Some(raw) = &args.manual_rate {
        let Some(rate) = parse_manual_rate(raw) else {
            bail!("manual rate must be a number greater than zero, got '{raw}'");
        };
        inputs.rate.manual_rate = Some(rate);
        inputs.rate.override_enabled = true;
    }
    if let Some(percent) = args.simulate {
        inputs.rate.simulation_percent = percent.value();
    }
    Ok(())
}

async fn save_scenario(
    repo: &dyn ScenarioRepository,
    name: &str,
    inputs: &ScenarioInputs,
) -> Result<()> {
    match repo.get_scenario_by_name(name).await {
        Ok(mut existing) => {
            existing.inputs = inputs.clone();
            repo.update_scenario(&existing).await?;
        }
        Err(RepositoryError::NotFound) => {
            repo.create_scenario(NewScenario {
                name: name.to_string(),
                inputs: inputs.clone(),
            })
            .await?;
        }
        Err(e) => return Err(e.into()),
    }
    info!(name, "saved scenario");
    Ok(())
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn run_evaluate(
    cli: &Cli,
    args: &EvaluateArgs,
) -> Result<()> {
    let regimes = regime_table(cli)?;

    let mut repo = None;
    let mut inputs = match (&args.scenario, &args.name) {
        (Some(path), _) => load_scenario(path)
            .with_context(|| format!("cannot load scenario '{}'", path.display()))?,
        (None, Some(name)) => {
            let store = open_repository(cli).await?;
            let scenario = store
                .get_scenario_by_name(name)
                .await
                .with_context(|| format!("cannot load stored scenario '{name}'"))?;
            repo = Some(store);
            scenario.inputs
        }
        (None, None) => bail!("either --scenario or --name is required"),
    };
    apply_overrides(&mut inputs, args)?;

    let evaluation = evaluate_current(&inputs, &regimes);
    let impact = compare_rate_scenarios(&inputs, &regimes)
        .filter(|impact| impact.baseline_rate != impact.simulated_rate);

    if args.json {
        let output = serde_json::json!({
            "rate": evaluation.rate,
            "summary": evaluation.summary,
            "tax": evaluation.outcome,
            "unconverted": evaluation.unconverted,
            "rate_impact": impact,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let name = args.save.as_deref().or(args.name.as_deref());
        print!(
            "{}",
            Report {
                name,
                inputs: &inputs,
                evaluation: &evaluation,
                impact: impact.as_ref(),
            }
        );
    }

    if let Some(name) = &args.save {
        let store = match repo {
            Some(store) => store,
            None => open_repository(cli).await?,
        };
        save_scenario(store.as_ref(), name, &inputs).await?;
    }
    Ok(())
}

async fn run_scenarios(
    cli: &Cli,
    command: &ScenarioCommand,
) -> Result<()> {
    let repo = open_repository(cli).await?;
    match command {
        ScenarioCommand::List => {
            let scenarios = repo.list_scenarios().await?;
            if scenarios.is_empty() {
                println!("No stored scenarios.");
            }
            for scenario in scenarios {
                println!(
                    "{:<24} {} -> {} ({})  updated {}",
                    scenario.name,
                    scenario.inputs.origin_currency,
                    scenario.inputs.destination_currency,
                    scenario.inputs.destination,
                    scenario.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        ScenarioCommand::Show { name } => {
            let scenario = repo
                .get_scenario_by_name(name)
                .await
                .with_context(|| format!("cannot load stored scenario '{name}'"))?;
            println!("{}", serde_json::to_string_pretty(&scenario.inputs)?);
        }
        ScenarioCommand::Delete { name } => {
            let scenario = repo
                .get_scenario_by_name(name)
                .await
                .with_context(|| format!("cannot load stored scenario '{name}'"))?;
            repo.delete_scenario(scenario.id).await?;
            println!("Deleted scenario '{name}'.");
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    match &cli.command {
        Command::Evaluate(args) => run_evaluate(&cli, args).await,
        Command::Scenarios(command) => run_scenarios(&cli, command).await,
    }
}
