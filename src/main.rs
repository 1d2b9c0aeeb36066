use analytics::{StatisticReport, StatisticsEngine};
use analyzer::Analyzer;
use anyhow::{Context, Result};
use api_client::{MarketDataClient, QuandlClient};
use charts::{ChartOptions, contract_chart_title, root_chart_title, save_price_chart};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{Config, ContractResolver, load_config};
use core_types::Statistic;
use database::{DbRepository, connect, run_migrations};
use futures::future::join_all;
use indicatif::ProgressStyle;
use std::path::PathBuf;
use tracing::Instrument;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// The main entry point for the futstats application.
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; everything can come from config.toml.
    dotenvy::dotenv().ok();
    init_tracing()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    // Initialize the database connection and run migrations
    let db_pool = connect(&config.database).await?;
    run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    // Execute the appropriate command
    match cli.command {
        Commands::Backfill(args) => handle_backfill(args, &config, db_repo).await,
        Commands::Stats(args) => handle_stats(args, &config, db_repo).await,
        Commands::Chart(args) => handle_chart(args, &config, &db_repo).await,
    }
}

/// Log lines are written through the indicatif layer so they print above
/// any active progress bar instead of tearing it.
fn init_tracing() -> Result<()> {
    let indicatif_layer = IndicatifLayer::new();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .try_init()?;
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Settlement-price analytics for futures contract roots.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download settlement histories for every contract of the given roots.
    Backfill(BackfillArgs),
    /// Rank the contracts of a root by a statistic.
    Stats(StatsArgs),
    /// Render a price chart for a root or a single contract.
    Chart(ChartArgs),
}

#[derive(Args)]
struct BackfillArgs {
    /// Contract roots to download (e.g., "CME_ES CME_NQ").
    #[arg(long, num_args = 1.., required = true)]
    roots: Vec<String>,
}

#[derive(Args)]
struct StatsArgs {
    /// The contract root to analyze (e.g., "CME_GC").
    #[arg(long)]
    root: String,

    /// The statistic to rank by (e.g., "sharpe-ratio"). All five when omitted.
    #[arg(long)]
    statistic: Option<Statistic>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ChartArgs {
    /// Chart every contract of this root on one set of axes.
    #[arg(long)]
    root: Option<String>,

    /// Chart a single contract (e.g., "CME_ES3").
    #[arg(long)]
    contract: Option<String>,
}

// ==============================================================================
// Backfill Command Logic
// ==============================================================================

/// Fetches every contract of the requested roots concurrently and stores them.
async fn handle_backfill(args: BackfillArgs, config: &Config, db_repo: DbRepository) -> Result<()> {
    let resolver = ContractResolver::new(&config.contracts);
    let mut contract_ids = Vec::new();
    for root in &args.roots {
        contract_ids.extend(resolver.resolve(root)?);
    }
    tracing::info!(roots = ?args.roots, contracts = contract_ids.len(), "Starting backfill.");

    let api_client = QuandlClient::new(&config.api)?;

    // Set up the progress bar
    let backfill_span = tracing::info_span!("backfill");
    backfill_span.pb_set_style(
        &ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )?
        .progress_chars("#>-"),
    );
    backfill_span.pb_set_length(contract_ids.len() as u64);

    // Create concurrent tasks, one per contract
    let tasks: Vec<_> = contract_ids
        .into_iter()
        .map(|contract_id| {
            let api_client = api_client.clone();
            let db_repo = db_repo.clone();
            let span = backfill_span.clone();

            tokio::spawn(async move {
                let result = backfill_contract(&api_client, &db_repo, &contract_id).await;
                span.pb_inc(1);
                (contract_id, result)
            })
        })
        .collect();

    // Wait for all concurrent tasks to complete
    let results = join_all(tasks).instrument(backfill_span).await;

    let mut stored = 0u64;
    let mut failed = 0usize;
    for result in results {
        match result {
            Ok((_, Ok(rows))) => stored += rows,
            Ok((contract_id, Err(e))) => {
                failed += 1;
                tracing::error!(contract_id, error = %e, "Backfill failed.");
            }
            Err(e) => {
                failed += 1;
                tracing::error!(error = %e, "A backfill task panicked.");
            }
        }
    }

    tracing::info!(stored, failed, "Backfill complete.");
    if failed > 0 {
        anyhow::bail!("{failed} contract(s) failed to backfill");
    }
    Ok(())
}

async fn backfill_contract(
    client: &impl MarketDataClient,
    db_repo: &DbRepository,
    contract_id: &str,
) -> Result<u64> {
    let prices = client.fetch_contract(contract_id).await?;
    Ok(db_repo.save_prices(&prices).await?)
}

// ==============================================================================
// Stats Command Logic
// ==============================================================================

async fn handle_stats(args: StatsArgs, config: &Config, db_repo: DbRepository) -> Result<()> {
    let engine = StatisticsEngine::new(config.analytics.clone())?;
    let analyzer = Analyzer::new(ContractResolver::new(&config.contracts), db_repo, engine);

    let reports = match args.statistic {
        Some(statistic) => vec![analyzer.run(&args.root, statistic).await?],
        None => analyzer.run_all(&args.root).await?,
    };

    match args.format {
        OutputFormat::Table => {
            for report in &reports {
                print_report(&args.root, report);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(())
}

fn print_report(root: &str, report: &StatisticReport) {
    let mut table = Table::new();
    table.set_header(report.headers());
    for row in report.cells() {
        table.add_row(row);
    }

    println!("\n{} for {}", report.statistic(), root);
    println!("{table}");

    if !report.excluded().is_empty() {
        println!("Excluded (insufficient history):");
        for exclusion in report.excluded() {
            println!(
                "  {}: {} of {} returns",
                exclusion.contract_id, exclusion.available, exclusion.required
            );
        }
    }
}

// ==============================================================================
// Chart Command Logic
// ==============================================================================

async fn handle_chart(args: ChartArgs, config: &Config, db_repo: &DbRepository) -> Result<()> {
    let (name, title, prices) = match (args.root, args.contract) {
        (Some(root), _) => {
            let contract_ids = ContractResolver::new(&config.contracts).resolve(&root)?;
            let prices = db_repo.get_prices(&contract_ids).await?;
            let title = root_chart_title(&root);
            (root, title, prices)
        }
        (None, Some(contract)) => {
            let prices = db_repo.get_contract_prices(&contract).await?;
            let title = contract_chart_title(&contract);
            (contract, title, prices)
        }
        (None, None) => anyhow::bail!("either --root or --contract is required"),
    };

    let path = config.charts.output_dir.join(format!("{name}.svg"));
    save_price_chart(&path, &title, &prices, &ChartOptions::from(&config.charts))?;
    println!("Saved {}", path.display());
    Ok(())
}
