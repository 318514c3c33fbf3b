use clap::Parser;
use storage::{Database, models::RecordCategory, services::record_computation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recompute-records")]
#[command(about = "Recomputes regional record tags from the full result history", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// competitions, meetups or video-based. Every category when absent
    #[arg(short, long)]
    category: Option<RecordCategory>,

    /// Recompute a single event. Requires --category
    #[arg(short, long, requires = "category")]
    event: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("recompute_records={},storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;

    let report = match (cli.event.as_deref(), cli.category) {
        (Some(event_id), Some(category)) => {
            record_computation::compute_records(db.pool(), event_id, category).await?
        }
        (_, category) => record_computation::compute_all_records(db.pool(), category).await?,
    };

    for failed in &report.failed_units {
        tracing::error!(
            "{} {} {}: {}",
            failed.event_id,
            failed.category,
            failed
                .metric
                .map(|m| m.to_string())
                .unwrap_or_else(|| "all metrics".to_string()),
            failed.reason
        );
    }

    tracing::info!(
        "Done: {} units processed, {} failed",
        report.processed_units,
        report.failed_units.len()
    );

    if !report.is_success() {
        anyhow::bail!("{} record units failed", report.failed_units.len());
    }

    Ok(())
}
