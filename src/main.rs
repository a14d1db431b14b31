//! outreach-pulse CLI
//!
//! Thin binary over the library: loads the roster, runs the coordinator
//! for one platform, and prints the run result as pretty JSON, optionally
//! followed by a top-N ranking.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use outreach_pulse::models::{RankDirection, RankMetric};
use outreach_pulse::services::aggregator::WorkspaceAggregator;
use outreach_pulse::services::analytics::rank;
use outreach_pulse::services::identity::IdentityCache;
use outreach_pulse::services::roster::{RosterSource, DEFAULT_SHEET_GID};
use outreach_pulse::services::run::RunCoordinator;
use outreach_pulse_core::{health_rules, DateRange};
use outreach_pulse_platforms::{InstantlyPlatform, Platform, SmartleadPlatform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlatformArg {
    Instantly,
    Smartlead,
}

#[derive(Parser, Debug)]
#[command(name = "outreach-pulse", version, about = "Aggregate cold-email campaign metrics across client workspaces")]
struct Cli {
    /// Google Sheet URL holding the workspace roster
    #[arg(long, env = "ROSTER_SHEET_URL")]
    sheet_url: String,

    /// Sheet tab (gid) for the roster
    #[arg(long, default_value = DEFAULT_SHEET_GID)]
    gid: String,

    /// Range start, YYYY-MM-DD (default: January 1 of this year)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Range end, YYYY-MM-DD (default: today)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Upstream platform to aggregate
    #[arg(long, value_enum, default_value_t = PlatformArg::Instantly)]
    platform: PlatformArg,

    /// Also print a top-N ranking of that many workspaces
    #[arg(long)]
    top: Option<usize>,

    /// Metric the ranking orders by
    #[arg(long, default_value = "emails_sent")]
    metric: RankMetric,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outreach_pulse=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let range = match (cli.start_date, cli.end_date) {
        (Some(start), Some(end)) => {
            anyhow::ensure!(start <= end, "start_date must not be after end_date");
            DateRange::new(start, end)
        }
        (None, None) => DateRange::year_to_date(),
        _ => anyhow::bail!("--start-date and --end-date must be given together"),
    };

    let platform: Arc<dyn Platform> = match cli.platform {
        PlatformArg::Instantly => Arc::new(InstantlyPlatform::new()),
        PlatformArg::Smartlead => Arc::new(SmartleadPlatform::new()),
    };

    let roster = RosterSource::new().load(&cli.sheet_url, &cli.gid).await?;
    anyhow::ensure!(!roster.is_empty(), "roster sheet yielded no workspaces");

    let aggregator = Arc::new(WorkspaceAggregator::new(
        platform,
        Arc::new(IdentityCache::new()),
    ));
    let result = RunCoordinator::new(aggregator).run(&roster, &range).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(n) = cli.top {
        let ranking = rank(&result.summaries, cli.metric, RankDirection::Top, n);
        println!(
            "\nTop {} by {}:",
            ranking.len(),
            cli.metric.as_str()
        );
        for row in &ranking {
            println!(
                "  {:>2}. {:<32} sent={:<8} replies={:<6} opps={:<5} rate={:.2}% [{}]",
                row.rank,
                row.workspace_name,
                row.emails_sent,
                row.replies,
                row.opportunities,
                row.reply_rate,
                row.health
            );
        }

        println!();
        for rule in health_rules() {
            println!("  {} — {}", rule.label, rule.description);
        }
    }

    Ok(())
}
