use cricket_analyst::analyst::{player_insight, Analyst};
use cricket_analyst::config::{DataPaths, LlmConfig};
use cricket_analyst::data::{CricketData, RankedEntry};
use cricket_analyst::chart::Chart;
use cricket_analyst::llm::LlmClient;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const BAR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "cricket-analyst")]
#[command(about = "IPL statistics with grounded AI answers")]
#[command(version)]
struct Args {
    /// Match table (default: $MATCHES_CSV or ./matches.csv)
    #[arg(long, global = true)]
    matches: Option<PathBuf>,

    /// Delivery table (default: $DELIVERIES_CSV or ./deliveries.csv)
    #[arg(long, global = true)]
    deliveries: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every batter in the dataset
    Players,
    /// Show the ten highest run scorers
    TopRuns,
    /// Show the ten leading wicket takers
    TopWickets,
    /// Show a player's card and season trend
    Player {
        /// Batter name exactly as it appears in the data
        name: String,
    },
    /// Ask a free-text question
    Ask {
        question: String,
    },
    /// Compare two batters
    Compare {
        player_a: String,
        player_b: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let paths = DataPaths::from_env().with_overrides(args.matches, args.deliveries);

    let data = CricketData::load(&paths).context("Failed to load cricket data")?;
    info!("Loaded {} deliveries", data.delivery_count());

    match args.command {
        Commands::Players => {
            for player in data.players() {
                println!("{}", player);
            }
            Ok(())
        }
        Commands::TopRuns => {
            let entries = data.top_run_scorers()?;
            print_ranking("TOP RUN SCORERS", &entries, "runs");
            println!("\n{}", Chart::top_run_scorers(&entries).render_text(BAR_WIDTH));
            Ok(())
        }
        Commands::TopWickets => {
            let entries = data.top_wicket_takers()?;
            print_ranking("TOP WICKET TAKERS", &entries, "wickets");
            println!("\n{}", Chart::top_wicket_takers(&entries).render_text(BAR_WIDTH));
            Ok(())
        }
        Commands::Player { name } => {
            if !data.has_player(&name) {
                println!("[WARN] '{}' does not appear in the data; showing empty stats", name);
            }
            let insight = player_insight(&data, &name)?;
            println!("{}", insight.card);
            println!("{}", insight.chart.render_text(BAR_WIDTH));
            Ok(())
        }
        Commands::Ask { question } => {
            let analyst = build_analyst(data)?;
            let response = analyst.ask(&question).await;
            print_banner("AI INSIGHT");
            println!("{}", response.answer);
            if let Some(chart) = response.chart {
                println!("\n{}", chart.render_text(BAR_WIDTH));
            }
            Ok(())
        }
        Commands::Compare { player_a, player_b } => {
            let analyst = build_analyst(data)?;
            let comparison = analyst.compare(&player_a, &player_b).await?;
            print_banner(&format!("{} vs {}", player_a, player_b));
            println!("{}", comparison.answer);
            println!("\n{}", comparison.chart.render_text(BAR_WIDTH));
            Ok(())
        }
    }
}

/// Only commands that talk to the model need the credential.
fn build_analyst(data: CricketData) -> Result<Analyst> {
    let config = LlmConfig::from_env()?;
    let llm = LlmClient::new(&config)?;
    info!("Using model {}", llm.model());
    Ok(Analyst::new(Arc::new(data), Arc::new(llm)))
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!(" {}", title);
    println!("{}", "=".repeat(80));
}

fn print_ranking(title: &str, entries: &[RankedEntry], unit: &str) {
    print_banner(title);
    for (i, entry) in entries.iter().enumerate() {
        println!("{:>3}. {:<30} {} {}", i + 1, entry.name, entry.value, unit);
    }
}
