//! PlanCompare - Main Entry Point
//!
//! Terminal front-end that asks the planning service for all three
//! allocation strategies and prints them side by side.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use plan_compare::common::i18n::{Label, Locale};
use plan_compare::comparison::text::render_comparison;
use plan_compare::config::load_config;
use plan_compare::{
    ComparisonSession, PlanSource, PlannerRestClient, ScenarioComparator, SessionContext, Strategy,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PLANNER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output language (en, ru)
    #[arg(long, env = "PLANNER_LANG")]
    lang: Option<Locale>,

    /// Planning service base URL
    #[arg(long, env = "PLANNER_URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the planning service is up
    Health,
    /// List assets the planning service can quote
    Symbols,
    /// Compare the three allocation strategies for one order
    Compare {
        /// Asset to buy
        #[arg(long)]
        base: String,
        /// Asset to pay with
        #[arg(long)]
        quote: String,
        /// Amount of quote to spend, e.g. "1 000,5"
        #[arg(long)]
        amount: String,
        /// Show the single-exchange scenario at equal quantity
        #[arg(long)]
        equalize: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = load_config(Some(&args.config)).context("failed to load configuration")?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting PlanCompare");
    debug!("Configuration file: {}", args.config);

    if let Some(url) = args.url {
        config.planner.base_url = url;
    }
    let locale = args.lang.unwrap_or(config.display.locale);

    let client = PlannerRestClient::from_config(&config.planner)?;
    info!("Planning service: {}", client.base_url());

    match args.command {
        Command::Health => {
            // transport failure counts as down
            let up = client.health().await.unwrap_or(false);
            let label = if up { Label::ServerOk } else { Label::ServerFail };
            println!("{}", locale.label(label));
        }
        Command::Symbols => {
            let catalog = client.symbols().await?;
            println!("base:  {}", catalog.bases.join(", "));
            println!("quote: {}", catalog.quotes.join(", "));
        }
        Command::Compare {
            base,
            quote,
            amount,
            equalize,
        } => {
            let comparator = ScenarioComparator::from_config(client, &config.planner);
            let ctx = SessionContext::new(locale, config.display.format, &config.planner.settlement)
                .with_view(config.display.view);
            let mut session = ComparisonSession::new(comparator, ctx);

            let ok = session.calculate(&base, &quote, &amount).await;
            if let Some(reason) = session.validation() {
                println!("{}", reason);
                std::process::exit(2);
            }
            if ok && equalize {
                session.toggle(Strategy::BestSingle.index());
            }
            print!("{}", render_comparison(&session.render(), locale));
            if !ok {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
