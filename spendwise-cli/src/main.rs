use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendwise_ai::{PredictionService, PredictionSource};
use spendwise_core::{analytics, parse_expense_csv, ExpenseRecord};

mod auth;
mod chat;
mod commands;
mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "spendwise", version, about = "AI-assisted expense tracking")]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict amount and category for a description
    Predict { text: String },

    /// Categorize with the keyword rules only
    Classify { text: String },

    /// Categorize with the AI backend (keyword rules as fallback)
    Categorize { text: String },

    /// Suggest likely expenses from recent history
    Suggest,

    /// Record an expense
    Add {
        #[arg(long)]
        description: String,

        #[arg(long)]
        amount: f64,

        /// Food, Transport, Shopping, Entertainment, Bills or Other (default: categorize)
        #[arg(long)]
        category: Option<String>,
    },

    /// List expenses, newest first
    List,

    /// Delete an expense by id
    Delete { id: String },

    /// Totals overall, today and per category
    Summary,

    /// Import expenses from a CSV (date,description,amount,category)
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Ask questions about your spending
    Chat,

    /// Read description edits from stdin, one per line, and print debounced predictions
    Watch,

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// API key management
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Store a Gemini API key in auth.json
    PasteGeminiKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let home = state::ensure_spendwise_home()?;
    let cfg = config::load_config(&home)?;
    debug!(home = %home.display(), ai_enabled = cfg.ai.enabled, "loaded config");

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&home)?,
        },

        Command::Auth { command } => match command {
            AuthCommand::PasteGeminiKey => auth::paste_gemini_key(&home)?,
        },

        Command::Classify { text } => {
            let service = build_service(&home, &cfg)?;
            println!("{}", service.classifier().classify(&text));
        }

        Command::Categorize { text } => {
            let service = build_service(&home, &cfg)?;
            println!("{}", service.categorize(&text).await);
        }

        Command::Predict { text } => {
            let service = build_service(&home, &cfg)?;
            let out = service.predict_traced(&text).await;
            let p = &out.prediction;
            println!(
                "{} | ${:.2} | {} | confidence={:.2}",
                p.description, p.amount, p.category, p.confidence
            );
            let source = match &out.source {
                PredictionSource::Live => "live".to_string(),
                PredictionSource::Mock => "mock".to_string(),
                PredictionSource::Fallback(e) => format!("mock fallback ({e})"),
            };
            println!("source: {source}");
            println!("autofill: {}", if p.should_autofill() { "yes" } else { "no" });
        }

        Command::Suggest => {
            let service = build_service(&home, &cfg)?;
            let ledger = state::load_ledger(&state::ledger_path(&home))?;
            let recent: Vec<ExpenseRecord> = ledger.records().iter().take(10).cloned().collect();
            for s in service.suggest(&recent).await {
                println!(
                    "- {} ${:.2} ({}, confidence={:.2})",
                    s.description, s.amount, s.category, s.confidence
                );
            }
        }

        Command::Add {
            description,
            amount,
            category,
        } => {
            let service = build_service(&home, &cfg)?;
            let path = state::ledger_path(&home);
            let record =
                commands::add_expense(&path, &service, description, amount, category.as_deref())
                    .await?;
            println!("Added {} ({} ${:.2})", record.id(), record.category(), record.amount());
        }

        Command::List => {
            let ledger = state::load_ledger(&state::ledger_path(&home))?;
            if ledger.is_empty() {
                println!("No expenses yet. Add one: spendwise add --description <text> --amount <n>");
            }
            let tz = cfg.timezone()?;
            for r in ledger.records() {
                println!(
                    "{} | {} | {:<13} | ${:>9.2} | {}",
                    r.id(),
                    r.occurred_at().with_timezone(&tz).format("%Y-%m-%d %H:%M"),
                    r.category().as_str(),
                    r.amount(),
                    r.description()
                );
            }
        }

        Command::Delete { id } => {
            let path = state::ledger_path(&home);
            let mut ledger = state::load_ledger(&path)?;
            match ledger.remove(&id) {
                Some(r) => {
                    state::save_ledger(&path, &ledger)?;
                    println!("Deleted {} ({})", r.id(), r.description());
                }
                None => bail!("no expense with id {id}"),
            }
        }

        Command::Summary => {
            let ledger = state::load_ledger(&state::ledger_path(&home))?;
            let tz = cfg.timezone()?;
            let today = chrono::Utc::now().with_timezone(&tz).date_naive();
            let records = ledger.records();

            println!("Total: ${:.2} across {} expenses", analytics::total_spent(records), records.len());
            println!("Today: ${:.2}", analytics::spent_on(records, today, tz));
            println!();
            for (category, total) in analytics::category_totals(records) {
                println!("{:<13} ${:>9.2}", category.as_str(), total);
            }
        }

        Command::Import { csv } => {
            import_csv(&home, &cfg, &csv)?;
        }

        Command::Chat => {
            let ledger = state::load_ledger(&state::ledger_path(&home))?;
            let mut log = chat::ChatLog::open_today(&home)?;
            let stdin = std::io::stdin();
            chat::chat_loop(stdin.lock(), std::io::stdout(), ledger.records(), Some(&mut log))?;
        }

        Command::Watch => {
            let service = Arc::new(build_service(&home, &cfg)?);
            let input = BufReader::new(tokio::io::stdin());
            commands::watch(service, cfg.ai.debounce(), input, std::io::stdout()).await?;
        }
    }

    Ok(())
}

fn build_service(home: &Path, cfg: &config::Config) -> Result<PredictionService> {
    let key = auth::api_key(home)?;
    PredictionService::from_settings(&cfg.ai, key.as_deref())
}

fn import_csv(home: &Path, cfg: &config::Config, csv: &Path) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {}", csv.display());
    }
    let service = build_service(home, cfg)?;
    let records = parse_expense_csv(csv, service.classifier())
        .with_context(|| format!("parsing {}", csv.display()))?;

    let path = state::ledger_path(home);
    let mut ledger = state::load_ledger(&path)?;
    let imported = records.len();
    info!(imported, csv = %csv.display(), "parsed expense csv");
    for r in records {
        ledger.add(r);
    }
    state::save_ledger(&path, &ledger)?;
    println!("Imported {} expenses from {}", imported, csv.display());
    Ok(())
}
