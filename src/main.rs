mod cli;

use episort::bot::{BotOptions, BotService};
use episort::telegram::{self, TelegramClient};
use episort::{config, render, sorter};
use episort_common::{FileHandle, FileRecord, MediaKind, UserId};
use episort_db::pool::init_pool;
use episort_db::SqliteFileStore;
use episort_parser::{extract_with_rule, Identity, MatchRule};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, IsTerminal};
use std::path::Path;
use std::sync::Arc;

async fn run_bot(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let token = config.require_token()?;

    tracing::info!("Starting episort bot");

    // Relative database paths live next to the config file
    let base_dir = config_path
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .or_else(|| std::env::current_dir().ok());
    let db_path = config.database_path(base_dir.as_deref());
    let db_path_str = db_path.to_string_lossy();
    tracing::info!("Initializing database at {}", db_path_str);
    let db_pool = init_pool(&db_path_str)
        .with_context(|| format!("Failed to open database {}", db_path_str))?;

    let store = Arc::new(SqliteFileStore::new(db_pool));
    let client = Arc::new(TelegramClient::new(&config.telegram, token));
    let options = BotOptions {
        delivery: config.delivery.clone(),
        report: config.report.clone(),
    };
    let bot = Arc::new(BotService::new(store, client.clone(), options));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    telegram::run_polling(client, bot, &config.telegram, shutdown).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "episort=trace,episort_db=debug,episort_common=debug,episort_parser=debug".to_string()
        } else {
            "episort=debug,episort_db=info".to_string()
        }
    });

    // Logs go to stderr so report output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_bot(cli.config.as_deref()))
        }
        Commands::Analyze { names, file, json } => {
            analyze_names(names, file.as_deref(), cli.config.as_deref(), json)
        }
        Commands::Extract { name } => extract_name(&name),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("episort {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    sorted: Vec<SortedEntry<'a>>,
    missing: &'a BTreeMap<u64, sorter::MissingEpisodes>,
}

#[derive(Serialize)]
struct SortedEntry<'a> {
    name: &'a str,
    identity: Identity,
    unparseable: bool,
}

fn read_names(names: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    let lines: Vec<String> = if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read names from {:?}", path))?
            .lines()
            .map(str::to_string)
            .collect()
    } else if !names.is_empty() {
        return Ok(names);
    } else {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            anyhow::bail!("No names given: pass them as arguments, with --file, or on stdin");
        }
        stdin
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .context("Failed to read names from stdin")?
    };

    Ok(lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

fn analyze_names(
    names: Vec<String>,
    file: Option<&Path>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let names = read_names(names, file)?;
    if names.is_empty() {
        println!("No names to sort.");
        return Ok(());
    }

    let records = names
        .into_iter()
        .map(|name| {
            FileRecord::new(
                UserId::from(0),
                FileHandle::from(name.as_str()),
                name,
                MediaKind::Document,
            )
        })
        .collect();
    let result = sorter::analyze(records);

    if json {
        let report = AnalyzeReport {
            sorted: result
                .ordered
                .iter()
                .map(|(identity, record)| SortedEntry {
                    name: &record.name,
                    identity: *identity,
                    unparseable: identity.is_unparseable(),
                })
                .collect(),
            missing: &result.missing,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let config = config::load_config_or_default(config_path)?;
    for message in render::report_messages(&result, &config.report) {
        println!("{}\n", message);
    }

    Ok(())
}

fn extract_name(name: &str) -> Result<()> {
    let (identity, rule) = extract_with_rule(name);

    println!("Name: {}", name);
    match rule {
        Some(rule) => {
            println!("Season: {}", identity.season);
            println!("Episode: {}", identity.episode);
            println!("Matched: {}", describe_rule(rule));
        }
        None => {
            println!("Season: {} (unparseable)", identity.season);
            println!("Episode: {}", identity.episode);
            println!("Matched: nothing, sorted last");
        }
    }

    Ok(())
}

fn describe_rule(rule: MatchRule) -> String {
    match rule {
        MatchRule::SeasonEpisode => format!("{} (season and episode)", rule),
        MatchRule::Episode => format!("{} (episode only, season 1)", rule),
        MatchRule::BareNumber => format!("{} (first number, season 1)", rule),
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_summary(&config);
        }
        None => match config::find_default_config() {
            Some(p) => return validate_config(Some(&p)),
            None => {
                println!("No config file specified, using defaults");
                print_summary(&config::load_config_or_default(None)?);
            }
        },
    }

    Ok(())
}

fn print_summary(config: &config::Config) {
    println!("  Telegram API: {}", config.telegram.api_url);
    println!(
        "  Token: {}",
        if config.require_token().is_ok() {
            "configured"
        } else {
            "missing"
        }
    );
    println!("  Poll timeout: {}s", config.telegram.poll_timeout_secs);
    println!("  Database: {}", config.storage.database.display());
    println!("  Delivery rate: {}/s", config.delivery.per_second);
    println!("  Clear on failure: {}", config.delivery.clear_on_failure);
    println!("  Max listed missing: {}", config.report.max_listed_missing);
    println!("  Message limit: {}", config.report.message_limit);
}
