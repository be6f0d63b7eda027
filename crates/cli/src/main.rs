//! Camptown CLI — find two rhyming titles in "Camptown Races" meter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use camptown_core::config::{config_path, datastore_path, dictionary_path, Config};
use camptown_core::language::g2p::PronouncingDictionary;
use camptown_core::meter::{MeterClassifier, Scan};
use camptown_core::search::wikipedia::WikipediaSource;
use camptown_core::search::{RhymeSearch, SearchOutcome, SearchSettings};
use camptown_core::store::{JsonFileRepository, MatchRepository, NullRepository};
use camptown_core::verse::{compose_verse, wiki_url};

/// HTTP timeout for one batch request to Wikipedia.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "camptown",
    about = "Pair rhyming Wikipedia titles in Camptown meter",
    version,
)]
struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Config JSON file [env: CAMPTOWN_CONFIG]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Full CMU pronouncing dictionary, cmudict-0.7b [env: CAMPTOWN_CMUDICT]
    #[arg(long, global = true)]
    cmudict: Option<PathBuf>,

    /// Match store JSON file [env: LOCAL_DATASTORE]
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search random titles for a rhyming pair and print the verse
    Run(RunArgs),
    /// Show how titles scan against the meter
    Check(CheckArgs),
    /// List rhyme candidates waiting for a partner
    Store(StoreArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Batches to fetch before giving up (default from config)
    #[arg(long)]
    attempts: Option<u32>,

    /// Seconds to wait between batches (default from config)
    #[arg(long)]
    backoff: Option<f64>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Titles to scan
    #[arg(required = true)]
    titles: Vec<String>,
}

#[derive(Parser, Debug)]
struct StoreArgs {
    /// Print the raw JSON mapping
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ─── Setup ───────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config.clone().or_else(config_path) {
        Some(path) => Config::from_file(&path),
        None => Ok(Config::default()),
    }
}

/// Load the pronouncing dictionary. `run` insists on the full CMU release;
/// `check` only warns, so small dictionaries can be tried out.
fn load_dictionary(path: Option<PathBuf>, require_full: bool) -> Result<Arc<PronouncingDictionary>> {
    let Some(path) = path else {
        bail!(
            "No pronouncing dictionary configured. Pass --cmudict, set CAMPTOWN_CMUDICT \
             or set \"cmudict\" in the config to a copy of cmudict-0.7b"
        );
    };
    let dictionary = PronouncingDictionary::from_file(&path)?;
    if !dictionary.is_full() {
        if require_full {
            bail!(
                "{} has only {} entries, expected the full CMU dictionary (cmudict-0.7b)",
                path.display(),
                dictionary.len()
            );
        }
        log::warn!(
            "{} has only {} entries; most titles will not resolve",
            path.display(),
            dictionary.len()
        );
    }
    Ok(Arc::new(dictionary))
}

fn build_classifier(cli: &Cli, config: &Config, require_full: bool) -> Result<MeterClassifier> {
    let path = cli
        .cmudict
        .clone()
        .or_else(dictionary_path)
        .or_else(|| config.cmudict.clone());
    let dictionary = load_dictionary(path, require_full)?;
    MeterClassifier::from_config(config, dictionary).context("Invalid meter configuration")
}

fn open_repository(cli: &Cli) -> Box<dyn MatchRepository> {
    match cli.store.clone().or_else(datastore_path) {
        Some(path) => Box::new(JsonFileRepository::new(path)),
        None => Box::new(NullRepository),
    }
}

// ─── Run ─────────────────────────────────────────────────────────

fn run_search(cli: &Cli, args: &RunArgs) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(attempts) = args.attempts {
        config.max_attempts = attempts;
    }
    if let Some(backoff) = args.backoff {
        config.backoff_secs = backoff;
    }

    let settings = SearchSettings::from_config(&config).context("Invalid search settings")?;
    let classifier = build_classifier(cli, &config, true)?;
    let repo = open_repository(cli);
    log::info!("Using {} match store", repo.name());
    let mut store = repo.load()?;

    let mut source = WikipediaSource::new(config.batch_size, FETCH_TIMEOUT)?;
    let search = RhymeSearch::new(&classifier, settings);
    let outcome = search.run(&mut store, &mut source);

    // Persist partial progress whatever happened.
    repo.dump(&store)?;

    match outcome.context("Search aborted")? {
        SearchOutcome::Matched(pair) => {
            match compose_verse(&pair.first, &pair.second, config.max_post_len) {
                Some(verse) => {
                    println!("{}", verse);
                    println!();
                    println!("{}", wiki_url(&pair.first));
                    println!("{}", wiki_url(&pair.second));
                }
                None => log::warn!("Oh no, this was too long to post"),
            }
        }
        SearchOutcome::Exhausted => log::info!("No pair this time"),
    }
    Ok(())
}

// ─── Check ───────────────────────────────────────────────────────

fn run_check(cli: &Cli, args: &CheckArgs) -> Result<()> {
    let config = load_config(cli)?;
    let classifier = build_classifier(cli, &config, false)?;

    for title in &args.titles {
        let scan = classifier.scan(title);
        let verdict = match &scan {
            Scan::Banned => "banned".to_string(),
            Scan::Unresolved { word } => format!("unknown word {:?}", word),
            Scan::TooLong { .. } => "too long".to_string(),
            Scan::Mismatch { .. } => "no match".to_string(),
            Scan::Match { .. } => "match".to_string(),
        };
        let stresses = scan.stresses().unwrap_or("-");
        let rhyme = classifier
            .rhyme_key_for(title)
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{}\t{}\t{}\t{}", title, stresses, verdict, rhyme);
    }
    Ok(())
}

// ─── Store ───────────────────────────────────────────────────────

fn run_store(cli: &Cli, args: &StoreArgs) -> Result<()> {
    let store = open_repository(cli).load()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&store)?);
        return Ok(());
    }
    for (key, title) in store.iter() {
        println!("{}\t{}", key, title);
    }
    log::info!("{} rhyme candidates", store.len());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match &cli.command {
        Command::Run(args) => run_search(&cli, args),
        Command::Check(args) => run_check(&cli, args),
        Command::Store(args) => run_store(&cli, args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
