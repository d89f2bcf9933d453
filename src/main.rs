mod cli;

use mediascout::{
    config,
    discovery::{self, CanonicalCandidate, SelectedCandidate},
    search::{Aggregator, SearchHint, SearchPhase, SearchSession, SelectionHandler},
    ProviderKey,
};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

/// Logs committed candidates; the CLI prints them itself.
struct LogHandler;

#[async_trait]
impl SelectionHandler for LogHandler {
    async fn on_select(&self, selected: SelectedCandidate) {
        tracing::info!(
            id = %selected.candidate.external_id,
            domain = %selected.domain,
            creator = %selected.candidate.creator,
            "Selected {}",
            selected.candidate.title
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediascout=debug,mediascout_common=debug".to_string()
        } else {
            "mediascout=info,mediascout_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            domain,
            query,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search(
                cli.config.as_deref(),
                &domain,
                &query.join(" "),
                json,
            ))
        }
        Commands::Pick {
            domain,
            query,
            index,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(pick(cli.config.as_deref(), &domain, &query, index, json))
        }
        Commands::Domains => domains(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediascout {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn search(config_path: Option<&Path>, domain: &str, query: &str, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let aggregator = Aggregator::from_config(&config);
    let provider = discovery::provider_for_domain(domain);

    tracing::debug!(domain, provider = %provider, "Searching");
    let results = aggregator.search(provider, query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        print_hint(&aggregator, provider, query);
        return Ok(());
    }

    for (i, candidate) in results.iter().enumerate() {
        print_candidate(i, candidate);
    }

    Ok(())
}

async fn pick(
    config_path: Option<&Path>,
    domain: &str,
    query: &str,
    index: usize,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let aggregator = Arc::new(Aggregator::from_config(&config));
    let session = SearchSession::for_domain(aggregator.clone(), domain, Arc::new(LogHandler));
    let mut updates = session.subscribe();

    session.input(query);
    let settled = updates
        .wait_for(|s| matches!(s.phase, SearchPhase::Settled | SearchPhase::Idle))
        .await?
        .clone();

    if settled.results.is_empty() {
        print_hint(&aggregator, settled.provider, query);
        return Ok(());
    }

    let Some(selected) = session.select(index).await else {
        anyhow::bail!(
            "Index {} out of range ({} candidates)",
            index,
            settled.results.len()
        );
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        print_candidate(index, &selected.candidate);
        println!("    domain: {}", selected.domain);
    }

    Ok(())
}

fn print_candidate(index: usize, candidate: &CanonicalCandidate) {
    print!("[{}] {}", index, candidate.title);
    if !candidate.years.is_empty() {
        print!(" ({})", candidate.years);
    }
    if let Some(rating) = candidate.external_rating {
        print!(" {:.1}/5", rating);
    }
    println!();

    if !candidate.creator.is_empty() {
        println!("    by {}", candidate.creator);
    }
    if let Some(ref label) = candidate.location_label {
        println!("    {}", label);
    } else if !candidate.excerpt.is_empty() {
        println!("    {}", candidate.excerpt);
    }
    println!("    id: {}", candidate.external_id);
}

fn print_hint(aggregator: &Aggregator, provider: ProviderKey, query: &str) {
    match aggregator.hint(provider, query) {
        Some(SearchHint::NotConfigured { provider }) => {
            println!("No API key configured for {} search.", provider);
        }
        Some(SearchHint::TypeMore { remaining }) => {
            println!("Type {} more character(s).", remaining);
        }
        None => println!("No results."),
    }
}

fn domains(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let aggregator = Aggregator::from_config(&config);

    for (domain, provider) in discovery::router::table() {
        let status = if aggregator.is_configured(*provider) {
            "✓"
        } else {
            "✗"
        };
        println!(
            "{} {:<8} -> {:<6} (min {} chars)",
            status,
            domain,
            provider.as_str(),
            aggregator.min_chars(*provider)
        );
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Debounce: {} ms", config.search.debounce_ms);
    println!(
        "  Minimum characters: {} (places: {})",
        config.search.min_chars, config.search.place_min_chars
    );
    println!("  Max results: {}", config.search.max_results);
    println!(
        "  TMDB: {} ({} -> {})",
        key_status(&config.tmdb.api_key),
        config.tmdb.language,
        config.tmdb.fallback_language
    );
    println!("  RAWG: {}", key_status(&config.rawg.api_key));
    println!("  Nominatim Accept-Language: {}", config.nominatim.accept_language);

    Ok(())
}

fn key_status(key: &str) -> &'static str {
    if key.trim().is_empty() {
        "no API key"
    } else {
        "API key set"
    }
}
