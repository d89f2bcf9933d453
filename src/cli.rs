use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediascout")]
#[command(author, version, about = "Search external catalogues for movies, shows, books, games, and places")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search one content domain and list the candidates
    Search {
        /// Content domain (movie, series, book, game, travel)
        domain: String,

        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search, then commit one candidate with creator enrichment
    Pick {
        /// Content domain (movie, series, book, game, travel)
        domain: String,

        /// Free-text query
        query: String,

        /// Zero-based index of the candidate to commit
        #[arg(default_value = "0")]
        index: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the content-domain to provider table and provider availability
    Domains,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
