use crate::logging::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rqcache")]
#[command(about = "Run SPARQL queries through a content-addressed response cache")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        env = "RQCACHE_CONFIG",
        help = "Settings file (defaults to ./rqcache.toml when present)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "RQCACHE_ENDPOINT",
        help = "SPARQL endpoint URL"
    )]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "Directory holding cached responses")]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding named <name>.rq queries")]
    pub queries_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Ignore existing cache entries when starting up"
    )]
    pub no_cache: bool,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run a query given inline or from a file")]
    Query {
        #[arg(help = "Query text", required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        #[arg(long, short = 'f', help = "Read the query text from a file")]
        file: Option<PathBuf>,
        #[arg(long, help = "Print the raw response body instead of rows")]
        json: bool,
    },
    #[command(about = "Run a named query from the queries directory")]
    Run {
        #[arg(help = "Query name, resolved to <queries-dir>/<name>.rq")]
        name: String,
        #[arg(help = "Value substituted for the first {{.}} placeholder")]
        argument: String,
        #[arg(long, help = "Print the raw response body instead of rows")]
        json: bool,
    },
    #[command(about = "Print the cache key and entry path for a query")]
    Key {
        #[arg(help = "Query text")]
        text: String,
    },
    #[command(about = "Cache maintenance")]
    Cache {
        #[command(subcommand)]
        subcommand: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    #[command(about = "List the keys of all stored entries")]
    List,
}
