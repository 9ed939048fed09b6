//! Subcommand execution

use crate::cli::{CacheCommands, Cli, Commands};
use crate::errors::CliError;
use crate::settings::{Overrides, Resolved, Settings};
use rqcache_core::{CacheKey, CacheStore, HttpTransport, QueryResults, Repository, Solution};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, instrument};

/// Resolve settings and run the selected subcommand
pub fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        command,
        config,
        endpoint,
        cache_dir,
        queries_dir,
        no_cache,
        ..
    } = cli;

    let settings = Settings::discover(config.as_deref(), Path::new("."))?.resolve(Overrides {
        endpoint,
        cache_dir,
        queries_dir,
        no_cache,
    });

    let mut out = io::stdout().lock();
    match command {
        Commands::Query { text, file, json } => {
            let query = read_query(text, file.as_deref())?;
            let repository = open_repository(&settings)?;
            if json {
                out.write_all(&repository.query_raw(&query)?)?;
                writeln!(out)?;
            } else {
                write_results(&mut out, &repository.query_results(&query)?)?;
            }
        }
        Commands::Run {
            name,
            argument,
            json,
        } => {
            let repository = open_repository(&settings)?;
            if json {
                out.write_all(&repository.execute_named_raw(&name, &argument)?)?;
                writeln!(out)?;
            } else {
                write_rows(&mut out, &repository.execute_named(&name, &argument)?)?;
            }
        }
        Commands::Key { text } => {
            let key = CacheKey::for_query(&text);
            let path = CacheStore::new(&settings.cache_dir).entry_path(&key);
            writeln!(out, "{key}\t{}", path.display())?;
        }
        Commands::Cache {
            subcommand: CacheCommands::List,
        } => {
            let store = CacheStore::new(&settings.cache_dir);
            if store.root().is_dir() {
                let keys: BTreeSet<CacheKey> = store.scan()?.into_iter().collect();
                for key in keys {
                    writeln!(out, "{key}")?;
                }
            } else {
                debug!(cache_dir = ?store.root(), "Cache directory does not exist yet");
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn read_query(text: Option<String>, file: Option<&Path>) -> Result<String, CliError> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|source| CliError::QueryFile {
                path: path.to_path_buf(),
                source,
            })
        }
        // clap requires one of the two
        (None, None) => Ok(String::new()),
    }
}

/// Build the HTTP-backed repository, creating the cache directory first when caching is on
#[instrument(skip_all, fields(endpoint = settings.endpoint.as_deref()))]
fn open_repository(settings: &Resolved) -> Result<Repository, CliError> {
    let config = settings.repository_config()?;
    if config.cache_enabled {
        std::fs::create_dir_all(&config.cache_dir)
            .map_err(|e| rqcache_core::Error::cache_directory(e, &config.cache_dir))?;
    }
    let client = HttpTransport::default_client(settings.timeout, &settings.user_agent)?;
    Ok(Repository::new(config, client)?)
}

/// Print a results document: the boolean for ASK, otherwise a tab-separated table
fn write_results(out: &mut impl Write, results: &QueryResults) -> io::Result<()> {
    if let Some(boolean) = results.boolean {
        return writeln!(out, "{boolean}");
    }
    write_table(out, &results.variables, &results.solutions)
}

/// Print rows whose column order is unknown, using sorted variable names
fn write_rows(out: &mut impl Write, rows: &[Solution]) -> io::Result<()> {
    let columns: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();
    let columns: Vec<String> = columns.into_iter().cloned().collect();
    write_table(out, &columns, rows)
}

fn write_table(out: &mut impl Write, columns: &[String], rows: &[Solution]) -> io::Result<()> {
    if columns.is_empty() {
        return Ok(());
    }
    let header: Vec<String> = columns.iter().map(|c| format!("?{c}")).collect();
    writeln!(out, "{}", header.join("\t"))?;
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).map(ToString::to_string).unwrap_or_default())
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}
