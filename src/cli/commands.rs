use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::index_storage::CacheStore;
use crate::indexer::ScanProgress;
use crate::parsers::ExtractMode;
use crate::provider::{DefinitionProvider, LoadSource, ScanMode, ScanSummary};
use crate::utils::{
    default_config_path, format_path_with_tilde, init_logging, load_settings,
    resolve_rimworld_path, save_settings,
};

#[derive(Parser)]
#[command(name = "rimcomplete")]
#[command(version = "0.1.0")]
#[command(about = "Index RimWorld definitions for editor autocomplete", long_about = None)]
pub struct Cli {
    /// RimWorld install directory (contains Data and Mods)
    #[arg(long, global = true, env = "RIMWORLD_PATH")]
    pub root: Option<PathBuf>,

    /// Definition cache file
    #[arg(long, global = true, env = "RIMCOMPLETE_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Settings file
    #[arg(long, global = true, env = "RIMCOMPLETE_CONFIG")]
    pub config: Option<PathBuf>,

    /// How full scans are executed
    #[arg(long, global = true, value_enum, default_value_t = ScanMode::Sync)]
    pub mode: ScanMode,

    /// Match whole tag and attribute names only
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rescan all Defs folders and write the cache
    GenerateCache,
    /// Delete the cache file
    ClearCache,
    /// Clear the cache and rescan
    Reload,
    /// Print suggestions for a line ending in `<type>*<filter>`
    Suggest {
        /// Line text up to the cursor
        line: String,
        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show definition counts per type
    Stats,
    /// Remember the RimWorld install directory
    SetRoot { path: PathBuf },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::GenerateCache) => generate_cache(&cli)?,
        Some(Commands::ClearCache) => clear_cache(&cli)?,
        Some(Commands::Reload) => reload(&cli)?,
        Some(Commands::Suggest { line, json }) => suggest(&cli, line, *json)?,
        Some(Commands::Stats) => show_stats(&cli)?,
        Some(Commands::SetRoot { path }) => set_root(&cli, path)?,
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

fn build_provider(cli: &Cli) -> Result<DefinitionProvider> {
    let root = resolve_rimworld_path(cli.root.as_deref(), &config_path(cli)?)?;
    let store = match &cli.cache_file {
        Some(path) => CacheStore::new(path),
        None => CacheStore::at_default_location()?,
    };
    let extract_mode = if cli.strict { ExtractMode::Strict } else { ExtractMode::Compatible };

    Ok(DefinitionProvider::new(root, store)
        .with_scan_mode(cli.mode)
        .with_extract_mode(extract_mode))
}

/// Progress printer that reports every 10%
fn progress_reporter() -> impl FnMut(&ScanProgress) {
    let mut last_percent = 0;
    move |progress: &ScanProgress| {
        let percent = progress.percent();
        if percent >= last_percent + 10 {
            eprintln!(
                "Generating cache... ({}%) Scanned {}/{} folders: {}",
                percent, progress.current, progress.total, progress.name
            );
            last_percent = percent;
        }
    }
}

fn report_scan(summary: &ScanSummary) {
    if let Some(error) = &summary.cache_error {
        eprintln!("Warning: definitions indexed but cache not saved: {}", error);
    }
}

fn generate_cache(cli: &Cli) -> Result<()> {
    let mut provider = build_provider(cli)?;
    eprintln!("Generating RimWorld cache...");

    let summary =
        provider.generate_cache(progress_reporter()).context("Cache generation failed")?;

    report_scan(&summary);
    println!("Cache generation complete!");
    println!("Scanned {} folders successfully", summary.roots_scanned);
    Ok(())
}

fn clear_cache(cli: &Cli) -> Result<()> {
    let provider = build_provider(cli)?;
    if provider.clear_cache() {
        println!("Cache cleared successfully");
    } else {
        println!("No cache file found");
    }
    Ok(())
}

fn reload(cli: &Cli) -> Result<()> {
    let mut provider = build_provider(cli)?;
    let summary = provider.reload(progress_reporter()).context("Reload failed")?;

    report_scan(&summary);
    println!("Definitions reloaded ({} folders scanned)", summary.roots_scanned);
    Ok(())
}

fn load(provider: &mut DefinitionProvider) -> Result<LoadSource> {
    provider.load_definitions().context("Failed to load definitions")
}

fn suggest(cli: &Cli, line: &str, json: bool) -> Result<()> {
    let mut provider = build_provider(cli)?;
    load(&mut provider)?;

    let suggestions = provider.suggestions(line);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&suggestions).context("Failed to serialize suggestions")?
        );
    } else {
        for suggestion in &suggestions {
            println!("{}\t{}", suggestion.text, suggestion.left_label);
        }
    }
    Ok(())
}

fn show_stats(cli: &Cli) -> Result<()> {
    let mut provider = build_provider(cli)?;
    let source = load(&mut provider)?;
    let index = provider.definitions();

    println!("RimWorld Definition Statistics");
    println!("==============================");
    match provider.rimworld_path() {
        Some(root) => println!("RimWorld path: {}", format_path_with_tilde(root)),
        None => println!("RimWorld path: (not configured)"),
    }
    println!("Cache file: {}", format_path_with_tilde(provider.cache_store().path()));
    match source {
        LoadSource::Cache => println!("Loaded from: cache"),
        LoadSource::Scan { roots_scanned } => {
            println!("Loaded from: scan ({} folders)", roots_scanned)
        }
        LoadSource::NotConfigured => println!("Loaded from: nothing"),
    }
    println!("Total definitions: {}", index.definition_count());
    for (def_type, names) in index.iter() {
        println!("  {}: {}", def_type, names.len());
    }

    Ok(())
}

fn set_root(cli: &Cli, path: &Path) -> Result<()> {
    let config = config_path(cli)?;
    let mut settings = load_settings(&config)?;
    settings.rimworld_path = Some(path.to_path_buf());
    save_settings(&config, &settings)?;

    println!("RimWorld path set to {}", format_path_with_tilde(path));
    if !path.exists() {
        eprintln!("Warning: {} does not exist", path.display());
    }
    Ok(())
}
