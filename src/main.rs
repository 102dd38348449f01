//! CLI entry point for dual-action-keypad
//!
//! Provides a command-line interface for inspecting the action index,
//! simulating button presses, and watching a binding table for changes.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use dual_action_keypad::config::{expand_path, load_catalogue_file, write_atomic, CatalogueWatcher};
use dual_action_keypad::core::{
    CatalogueIndexBuilder, CatalogueStore, EnvLayoutSource, FixedLayoutSource, IndexPayload,
    KeyboardLayoutSource, LayoutKeyRenderer,
};
use dual_action_keypad::input::{InputContext, RecordingSynthesizer};
use dual_action_keypad::plugin::{ButtonServices, DualActionButton, RecordingHost};
use serde_json::json;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    thread,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Poll interval of the watch loop
const WATCH_POLL_MS: u64 = 250;

#[derive(Parser)]
#[command(name = "dual-action-keypad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grouped action index
    Catalogue {
        /// Path to the binding table (JSON array of actions)
        #[arg(short, long)]
        file: PathBuf,

        /// Keyboard layout (e.g. de-DE, fr_FR.UTF-8, 00000407); defaults to the environment
        #[arg(short, long)]
        locale: Option<String>,

        /// Print the index payload as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON payload to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate press/release cycles and print the emitted input events
    Simulate {
        /// Path to the binding table (JSON array of actions)
        #[arg(short, long)]
        file: PathBuf,

        /// Action held while the button is down
        #[arg(short, long)]
        down: String,

        /// Action tapped on release
        #[arg(short, long, default_value = "")]
        up: String,

        /// Number of press/release cycles
        #[arg(short, long, default_value_t = 1)]
        cycles: u32,
    },

    /// Watch the binding table and rebuild the index on every change
    Watch {
        /// Path to the binding table (JSON array of actions)
        #[arg(short, long)]
        file: PathBuf,

        /// Keyboard layout; defaults to the environment
        #[arg(short, long)]
        locale: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Catalogue {
            file,
            locale,
            json,
            output,
        } => print_catalogue(&file, locale, json, output)?,
        Commands::Simulate {
            file,
            down,
            up,
            cycles,
        } => simulate(&file, &down, &up, cycles)?,
        Commands::Watch { file, locale } => watch(&file, locale)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Expand `~` and environment variables in a CLI path
fn resolve_path(raw: &Path) -> anyhow::Result<PathBuf> {
    let raw = raw
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?;
    Ok(expand_path(raw)?)
}

fn layout_source(locale: Option<String>) -> Arc<dyn KeyboardLayoutSource> {
    match locale {
        Some(id) => Arc::new(FixedLayoutSource(id)),
        None => Arc::new(EnvLayoutSource),
    }
}

/// Print the action index for a binding table
fn print_catalogue(
    file: &Path,
    locale: Option<String>,
    as_json: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let path = resolve_path(file)?;
    let table = load_catalogue_file(&path)
        .with_context(|| format!("Failed to load binding table {}", path.display()))?;

    let builder = CatalogueIndexBuilder::new(Arc::new(LayoutKeyRenderer::new()));
    let layouts = layout_source(locale);
    let payload = IndexPayload::loaded(builder.build(&table, layouts.as_ref()));
    let rendered = serde_json::to_string_pretty(&payload.to_json()?)?;

    if let Some(output) = output {
        let output = resolve_path(&output)?;
        write_atomic(&output, &rendered)?;
        eprintln!("{} Index written to {}", "✓".green(), output.display());
    }

    if as_json {
        println!("{}", rendered);
        return Ok(());
    }

    println!("{}", format!("Actions from: {}\n", path.display()).bold());

    let mut total = 0;
    for group in &payload.functions {
        println!("{}", group.label.yellow().bold());
        for entry in &group.entries {
            println!("  {} {}", entry.value.dimmed(), entry.text.cyan());
        }
        total += group.entries.len();
        println!();
    }

    println!(
        "{} Total: {} bound actions in {} group{}",
        "✓".green(),
        total,
        payload.functions.len(),
        if payload.functions.len() == 1 { "" } else { "s" }
    );

    Ok(())
}

/// Drive a button through press/release cycles and print what it emitted
fn simulate(file: &Path, down: &str, up: &str, cycles: u32) -> anyhow::Result<()> {
    let path = resolve_path(file)?;
    let table = load_catalogue_file(&path)
        .with_context(|| format!("Failed to load binding table {}", path.display()))?;

    let store = Arc::new(CatalogueStore::with_table(table));
    let synth = Arc::new(RecordingSynthesizer::new());
    let host = Arc::new(RecordingHost::new());
    let services =
        ButtonServices::new(store, synth.clone()).with_context(InputContext::new());

    let button = DualActionButton::new(
        host.clone(),
        &json!({ "downFunction": down, "upFunction": up }),
        services,
    );

    println!(
        "{} Simulating {} cycle{}: down {} / up {}\n",
        "→".cyan(),
        cycles,
        if cycles == 1 { "" } else { "s" },
        down.green(),
        if up.is_empty() { "(none)".dimmed() } else { up.green() }
    );

    for cycle in 1..=cycles {
        button.key_pressed();
        button.key_released();

        println!("{}", format!("Cycle {}", cycle).yellow().bold());
        for event in synth.take_events() {
            println!("  {}", event.to_string().cyan());
        }
    }

    let states: Vec<String> = host
        .states()
        .iter()
        .map(|state| state.as_index().to_string())
        .collect();

    if states.is_empty() {
        println!("\n{}", "⚠ No state changes reported to the host".yellow());
    } else {
        println!("\n{} Host states: {}", "✓".green(), states.join(" → "));
    }

    Ok(())
}

/// Reload the binding table on change and print the rebuilt index summary
fn watch(file: &Path, locale: Option<String>) -> anyhow::Result<()> {
    let path = resolve_path(file)?;
    let table = load_catalogue_file(&path)
        .with_context(|| format!("Failed to load binding table {}", path.display()))?;

    let store = Arc::new(CatalogueStore::with_table(table));
    let host = Arc::new(RecordingHost::new());
    let services = ButtonServices::new(store.clone(), Arc::new(RecordingSynthesizer::new()))
        .with_context(InputContext::new())
        .with_layouts(layout_source(locale));

    let button = DualActionButton::new(host.clone(), &json!({}), services);
    let watcher = CatalogueWatcher::new(&path)?;

    print_index_summary(&host);
    println!("{} Watching {} (Ctrl+C to stop)", "→".cyan(), path.display());

    loop {
        if watcher.check_for_changes() {
            match load_catalogue_file(&path) {
                Ok(table) => {
                    let generation = store.replace(table);
                    info!(generation, "binding table changed on disk");
                }
                Err(e) => warn!(error = %e, "keeping previous binding table"),
            }
        }

        if button.poll_reloads() {
            print_index_summary(&host);
        }

        thread::sleep(Duration::from_millis(WATCH_POLL_MS));
    }
}

fn print_index_summary(host: &RecordingHost) {
    let Some(payload) = host.inspector_payloads().pop() else {
        return;
    };
    host.clear();

    let groups = payload["functions"].as_array().map(Vec::len).unwrap_or(0);
    let actions: usize = payload["functions"]
        .as_array()
        .map(|groups| {
            groups
                .iter()
                .filter_map(|g| g["options"].as_array())
                .map(Vec::len)
                .sum()
        })
        .unwrap_or(0);

    println!(
        "{} Index: {} actions in {} groups",
        "✓".green(),
        actions,
        groups
    );
}
