pub mod app;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use filepress_archive::{CompressionStats, OutputStore, Packer, Unpacker};

pub use app::{App, Commands};

use crate::config::Config;
use crate::report;

/// Execute one parsed command against the configured store.
pub fn run(app: App) -> anyhow::Result<ExitCode> {
    let mut config = Config::load(app.config.as_deref())?;
    if let Some(root) = app.root {
        config.root = root;
    }
    tracing::debug!(root = %config.root.display(), "loaded configuration");

    let store = OutputStore::new(&config.root)
        .with_context(|| format!("cannot use output directory {}", config.root.display()))?;
    let mut out = io::stdout().lock();

    match app.cmd {
        Commands::Pack(arg) => {
            let data = read_input(&arg.file)?;
            let name = arg.name.unwrap_or_else(|| display_name(&arg.file));
            let stats = Packer::new(store)
                .compression_level(config.compression_level)
                .pack(&name, &data);
            report::write_stats(&mut out, &stats, app.json)?;
            Ok(exit_code(&stats))
        }
        Commands::Unpack(arg) => {
            let data = read_input(&arg.file)?;
            let name = arg.name.unwrap_or_else(|| display_name(&arg.file));
            let stats = Unpacker::new(store)
                .with_options(config.unpack_options())
                .unpack(&name, &data);
            report::write_stats(&mut out, &stats, app.json)?;
            Ok(exit_code(&stats))
        }
        Commands::Fetch(arg) => {
            let bytes = store.read(&arg.name).map_err(|e| {
                if e.is_not_found() {
                    anyhow!("no artifact named '{}' in {}", arg.name, store.root().display())
                } else {
                    anyhow!(e)
                }
            })?;
            match arg.output {
                Some(path) => fs::write(&path, &bytes)
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => {
                    out.write_all(&bytes)?;
                    out.flush()?;
                }
            }
            tracing::info!(artifact = %arg.name, bytes = bytes.len(), "fetched");
            Ok(ExitCode::SUCCESS)
        }
        Commands::List => {
            let names = store.list()?;
            report::write_names(&mut out, &names, app.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Clean => {
            let removed = store.clean_scratch()?;
            if app.json {
                writeln!(out, "{}", serde_json::json!({ "removed": removed }))?;
            } else {
                writeln!(out, "Removed {removed} scratch director{}", if removed == 1 { "y" } else { "ies" })?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn exit_code(stats: &CompressionStats) -> ExitCode {
    if stats.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
