use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use file_converter::cli::{Cli, Commands};
use file_converter::interactive::run_session;
use file_converter::output::{create_spinner, print_banner, print_report};
use file_converter::session::prepare_entry;
use file_converter::{formats, ConversionSettings, FileConverter, FileEntry, OutputFormat, SelectionError};

#[derive(Serialize)]
struct InspectRow {
    #[serde(flatten)]
    entry: FileEntry,
    formats: Vec<OutputFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let settings = cli.settings();
    match &cli.command {
        None => {
            print_banner(env!("CARGO_PKG_VERSION"));
            run_session(&cli.files, settings).await
        }
        Some(Commands::Session { files }) => {
            print_banner(env!("CARGO_PKG_VERSION"));
            run_session(files, settings).await
        }
        Some(Commands::Inspect { files, json }) => inspect(files, *json),
        Some(Commands::Convert {
            input,
            to,
            output,
            json,
            quiet,
        }) => convert(input, to, output.as_deref(), *json, *quiet, settings).await,
    }
}

fn inspect(files: &[PathBuf], json: bool) -> Result<()> {
    let mut rows = Vec::new();
    for path in files {
        let entry = FileEntry::from_path(path)
            .with_context(|| format!("File not found - {}", path.display()))?;
        let formats = formats::resolve(&entry.file_type)
            .map(|f| f.to_vec())
            .unwrap_or_default();
        rows.push(InspectRow { entry, formats });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        println!("{}", row.entry.display_text());
        if row.formats.is_empty() {
            println!("  --No conversions available--");
        } else {
            let tokens: Vec<&str> = row.formats.iter().map(|f| f.token()).collect();
            println!("  {}", tokens.join(", "));
        }
    }
    Ok(())
}

async fn convert(
    input: &Path,
    to: &str,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
    settings: ConversionSettings,
) -> Result<()> {
    let entry = FileEntry::from_path(input)
        .map_err(|_| SelectionError::MissingInput(input.to_path_buf()))?;
    let job = prepare_entry(&entry, Some(to), output)?;

    let spinner = (!quiet && !json).then(|| create_spinner(&format!("Converting to {}...", job.format)));
    let result = FileConverter::with_settings(settings).convert(&job).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = result.with_context(|| format!("Failed to convert {}", input.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        print_report(&report);
    }
    Ok(())
}
