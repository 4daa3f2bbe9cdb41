//! NEL CLI - Command-line interface
//!
//! Usage:
//!   nel annotate <infile> [outfile] [--pretty]
//!   nel metadata [--pretty]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use nel_core::{AppConfig, AppMetadata, Mmif};
use nel_linker::{create_knowledge_base, NelApp};

#[derive(Parser)]
#[command(name = "nel")]
#[command(about = "Link named entities in MMIF files with Wikidata")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate an MMIF file without running the server
    Annotate {
        /// Input MMIF file
        infile: PathBuf,
        /// Output file (stdout when omitted)
        outfile: Option<PathBuf>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the app metadata
    Metadata {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn to_json(metadata: &AppMetadata, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(metadata)?
    } else {
        serde_json::to_string(metadata)?
    })
}

/// One summary line per view
fn summarize(mmif: &Mmif) -> Vec<String> {
    mmif.views
        .iter()
        .map(|view| {
            format!(
                "<View id={} annotations={} app={}>",
                view.id,
                view.annotations.len(),
                view.metadata.app
            )
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Annotate {
            infile,
            outfile,
            pretty,
        } => {
            let kb = create_knowledge_base(&config.knowledge_base)?;
            let app = NelApp::new(kb, config.linker.clone());
            eprintln!("{}", to_json(app.metadata(), true)?);

            tracing::info!(infile = %infile.display(), kb = ?config.knowledge_base.provider, "Annotating");
            let input = std::fs::read_to_string(&infile)
                .with_context(|| format!("Failed to read {}", infile.display()))?;
            let output = app.annotate(Mmif::from_json(&input)?).await?;
            let serialized = output.to_json(pretty)?;

            match outfile {
                Some(path) => std::fs::write(&path, serialized)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{serialized}"),
            }

            for line in summarize(&output) {
                eprintln!("{line}");
            }
        }
        Commands::Metadata { pretty } => {
            let metadata = AppMetadata::entity_linking(config.linker.emit_relations);
            println!("{}", to_json(&metadata, pretty)?);
        }
    }

    Ok(())
}
