use brief_core::{assemble, download_basename, render_email, render_pdf, ChartSeries, CoreConfig, UpdateStore};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "brief")]
#[command(about = "FounderBrief investor-update CLI")]
struct Cli {
    /// Data directory holding the update records
    #[arg(long, env = "BRIEF_DATA_DIR", default_value = brief_core::constants::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all updates, newest first
    List,
    /// Show one update as stored
    Show {
        /// Update UUID
        id: String,
    },
    /// Write the PDF export for an update
    ExportPdf {
        /// Update UUID
        id: String,
        /// Output file (defaults to the download name next to the cwd)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the plain-text email export for an update
    ExportEmail {
        /// Update UUID
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = Arc::new(CoreConfig::new(cli.data_dir)?);
    let store = UpdateStore::new(cfg);

    match cli.command {
        Some(Commands::List) => {
            let updates = store.list()?;
            if updates.is_empty() {
                println!("No updates found.");
            } else {
                for update in updates {
                    println!(
                        "ID: {}, Title: {}, Status: {:?}, Created: {}",
                        update.id, update.title, update.status, update.created_at
                    );
                }
            }
        }
        Some(Commands::Show { id }) => {
            let record = store.get(Uuid::parse_str(&id)?)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Some(Commands::ExportPdf { id, out }) => {
            let record = store.get(Uuid::parse_str(&id)?)?;
            let view = assemble(&record);
            let charts = ChartSeries::for_record(&record, Utc::now(), &mut rand::thread_rng());
            let bytes = render_pdf(&view, &charts);
            let out =
                out.unwrap_or_else(|| PathBuf::from(format!("{}.pdf", download_basename(&record.title))));
            std::fs::write(&out, bytes)?;
            println!("Wrote PDF to {}", out.display());
        }
        Some(Commands::ExportEmail { id }) => {
            let record = store.get(Uuid::parse_str(&id)?)?;
            println!("{}", render_email(&assemble(&record)));
        }
        None => {
            println!("Use 'brief --help' for commands");
        }
    }

    Ok(())
}
