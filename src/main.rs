//! RepLog - Personal Workout Tracker
//!
//! Main entry point: builds the store session, runs startup restore, then
//! dispatches the requested command.

use anyhow::Context;
use clap::{Parser, Subcommand};
use replog::storage::backup::BackupWriter;
use replog::storage::config::{load_config, AppConfig};
use replog::storage::restore::seed_from_backup;
use replog::storage::store::WorkoutStore;
use replog::transfer::{import_workouts, prepare_export, ImportOutcome};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "replog", version, about = "Local-first workout tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the collection summary and backup status
    Status,
    /// Export the full collection to a shareable JSON file
    Export {
        /// Directory to write the export file into (defaults to the
        /// current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Merge workouts from an export file into the collection
    Import {
        /// The file to import
        file: PathBuf,
    },
    /// Write a backup snapshot now and wait for it to land
    BackupNow,
    /// Delete every workout, replacing the collection with an empty one
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RepLog v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let config = load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig {
            data_dir: replog::storage::config::get_data_dir(),
            ..Default::default()
        }
    });

    let backup = BackupWriter::new(config.backup.resolve_root());
    let mut store =
        WorkoutStore::open(&config.data_dir, backup).context("failed to open the workout store")?;

    // Re-seed from the backup snapshot only when the store is empty; any
    // failure in here is logged and never blocks startup.
    seed_from_backup(&mut store).await;

    match cli.command {
        Command::Status => {
            let workouts = store.load().await;
            let groups: usize = workouts.iter().map(|w| w.muscle_group.len()).sum();
            let exercises: usize = workouts
                .iter()
                .flat_map(|w| &w.muscle_group)
                .map(|mg| mg.exercises.len())
                .sum();
            let sets: usize = workouts
                .iter()
                .flat_map(|w| &w.muscle_group)
                .flat_map(|mg| &mg.exercises)
                .map(|ex| ex.log.len())
                .sum();

            println!(
                "{} workouts, {} muscle groups, {} exercises, {} logged sets",
                workouts.len(),
                groups,
                exercises,
                sets
            );
            match store.backup().exists().await {
                Some(path) => println!("Backup snapshot: {}", path.display()),
                None if store.backup().is_enabled() => println!("Backup snapshot: none yet"),
                None => println!("Backups unavailable on this system"),
            }
        }

        Command::Export { out } => {
            let workouts = store.load().await;
            let dir = out.unwrap_or_else(|| PathBuf::from("."));
            match prepare_export(&workouts, &dir)? {
                Some(path) => println!("Exported {} workouts to {}", workouts.len(), path.display()),
                None => println!("Nothing to export"),
            }
        }

        Command::Import { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            match import_workouts(&mut store, &contents).await? {
                ImportOutcome::Imported { count } => println!("Imported {} new workouts", count),
                ImportOutcome::AllDuplicates => {
                    println!("All workouts in the file already exist; nothing imported")
                }
                ImportOutcome::InvalidFile => {
                    anyhow::bail!("{} is not a valid RepLog export file", file.display())
                }
            }
        }

        Command::BackupNow => {
            if !store.backup().is_enabled() {
                println!("Backups unavailable on this system");
            } else {
                let workouts = store.load().await;
                store.backup().submit(workouts);
                store.backup().flush().await;
                match store.backup().exists().await {
                    Some(path) => println!("Backup written to {}", path.display()),
                    None => println!("Backup write failed, see the log"),
                }
            }
        }

        Command::Clear { yes } => {
            if !yes {
                anyhow::bail!("refusing to delete all workouts without --yes");
            }
            replog::services::workout::clear_all_workouts(&mut store).await?;
            println!("All workouts deleted");
        }
    }

    // Let any snapshot enqueued by the command land before exiting.
    store.backup().flush().await;

    Ok(())
}
