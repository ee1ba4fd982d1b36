pub mod chart;
pub mod tasks;

use std::{io, path::PathBuf};

use anyhow::Result;
use chart::{process_chart_command, ChartCommand};
use clap::{Parser, Subcommand};
use tasks::{process_task_command, TaskCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    tracker::storage::JsonFileStorage,
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, default_save_file, ensure_save_file},
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Progress tracker", version, long_about = None)]
#[command(about = "Track tasks and their progress over time", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Tracker json file. By default uses $XDG_DATA_HOME/tracker.json or $HOME/.local/share/tracker.json"
    )]
    save_file: Option<PathBuf>,
    #[arg(long, global = true, help = "Print logs to stderr")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Tasks(TaskCommand),
    #[command(flatten)]
    Chart(ChartCommand),
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    enable_logging(
        &create_application_default_path()?,
        args.log.then_some(LevelFilter::TRACE),
    )?;

    let save_file = args.save_file.map_or_else(default_save_file, Ok)?;
    ensure_save_file(&save_file)?;
    debug!("Using save file {save_file:?}");
    let storage = JsonFileStorage::new(save_file);

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    match args.commands {
        Commands::Tasks(command) => {
            process_task_command(command, &storage, &DefaultClock, &mut stdin, &mut stdout)
                .await
        }
        Commands::Chart(command) => {
            process_chart_command(command, &storage, &DefaultClock, &mut stdout).await
        }
    }
}
