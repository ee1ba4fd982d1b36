use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use clap::{builder::NonEmptyStringValueParser, Subcommand};

use crate::{
    tracker::{storage::TrackerStorage, task::DEFAULT_CURRENCY_NAME},
    utils::clock::Clock,
};

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    #[command(about = "Start tracking a new task")]
    Add {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        name: String,
        #[arg(
            long = "currency",
            short,
            default_value = DEFAULT_CURRENCY_NAME,
            help = "Unit that is counted for the task"
        )]
        currency_name: String,
    },
    #[command(about = "Stop tracking a task and forget its history")]
    Remove {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        name: String,
        #[arg(long, short, help = "Remove without asking for confirmation")]
        yes: bool,
    },
    #[command(about = "Record progress on a task")]
    Increment {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        name: String,
        #[arg(
            long,
            short,
            default_value_t = 1,
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Amount of currency to add"
        )]
        step: u64,
    },
    #[command(about = "Print every task with its total")]
    List,
}

/// Applies a command to the stored tracker. Changes are saved only when the command succeeds.
/// `input` answers the confirmation asked before a removal.
pub async fn process_task_command(
    command: TaskCommand,
    storage: &impl TrackerStorage,
    clock: &dyn Clock,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut tracker = storage.load().await?;

    match command {
        TaskCommand::Add {
            name,
            currency_name,
        } => {
            if !tracker.create_and_add_task(&name, &currency_name) {
                bail!("Task with name \"{name}\" already exists!");
            }
            storage.save(&tracker).await?;
            writeln!(out, "Task \"{name}\" added!")?;
        }
        TaskCommand::Remove { name, yes } => {
            if tracker.get(&name).is_none() {
                bail!("No such task \"{name}\"!");
            }
            let question = format!("Are you sure you want to remove the task \"{name}\"?");
            if !yes && !confirm(&question, input, out)? {
                writeln!(out, "Task \"{name}\" kept")?;
                return Ok(());
            }
            tracker.remove_task(&name);
            storage.save(&tracker).await?;
            writeln!(out, "Task \"{name}\" removed!")?;
        }
        TaskCommand::Increment { name, step } => {
            let Some(task) = tracker.get(&name) else {
                bail!("Task with name \"{name}\" doesn't exist!");
            };
            let current = task.currency();
            if !tracker.increase_task_currency(&name, step, clock.now()) {
                bail!("Can't add {step} to task \"{name}\", its total {current} is too large!");
            }
            storage.save(&tracker).await?;
            writeln!(out, "Task \"{name}\" updated!")?;
        }
        TaskCommand::List => {
            for task in tracker.tasks() {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    task.name(),
                    task.currency(),
                    task.currency_name()
                )?;
            }
        }
    }
    Ok(())
}

/// Anything other than y or yes declines, including end of input.
fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
