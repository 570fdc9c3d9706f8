/*
[INPUT]:  Parsed subcommands and screen results
[OUTPUT]: Terminal rendering of tasks and user-facing errors
[POS]:    CLI layer - shared command definitions and output helpers
[UPDATE]: When adding subcommands or changing output format
*/

pub mod commands;
pub mod init;
pub mod interactive;

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use tasktrack_adapter::{Task, TaskStatus, TasktrackError};
use tasktrack_client::{Action, user_message};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    #[command(flatten)]
    Task(TaskCommand),
}

/// Commands that run against a loaded configuration
#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Sign in and store the access token
    Login {
        #[arg(long, short)]
        username: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show endpoint and session state
    Status,
    /// List all tasks
    List,
    /// Create a task
    Add {
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Mark a task completed
    Done { id: i64 },
    /// Move a completed task back to in progress
    Undo { id: i64 },
    /// Flip a task between completed and in progress
    Toggle { id: i64 },
    /// Delete a task
    Rm {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Login and task screens in a prompt loop (default)
    Interactive,
}

pub fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", style("No tasks yet.").dim());
        return;
    }

    for task in tasks {
        let status = match task.status {
            TaskStatus::Completed => style(task.status.as_str()).green(),
            TaskStatus::InProgress => style(task.status.as_str()).yellow(),
            TaskStatus::Pending => style(task.status.as_str()).dim(),
        };
        println!(
            "{} | {} | {}",
            style(format!("{:>5}", task.id)).bold(),
            status,
            task.title
        );
        println!("{:>5} | {}", "", style(&task.description).dim());
    }
}

pub fn task_label(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    format!("[{mark}] #{} {}", task.id, task.title)
}

pub fn report_error(err: &TasktrackError, action: Action) {
    let message = user_message(err, action);
    eprintln!("{} {}", style(format!("{}:", message.title)).red().bold(), message.body);
    if let Some(detail) = message.detail {
        eprintln!("  {}", style(detail).dim());
    }
}
