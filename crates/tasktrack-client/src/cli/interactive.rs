/*
[INPUT]:  Application context and user input via prompts
[OUTPUT]: Login screen, then task screen loop until sign-out or quit
[POS]:    CLI interactive flow - two-screen navigation
[UPDATE]: When screen actions or navigation rules change
*/

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use tasktrack_adapter::TasktrackError;
use tasktrack_adapter::http::validate_new_task;
use tasktrack_client::{Action, AppContext, LoginForm, Screen, TaskBoard};
use tracing::info;

use super::{print_tasks, report_error, task_label};

/// How the task screen was left
enum TaskScreenExit {
    SignedOut,
    SessionExpired,
    Quit,
}

pub async fn run_interactive(ctx: &AppContext) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Task Tracker").bold().cyan());

    let mut screen = ctx.initial_screen();
    loop {
        screen = match screen {
            Screen::Login => {
                if login_screen(ctx, &theme).await? {
                    Screen::Tasks
                } else {
                    return Ok(());
                }
            }
            Screen::Tasks => match task_screen(ctx, &theme).await? {
                TaskScreenExit::SignedOut => Screen::Login,
                TaskScreenExit::SessionExpired => {
                    info!("session rejected by server; returning to login");
                    if let Err(err) = ctx.auth.logout() {
                        report_error(&err, Action::SignOut);
                    }
                    Screen::Login
                }
                TaskScreenExit::Quit => return Ok(()),
            },
        };
    }
}

/// Returns `false` when the user gives up on signing in
async fn login_screen(ctx: &AppContext, theme: &ColorfulTheme) -> Result<bool> {
    println!("\n{}", style("--- Sign in ---").bold());
    let screen = ctx.login_screen();

    loop {
        let username: String = Input::with_theme(theme)
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?;
        let password = Password::with_theme(theme)
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?;

        println!("{}", style("Signing in...").dim());
        match screen.submit(&LoginForm::new(username, password)).await {
            Ok(_) => {
                println!("{}", style("Welcome!").green());
                return Ok(true);
            }
            Err(err) => report_error(&err, Action::SignIn),
        }

        let retry = Confirm::with_theme(theme)
            .with_prompt("Try again?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(false);
        }
    }
}

async fn task_screen(ctx: &AppContext, theme: &ColorfulTheme) -> Result<TaskScreenExit> {
    println!("\n{}", style("--- Tasks ---").bold());
    let board = ctx.board();

    println!("{}", style("Loading tasks...").dim());
    if let Some(exit) = settle(board.refresh().await, Action::LoadTasks) {
        return Ok(exit);
    }

    loop {
        print_tasks(&board.tasks());

        let actions = [
            "Refresh",
            "New task",
            "Toggle completion",
            "Delete task",
            "Sign out",
            "Quit",
        ];
        let selection = Select::with_theme(theme)
            .with_prompt("Select action")
            .items(&actions)
            .default(0)
            .interact()?;

        let exit = match selection {
            0 => settle(board.refresh().await, Action::LoadTasks),
            1 => new_task(&board, theme).await?,
            2 => toggle_task(&board, theme).await?,
            3 => delete_task(&board, theme).await?,
            4 => {
                match ctx.auth.logout() {
                    Ok(()) => println!("Signed out."),
                    Err(err) => report_error(&err, Action::SignOut),
                }
                return Ok(TaskScreenExit::SignedOut);
            }
            _ => return Ok(TaskScreenExit::Quit),
        };

        if let Some(exit) = exit {
            return Ok(exit);
        }
    }
}

/// Show errors; a rejected session leaves the screen
fn settle<T>(result: std::result::Result<T, TasktrackError>, action: Action) -> Option<TaskScreenExit> {
    match result {
        Ok(_) => None,
        Err(err) => {
            report_error(&err, action);
            err.is_unauthorized().then_some(TaskScreenExit::SessionExpired)
        }
    }
}

async fn new_task(board: &TaskBoard, theme: &ColorfulTheme) -> Result<Option<TaskScreenExit>> {
    println!("{}", style("New task").bold());
    let title: String = Input::with_theme(theme)
        .with_prompt("Title")
        .allow_empty(true)
        .interact_text()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    // Local check so the form can be corrected before anything is sent
    if let Err(err) = validate_new_task(&title, &description) {
        report_error(&err, Action::CreateTask);
        return Ok(None);
    }

    let result = board.create(&title, &description).await;
    if result.is_ok() {
        println!("{}", style("Task created.").green());
    }
    Ok(settle(result, Action::CreateTask))
}

async fn toggle_task(board: &TaskBoard, theme: &ColorfulTheme) -> Result<Option<TaskScreenExit>> {
    let Some(task_id) = pick_task(board, theme, "Toggle which task?")? else {
        return Ok(None);
    };
    Ok(settle(board.toggle(task_id).await, Action::UpdateTask))
}

async fn delete_task(board: &TaskBoard, theme: &ColorfulTheme) -> Result<Option<TaskScreenExit>> {
    let Some(task_id) = pick_task(board, theme, "Delete which task?")? else {
        return Ok(None);
    };
    let request = match board.request_removal(task_id) {
        Ok(request) => request,
        Err(err) => return Ok(settle::<()>(Err(err), Action::DeleteTask)),
    };

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete {}?", task_label(request.task())))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(None);
    }

    Ok(settle(board.remove(request.confirm()).await, Action::DeleteTask))
}

fn pick_task(board: &TaskBoard, theme: &ColorfulTheme, prompt: &str) -> Result<Option<i64>> {
    let tasks = board.tasks();
    if tasks.is_empty() {
        println!("{}", style("No tasks found.").yellow());
        return Ok(None);
    }

    let items: Vec<String> = tasks.iter().map(task_label).collect();
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|idx| tasks[idx].id))
}
