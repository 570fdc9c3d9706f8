/*
[INPUT]:  One parsed subcommand and the application context
[OUTPUT]: Network calls through the screens, printed results, exit code
[POS]:    CLI layer - one-shot command dispatch
[UPDATE]: When adding subcommands
*/

use std::process::ExitCode;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};
use tasktrack_adapter::TasktrackError;
use tasktrack_client::{Action, AppContext, LoginForm, TaskBoard};

use super::{TaskCommand, interactive, print_tasks, report_error, task_label};

pub async fn run(ctx: &AppContext, command: TaskCommand) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();

    let outcome = match command {
        TaskCommand::Login { username } => login(ctx, &theme, username).await?,
        TaskCommand::Logout => logout(ctx),
        TaskCommand::Status => {
            status(ctx);
            Ok(())
        }
        TaskCommand::List => {
            let board = ctx.board();
            board
                .refresh()
                .await
                .map(|tasks| print_tasks(&tasks))
                .map_err(|err| (err, Action::LoadTasks))
        }
        TaskCommand::Add { title, description } => {
            add(ctx, &theme, title, description).await?
        }
        TaskCommand::Done { id } => update(ctx, id, Some(true)).await,
        TaskCommand::Undo { id } => update(ctx, id, Some(false)).await,
        TaskCommand::Toggle { id } => update(ctx, id, None).await,
        TaskCommand::Rm { id, yes } => remove(ctx, &theme, id, yes).await?,
        TaskCommand::Interactive => {
            interactive::run_interactive(ctx).await?;
            Ok(())
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err((err, action)) => {
            report_error(&err, action);
            if err.is_unauthorized() {
                eprintln!("Run `tasktrack login` to sign in again.");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

type Outcome = std::result::Result<(), (TasktrackError, Action)>;

async fn login(ctx: &AppContext, theme: &ColorfulTheme, username: Option<String>) -> Result<Outcome> {
    let username = match username {
        Some(username) => username,
        None => Input::with_theme(theme)
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = Password::with_theme(theme)
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    let screen = ctx.login_screen();
    Ok(screen
        .submit(&LoginForm::new(username, password))
        .await
        .map(|_| println!("{}", style("Signed in.").green()))
        .map_err(|err| (err, Action::SignIn)))
}

fn logout(ctx: &AppContext) -> Outcome {
    ctx.auth
        .logout()
        .map(|()| println!("Signed out."))
        .map_err(|err| (err, Action::SignOut))
}

fn status(ctx: &AppContext) {
    println!("API:         {}", ctx.client.base_url());
    if ctx.config.storage.persist {
        println!("Credentials: {}", ctx.config.credentials_path().display());
    } else {
        println!("Credentials: not persisted");
    }
    match ctx.session.session() {
        Some(session) => println!(
            "Session:     signed in since {}",
            session.established_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("Session:     signed out"),
    }
}

async fn add(
    ctx: &AppContext,
    theme: &ColorfulTheme,
    title: Option<String>,
    description: Option<String>,
) -> Result<Outcome> {
    let title = match title {
        Some(title) => title,
        None => Input::with_theme(theme)
            .with_prompt("Title")
            .allow_empty(true)
            .interact_text()?,
    };
    let description = match description {
        Some(description) => description,
        None => Input::with_theme(theme)
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()?,
    };

    let board = ctx.board();
    Ok(board
        .create(&title, &description)
        .await
        .map(|tasks| {
            println!("{}", style("Task created.").green());
            print_tasks(&tasks);
        })
        .map_err(|err| (err, Action::CreateTask)))
}

/// `completed == None` toggles the current state
async fn update(ctx: &AppContext, id: i64, completed: Option<bool>) -> Outcome {
    let board = load_board(ctx).await?;
    let result = match completed {
        Some(completed) => board.set_completion(id, completed).await,
        None => board.toggle(id).await,
    };
    result
        .map(|tasks| print_tasks(&tasks))
        .map_err(|err| (err, Action::UpdateTask))
}

async fn remove(ctx: &AppContext, theme: &ColorfulTheme, id: i64, yes: bool) -> Result<Outcome> {
    let board = match load_board(ctx).await {
        Ok(board) => board,
        Err(failure) => return Ok(Err(failure)),
    };
    let request = match board.request_removal(id) {
        Ok(request) => request,
        Err(err) => return Ok(Err((err, Action::DeleteTask))),
    };

    let confirmed = yes
        || Confirm::with_theme(theme)
            .with_prompt(format!("Delete {}?", task_label(request.task())))
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(Ok(()));
    }

    Ok(board
        .remove(request.confirm())
        .await
        .map(|tasks| {
            println!("{}", style("Task deleted.").green());
            print_tasks(&tasks);
        })
        .map_err(|err| (err, Action::DeleteTask)))
}

/// Mutations act on displayed tasks, so fetch the list first
async fn load_board(ctx: &AppContext) -> std::result::Result<TaskBoard, (TasktrackError, Action)> {
    let board = ctx.board();
    board
        .refresh()
        .await
        .map_err(|err| (err, Action::LoadTasks))?;
    Ok(board)
}
