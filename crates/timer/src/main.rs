//! `focusflow-timer` -- terminal Pomodoro timer.
//!
//! Alternates work and break phases and reports each completed phase to the
//! persistence service. Commands are read line by line from stdin; type
//! `help` for the list.
//!
//! # Environment variables
//!
//! | Variable        | Default                 | Description                 |
//! |-----------------|-------------------------|-----------------------------|
//! | `API_URL`       | `http://localhost:5000` | Persistence service base URL |
//! | `WORK_SECONDS`  | `1500`                  | Work phase length            |
//! | `BREAK_SECONDS` | `300`                   | Break phase length           |

use std::sync::Arc;

use focusflow_core::timer::TimerState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use focusflow_timer::client::ApiClient;
use focusflow_timer::command::{self, Command};
use focusflow_timer::config::TimerConfig;
use focusflow_timer::runner::{TimerCommand, TimerEvent, TimerRunner};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focusflow_timer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TimerConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        work_seconds = config.work_seconds,
        break_seconds = config.break_seconds,
        "Starting focusflow-timer",
    );

    let client = Arc::new(ApiClient::new(&config.api_url).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    }));

    let (command_tx, command_rx) = mpsc::channel(32);
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let state = TimerState::new(config.work_seconds, config.break_seconds);
    let runner = TimerRunner::new(state, Arc::clone(&client), event_tx);
    let runner_handle = tokio::spawn(runner.run(command_rx));
    let printer_handle = tokio::spawn(print_events(event_rx));

    println!("{}", command::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        };

        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = handle(cmd, &client, &command_tx).await {
                    tracing::error!(error = %e, "Cannot continue");
                    break;
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    // The runner settles in-flight reports before it returns, and the
    // printer ends once the runner's event senders are gone.
    let _ = command_tx.send(TimerCommand::Shutdown).await;
    if let Ok(state) = runner_handle.await {
        println!("{}", command::render_status(&state));
    }
    let _ = printer_handle.await;
}

#[derive(Debug, thiserror::Error)]
#[error("timer runner has stopped")]
struct RunnerStopped;

/// Carry out one command. Fails only when the runner has stopped.
async fn handle(
    cmd: Command,
    client: &ApiClient,
    commands: &mpsc::Sender<TimerCommand>,
) -> Result<(), RunnerStopped> {
    match cmd {
        Command::Timer(timer_cmd) => {
            commands.send(timer_cmd).await.map_err(|_| RunnerStopped)?;
            print_status(commands).await?;
        }
        Command::Status => print_status(commands).await?,
        Command::History => match client.list_sessions().await {
            Ok(sessions) => println!("{}", command::render_sessions(&sessions)),
            Err(e) => {
                tracing::warn!(error = %e, "Listing sessions failed");
                println!("{}", command::SESSIONS_FAILED);
            }
        },
        Command::Projects => match client.list_projects().await {
            Ok(projects) => println!("{}", command::render_projects(&projects)),
            Err(e) => {
                tracing::warn!(error = %e, "Listing projects failed");
                println!("{}", command::PROJECTS_FAILED);
            }
        },
        Command::CreateProject(project) => match client.create_project(&project).await {
            Ok(stored) => println!("Created project {} ({})", stored.name, stored.id),
            Err(e) => println!("Failed to create project: {e}"),
        },
        Command::Help => println!("{}", command::HELP),
        Command::Quit => {}
    }
    Ok(())
}

async fn print_status(commands: &mpsc::Sender<TimerCommand>) -> Result<(), RunnerStopped> {
    let (reply_tx, reply_rx) = oneshot::channel();
    commands
        .send(TimerCommand::Snapshot(reply_tx))
        .await
        .map_err(|_| RunnerStopped)?;
    let state = reply_rx.await.map_err(|_| RunnerStopped)?;
    println!("{}", command::render_status(&state));
    Ok(())
}

async fn print_events(mut events: mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            TimerEvent::PhaseCompleted(done) => {
                println!(
                    "{} phase complete ({}), switching to {}",
                    done.kind,
                    focusflow_core::timer::format_clock(done.duration_secs),
                    done.kind.opposite()
                );
            }
            TimerEvent::Reported(session) => {
                tracing::info!(id = %session.id, kind = %session.kind, "Session saved");
            }
            TimerEvent::ReportFailed { kind, error } => {
                println!("Could not save {kind} session: {error}");
            }
        }
    }
}
