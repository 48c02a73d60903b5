//! tally: command-line frontend for the Tally time tracker.
//!
//! A thin consumer of the tally-core command surface. `watch` mode polls
//! the snapshot once a second and keeps the autosave loop running, the
//! way a GUI frontend would.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tally_core::{
    AppState, AutosaveHandle, DEFAULT_AUTOSAVE_INTERVAL, SystemClock, TaskView, commands, persist,
};

const USAGE: &str = "\
usage: tally <command> [args]

commands:
  list             show all tasks
  add <name>       create a task
  start <name>     start the stopwatch for a task
  stop <name>      stop the stopwatch for a task
  reset <name>     zero a task's accumulated time
  delete <name>    remove a task permanently
  export <path>    write a plain-text summary
  watch            live view, refreshed every second (Ctrl-C to quit)
";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let state = match AppState::load(persist::default_data_path(), Arc::new(SystemClock)) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            eprintln!("failed to load task data: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(path = %state.data_path().display(), "data file");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.split_first() {
        Some((command, rest)) => run(command, rest, &state).await,
        None => {
            print!("{USAGE}");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: &str, rest: &[String], state: &Arc<AppState>) -> Result<(), String> {
    match command {
        "list" => {
            print_table(&commands::get_tasks(state)?);
            Ok(())
        }
        "add" => commands::add_task(state, one_arg(rest, "add <name>")?),
        "start" => commands::start_task(state, one_arg(rest, "start <name>")?),
        "stop" => commands::stop_task(state, one_arg(rest, "stop <name>")?),
        "reset" => commands::reset_task(state, one_arg(rest, "reset <name>")?),
        "delete" => commands::delete_task(state, one_arg(rest, "delete <name>")?),
        "export" => {
            let path = one_arg(rest, "export <path>")?;
            commands::export_tasks(state, path)?;
            println!("exported to {path}");
            Ok(())
        }
        "watch" => watch(state).await,
        _ => Err(format!("unknown command '{command}'\n{USAGE}")),
    }
}

fn one_arg<'a>(rest: &'a [String], usage: &str) -> Result<&'a str, String> {
    match rest {
        [arg] => Ok(arg.as_str()),
        _ => Err(format!("usage: tally {usage}")),
    }
}

/// Poll the snapshot once a second until Ctrl-C, keeping the autosave
/// loop alive, then flush a final save.
async fn watch(state: &Arc<AppState>) -> Result<(), String> {
    let autosave = AutosaveHandle::spawn(Arc::clone(state), DEFAULT_AUTOSAVE_INTERVAL);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                let views = commands::get_tasks(state)?;
                // ANSI clear + home, then redraw.
                print!("\x1b[2J\x1b[H");
                print_table(&views);
            }
        }
    }

    autosave.shutdown_and_join().await;
    state.save_now().map_err(|e| e.to_string())?;
    Ok(())
}

fn print_table(views: &[TaskView]) {
    if views.is_empty() {
        println!("no tasks");
        return;
    }
    let name_width = views.iter().map(|v| v.name.len()).max().unwrap_or(0).max(4);
    println!("{:<name_width$}  {:>9}  {:<7}  created", "name", "time", "state");
    for view in views {
        let status = if view.is_running { "running" } else { "stopped" };
        println!(
            "{:<name_width$}  {:>9}  {:<7}  {}",
            view.name, view.formatted_time, status, view.created_at
        );
    }
}
