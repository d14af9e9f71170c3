// SPDX-License-Identifier: MIT
//
// n-prompt — interactive questions on the command line.
//
// This is the demo binary that wires together the crates:
//
//   n-term → raw mode, ANSI motion, byte source, line-reader worker
//   n-line → line buffer, escape keys, wrap-aware redraw, editor loop
//   n-ask  → ask / password / confirm with defaults, checks, cancellation
//
// At a terminal the answers are edited in raw mode (arrows, Ctrl+A/E,
// Ctrl+W, Alt+B/F, ...). Piped input is read line by line:
//
//   printf 'Mark\n\nyes\n' | n-prompt
//
// Set N_PROMPT_LOG to a file path to get a tracing log; RUST_LOG filters
// it as usual. Logging never goes to the terminal the prompt is using.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use n_ask::{CancelToken, ErrorKind, Options};
use tracing_appender::non_blocking::WorkerGuard;

/// Exit status for Ctrl+C, as shells report SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

/// Returns instead of calling `process::exit`, so the log guard is dropped
/// and flushes the non-blocking writer on every path out.
fn main() -> ExitCode {
    let _log_guard = match init_logging() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("n-prompt: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let status = exit_status(&err);
            if status != EXIT_INTERRUPTED {
                eprintln!("n-prompt: {err:#}");
            }
            tracing::debug!(target: "prompt.session", status, "exit");
            ExitCode::from(status)
        }
    }
}

/// Process status for a failed run: 130 for Ctrl+C, 1 otherwise.
fn exit_status(err: &anyhow::Error) -> u8 {
    let interrupted = err
        .downcast_ref::<n_ask::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::Interrupted);
    if interrupted { EXIT_INTERRUPTED } else { 1 }
}

fn run() -> Result<()> {
    let cancel = CancelToken::never();

    let name = n_ask::ask(
        &cancel,
        "What is your name?",
        Options::new().check(|s| {
            if s.trim().is_empty() {
                return Err("a name needs at least one visible character".into());
            }
            Ok(())
        }),
    )?;

    let age = n_ask::ask(
        &cancel,
        "How old are you? [42]",
        Options::new().with_default("42").check(|s| {
            s.parse::<u8>()
                .map(drop)
                .map_err(|_| format!("{s:?} is not an age"))
        }),
    )?;

    let secret = n_ask::password(&cancel, "Pick a passphrase (optional):", Options::new().optional(true))?;

    let proceed = n_ask::confirm(&cancel, "Save this profile? (yes/no)", Options::new())?;

    tracing::info!(target: "prompt.session", proceed, has_secret = !secret.is_empty(), "demo_done");
    if proceed {
        println!("Saved {name}, {age}, passphrase {}.", if secret.is_empty() { "unset" } else { "set" });
    } else {
        println!("Nothing saved.");
    }
    Ok(())
}

/// Install a file logger when `N_PROMPT_LOG` is set.
///
/// The returned guard flushes the non-blocking writer on drop, so it must
/// live until `main` returns.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let Some(path) = env::var_os("N_PROMPT_LOG") else {
        return Ok(None);
    };
    let path = Path::new(&path);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("N_PROMPT_LOG has no file name: {}", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A subscriber is already installed; drop the guard so the writer shuts down.
        Err(_) => Ok(None),
    }
}
