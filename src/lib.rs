// rls — a classic BSD-style directory listing tool for Unix terminals

pub mod attribute_aggregator;
pub mod column_layout;
pub mod command_line;
pub mod entry;
pub mod entry_comparator;
pub mod entry_renderer;
pub mod environment_provider;
pub mod error;
pub mod humanize;
pub mod level;
pub mod level_controller;
pub mod mode_string;
pub mod owner;
pub mod timestamp;
pub mod traversal;

use std::io::{BufWriter, IsTerminal, Write};

use log::debug;

use command_line::CommandLine;
use environment_provider::{DefaultEnvironmentProvider, block_size_from_env, output_width};
use error::AppError;
use level_controller::LevelController;
use traversal::Traversal;

/// Main entry point for the library. Called by main.rs; the Ok value is
/// the process exit code (1 when any non-fatal diagnostic was emitted).
pub fn run() -> Result<i32, AppError> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let is_superuser = nix::unistd::getuid().is_root();

    let mut cmd =
        CommandLine::parse_from(std::env::args_os().skip(1), stdout_is_tty, is_superuser)?;

    if (cmd.print_blocks || cmd.long_format) && !cmd.block_size_pinned {
        cmd.block_size = block_size_from_env(&DefaultEnvironmentProvider);
    }
    if cmd.grid_mode() {
        cmd.terminal_width = output_width();
    }
    debug!("options: {:?}", cmd);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match run_with_output(&cmd, &mut out) {
        Ok(had_error) => {
            out.flush()?;
            Ok(if had_error { 1 } else { 0 })
        }
        Err(err) => {
            // keep whatever was already rendered before the fatal error
            let _ = out.flush();
            Err(err)
        }
    }
}

/// Run one complete listing against an arbitrary writer.
/// Returns true when a non-fatal diagnostic was emitted along the way.
pub fn run_with_output<W: Write>(cmd: &CommandLine, out: &mut W) -> Result<bool, AppError> {
    let now = chrono::Local::now().timestamp();
    let mut controller = LevelController::new(cmd, now, out);
    Traversal::new(cmd).run(&mut controller)?;
    Ok(controller.had_error())
}
