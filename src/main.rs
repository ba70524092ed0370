// rls — a classic BSD-style directory listing tool for Unix terminals

use std::process;

use rls::command_line::USAGE;
use rls::error::AppError;

fn main() {
    env_logger::init();

    match rls::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("rls: {}", err);
            if matches!(err, AppError::InvalidArg(_)) {
                eprintln!("{}", USAGE);
            }
            process::exit(1);
        }
    }
}
