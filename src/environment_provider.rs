// environment_provider.rs — Environment variable abstraction
//
// Provides a trait for env var access so the block-size override can be
// tested with mock values, plus the terminal width query.

use terminal_size::{Width, terminal_size};

use crate::command_line::{DEFAULT_BLOCK_SIZE, DEFAULT_TERMINAL_WIDTH};

/// Trait for environment variable access.
/// Enables unit testing without depending on actual env vars.
pub trait EnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String>;
}

/// Default implementation that reads from the actual process environment.
pub struct DefaultEnvironmentProvider;

impl EnvironmentProvider for DefaultEnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// BLOCKSIZE override for -s block counts. Zero, negative, or unparsable
/// values fall back to the 512-byte default.
pub fn block_size_from_env(provider: &dyn EnvironmentProvider) -> u64 {
    match provider.get_env_var("BLOCKSIZE") {
        Some(v) => match v.trim().parse::<i64>() {
            Ok(n) if n > 0 => n as u64,
            _ => DEFAULT_BLOCK_SIZE,
        },
        None => DEFAULT_BLOCK_SIZE,
    }
}

/// Current terminal width in columns, or the classic 80 when stdout is not
/// a terminal or the query fails.
pub fn output_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => w as usize,
        None => DEFAULT_TERMINAL_WIDTH,
    }
}

/// Mock implementation for unit tests.
#[cfg(test)]
pub struct MockEnvironmentProvider {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironmentProvider {
    pub fn new() -> Self {
        MockEnvironmentProvider {
            vars: std::collections::HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.into(), value.into());
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironmentProvider {
    fn get_env_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
