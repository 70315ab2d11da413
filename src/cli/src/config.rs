use serde::Deserialize;
use std::{path::Path, time::Duration};
use twophase::SolveOptions;

/// Settings read from the `--config` TOML file. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_depth: usize,
    /// Zero disables the time limit.
    pub time_out_secs: u64,
    /// How many scrambles the background worker keeps ready.
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        let options = SolveOptions::default();
        Self {
            max_depth: options.max_depth,
            time_out_secs: options.time_out.as_secs(),
            queue_capacity: 4,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            max_depth: self.max_depth,
            time_out: Duration::from_secs(self.time_out_secs),
        }
    }
}
