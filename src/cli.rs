//! Command-line options for the terminal binary.

use anyhow::{anyhow, Result};

use crate::core::EngineConfig;

pub const USAGE: &str = "\
usage: twotris [--seed N] [--rows N] [--cols N] [--fall-ms N]

  --seed N      session seed (default: system clock)
  --rows N      board height (default: 20)
  --cols N      board width (default: 10)
  --fall-ms N   forced descent interval in ms (default: 400)
  --help        print this help

keys: W/A/S/D left piece, arrows right piece, Esc pause/resume,
      Enter start/restart, R restart, Z menu, Q quit";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliConfig {
    pub seed: Option<u32>,
    pub rows: Option<u8>,
    pub cols: Option<u8>,
    pub fall_ms: Option<u32>,
}

impl CliConfig {
    /// Engine configuration with the overrides applied.
    ///
    /// `fallback_seed` is used when no `--seed` was given.
    pub fn engine_config(&self, fallback_seed: u32) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            fall_interval_ms: self.fall_ms.unwrap_or(defaults.fall_interval_ms),
            seed: self.seed.unwrap_or(fallback_seed),
            ..defaults
        }
    }
}

/// Parse arguments (without the program name).
///
/// Returns `Ok(None)` when `--help` was requested.
pub fn parse_args(args: &[String]) -> Result<Option<CliConfig>> {
    let mut config = CliConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => return Ok(None),
            "--seed" => config.seed = Some(parse_value(args, &mut i, flag)?),
            "--rows" => config.rows = Some(parse_value(args, &mut i, flag)?),
            "--cols" => config.cols = Some(parse_value(args, &mut i, flag)?),
            "--fall-ms" => config.fall_ms = Some(parse_value(args, &mut i, flag)?),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(config))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T> {
    *i += 1;
    let v = args
        .get(*i)
        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}
