use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use handoff_core::log_debug;
use shell_words::split as shell_split;

mod cli;

use crate::cli::{Cli, output_error, resolve_cli_command, run_cli};

const CLI_SCHEMA_VERSION: &str = "handoff.cli.v1";
const DEFAULT_OPEN_TIMEOUT_SECS: u64 = 30;
const MAX_OPEN_TIMEOUT_SECS: u64 = 600;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = match resolve_cli_command(cli) {
        Ok(command) => command,
        Err(err) => {
            return output_error(&err.to_string());
        }
    };
    let Some(command) = command else {
        return output_error("No command provided");
    };
    if let Err(err) = run_cli(command) {
        log_debug(&format!("command failed: {}", err));
        return output_error(&err.to_string());
    }
    Ok(())
}

fn xdg_config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

fn config_path_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("handoff.toml"),
        xdg_config_dir().join("handoff").join("handoff.toml"),
    ]
}

fn load_config_text() -> Option<String> {
    for path in config_path_candidates() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            return Some(content);
        }
    }
    None
}
