use clap::{Args, Parser, Subcommand};
use handoff_core::Draft;

use super::{
    CLI_SCHEMA_VERSION, DEFAULT_OPEN_TIMEOUT_SECS, MAX_OPEN_TIMEOUT_SECS, load_config_text,
    log_debug, shell_split,
};

#[path = "cli_command_handlers.rs"]
mod cli_command_handlers;
#[path = "cli_config.rs"]
mod cli_config;
#[path = "cli_runtime_helpers.rs"]
mod cli_runtime_helpers;
pub(crate) use cli_command_handlers::run_cli;
pub(crate) use cli_config::{load_cli_config, load_open_config};
pub(crate) use cli_runtime_helpers::{
    client_to_json, output_error, output_ok, resolve_cli_command, resolve_client,
};

#[derive(Parser, Debug)]
#[command(
    name = "handoff",
    version,
    about = "Open third-party mail clients in compose mode"
)]
pub(crate) struct Cli {
    #[arg(short = 'c', long = "cmd")]
    cmd: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    Clients(ClientsCmd),
    Url(UrlCmd),
    Open(OpenCmd),
}

#[derive(Args, Debug)]
pub(crate) struct ClientsCmd {
    #[command(subcommand)]
    command: ClientsCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ClientsCommand {
    List(ClientsList),
    Show(ClientsShow),
}

#[derive(Args, Debug)]
pub(crate) struct ClientsList {
    /// Only clients the host reports as installed.
    #[arg(long)]
    available: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ClientsShow {
    #[arg(long)]
    scheme: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DraftArgs {
    #[arg(long)]
    to: Option<String>,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    body: Option<String>,
    #[arg(long)]
    cc: Option<String>,
    #[arg(long)]
    bcc: Option<String>,
}

impl DraftArgs {
    pub(crate) fn to_draft(&self) -> Draft {
        Draft {
            recipient: self.to.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            cc: self.cc.clone(),
            bcc: self.bcc.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct UrlCmd {
    #[arg(long)]
    scheme: Option<String>,
    #[command(flatten)]
    draft: DraftArgs,
    /// Launch URL without a message.
    #[arg(long)]
    launch: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OpenCmd {
    #[arg(long)]
    scheme: Option<String>,
    #[command(flatten)]
    draft: DraftArgs,
    #[arg(long)]
    launch: bool,
    /// Report the URL without opening it.
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Wait for the host to report whether the URL opened.
    #[arg(long)]
    wait: bool,
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub(crate) struct CliConfig {
    enabled: bool,
    default_client: Option<String>,
    load_error: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct OpenConfig {
    assume_available: bool,
    timeout_secs: u64,
}
