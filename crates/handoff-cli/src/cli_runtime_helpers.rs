use anyhow::Result;
use clap::Parser;
use handoff_core::{MailClient, find_client, system_default};
use serde_json::{Value as JsonValue, json};

use super::{CLI_SCHEMA_VERSION, Cli, CliCommand, CliConfig, shell_split};

pub(crate) fn output_ok(value: JsonValue) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string(&json!({
            "schema": CLI_SCHEMA_VERSION,
            "ok": true,
            "result": value
        }))?
    );
    Ok(())
}

pub(crate) fn output_error(message: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string(&json!({
            "schema": CLI_SCHEMA_VERSION,
            "ok": false,
            "error": message
        }))?
    );
    Ok(())
}

pub(crate) fn resolve_cli_command(cli: Cli) -> Result<Option<CliCommand>> {
    if let Some(cmd) = cli.cmd {
        let parts = shell_split(&cmd).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if parts.is_empty() {
            return Ok(None);
        }
        let mut args = Vec::with_capacity(parts.len() + 1);
        args.push("handoff".to_string());
        args.extend(parts);
        let parsed = Cli::try_parse_from(args).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        return Ok(parsed.command);
    }
    Ok(cli.command)
}

/// Requested scheme, else the configured default, else the system handler.
pub(crate) fn resolve_client(
    config: &CliConfig,
    requested: Option<&str>,
) -> Result<&'static MailClient> {
    let scheme = requested.or(config.default_client.as_deref());
    match scheme {
        Some(scheme) => Ok(find_client(scheme)?),
        None => Ok(system_default()),
    }
}

pub(crate) fn client_to_json(client: &MailClient, available: Option<bool>) -> JsonValue {
    let mut value = json!(client);
    if let (Some(available), Some(map)) = (available, value.as_object_mut()) {
        map.insert("available".to_string(), json!(available));
    }
    value
}
