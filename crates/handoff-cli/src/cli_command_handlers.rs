use std::time::Duration;

use anyhow::Result;
use handoff_core::{Draft, MailClient, clients, find_client};
use handoff_launch::{
    RecordingOpener, SystemOpener, UrlHandler, is_client_available, open_client,
    open_client_async, open_compose, open_compose_async,
};
use serde::Serialize;

use super::{
    CliCommand, CliConfig, ClientsCommand, MAX_OPEN_TIMEOUT_SECS, OpenCmd, OpenConfig,
    client_to_json, load_cli_config, load_open_config, output_error, output_ok, resolve_client,
};

#[derive(Debug, Serialize)]
struct DispatchReport {
    client: &'static str,
    scheme: &'static str,
    url: String,
    opened: bool,
    dry_run: bool,
}

pub(crate) fn run_cli(command: CliCommand) -> Result<()> {
    let config = load_cli_config();
    if let Some(err) = config_error(&config) {
        return output_error(&err);
    }
    let open_config = load_open_config();

    match command {
        CliCommand::Clients(cmd) => match cmd.command {
            ClientsCommand::List(args) => {
                let handler = SystemOpener::new(open_config.assume_available);
                let mut out = Vec::new();
                for client in clients() {
                    let available = is_client_available(&handler, client);
                    if args.available && !available {
                        continue;
                    }
                    out.push(client_to_json(client, Some(available)));
                }
                output_ok(serde_json::Value::Array(out))
            }
            ClientsCommand::Show(args) => {
                let client = find_client(&args.scheme)?;
                output_ok(client_to_json(client, None))
            }
        },
        CliCommand::Url(args) => {
            let client = resolve_client(&config, args.scheme.as_deref())?;
            let url = target_url(client, &args.draft.to_draft(), args.launch)?;
            output_ok(serde_json::json!({
                "client": client.name,
                "scheme": client.scheme,
                "url": url,
            }))
        }
        CliCommand::Open(args) => {
            let client = resolve_client(&config, args.scheme.as_deref())?;
            let timeout = open_timeout(args.timeout_secs, &open_config);
            let report = if args.dry_run {
                dispatch(&RecordingOpener::new(true), client, &args, timeout)?
            } else {
                dispatch(
                    &SystemOpener::new(open_config.assume_available),
                    client,
                    &args,
                    timeout,
                )?
            };
            output_ok(serde_json::to_value(report)?)
        }
    }
}

/// A broken config file wins over `enabled`, so a bad `default_client` never
/// silently falls back to `mailto`.
fn config_error(config: &CliConfig) -> Option<String> {
    if let Some(err) = config.load_error.as_deref() {
        return Some(format!("Invalid config: {}", err));
    }
    if !config.enabled {
        return Some("CLI disabled (set [cli].enabled = true)".to_string());
    }
    None
}

fn open_timeout(requested: Option<u64>, config: &OpenConfig) -> Duration {
    let secs = requested
        .unwrap_or(config.timeout_secs)
        .clamp(1, MAX_OPEN_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn target_url(client: &MailClient, draft: &Draft, launch: bool) -> Result<String> {
    if launch {
        Ok(client.open_url()?)
    } else {
        Ok(client.compose_url(draft)?)
    }
}

fn dispatch<H: UrlHandler>(
    handler: &H,
    client: &'static MailClient,
    args: &OpenCmd,
    timeout: Duration,
) -> Result<DispatchReport> {
    let draft = args.draft.to_draft();
    let url = target_url(client, &draft, args.launch)?;
    let opened = if args.wait {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let pending = async {
                if args.launch {
                    open_client_async(handler, client).await
                } else {
                    open_compose_async(handler, client, &draft).await
                }
            };
            tokio::time::timeout(timeout, pending)
                .await
                .map_err(|_| anyhow::anyhow!("Timed out waiting for {} to open", client.name))?
        })?
    } else if args.launch {
        open_client(handler, client)?
    } else {
        open_compose(handler, client, &draft)?
    };
    Ok(DispatchReport {
        client: client.name,
        scheme: client.scheme,
        url,
        opened,
        dry_run: args.dry_run,
    })
}
