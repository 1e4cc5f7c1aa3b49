use super::{
    CliConfig, DEFAULT_OPEN_TIMEOUT_SECS, MAX_OPEN_TIMEOUT_SECS, OpenConfig, load_config_text,
    log_debug,
};

pub(crate) fn load_cli_config() -> CliConfig {
    let mut config = cli_config_from_text(load_config_text().as_deref());
    if let Ok(client) = std::env::var("HANDOFF_DEFAULT_CLIENT") {
        if !client.trim().is_empty() {
            config.default_client = Some(client.trim().to_string());
        }
    }
    config
}

pub(crate) fn load_open_config() -> OpenConfig {
    open_config_from_text(load_config_text().as_deref())
}

pub(super) fn cli_config_from_text(content: Option<&str>) -> CliConfig {
    let default = CliConfig {
        enabled: true,
        default_client: None,
        load_error: None,
    };
    let Some(content) = content else {
        return default;
    };
    let value: toml::Value = match toml::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            log_debug(&format!("handoff.toml parse failed: {}", err));
            return CliConfig {
                load_error: Some("Invalid handoff.toml".to_string()),
                ..default
            };
        }
    };
    let cli = match value.get("cli") {
        Some(cli) => cli,
        None => return default,
    };
    let enabled = cli.get("enabled").and_then(parse_bool).unwrap_or(true);
    let default_client = cli
        .get("default_client")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    CliConfig {
        enabled,
        default_client,
        load_error: None,
    }
}

pub(super) fn open_config_from_text(content: Option<&str>) -> OpenConfig {
    let default = OpenConfig {
        assume_available: true,
        timeout_secs: DEFAULT_OPEN_TIMEOUT_SECS,
    };
    let Some(content) = content else {
        return default;
    };
    let value: toml::Value = match toml::from_str(content) {
        Ok(value) => value,
        Err(_) => return default,
    };
    let open = match value.get("open") {
        Some(open) => open,
        None => return default,
    };
    let assume_available = open
        .get("assume_available")
        .and_then(parse_bool)
        .unwrap_or(default.assume_available);
    let timeout_secs = open
        .get("timeout_secs")
        .and_then(|v| v.as_integer())
        .map(|v| v.clamp(1, MAX_OPEN_TIMEOUT_SECS as i64) as u64)
        .unwrap_or(default.timeout_secs);
    OpenConfig {
        assume_available,
        timeout_secs,
    }
}

fn parse_bool(value: &toml::Value) -> Option<bool> {
    value.as_bool().or_else(|| {
        value
            .as_str()
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
    })
}
