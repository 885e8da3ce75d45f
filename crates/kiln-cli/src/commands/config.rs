//! `kiln config` - inspect configuration values.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    explicit: Option<&std::path::PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = explicit.cloned().unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `project.package_name`.
///
/// Unset optional values print as an empty string.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let root = serde_json::to_value(config).map_err(|e| CliError::Serialization {
        what: "configuration",
        source: Box::new(e),
    })?;

    let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;
    if !is_known_key(section, field) {
        return Err(unknown_key(key));
    }

    Ok(match root.get(section).and_then(|s| s.get(field)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    })
}

fn is_known_key(section: &str, field: &str) -> bool {
    matches!(
        (section, field),
        (
            "project",
            "package_name" | "base_name" | "project_name" | "indent" | "server_port"
        ) | ("output", "no_color" | "format")
            | ("resources", "dir")
    )
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.format").unwrap(), "human");
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn unset_optional_key_is_empty() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "project.package_name").unwrap(), "");
    }

    #[test]
    fn integer_key_is_printed_bare() {
        let mut cfg = AppConfig::default();
        cfg.project.server_port = Some(9000);
        assert_eq!(get_config_value(&cfg, "project.server_port").unwrap(), "9000");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        for key in ["does.not.exist", "project", "project.colour"] {
            assert!(
                matches!(
                    get_config_value(&cfg, key),
                    Err(CliError::ConfigError { .. })
                ),
                "{key}"
            );
        }
    }
}
