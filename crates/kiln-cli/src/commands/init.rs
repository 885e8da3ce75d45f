//! `kiln init` - create a default configuration file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default kiln configuration file.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG)
    } else {
        AppConfig::config_path()
    };

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    write_default_config(&config_path)?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

fn write_default_config(path: &Path) -> CliResult<()> {
    let contents = default_config_contents()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, contents)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

fn default_config_contents() -> CliResult<String> {
    let body = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    Ok(format!(
        "# kiln configuration, created {}\n\
         #\n\
         # [project] accepts package_name, base_name, project_name, indent and server_port.\n\
         # [resources] dir points at a folder whose files override the shipped ones.\n\n\
         {body}",
        Utc::now().format("%Y-%m-%d")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips() {
        let contents = default_config_contents().unwrap();
        assert!(contents.starts_with("# kiln configuration, created "));

        let parsed: AppConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path).unwrap();

        assert!(path.is_file());
    }
}
