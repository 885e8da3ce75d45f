//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the project values
//! it is handed.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `KILN_*` environment variables, `__` separating sections
//!    (`KILN_PROJECT__PACKAGE_NAME`)
//! 3. The file passed with `--config`
//! 4. `.kiln.toml` in the current directory
//! 5. The global config file ([`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG: &str = ".kiln.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values applied to every project before `--set` and flags.
    pub project: ProjectDefaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Resource lookup.
    pub resources: ResourcesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Indentation width used for needle insertions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_port: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory whose files override the embedded resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, layering files and environment over the defaults.
    ///
    /// `config_file` is the path passed via `--config`; unlike the global and
    /// local files it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path(), Path::new(LOCAL_CONFIG), config_file)
    }

    fn load_from(
        global: &Path,
        local: &Path,
        explicit: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to seed configuration defaults")?;

        let mut builder = Config::builder()
            .add_source(defaults)
            .add_source(File::from(global).format(FileFormat::Toml).required(false))
            .add_source(File::from(local).format(FileFormat::Toml).required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        builder
            .add_source(
                Environment::with_prefix("KILN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("configuration has unexpected values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kiln.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "kiln", "kiln")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nowhere() -> PathBuf {
        PathBuf::from("/nonexistent/kiln/config.toml")
    }

    #[test]
    fn default_format_is_human() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.output.format, "human");
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.project, ProjectDefaults::default());
    }

    #[test]
    fn missing_optional_files_give_defaults() {
        let cfg = AppConfig::load_from(&nowhere(), &nowhere(), None).unwrap();
        assert_eq!(cfg.output, OutputConfig::default());
        assert!(cfg.resources.dir.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiln.toml");
        std::fs::write(
            &path,
            "[project]\npackage_name = \"com.acme.shop\"\nindent = 4\n\n[output]\nno_color = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&nowhere(), &nowhere(), Some(&path)).unwrap();

        assert_eq!(cfg.project.package_name.as_deref(), Some("com.acme.shop"));
        assert_eq!(cfg.project.indent, Some(4));
        assert!(cfg.output.no_color);
        assert_eq!(cfg.output.format, "human");
    }

    #[test]
    fn explicit_file_wins_over_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.toml");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&local, "[project]\nbase_name = \"local\"\nserver_port = 7000\n").unwrap();
        std::fs::write(&explicit, "[project]\nbase_name = \"explicit\"\n").unwrap();

        let cfg = AppConfig::load_from(&nowhere(), &local, Some(&explicit)).unwrap();

        assert_eq!(cfg.project.base_name.as_deref(), Some("explicit"));
        assert_eq!(cfg.project.server_port, Some(7000));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = nowhere();
        assert!(AppConfig::load_from(&nowhere(), &nowhere(), Some(&missing)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
