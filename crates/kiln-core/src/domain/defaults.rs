//! Process-wide immutable lookup tables.
//!
//! # Contents
//!
//! - [`DEFAULT_CONFIG`]: seed values for recognised project config keys
//! - [`VERSION_CATALOG`]: pinned versions resolved by coordinate when a
//!   dependency is added without one
//! - Layer roots and needle tokens shared by every module
//!
//! Everything here is `static` and read-only. Adding a recognised key means
//! adding one entry to the table; no `match` arms elsewhere.

use crate::domain::value_objects::ConfigValue;

// ── Config keys ──────────────────────────────────────────────────────────────

pub const PACKAGE_NAME: &str = "packageName";
pub const BASE_NAME: &str = "baseName";
pub const PROJECT_NAME: &str = "projectName";
pub const PRETTIER_DEFAULT_INDENT: &str = "prettierDefaultIndent";
pub const SERVER_PORT: &str = "serverPort";

/// Package path used when a project carries no package name.
pub const DEFAULT_PACKAGE_NAME_PATH: &str = "com/mycompany/myapp";

/// Indentation width used when the project config has none (or a bad one).
pub const DEFAULT_INDENT: usize = 2;
/// Widest indentation step accepted from `prettierDefaultIndent`.
pub const MAX_INDENT: usize = 16;

// ── Layer roots ──────────────────────────────────────────────────────────────

pub const MAIN_JAVA: &str = "src/main/java";
pub const TEST_JAVA: &str = "src/test/java";
pub const MAIN_RESOURCES: &str = "src/main/resources";
pub const TEST_RESOURCES: &str = "src/test/resources";
pub const MAIN_DOCKER: &str = "src/main/docker";

// ── Needles ──────────────────────────────────────────────────────────────────

pub const NEEDLE_LIQUIBASE: &str = "<!-- jhipster-needle-liquibase-add-changelog -->";
pub const NEEDLE_LOGBACK: &str = "<!-- jhipster-needle-logback-add-log -->";

// ── Default config table ─────────────────────────────────────────────────────

/// A default value for a recognised config key.
#[derive(Debug, Clone, Copy)]
pub struct ConfigDefault {
    pub key: &'static str,
    pub value: DefaultValue,
}

/// `const`-constructible mirror of [`ConfigValue`].
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_value(self) -> ConfigValue {
        match self {
            Self::Str(s) => ConfigValue::String(s.to_string()),
            Self::Int(i) => ConfigValue::Integer(i),
            Self::Bool(b) => ConfigValue::Boolean(b),
        }
    }
}

/// Single source of truth for config defaults.
pub static DEFAULT_CONFIG: &[ConfigDefault] = &[
    ConfigDefault {
        key: PACKAGE_NAME,
        value: DefaultValue::Str("com.mycompany.myapp"),
    },
    ConfigDefault {
        key: BASE_NAME,
        value: DefaultValue::Str("jhipster"),
    },
    ConfigDefault {
        key: PROJECT_NAME,
        value: DefaultValue::Str("JHipster Project"),
    },
    ConfigDefault {
        key: PRETTIER_DEFAULT_INDENT,
        value: DefaultValue::Int(2),
    },
    ConfigDefault {
        key: SERVER_PORT,
        value: DefaultValue::Int(8080),
    },
];

/// Look up the default for a recognised key.
pub fn default_config(key: &str) -> Option<ConfigValue> {
    DEFAULT_CONFIG
        .iter()
        .find(|d| d.key == key)
        .map(|d| d.value.to_value())
}

// ── Version catalog ──────────────────────────────────────────────────────────

/// A pinned version for an artifact that no BOM manages.
#[derive(Debug, Clone, Copy)]
pub struct VersionDef {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub version: &'static str,
}

/// Versions resolved by `(groupId, artifactId)` when a module adds a
/// dependency without one. Coordinates absent from this list stay
/// unversioned (BOM-managed).
pub static VERSION_CATALOG: &[VersionDef] = &[
    VersionDef {
        group_id: "org.springframework.boot",
        artifact_id: "spring-boot",
        version: "2.6.6",
    },
    VersionDef {
        group_id: "org.zalando",
        artifact_id: "problem-spring-web",
        version: "0.27.0",
    },
    VersionDef {
        group_id: "javax.cache",
        artifact_id: "cache-api",
        version: "1.1.1",
    },
    VersionDef {
        group_id: "jakarta.xml.bind",
        artifact_id: "jakarta.xml.bind-api",
        version: "3.0.1",
    },
    VersionDef {
        group_id: "org.glassfish.jaxb",
        artifact_id: "jaxb-runtime",
        version: "3.0.2",
    },
    VersionDef {
        group_id: "org.sonarsource.scanner.maven",
        artifact_id: "sonar-maven-plugin",
        version: "3.9.1.2184",
    },
];

/// Resolve a pinned version by coordinate.
pub fn catalog_version(group_id: &str, artifact_id: &str) -> Option<&'static str> {
    VERSION_CATALOG
        .iter()
        .find(|v| v.group_id == group_id && v.artifact_id == artifact_id)
        .map(|v| v.version)
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Whitespace for `level` indentation steps of `width` spaces.
pub fn indent(level: usize, width: usize) -> String {
    " ".repeat(level * width)
}

/// Join relative path segments with `/`, skipping empty ones.
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
