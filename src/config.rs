//! Configuration management for wxo-import
//!
//! Handles loading and merging configuration from multiple sources:
//! 1. Compiled defaults
//! 2. User config (~/.wxo-import/config.toml)
//! 3. CLI-specified config file
//! 4. Environment variables (via clap's env fallbacks)
//! 5. CLI arguments

use crate::cli::Args;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub import: ImportConfig,
    pub run: RunConfig,
    pub audit: AuditConfig,
}

/// Connection registration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// App name the connection and tool are registered under
    pub app_name: String,
    /// Environments to configure, in order
    pub environments: Vec<String>,
    /// Credential scope passed as `-t`
    pub auth_type: String,
    /// Credential kind passed as `-k`
    pub auth_kind: String,
}

/// Tool import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Tool kind passed to `tools import -k`
    pub kind: String,
    /// Tool source file
    pub tool_file: PathBuf,
    /// Requirements manifest
    pub requirements: PathBuf,
}

/// Execution behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Path to the orchestrate binary
    pub orchestrate_bin: PathBuf,
    /// Run remaining steps after a failure instead of halting
    pub keep_going: bool,
    /// Include the global `tools remove -n` purge step
    pub purge_tools: bool,
}

/// Audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Append every external invocation to the audit log
    pub enabled: bool,
    /// Audit log file path
    pub log_path: PathBuf,
    /// Redact token-shaped material before writing
    pub redact_secrets: bool,
}

// Default implementations

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            import: ImportConfig::default(),
            run: RunConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            app_name: "groq_search".to_string(),
            environments: vec!["draft".to_string(), "live".to_string()],
            auth_type: "team".to_string(),
            auth_kind: "bearer".to_string(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            kind: "python".to_string(),
            tool_file: PathBuf::from("search_tool.py"),
            requirements: PathBuf::from("requirements.txt"),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            orchestrate_bin: PathBuf::from("orchestrate"),
            keep_going: false,
            purge_tools: true,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            enabled: true,
            log_path: home.join(".wxo-import/logs/audit.log"),
            redact_secrets: true,
        }
    }
}

impl Config {
    /// Load configuration from all file sources
    pub fn load(cli_config: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Load user config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".wxo-import/config.toml");
            if user_config.exists() {
                debug!("Loading user config from {:?}", user_config);
                config.merge_from_file(&user_config)?;
            }
        }

        // Load CLI-specified config
        if let Some(path) = cli_config {
            debug!("Loading CLI config from {:?}", path);
            config.merge_from_file(path)?;
        }

        Ok(config)
    }

    /// Merge configuration from a file
    fn merge_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let file_config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        self.merge(file_config);
        Ok(())
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        // Connection config
        if other.connection.app_name != ConnectionConfig::default().app_name {
            self.connection.app_name = other.connection.app_name;
        }
        if other.connection.environments != ConnectionConfig::default().environments {
            self.connection.environments = other.connection.environments;
        }
        if other.connection.auth_type != ConnectionConfig::default().auth_type {
            self.connection.auth_type = other.connection.auth_type;
        }
        if other.connection.auth_kind != ConnectionConfig::default().auth_kind {
            self.connection.auth_kind = other.connection.auth_kind;
        }

        // Import config
        if other.import.kind != ImportConfig::default().kind {
            self.import.kind = other.import.kind;
        }
        if other.import.tool_file != ImportConfig::default().tool_file {
            self.import.tool_file = other.import.tool_file;
        }
        if other.import.requirements != ImportConfig::default().requirements {
            self.import.requirements = other.import.requirements;
        }

        // Run config
        if other.run.orchestrate_bin != RunConfig::default().orchestrate_bin {
            self.run.orchestrate_bin = other.run.orchestrate_bin;
        }
        // Behavior flags - always take explicit values
        self.run.keep_going = other.run.keep_going;
        self.run.purge_tools = other.run.purge_tools;

        // Audit config
        self.audit.enabled = other.audit.enabled;
        self.audit.redact_secrets = other.audit.redact_secrets;
        if other.audit.log_path != AuditConfig::default().log_path {
            self.audit.log_path = other.audit.log_path;
        }
    }

    /// Apply CLI argument overrides (flags win over every file source)
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref app_name) = args.app_name {
            self.connection.app_name = app_name.clone();
        }
        if !args.environments.is_empty() {
            self.connection.environments = args.environments.clone();
        }
        if let Some(ref tool_file) = args.tool_file {
            self.import.tool_file = tool_file.clone();
        }
        if let Some(ref requirements) = args.requirements {
            self.import.requirements = requirements.clone();
        }
        if let Some(ref bin) = args.orchestrate_bin {
            self.run.orchestrate_bin = bin.clone();
        }
        if args.keep_going {
            self.run.keep_going = true;
        }
        if args.no_purge {
            self.run.purge_tools = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection.app_name.is_empty() {
            return Err(ConfigError::MissingField("connection.app_name".to_string()));
        }
        if self.connection.environments.is_empty() {
            return Err(ConfigError::Invalid(
                "connection.environments must list at least one environment".to_string(),
            ));
        }
        if self.connection.environments.iter().any(|e| e.is_empty()) {
            return Err(ConfigError::Invalid(
                "connection.environments must not contain empty names".to_string(),
            ));
        }

        let valid_kinds = ["python", "openapi", "flow"];
        if !valid_kinds.contains(&self.import.kind.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "import.kind must be one of: {:?}",
                valid_kinds
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.connection.app_name, "groq_search");
        assert_eq!(config.connection.environments, vec!["draft", "live"]);
        assert_eq!(config.connection.auth_type, "team");
        assert_eq!(config.connection.auth_kind, "bearer");
        assert_eq!(config.import.kind, "python");
        assert_eq!(config.import.tool_file, PathBuf::from("search_tool.py"));
        assert!(config.run.purge_tools);
        assert!(!config.run.keep_going);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_app_name() {
        let mut config = Config::default();
        config.connection.app_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_environments() {
        let mut config = Config::default();
        config.connection.environments.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_kind() {
        let mut config = Config::default();
        config.import.kind = "javascript".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            [connection]
            app_name = "web_lookup"
            environments = ["staging"]

            [import]
            tool_file = "tools/web_lookup.py"

            [run]
            keep_going = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.connection.app_name, "web_lookup");
        assert_eq!(config.connection.environments, vec!["staging"]);
        assert_eq!(
            config.import.tool_file,
            PathBuf::from("tools/web_lookup.py")
        );
        assert!(config.run.keep_going);
        // Unspecified sections keep their defaults
        assert_eq!(config.import.kind, "python");
        assert_eq!(config.import.requirements, PathBuf::from("requirements.txt"));
    }

    #[test]
    fn test_merge_takes_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.connection.app_name = "web_lookup".to_string();
        other.run.keep_going = true;

        base.merge(other);
        assert_eq!(base.connection.app_name, "web_lookup");
        assert!(base.run.keep_going);
        // Untouched fields keep defaults
        assert_eq!(base.connection.auth_kind, "bearer");
    }

    #[test]
    fn test_apply_args_overrides() {
        let args = crate::cli::Args::parse_from([
            "wxo-import",
            "-a",
            "web_lookup",
            "-e",
            "prod",
            "--no-purge",
            "--keep-going",
        ]);

        let mut config = Config::default();
        config.apply_args(&args);

        assert_eq!(config.connection.app_name, "web_lookup");
        assert_eq!(config.connection.environments, vec!["prod"]);
        assert!(!config.run.purge_tools);
        assert!(config.run.keep_going);
        // Flags not passed leave config untouched
        assert_eq!(config.import.tool_file, PathBuf::from("search_tool.py"));
    }
}
