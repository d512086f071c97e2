use crate::error::{LabopsError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const WEBHOOK_ENV: &str = "DISCORD_HOMELAB_WEBHOOK";
pub const KUMA_USERNAME_ENV: &str = "UPTIME_KUMA_USERNAME";
pub const KUMA_PASSWORD_ENV: &str = "UPTIME_KUMA_PASSWORD";

const CONFIG_FILE_NAME: &str = "automation-config.yaml";

/// Automation settings, built once at startup and passed by reference into
/// every component. Resolution order: defaults, then the optional YAML file
/// (file wins), then environment variables for credentials left unset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    pub discord: DiscordConfig,
    pub uptime_kuma: UptimeKumaConfig,
    pub documentation: DocumentationConfig,
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub webhook_url: Option<String>,
    pub channel: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            channel: "#homelab-general".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UptimeKumaConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UptimeKumaConfig {
    /// All three of url, username, and password, when configured.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.url.as_deref()?,
            self.username.as_deref()?,
            self.password.as_deref()?,
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentationConfig {
    pub auto_commit: bool,
    pub commit_message_template: String,
    /// Catalog location relative to the project path.
    pub catalog_path: PathBuf,
}

impl Default for DocumentationConfig {
    fn default() -> Self {
        Self {
            auto_commit: true,
            commit_message_template: "docs: Update service catalog for {service_name}".to_string(),
            catalog_path: PathBuf::from("docs/applications/services.md"),
        }
    }
}

impl DocumentationConfig {
    pub fn commit_message(&self, service_name: &str) -> String {
        self.commit_message_template
            .replace("{service_name}", service_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub routes_dir: Option<PathBuf>,
}

impl AutomationConfig {
    /// Load configuration for a project. An explicitly passed file must be
    /// readable; the conventional `automation-config.yaml` next to the
    /// project is picked up when present, and pure defaults apply otherwise.
    pub fn load(project_path: &Path, config_override: Option<&Path>) -> Result<Self> {
        let mut config = match config_override {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = project_path.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.resolve_env(|name| env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LabopsError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| LabopsError::Config(format!("Failed to parse YAML config: {}", e)))
    }

    /// Fill credentials left unset by the config file from the environment.
    /// File values always win over environment values.
    pub fn resolve_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.discord.webhook_url.is_none() {
            self.discord.webhook_url = lookup(WEBHOOK_ENV);
        }
        if self.uptime_kuma.username.is_none() {
            self.uptime_kuma.username = lookup(KUMA_USERNAME_ENV);
        }
        if self.uptime_kuma.password.is_none() {
            self.uptime_kuma.password = lookup(KUMA_PASSWORD_ENV);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_sane() {
        let config = AutomationConfig::default();
        assert!(config.documentation.auto_commit);
        assert_eq!(config.discord.channel, "#homelab-general");
        assert_eq!(
            config.documentation.catalog_path,
            PathBuf::from("docs/applications/services.md")
        );
        assert!(config.uptime_kuma.credentials().is_none());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config = AutomationConfig::from_yaml(
            "documentation:\n  auto_commit: false\nuptime_kuma:\n  url: \"http://192.168.1.10:3001\"\n",
        )
        .unwrap();
        assert!(!config.documentation.auto_commit);
        assert_eq!(
            config.uptime_kuma.url.as_deref(),
            Some("http://192.168.1.10:3001")
        );
        // Untouched sections keep their defaults.
        assert_eq!(config.discord.channel, "#homelab-general");
        assert!(config.documentation.commit_message_template.contains("{service_name}"));
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let err = AutomationConfig::from_yaml("documentation: [not, a, map]").unwrap_err();
        assert!(matches!(err, LabopsError::Config(_)));
    }

    #[test]
    fn environment_fills_unset_credentials() {
        let env: HashMap<&str, &str> = HashMap::from([
            (WEBHOOK_ENV, "https://discord.example/webhook"),
            (KUMA_USERNAME_ENV, "serveradmin"),
            (KUMA_PASSWORD_ENV, "secret"),
        ]);

        let mut config = AutomationConfig::default();
        config.resolve_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(
            config.discord.webhook_url.as_deref(),
            Some("https://discord.example/webhook")
        );
        assert_eq!(config.uptime_kuma.username.as_deref(), Some("serveradmin"));
        assert_eq!(config.uptime_kuma.password.as_deref(), Some("secret"));
    }

    #[test]
    fn file_values_win_over_environment() {
        let mut config = AutomationConfig::from_yaml(
            "discord:\n  webhook_url: \"https://from-file.example/hook\"\n",
        )
        .unwrap();
        config.resolve_env(|_| Some("https://from-env.example/hook".to_string()));
        assert_eq!(
            config.discord.webhook_url.as_deref(),
            Some("https://from-file.example/hook")
        );
    }

    #[test]
    fn commit_message_template_substitutes_service_name() {
        let docs = DocumentationConfig::default();
        assert_eq!(
            docs.commit_message("Jellyfin"),
            "docs: Update service catalog for Jellyfin"
        );
    }

    #[test]
    fn kuma_credentials_require_all_three() {
        let mut kuma = UptimeKumaConfig {
            url: Some("http://192.168.1.10:3001".to_string()),
            username: Some("admin".to_string()),
            password: None,
        };
        assert!(kuma.credentials().is_none());
        kuma.password = Some("secret".to_string());
        assert_eq!(
            kuma.credentials(),
            Some(("http://192.168.1.10:3001", "admin", "secret"))
        );
    }
}
