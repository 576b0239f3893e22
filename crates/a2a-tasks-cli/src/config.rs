//! Configuration for the `a2a-tasks` CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use a2a_tasks::{A2AClient, DEFAULT_HISTORY_LENGTH};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// CLI configuration, typically stored at `~/.a2a-tasks/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the agent.
    #[serde(default = "default_url")]
    pub url: String,

    /// JSON-RPC path under the base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token (or read from A2A_AGENT_TOKEN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Timeout for request/response calls, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// History entries requested by `get` and `send`.
    #[serde(default = "default_history_length")]
    pub history_length: i32,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            endpoint: default_endpoint(),
            token: None,
            timeout_secs: None,
            history_length: default_history_length(),
            logging: LoggingConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080".into()
}

fn default_endpoint() -> String {
    "/".into()
}

fn default_history_length() -> i32 {
    DEFAULT_HISTORY_LENGTH
}

/// Log output configuration. `RUST_LOG` overrides `filter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn,a2a_tasks=info".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Telemetry/observability configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether to export spans over OTLP.
    #[serde(default)]
    pub enabled: bool,

    /// OTLP exporter endpoint.
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: default_otlp_endpoint(),
        }
    }
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".into()
}

impl CliConfig {
    /// `~/.a2a-tasks/config.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".a2a-tasks").join("config.toml"))
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply command-line (or environment) values on top of the file.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        token: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }

    /// A copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.token.is_some() {
            config.token = Some("********".into());
        }
        config
    }

    /// Build a client for the configured agent.
    pub fn client(&self) -> anyhow::Result<A2AClient> {
        let mut client = A2AClient::new(&self.url)
            .with_context(|| format!("invalid agent URL '{}'", self.url))?
            .with_endpoint(&self.endpoint)
            .with_context(|| format!("invalid endpoint '{}'", self.endpoint))?;

        if let Some(ref token) = self.token {
            client = client.with_auth(token);
        }
        if let Some(secs) = self.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }
}
