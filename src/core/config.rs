//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.missive/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! EmailJS credentials are never compiled in. A deployment supplies them
//! through any layer of the hierarchy.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Provider;
use crate::delivery::Credentials;
use crate::delivery::provider::redacted;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MissiveConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub provider: Option<Provider>,
    pub notice_duration_ms: Option<u64>,
    pub delivery_timeout_secs: Option<u64>,
}

#[derive(Default, Deserialize, Serialize)]
pub struct EmailJsConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for EmailJsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailJsConfig")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &redacted(&self.private_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PageConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub heading: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NOTICE_DURATION_MS: u64 = 4000;
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_EMAILJS_BASE_URL: &str = "https://api.emailjs.com/api/v1.0";

const DEFAULT_TITLE: &str = "Contact";
const DEFAULT_DESCRIPTION: &str =
    "Feel free to reach out to me for any questions or opportunities!";
const DEFAULT_HEADING: &str = "Email Me 🚀";

// ============================================================================
// Resolved Config (concrete values, credentials stay optional until used)
// ============================================================================

/// Static copy shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCopy {
    pub title: String,
    pub description: String,
    pub heading: String,
}

impl Default for PageCopy {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            heading: DEFAULT_HEADING.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub notice_duration: Duration,
    pub delivery_timeout: Duration,
    pub emailjs_base_url: String,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub page: PageCopy,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("provider", &self.provider)
            .field("notice_duration", &self.notice_duration)
            .field("delivery_timeout", &self.delivery_timeout)
            .field("emailjs_base_url", &self.emailjs_base_url)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &redacted(&self.private_key))
            .field("page", &self.page)
            .finish()
    }
}

impl ResolvedConfig {
    /// Collects the EmailJS credentials, failing on the first one missing.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let require = |value: &Option<String>, name: &'static str| {
            value
                .clone()
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingCredential(name))
        };
        Ok(Credentials {
            service_id: require(&self.service_id, "service_id")?,
            template_id: require(&self.template_id, "template_id")?,
            public_key: require(&self.public_key, "public_key")?,
            private_key: self.private_key.clone(),
        })
    }
}

/// Values taken from command-line flags (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A credential the selected provider needs was not set anywhere.
    MissingCredential(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingCredential(name) => write!(
                f,
                "missing EmailJS {name} (set it in the config file, the EMAILJS_{} env var, or use --provider dry-run)",
                name.to_uppercase()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.missive/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".missive").join("config.toml"))
}

/// Load config from `~/.missive/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MissiveConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MissiveConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MissiveConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MissiveConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<MissiveConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MissiveConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Missive Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# provider = "emailjs"               # "emailjs" or "dry-run"
# notice_duration_ms = 4000          # How long the success/failure banner stays up
# delivery_timeout_secs = 15         # Give up on a send after this long

# [emailjs]
# service_id = "service_..."         # Or set EMAILJS_SERVICE_ID env var
# template_id = "template_..."       # Or set EMAILJS_TEMPLATE_ID env var
# public_key = "..."                 # Or set EMAILJS_PUBLIC_KEY env var
# private_key = "..."                # Optional access token, EMAILJS_PRIVATE_KEY
# base_url = "https://api.emailjs.com/api/v1.0"

# [page]
# title = "Contact"
# description = "Feel free to reach out to me for any questions or opportunities!"
# heading = "Email Me 🚀"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MissiveConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with<F>(config: &MissiveConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .or_else(|| env("MISSIVE_PROVIDER").and_then(|s| parse_provider(&s)))
        .or(config.general.provider)
        .unwrap_or_default();

    // Credentials: CLI → env → config
    let layered = |cli_value: &Option<String>, key: &str, file_value: &Option<String>| {
        cli_value
            .clone()
            .or_else(|| env(key))
            .or_else(|| file_value.clone())
    };
    let service_id = layered(&cli.service_id, "EMAILJS_SERVICE_ID", &config.emailjs.service_id);
    let template_id = layered(&cli.template_id, "EMAILJS_TEMPLATE_ID", &config.emailjs.template_id);
    let public_key = layered(&cli.public_key, "EMAILJS_PUBLIC_KEY", &config.emailjs.public_key);
    let private_key = layered(&None, "EMAILJS_PRIVATE_KEY", &config.emailjs.private_key);

    // Base URL: env → config → default
    let emailjs_base_url = env("EMAILJS_BASE_URL")
        .or_else(|| config.emailjs.base_url.clone())
        .unwrap_or_else(|| DEFAULT_EMAILJS_BASE_URL.to_string());

    let defaults = PageCopy::default();
    let page = PageCopy {
        title: config.page.title.clone().unwrap_or(defaults.title),
        description: config.page.description.clone().unwrap_or(defaults.description),
        heading: config.page.heading.clone().unwrap_or(defaults.heading),
    };

    ResolvedConfig {
        provider,
        notice_duration: Duration::from_millis(nonzero_or_default(
            config.general.notice_duration_ms,
            "notice_duration_ms",
            DEFAULT_NOTICE_DURATION_MS,
        )),
        delivery_timeout: Duration::from_secs(nonzero_or_default(
            config.general.delivery_timeout_secs,
            "delivery_timeout_secs",
            DEFAULT_DELIVERY_TIMEOUT_SECS,
        )),
        emailjs_base_url,
        service_id,
        template_id,
        public_key,
        private_key,
        page,
    }
}

/// Zero is rejected with a warning and the default used instead.
fn nonzero_or_default(value: Option<u64>, key: &str, default: u64) -> u64 {
    match value {
        Some(0) => {
            warn!("{} = 0 is not allowed, using {}", key, default);
            default
        }
        Some(v) => v,
        None => default,
    }
}

fn parse_provider(value: &str) -> Option<Provider> {
    match value.trim().to_ascii_lowercase().as_str() {
        "emailjs" => Some(Provider::EmailJs),
        "dry-run" | "dryrun" => Some(Provider::DryRun),
        other => {
            warn!("Ignoring unknown MISSIVE_PROVIDER value '{}'", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&MissiveConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.provider, Provider::EmailJs);
        assert_eq!(resolved.notice_duration, Duration::from_millis(4000));
        assert_eq!(resolved.delivery_timeout, Duration::from_secs(15));
        assert_eq!(resolved.emailjs_base_url, DEFAULT_EMAILJS_BASE_URL);
        assert_eq!(resolved.page, PageCopy::default());
        assert!(resolved.service_id.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MissiveConfig {
            general: GeneralConfig {
                provider: Some(Provider::DryRun),
                notice_duration_ms: Some(1500),
                delivery_timeout_secs: Some(3),
            },
            page: PageConfig {
                title: Some("Say hi".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.provider, Provider::DryRun);
        assert_eq!(resolved.notice_duration, Duration::from_millis(1500));
        assert_eq!(resolved.delivery_timeout, Duration::from_secs(3));
        assert_eq!(resolved.page.title, "Say hi");
        assert_eq!(resolved.page.heading, DEFAULT_HEADING);
    }

    #[test]
    fn test_env_wins_over_file_and_cli_wins_over_env() {
        let config = MissiveConfig {
            emailjs: EmailJsConfig {
                service_id: Some("service_file".to_string()),
                template_id: Some("template_file".to_string()),
                public_key: Some("key_file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("EMAILJS_SERVICE_ID", "service_env"),
            ("EMAILJS_TEMPLATE_ID", "template_env"),
            ("MISSIVE_PROVIDER", "dry-run"),
        ]);
        let cli = CliOverrides {
            service_id: Some("service_cli".to_string()),
            ..Default::default()
        };

        let resolved = resolve_with(&config, &cli, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(resolved.service_id.as_deref(), Some("service_cli"));
        assert_eq!(resolved.template_id.as_deref(), Some("template_env"));
        assert_eq!(resolved.public_key.as_deref(), Some("key_file"));
        assert_eq!(resolved.provider, Provider::DryRun);
    }

    #[test]
    fn test_unknown_env_provider_falls_through() {
        let env = |k: &str| (k == "MISSIVE_PROVIDER").then(|| "carrier-pigeon".to_string());
        let resolved = resolve_with(&MissiveConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.provider, Provider::EmailJs);
    }

    #[test]
    fn test_credentials_reports_first_missing() {
        let cli = CliOverrides {
            service_id: Some("service_x".to_string()),
            template_id: Some("   ".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with(&MissiveConfig::default(), &cli, no_env);
        let err = resolved.credentials().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("template_id")));
        assert!(err.to_string().contains("EMAILJS_TEMPLATE_ID"));
    }

    #[test]
    fn test_credentials_complete() {
        let cli = CliOverrides {
            provider: None,
            service_id: Some("service_x".to_string()),
            template_id: Some("template_y".to_string()),
            public_key: Some("pk".to_string()),
        };
        let resolved = resolve_with(&MissiveConfig::default(), &cli, no_env);
        let creds = resolved.credentials().unwrap();
        assert_eq!(creds.service_id, "service_x");
        assert_eq!(creds.template_id, "template_y");
        assert_eq!(creds.public_key, "pk");
        assert!(creds.private_key.is_none());
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
provider = "dry-run"
notice_duration_ms = 2500

[emailjs]
service_id = "service_abc"
template_id = "template_def"
public_key = "pub"
private_key = "priv"

[page]
heading = "Write to us"
"#;
        let config: MissiveConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.provider, Some(Provider::DryRun));
        assert_eq!(config.general.notice_duration_ms, Some(2500));
        assert!(config.general.delivery_timeout_secs.is_none());
        assert_eq!(config.emailjs.private_key.as_deref(), Some("priv"));
        assert_eq!(config.page.heading.as_deref(), Some("Write to us"));
        assert!(config.page.title.is_none());
    }

    #[test]
    fn test_debug_output_hides_private_key() {
        let config: MissiveConfig = toml::from_str(
            r#"
[emailjs]
public_key = "pub"
private_key = "s3cr3t-token"
"#,
        )
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cr3t-token"));
        assert!(printed.contains("pub"));

        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.private_key.as_deref(), Some("s3cr3t-token"));
        assert!(!format!("{:?}", resolved).contains("s3cr3t-token"));
    }

    #[test]
    fn test_zero_durations_fall_back_to_defaults() {
        let config: MissiveConfig = toml::from_str(
            r#"
[general]
notice_duration_ms = 0
delivery_timeout_secs = 0
"#,
        )
        .unwrap();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(
            resolved.notice_duration,
            Duration::from_millis(DEFAULT_NOTICE_DURATION_MS)
        );
        assert_eq!(
            resolved.delivery_timeout,
            Duration::from_secs(DEFAULT_DELIVERY_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[emailjs]
public_key = "only-this"
"#;
        let config: MissiveConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.emailjs.public_key.as_deref(), Some("only-this"));
        assert!(config.general.provider.is_none());
        assert!(config.page.description.is_none());
    }

    #[test]
    fn test_load_config_from_missing_file_is_io_error() {
        let result = load_config_from(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("missive-bad-{}.toml", std::process::id()));
        fs::write(&path, "[general\nprovider = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
