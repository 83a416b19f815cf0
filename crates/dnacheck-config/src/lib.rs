//! Configuration for the dnacheck CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `dnacheck_core::CollectorConfig`. The CLI layers its
//! flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use dnacheck_core::{AuthCredentials, CollectorConfig, PollPolicy, TlsVerification};

/// Keyring service name.
pub const KEYRING_SERVICE: &str = "dnacheck";
/// Environment variable consulted first for the password.
pub const PASSWORD_ENV: &str = "DNACHECK_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the requested one, else the default.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Accept self-signed controller certificates.
    #[serde(default = "default_true")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_true")]
    pub ask_for_permission: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: true,
            timeout: default_timeout(),
            ask_for_permission: true,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_port() -> u16 {
    dnacheck_api::transport::DEFAULT_HTTP_PORT
}

/// A named controller profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Controller host name or address.
    #[serde(default)]
    pub host: String,

    /// Left out of URLs when it is 80.
    #[serde(default = "default_port")]
    pub port: u16,

    pub username: Option<String>,

    /// Password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override the default TLS setting.
    pub insecure: Option<bool>,

    /// Override the default request timeout, in seconds.
    pub timeout: Option<u64>,

    pub task_attempts: Option<u32>,
    pub task_interval_secs: Option<u64>,
    pub fetch_attempts: Option<u32>,
    pub fetch_interval_secs: Option<u64>,

    /// Override the default confirmation behavior.
    pub ask_for_permission: Option<bool>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            username: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            task_attempts: None,
            task_interval_secs: None,
            fetch_attempts: None,
            fetch_interval_secs: None,
            ask_for_permission: None,
        }
    }
}

impl Profile {
    /// `https://host[:port]`
    pub fn url(&self) -> Result<Url, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "host".into(),
                reason: "must not be empty".into(),
            });
        }
        dnacheck_api::controller_url(self.host.trim(), self.port).map_err(|e| {
            ConfigError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            }
        })
    }

    pub fn task_policy(&self) -> PollPolicy {
        policy(PollPolicy::TASK, self.task_attempts, self.task_interval_secs)
    }

    pub fn fetch_policy(&self) -> PollPolicy {
        policy(PollPolicy::ARTIFACT, self.fetch_attempts, self.fetch_interval_secs)
    }

    /// An explicit `insecure = true` wins; a `ca_cert` otherwise turns
    /// verification on regardless of the default.
    pub fn tls(&self, defaults: &Defaults) -> TlsVerification {
        match (self.insecure, &self.ca_cert) {
            (Some(true), _) => TlsVerification::DangerAcceptInvalid,
            (_, Some(ca_path)) => TlsVerification::CustomCa(ca_path.clone()),
            (Some(false), None) => TlsVerification::SystemDefaults,
            (None, None) if defaults.insecure => TlsVerification::DangerAcceptInvalid,
            (None, None) => TlsVerification::SystemDefaults,
        }
    }
}

fn policy(base: PollPolicy, attempts: Option<u32>, interval_secs: Option<u64>) -> PollPolicy {
    PollPolicy::new(
        attempts.unwrap_or(base.max_attempts),
        interval_secs.map_or(base.interval, Duration::from_secs),
    )
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "dnacheck", "dnacheck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("dnacheck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DNACHECK_").ignore(&["PASSWORD"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))?)
}

/// Look the password up: env var, then keyring, then plaintext config.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(pw));
    }

    if let Some(pw) = keyring_entry(profile_name)
        .ok()
        .and_then(|e| e.get_password().ok())
    {
        return Some(SecretString::from(pw));
    }

    profile.password.clone().map(SecretString::from)
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

/// Build a `CollectorConfig` from a profile with the given credentials.
pub fn profile_to_collector_config(
    profile: &Profile,
    defaults: &Defaults,
    auth: AuthCredentials,
) -> Result<CollectorConfig, ConfigError> {
    let mut config = CollectorConfig::new(profile.url()?, auth);
    config.tls = profile.tls(defaults);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.task_policy = profile.task_policy();
    config.fetch_policy = profile.fetch_policy();
    config.ask_for_permission = profile
        .ask_for_permission
        .unwrap_or(defaults.ask_for_permission);
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "lab"

[defaults]
timeout = 10

[profiles.lab]
host = "dnac.lab.local"
username = "admin"
task_attempts = 20

[profiles.prod]
host = "10.0.0.5"
port = 8443
insecure = false
ca_cert = "/etc/ssl/dnac.pem"
ask_for_permission = false
"#;

    fn sample() -> Config {
        toml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn parses_profiles_with_defaults() {
        let cfg = sample();
        assert_eq!(cfg.profile_name(None), "lab");
        assert_eq!(cfg.profile_name(Some("prod")), "prod");
        assert!(cfg.defaults.insecure);
        assert!(cfg.defaults.ask_for_permission);
        assert_eq!(cfg.defaults.output, "table");

        let lab = &cfg.profiles["lab"];
        assert_eq!(lab.port, 80);
        assert_eq!(lab.username.as_deref(), Some("admin"));
    }

    #[test]
    fn default_port_is_left_out_of_url() {
        let cfg = sample();
        assert_eq!(cfg.profiles["lab"].url().unwrap().as_str(), "https://dnac.lab.local/");
        assert_eq!(cfg.profiles["prod"].url().unwrap().as_str(), "https://10.0.0.5:8443/");
    }

    #[test]
    fn empty_host_is_rejected() {
        let err = Profile::default().url().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "host"));
    }

    #[test]
    fn poll_overrides() {
        let cfg = sample();
        let lab = &cfg.profiles["lab"];
        assert_eq!(lab.task_policy(), PollPolicy::new(20, Duration::from_secs(2)));
        assert_eq!(lab.fetch_policy(), PollPolicy::ARTIFACT);
    }

    #[test]
    fn collector_config_from_profile() {
        let cfg = sample();
        let auth = AuthCredentials::Token(SecretString::from("t".to_string()));

        let lab =
            profile_to_collector_config(&cfg.profiles["lab"], &cfg.defaults, auth.clone())
                .unwrap();
        assert_eq!(lab.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(lab.timeout, Duration::from_secs(10));
        assert!(lab.ask_for_permission);

        let prod = profile_to_collector_config(&cfg.profiles["prod"], &cfg.defaults, auth).unwrap();
        assert_eq!(prod.tls, TlsVerification::CustomCa("/etc/ssl/dnac.pem".into()));
        assert!(!prod.ask_for_permission);
    }

    #[test]
    fn ca_cert_alone_enables_verification() {
        let defaults = Defaults::default();
        assert!(defaults.insecure);

        let pinned = Profile {
            host: "dnac".into(),
            ca_cert: Some("/etc/ssl/dnac.pem".into()),
            ..Profile::default()
        };
        assert_eq!(pinned.tls(&defaults), TlsVerification::CustomCa("/etc/ssl/dnac.pem".into()));

        let forced = Profile {
            insecure: Some(true),
            ..pinned.clone()
        };
        assert_eq!(forced.tls(&defaults), TlsVerification::DangerAcceptInvalid);

        let strict = Profile {
            insecure: Some(false),
            ..Profile::default()
        };
        assert_eq!(strict.tls(&defaults), TlsVerification::SystemDefaults);
        assert_eq!(Profile::default().tls(&defaults), TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                host: "dnac".into(),
                username: Some("ops".into()),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].host, "dnac");
        assert_eq!(loaded.profiles["default"].username.as_deref(), Some("ops"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }
}
