// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use estate_app::{AssetNumbering, FormPolicy};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::{LOG_LEVELS, normalize_level};

pub const APP_NAME: &str = "estate";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_API_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";
const API_URL_ENV: &str = "ESTATE_API_URL";
const CONFIG_PATH_ENV: &str = "ESTATE_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub forms: Forms,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            forms: Forms::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub username: Option<String>,
    pub require_login: Option<bool>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Some(DEFAULT_API_TIMEOUT.to_owned()),
            username: Some(estate_api::DEFAULT_USERNAME.to_owned()),
            require_login: Some(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forms {
    pub asset_numbering: Option<String>,
    pub reset_form_on_rejection: Option<bool>,
}

impl Default for Forms {
    fn default() -> Self {
        Self {
            asset_numbering: Some(AssetNumbering::Server.as_str().to_owned()),
            reset_form_on_rejection: Some(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [api], [forms], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `estate --print-example-config` for the current schema",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.api.base_url
            && base_url.trim().is_empty()
        {
            bail!(
                "api.base_url in {} must not be empty; remove it to use the default",
                path.display()
            );
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(username) = &self.api.username
            && username.trim().is_empty()
        {
            bail!("api.username in {} must not be empty", path.display());
        }

        if let Some(numbering) = &self.forms.asset_numbering
            && AssetNumbering::parse(numbering).is_none()
        {
            bail!(
                "forms.asset_numbering in {} must be \"server\" or \"client\", got {:?}",
                path.display(),
                numbering
            );
        }

        if let Some(level) = &self.log.level
            && normalize_level(level).is_err()
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join("|"),
                level
            );
        }

        Ok(())
    }

    /// Resolves the API root: command line, then config, then the runtime
    /// environment, then the value baked in at build time.
    pub fn api_base_url(&self, cli_override: Option<&str>) -> String {
        resolve_base_url(
            cli_override,
            self.api.base_url.as_deref(),
            env::var(API_URL_ENV).ok().as_deref(),
            option_env!("ESTATE_API_URL"),
        )
    }

    pub fn api_timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_API_TIMEOUT))
    }

    pub fn api_username(&self) -> &str {
        self.api
            .username
            .as_deref()
            .unwrap_or(estate_api::DEFAULT_USERNAME)
    }

    pub fn require_login(&self) -> bool {
        self.api.require_login.unwrap_or(false)
    }

    pub fn form_policy(&self) -> FormPolicy {
        FormPolicy {
            asset_numbering: self
                .forms
                .asset_numbering
                .as_deref()
                .and_then(AssetNumbering::parse)
                .unwrap_or_default(),
            reset_form_on_rejection: self.forms.reset_form_on_rejection.unwrap_or(false),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log.dir {
            return Ok(PathBuf::from(dir));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].dir in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join("logs"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# estate config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Optional. Falls back to ${} and then {}\n# base_url = \"{}\"\ntimeout = \"{}\"\nusername = \"{}\"\nrequire_login = false\n\n[forms]\n# \"server\" lets the API allocate asset numbers; \"client\" proposes max + 1\nasset_numbering = \"server\"\nreset_form_on_rejection = false\n\n[log]\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/estate/logs)\n# dir = \"/absolute/path/to/logs\"\n",
            path.display(),
            API_URL_ENV,
            DEFAULT_API_BASE_URL,
            DEFAULT_API_BASE_URL,
            DEFAULT_API_TIMEOUT,
            estate_api::DEFAULT_USERNAME,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn resolve_base_url(
    cli_override: Option<&str>,
    configured: Option<&str>,
    runtime_env: Option<&str>,
    build_env: Option<&str>,
) -> String {
    [cli_override, configured, runtime_env, build_env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_owned()
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let Some(secs) = mins.checked_mul(60) else {
            bail!("timeout {raw:?} is too large; use a value under a few hours");
        };
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration, resolve_base_url};
    use anyhow::Result;
    use estate_app::AssetNumbering;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.api_timeout()?, Duration::from_secs(10));
        assert_eq!(config.api_username(), "user");
        assert!(!config.require_login());
        assert_eq!(config.form_policy().asset_numbering, AssetNumbering::Server);
        assert!(!config.form_policy().reset_form_on_rejection);
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[api]\nbase_url=\"http://localhost:8000\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[api], [forms], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[api]\nbase_url = \"http://10.0.0.5:9000/\"\ntimeout = \"500ms\"\nusername = \"admin\"\nrequire_login = true\n[forms]\nasset_numbering = \"client\"\nreset_form_on_rejection = true\n[log]\nlevel = \"debug\"\ndir = \"/tmp/estate-logs\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.api_timeout()?, Duration::from_millis(500));
        assert_eq!(config.api_username(), "admin");
        assert!(config.require_login());
        let policy = config.form_policy();
        assert_eq!(policy.asset_numbering, AssetNumbering::Client);
        assert!(policy.reset_form_on_rejection);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_dir()?, PathBuf::from("/tmp/estate-logs"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() -> Result<()> {
        let cases = [
            ("version = 1\n[api]\ntimeout = \"0s\"\n", "must be positive"),
            ("version = 1\n[api]\nbase_url = \"  \"\n", "must not be empty"),
            (
                "version = 1\n[forms]\nasset_numbering = \"guess\"\n",
                "\"server\" or \"client\"",
            ),
            ("version = 1\n[log]\nlevel = \"loud\"\n", "log.level"),
        ];
        for (content, expected) in cases {
            let (_temp, path) = write_config(content)?;
            let error = Config::load(&path).expect_err("invalid value should fail");
            let message = error.to_string();
            assert!(message.contains(expected), "unexpected message: {message}");
        }
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ESTATE_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ESTATE_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn base_url_precedence_runs_cli_config_env_build_default() {
        assert_eq!(
            resolve_base_url(
                Some("http://cli:1"),
                Some("http://config:2"),
                Some("http://env:3"),
                Some("http://build:4"),
            ),
            "http://cli:1"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://config:2/"), Some("http://env:3"), None),
            "http://config:2"
        );
        assert_eq!(
            resolve_base_url(None, None, Some("http://env:3"), Some("http://build:4")),
            "http://env:3"
        );
        assert_eq!(
            resolve_base_url(None, None, Some(""), Some("http://build:4")),
            "http://build:4"
        );
        assert_eq!(
            resolve_base_url(None, None, None, None),
            "http://127.0.0.1:8000"
        );
    }

    #[test]
    fn api_base_url_reads_runtime_env_when_config_is_silent() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        let config = Config::load(&path)?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ESTATE_API_URL", "http://from-env:8080");
        }
        let resolved = config.api_base_url(None);
        let overridden = config.api_base_url(Some("http://flag:1"));
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ESTATE_API_URL");
        }
        assert_eq!(resolved, "http://from-env:8080");
        assert_eq!(overridden, "http://flag:1");
        Ok(())
    }

    #[test]
    fn timeout_parses_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        assert!(parse_duration("oops").is_err());
        Ok(())
    }

    #[test]
    fn huge_minute_timeout_is_an_error() {
        let error =
            parse_duration("999999999999999999m").expect_err("overflowing minutes should fail");
        assert!(error.to_string().contains("too large"));
    }

    #[test]
    fn log_levels_match_logger_names() -> Result<()> {
        for (level, accepted) in [("warn", true), ("TRACE", true), ("warning", false)] {
            let content = format!("version = 1\n[log]\nlevel = \"{level}\"\n");
            let (_temp, path) = write_config(&content)?;
            assert_eq!(Config::load(&path).is_ok(), accepted, "level {level:?}");
        }
        Ok(())
    }

    #[test]
    fn example_config_parses_and_names_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[api]"));
        assert!(example.contains("[forms]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.form_policy().asset_numbering, AssetNumbering::Server);
        Ok(())
    }
}
