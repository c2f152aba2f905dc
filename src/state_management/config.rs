use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::utils::CCStr;

use super::{
    event_bus::{publish_event, EventBus},
    theme::Theme,
};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/v1/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 300;
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Directory of JSON files holding the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$DASHBOARD_CONFIG_DIR`, or `admin-dashboard` in the user configuration directory.
    pub fn from_env() -> Self {
        let dir = match std::env::var("DASHBOARD_CONFIG_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let mut dir = dirs_next::config_dir()
                    .or_else(dirs_next::home_dir)
                    .unwrap_or_default();
                dir.push("admin-dashboard");
                dir
            }
        };
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns `Ok(None)` when the file does not exist yet.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(name);
        let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|source| StoreError::Io { path, source })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    /// Role of the person operating the dashboard, gates destructive actions
    pub operator_role: String,
    pub theme: Theme,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            api_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            operator_role: "admin".to_owned(),
            theme: Theme::default(),
        }
    }
}

impl ApplicationConfig {
    /// Overlays the `DASHBOARD_*` variables found through `env` on top of `base`.
    pub fn with_env_overrides(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = env("DASHBOARD_API_URL").filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = env("DASHBOARD_API_TOKEN").filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
        match env("DASHBOARD_HTTP_TIMEOUT").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) => self.request_timeout_secs = secs,
            Some(Err(e)) => log::warn!("Ignoring DASHBOARD_HTTP_TIMEOUT: {e}"),
            None => (),
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), CCStr> {
        check_api_url(&self.api_base_url)?;
        check_timeout(self.request_timeout_secs)?;
        if self.operator_role.trim().is_empty() {
            return Err("The operator role cannot be empty".into());
        }
        Ok(())
    }
}

pub fn check_api_url(url: &str) -> Result<(), CCStr> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err("The API URL must start with http:// or https://".into());
    }
    if url.len() <= "https://".len() {
        return Err("The API URL has no host".into());
    }
    Ok(())
}

pub fn check_timeout(secs: u64) -> Result<(), CCStr> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(
            format!("The request timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds").into(),
        );
    }
    Ok(())
}

pub static APPLICATION_CONFIG: GlobalSignal<ApplicationConfig> =
    Signal::global(ApplicationConfig::default);

/// Event fired when the configuration changed
#[derive(Debug, Clone)]
pub struct ConfigReloadEvent;
impl super::event_bus::EventId for ConfigReloadEvent {
    fn event_id() -> &'static str {
        "config_reload"
    }
}

#[derive(Debug)]
pub enum ConfigCommand {
    GetConfig {
        result: oneshot::Sender<ApplicationConfig>,
    },
    GetStore {
        result: oneshot::Sender<ConfigStore>,
    },
    /// Replace and persist the configuration
    UpdateConfig {
        config: ApplicationConfig,
        result: oneshot::Sender<Result<(), CCStr>>,
    },
}

pub(super) fn use_config_service(event_bus_service: EventBus) -> Coroutine<ConfigCommand> {
    use_coroutine(
        move |mut rx: UnboundedReceiver<ConfigCommand>| async move {
            log::info!("config_service (coroutine) - start");

            let store = ConfigStore::from_env();
            let mut current_config = load_config(&store);
            *APPLICATION_CONFIG.write() = current_config.clone();

            while let Some(cmd) = rx.next().await {
                log::debug!("config_service (coroutine) - Processing command {cmd:?}...");
                match cmd {
                    ConfigCommand::GetConfig { result } => {
                        let _ = result.send(current_config.clone());
                    }
                    ConfigCommand::GetStore { result } => {
                        let _ = result.send(store.clone());
                    }
                    ConfigCommand::UpdateConfig { config, result } => {
                        let outcome = match config.validate() {
                            Ok(()) => store
                                .save(CONFIG_FILE, &config)
                                .map_err(crate::utils::log_error_ccstr),
                            Err(e) => Err(e),
                        };
                        if outcome.is_ok() && config != current_config {
                            current_config = config;
                            *APPLICATION_CONFIG.write() = current_config.clone();
                            publish_event(event_bus_service, ConfigReloadEvent);
                        }
                        let _ = result.send(outcome);
                    }
                }
                log::debug!("config_service (coroutine) - Command processed");
            }
        },
    )
}

fn load_config(store: &ConfigStore) -> ApplicationConfig {
    let from_file = match store.load::<ApplicationConfig>(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Could not load the configuration: {e}");
            None
        }
    };
    from_file
        .unwrap_or_default()
        .with_env_overrides(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn temp_store() -> ConfigStore {
        let mut dir = std::env::temp_dir();
        dir.push(format!("admin-dashboard-test-{}", uuid::Uuid::new_v4()));
        ConfigStore::new(dir)
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("DASHBOARD_API_URL", "https://admin.example.org/api/v1/"),
            ("DASHBOARD_HTTP_TIMEOUT", "30"),
        ]
        .into();
        let file = ApplicationConfig {
            api_token: Some("from-file".to_owned()),
            ..Default::default()
        };
        let config = file.with_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "https://admin.example.org/api/v1/");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.api_token.as_deref(), Some("from-file"));
    }

    #[test]
    fn bad_timeout_variable_is_ignored() {
        let config = ApplicationConfig::default().with_env_overrides(|k| {
            (k == "DASHBOARD_HTTP_TIMEOUT").then(|| "soon".to_owned())
        });
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn validation() {
        assert_eq!(ApplicationConfig::default().validate(), Ok(()));
        let mut config = ApplicationConfig::default();
        config.api_base_url = "ftp://example.org".to_owned();
        assert!(config.validate().is_err());
        config.api_base_url = DEFAULT_API_URL.to_owned();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ApplicationConfig =
            serde_json::from_str(r#"{"api_base_url": "http://10.0.0.2/api/v1/"}"#).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.operator_role, "admin");
    }

    #[test]
    fn store_round_trip() {
        let store = temp_store();
        assert_eq!(store.load::<ApplicationConfig>(CONFIG_FILE).unwrap(), None);

        let config = ApplicationConfig {
            theme: Theme::Light,
            ..Default::default()
        };
        store.save(CONFIG_FILE, &config).unwrap();
        assert_eq!(store.load(CONFIG_FILE).unwrap(), Some(config));

        fs::write(store.dir().join(CONFIG_FILE), "{ not json").unwrap();
        assert!(matches!(
            store.load::<ApplicationConfig>(CONFIG_FILE),
            Err(StoreError::Json { .. })
        ));
        let _ = fs::remove_dir_all(store.dir());
    }
}
