use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_bool_from_anything, deserialize_number_from_string,
};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub session: SessionSettings,
    pub poller: PollerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Every endpoint path is appended to it, ex: `https://whiteboard.example.com/api`
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    /// Sent as a bearer token when set. The backend does not require one by default.
    pub api_token: Option<Secret<String>>,
    pub post_it_write_mode: WriteMode,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// How `POST /postit` is used
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// The post-it id is sent when known, so the backend can replace the stored post-it
    Upsert,
    /// The id is never sent, the backend always assigns a new one
    CreateOnly,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub username: String,
    /// Group the client starts in. Empty until a group is joined.
    #[serde(default)]
    pub group_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub interval_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub poll_swipes: bool,
}

impl PollerSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_milliseconds)
    }
}

/// Extracts the client settings from configuration files and env variables
///
/// `base.yaml` contains the settings shared by all environments.
/// `local.yaml` and `production.yaml` override them, depending on `APP_ENVIRONMENT`
/// (`local` if unset).
///
/// Env variables with a prefix of APP and '__' as separator come next,
/// ex: `APP_BACKEND__TIMEOUT_MILLISECONDS=2000` sets `Settings.backend.timeout_milliseconds`.
///
/// `ENDPOINT_URL` has the last word on `Settings.backend.base_url`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("backend.base_url", std::env::var("ENDPOINT_URL").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for the client.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
