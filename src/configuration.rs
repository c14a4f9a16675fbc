use crate::domain::Credential;
use crate::status_page_client::StatusPageClient;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    // Injected at run time through `APP_API__BEARER_TOKEN`
    #[serde(default)]
    pub bearer_token: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    /// Number of collection pages the id fixture walks before giving up.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_try_count: u32,
    /// Page size the API applies when `per_page` is omitted.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_per_page: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_interval_milliseconds: u64,
}

impl ApiSettings {
    pub fn client(&self) -> Result<StatusPageClient, reqwest::Error> {
        StatusPageClient::new(
            self.base_url.clone(),
            self.timeout(),
            self.request_interval(),
        )
    }

    pub fn credential(&self) -> Option<Credential> {
        self.bearer_token.clone().map(Credential::Valid)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn request_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_interval_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_API__BEARER_TOKEN=...` would set `Settings.api.bearer_token`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our conformance runs.
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
