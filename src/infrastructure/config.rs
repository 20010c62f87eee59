use crate::domain::feed::BulbPair;
use crate::domain::time_range::TimeRange;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub feed: FeedSettings,
    pub refresh: RefreshSettings,
    pub fleet: FleetSettings,
    pub api: ApiKeySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    pub base_url: String,
    pub channel_id: String,
    pub read_api_key: String,
    pub results: usize,
    pub timeout_secs: u64,
}

impl FeedSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub interval_ms: u64,
    pub default_range: TimeRange,
}

impl RefreshSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FleetSettings {
    pub size: usize,
    #[serde(default)]
    pub out_of_service: Vec<String>,
}

/// Keys accepted by the mock API. Either one grants access; scopes are not enforced.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiKeySettings {
    pub read_key: String,
    pub write_key: String,
}

fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.bind", "0.0.0.0:3000")?
        .set_default("feed.base_url", "https://api.thingspeak.com/channels")?
        .set_default("feed.channel_id", "2923888")?
        .set_default("feed.read_api_key", "")?
        .set_default("feed.results", 50)?
        .set_default("feed.timeout_secs", 10)?
        .set_default("refresh.interval_ms", 20_000)?
        .set_default("refresh.default_range", "day")?
        .set_default("fleet.size", 2)?
        .set_default("fleet.out_of_service", Vec::<String>::new())?
        .set_default("api.read_key", "")?
        .set_default("api.write_key", "")
}

/// Defaults, then `config/dashboard.toml` if present, then `STREETLIGHT__*` variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("STREETLIGHT").separator("__"))
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=BulbPair::ALL.len()).contains(&self.fleet.size),
            "fleet.size must be between 1 and {}, got {}",
            BulbPair::ALL.len(),
            self.fleet.size
        );
        anyhow::ensure!(self.feed.results > 0, "feed.results must be positive");
        anyhow::ensure!(self.refresh.interval_ms > 0, "refresh.interval_ms must be positive");
        anyhow::ensure!(
            !self.api.read_key.is_empty() || !self.api.write_key.is_empty(),
            "at least one of api.read_key / api.write_key must be set"
        );
        Ok(())
    }
}
