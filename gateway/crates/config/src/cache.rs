use std::time::Duration;

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: Option<u64>,

    /// The ttl to store cache entries with.  Defaults to 60s
    #[serde(deserialize_with = "duration_str::deserialize_option_duration")]
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    pub fn max_entries(&self) -> u64 {
        self.max_entries.unwrap_or(1000)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl.unwrap_or(Duration::from_secs(60))
    }
}
