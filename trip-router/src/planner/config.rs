//! Router configuration.

/// Environment variable overriding [`RouterConfig::walk_speed_kmh`].
pub const ENV_WALK_SPEED: &str = "ROUTER_WALK_SPEED_KMH";
/// Environment variable overriding [`RouterConfig::line_speed_kmh`].
pub const ENV_LINE_SPEED: &str = "ROUTER_LINE_SPEED_KMH";
/// Environment variable overriding [`RouterConfig::max_walk_km`].
pub const ENV_MAX_WALK: &str = "ROUTER_MAX_WALK_KM";
/// Environment variable overriding [`RouterConfig::max_expansions`].
pub const ENV_MAX_EXPANSIONS: &str = "ROUTER_MAX_EXPANSIONS";

/// Error returned when a configuration override cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Parameters of the speed model and search bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Walking speed (km/h).
    pub walk_speed_kmh: f64,

    /// Assumed average line speed (km/h).
    /// Used for ride costs without timetable data and for the heuristic.
    pub line_speed_kmh: f64,

    /// Maximum walking distance to board, alight or transfer (km).
    pub max_walk_km: f64,

    /// Nodes closer than this to the destination end the search (km).
    pub arrival_epsilon_km: f64,

    /// Penalty added to every stop-to-stop ride (minutes).
    pub dwell_mins: f64,

    /// Maximum number of frontier dequeues before giving up.
    pub max_expansions: usize,
}

impl RouterConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        walk_speed_kmh: f64,
        line_speed_kmh: f64,
        max_walk_km: f64,
        arrival_epsilon_km: f64,
        dwell_mins: f64,
        max_expansions: usize,
    ) -> Self {
        Self {
            walk_speed_kmh,
            line_speed_kmh,
            max_walk_km,
            arrival_epsilon_km,
            dwell_mins,
            max_expansions,
        }
    }

    /// Defaults overridden by any `ROUTER_*` environment variables set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_override(&lookup, ENV_WALK_SPEED)? {
            config.walk_speed_kmh = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_LINE_SPEED)? {
            config.line_speed_kmh = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_MAX_WALK)? {
            config.max_walk_km = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_MAX_EXPANSIONS)? {
            config.max_expansions = v;
        }

        Ok(config)
    }

    /// Minutes needed to walk `km`.
    pub fn walk_mins(&self, km: f64) -> f64 {
        km / self.walk_speed_kmh * 60.0
    }

    /// Minutes needed to ride `km` at line speed, excluding dwell.
    pub fn ride_mins(&self, km: f64) -> f64 {
        km / self.line_speed_kmh * 60.0
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            walk_speed_kmh: 5.0,
            line_speed_kmh: 25.0,
            max_walk_km: 0.8,
            arrival_epsilon_km: 0.1,
            dwell_mins: 1.0,
            max_expansions: 2000,
        }
    }
}

fn parse_override<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { key, value: raw }),
    }
}
