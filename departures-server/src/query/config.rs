//! Query configuration for nearby departure lookups.

use chrono::Duration;

/// Configuration parameters for a nearby departures query.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Maximum great-circle distance from the query point to a stop (meters).
    pub radius_m: f64,

    /// How far ahead of "now" to look for arrivals (minutes).
    pub horizon_mins: i64,

    /// Maximum number of departures listed per stop.
    /// Later departures beyond this are dropped without notice.
    pub max_departures_per_stop: usize,
}

impl QueryConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(radius_m: f64, horizon_mins: i64, max_departures_per_stop: usize) -> Self {
        Self {
            radius_m,
            horizon_mins,
            max_departures_per_stop,
        }
    }

    /// Returns the look-ahead horizon as a Duration.
    pub fn horizon(&self) -> Duration {
        Duration::minutes(self.horizon_mins)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            radius_m: 450.0,
            horizon_mins: 120, // 2 hours
            max_departures_per_stop: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QueryConfig::default();

        assert_eq!(config.radius_m, 450.0);
        assert_eq!(config.horizon_mins, 120);
        assert_eq!(config.max_departures_per_stop, 20);
        assert_eq!(config.horizon(), Duration::hours(2));
    }

    #[test]
    fn custom_config() {
        let config = QueryConfig::new(800.0, 30, 5);

        assert_eq!(config.radius_m, 800.0);
        assert_eq!(config.horizon(), Duration::minutes(30));
        assert_eq!(config.max_departures_per_stop, 5);
    }
}
