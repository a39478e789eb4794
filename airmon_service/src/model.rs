/// Core data types for the air quality precaution service.
///
/// This module defines the shared domain model imported by all other modules:
/// pollutant channels, tier boundaries, reading snapshots and error types.
/// It contains no I/O and no evaluation logic.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// One pollutant or indicator dimension, tracked with its own tier boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Aqi,
    Pm25,
    Pm10,
    Spm,
    No2,
    O3,
    So2,
    Co,
}

impl Channel {
    /// All channels, in threshold-table order.
    pub const ALL: [Channel; 8] = [
        Channel::Aqi,
        Channel::Pm25,
        Channel::Pm10,
        Channel::Spm,
        Channel::No2,
        Channel::O3,
        Channel::So2,
        Channel::Co,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Aqi => "aqi",
            Channel::Pm25 => "pm25",
            Channel::Pm10 => "pm10",
            Channel::Spm => "spm",
            Channel::No2 => "no2",
            Channel::O3 => "o3",
            Channel::So2 => "so2",
            Channel::Co => "co",
        }
    }

    /// Position of this channel in `Channel::ALL`.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown channel '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Tier types
// ---------------------------------------------------------------------------

/// Severity tiers, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Moderate,
        Tier::UnhealthySensitive,
        Tier::Unhealthy,
        Tier::VeryUnhealthy,
        Tier::Hazardous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Moderate => "moderate",
            Tier::UnhealthySensitive => "unhealthy_sensitive",
            Tier::Unhealthy => "unhealthy",
            Tier::VeryUnhealthy => "very_unhealthy",
            Tier::Hazardous => "hazardous",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds of the five severity tiers for one channel.
///
/// Levels in ascending order:
///   moderate < unhealthy_sensitive < unhealthy < very_unhealthy < hazardous
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierBoundaries {
    pub moderate: f64,
    pub unhealthy_sensitive: f64,
    pub unhealthy: f64,
    pub very_unhealthy: f64,
    pub hazardous: f64,
}

impl TierBoundaries {
    /// Lower bound of `tier`.
    pub fn lower_bound(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Moderate => self.moderate,
            Tier::UnhealthySensitive => self.unhealthy_sensitive,
            Tier::Unhealthy => self.unhealthy,
            Tier::VeryUnhealthy => self.very_unhealthy,
            Tier::Hazardous => self.hazardous,
        }
    }

    /// Boundaries as `(tier, lower_bound)` pairs, lowest tier first.
    pub fn levels(&self) -> [(Tier, f64); 5] {
        Tier::ALL.map(|t| (t, self.lower_bound(t)))
    }
}

// ---------------------------------------------------------------------------
// Reading snapshot
// ---------------------------------------------------------------------------

/// A point-in-time set of observations supplied by the data source.
///
/// Every field is optional. A missing channel means "unknown", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingSnapshot {
    pub aqi: Option<AqiReading>,
    pub spm: Option<SpmReading>,
    /// RFC 3339 time the readings were taken. Only used for freshness checks.
    pub observed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AqiReading {
    pub value: Option<f64>,
    pub details: Option<PollutantDetails>,
}

/// Per-pollutant concentrations reported alongside the AQI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutantDetails {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
}

/// Standalone suspended particulate matter reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpmReading {
    pub value: Option<f64>,
}

impl ReadingSnapshot {
    pub fn aqi_value(&self) -> Option<f64> {
        self.aqi.as_ref().and_then(|a| a.value)
    }

    pub fn details(&self) -> Option<&PollutantDetails> {
        self.aqi.as_ref().and_then(|a| a.details.as_ref())
    }

    /// Concentration for a detail channel. `Aqi` and `Spm` are not detail
    /// channels and always return `None`.
    pub fn detail(&self, channel: Channel) -> Option<f64> {
        let d = self.details()?;
        match channel {
            Channel::Pm25 => d.pm25,
            Channel::Pm10 => d.pm10,
            Channel::No2 => d.no2,
            Channel::O3 => d.o3,
            Channel::So2 => d.so2,
            Channel::Co => d.co,
            Channel::Aqi | Channel::Spm => None,
        }
    }

    pub fn spm_value(&self) -> Option<f64> {
        self.spm.as_ref().and_then(|s| s.value)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while building a threshold table or loading configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Two adjacent boundaries are not strictly ascending.
    NonAscending {
        channel: Channel,
        lower: Tier,
        upper: Tier,
    },
    /// A boundary is NaN or infinite.
    NonFinite { channel: Channel, tier: Tier },
    /// The configuration file could not be read.
    Io(String),
    /// The configuration file is not valid TOML or has an unknown shape.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonAscending { channel, lower, upper } => write!(
                f,
                "Threshold error for {}: {} must be below {}",
                channel, lower, upper
            ),
            ConfigError::NonFinite { channel, tier } => {
                write!(f, "Threshold error for {}: {} is not a finite number", channel, tier)
            }
            ConfigError::Io(msg) => write!(f, "Config read error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while decoding a reading snapshot from an external payload.
#[derive(Debug, PartialEq)]
pub enum SnapshotError {
    /// The payload is not valid JSON or has the wrong shape.
    Parse(String),
    /// A numeric field held a string that is not a number.
    InvalidNumber { field: String, raw: String },
    /// The payload could not be read.
    Io(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SnapshotError::InvalidNumber { field, raw } => {
                write!(f, "Invalid number for {}: '{}'", field, raw)
            }
            SnapshotError::Io(msg) => write!(f, "Read error: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_round_trips_through_name() {
        for channel in Channel::ALL {
            let parsed: Channel = channel.as_str().parse().expect("known channel should parse");
            assert_eq!(parsed, channel);
        }
        assert!("pm1".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_index_matches_all_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i, "{} should sit at index {}", channel, i);
        }
    }

    #[test]
    fn test_detail_lookup_ignores_non_detail_channels() {
        let snapshot = ReadingSnapshot {
            aqi: Some(AqiReading {
                value: Some(80.0),
                details: Some(PollutantDetails {
                    pm25: Some(12.0),
                    ..Default::default()
                }),
            }),
            spm: Some(SpmReading { value: Some(150.0) }),
            observed_at: None,
        };
        assert_eq!(snapshot.detail(Channel::Pm25), Some(12.0));
        assert_eq!(snapshot.detail(Channel::Pm10), None);
        assert_eq!(snapshot.detail(Channel::Aqi), None);
        assert_eq!(snapshot.detail(Channel::Spm), None);
        assert_eq!(snapshot.spm_value(), Some(150.0));
    }

    #[test]
    fn test_empty_snapshot_has_no_values() {
        let snapshot = ReadingSnapshot::default();
        assert_eq!(snapshot.aqi_value(), None);
        assert!(snapshot.details().is_none());
        assert_eq!(snapshot.spm_value(), None);
    }
}
