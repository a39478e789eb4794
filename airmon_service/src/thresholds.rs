/// Threshold table for the air quality precaution service.
///
/// Holds the five tier boundaries for each of the eight monitored channels.
/// This is the single source of truth for boundary values; predicates in
/// `advisory::catalog` look boundaries up here rather than hardcoding them.
///
/// A table is validated once, when it is built, and is immutable afterwards.
/// It is plain data and can be shared freely between threads.

use crate::model::{Channel, ConfigError, Tier, TierBoundaries};

// ---------------------------------------------------------------------------
// Standard boundaries
// ---------------------------------------------------------------------------

/// Standard tier boundaries, in `Channel::ALL` order.
///
/// AQI boundaries follow the US EPA index bands. Concentration boundaries
/// are in µg/m³, except CO which is in ppm.
pub const STANDARD_BOUNDARIES: [TierBoundaries; 8] = [
    // aqi
    TierBoundaries {
        moderate: 51.0,
        unhealthy_sensitive: 101.0,
        unhealthy: 151.0,
        very_unhealthy: 201.0,
        hazardous: 301.0,
    },
    // pm25
    TierBoundaries {
        moderate: 12.1,
        unhealthy_sensitive: 35.5,
        unhealthy: 55.5,
        very_unhealthy: 150.5,
        hazardous: 250.5,
    },
    // pm10
    TierBoundaries {
        moderate: 55.0,
        unhealthy_sensitive: 155.0,
        unhealthy: 255.0,
        very_unhealthy: 355.0,
        hazardous: 425.0,
    },
    // spm
    TierBoundaries {
        moderate: 100.0,
        unhealthy_sensitive: 200.0,
        unhealthy: 300.0,
        very_unhealthy: 400.0,
        hazardous: 500.0,
    },
    // no2
    TierBoundaries {
        moderate: 54.0,
        unhealthy_sensitive: 101.0,
        unhealthy: 361.0,
        very_unhealthy: 650.0,
        hazardous: 1250.0,
    },
    // o3
    TierBoundaries {
        moderate: 55.0,
        unhealthy_sensitive: 71.0,
        unhealthy: 86.0,
        very_unhealthy: 106.0,
        hazardous: 201.0,
    },
    // so2
    TierBoundaries {
        moderate: 36.0,
        unhealthy_sensitive: 76.0,
        unhealthy: 186.0,
        very_unhealthy: 305.0,
        hazardous: 605.0,
    },
    // co
    TierBoundaries {
        moderate: 4.5,
        unhealthy_sensitive: 9.5,
        unhealthy: 12.5,
        very_unhealthy: 15.5,
        hazardous: 30.5,
    },
];

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Validated, immutable boundaries for every channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    boundaries: [TierBoundaries; 8],
}

impl ThresholdTable {
    /// Builds a table from boundaries given in `Channel::ALL` order.
    ///
    /// Fails if any channel has a non-finite boundary or boundaries that are
    /// not strictly ascending.
    pub fn new(boundaries: [TierBoundaries; 8]) -> Result<Self, ConfigError> {
        for channel in Channel::ALL {
            validate_boundaries(channel, &boundaries[channel.index()])?;
        }
        Ok(Self { boundaries })
    }

    /// The built-in table.
    ///
    /// # Panics
    /// Panics if `STANDARD_BOUNDARIES` is malformed. That is a build-time
    /// defect, not bad input, and the service must not start with it.
    pub fn standard() -> Self {
        Self::new(STANDARD_BOUNDARIES)
            .unwrap_or_else(|e| panic!("built-in threshold table is invalid: {}", e))
    }

    /// Returns a new table with `channel` replaced, re-validating the result.
    pub fn with_channel(
        &self,
        channel: Channel,
        boundaries: TierBoundaries,
    ) -> Result<Self, ConfigError> {
        let mut next = self.boundaries;
        next[channel.index()] = boundaries;
        Self::new(next)
    }

    pub fn boundaries_for(&self, channel: Channel) -> &TierBoundaries {
        &self.boundaries[channel.index()]
    }

    /// Shorthand for the `unhealthy_sensitive` boundary, which every
    /// single-pollutant rule uses as its trigger level.
    pub fn sensitive_level(&self, channel: Channel) -> f64 {
        self.boundaries_for(channel).unhealthy_sensitive
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_boundaries(channel: Channel, b: &TierBoundaries) -> Result<(), ConfigError> {
    let levels = b.levels();
    for (tier, value) in levels {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { channel, tier });
        }
    }
    for pair in levels.windows(2) {
        let (lower, lower_value) = pair[0];
        let (upper, upper_value) = pair[1];
        if lower_value >= upper_value {
            return Err(ConfigError::NonAscending { channel, lower, upper });
        }
    }
    Ok(())
}

/// Highest tier whose lower bound is at or below `value`.
///
/// Tiers are half-open and lower-inclusive; a value equal to a boundary
/// belongs to the higher tier. Values below `moderate` and NaN have no tier.
pub fn classify(value: f64, boundaries: &TierBoundaries) -> Option<Tier> {
    boundaries
        .levels()
        .into_iter()
        .rev()
        .find(|(_, lower)| value >= *lower)
        .map(|(tier, _)| tier)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(base: f64) -> TierBoundaries {
        TierBoundaries {
            moderate: base,
            unhealthy_sensitive: base + 1.0,
            unhealthy: base + 2.0,
            very_unhealthy: base + 3.0,
            hazardous: base + 4.0,
        }
    }

    // --- Construction -------------------------------------------------------

    #[test]
    fn test_standard_table_is_valid() {
        assert!(
            ThresholdTable::new(STANDARD_BOUNDARIES).is_ok(),
            "built-in boundaries must pass validation"
        );
    }

    #[test]
    fn test_standard_table_matches_published_aqi_bands() {
        let table = ThresholdTable::standard();
        let aqi = table.boundaries_for(Channel::Aqi);
        assert_eq!(aqi.moderate, 51.0);
        assert_eq!(aqi.unhealthy_sensitive, 101.0);
        assert_eq!(aqi.unhealthy, 151.0);
        assert_eq!(aqi.very_unhealthy, 201.0);
        assert_eq!(aqi.hazardous, 301.0);
        assert_eq!(table.sensitive_level(Channel::Pm25), 35.5);
        assert_eq!(table.sensitive_level(Channel::Spm), 200.0);
    }

    #[test]
    fn test_equal_adjacent_boundaries_are_rejected() {
        let mut boundaries = STANDARD_BOUNDARIES;
        boundaries[Channel::O3.index()].unhealthy = 71.0; // same as unhealthy_sensitive
        let err = ThresholdTable::new(boundaries).expect_err("equal boundaries must fail");
        assert_eq!(
            err,
            ConfigError::NonAscending {
                channel: Channel::O3,
                lower: Tier::UnhealthySensitive,
                upper: Tier::Unhealthy,
            }
        );
    }

    #[test]
    fn test_descending_boundaries_are_rejected() {
        let mut boundaries = STANDARD_BOUNDARIES;
        boundaries[Channel::Co.index()].hazardous = 1.0;
        let result = ThresholdTable::new(boundaries);
        assert!(
            matches!(result, Err(ConfigError::NonAscending { channel: Channel::Co, .. })),
            "hazardous below very_unhealthy should fail, got {:?}",
            result
        );
    }

    #[test]
    fn test_nan_boundary_is_rejected() {
        let mut boundaries = STANDARD_BOUNDARIES;
        boundaries[Channel::So2.index()].moderate = f64::NAN;
        assert_eq!(
            ThresholdTable::new(boundaries),
            Err(ConfigError::NonFinite { channel: Channel::So2, tier: Tier::Moderate })
        );
    }

    #[test]
    fn test_with_channel_replaces_only_that_channel() {
        let table = ThresholdTable::standard()
            .with_channel(Channel::Pm25, ascending(10.0))
            .expect("ascending override should be accepted");
        assert_eq!(table.sensitive_level(Channel::Pm25), 11.0);
        assert_eq!(table.sensitive_level(Channel::Pm10), 155.0);
    }

    #[test]
    fn test_with_channel_rejects_invalid_override() {
        let mut bad = ascending(10.0);
        bad.very_unhealthy = 0.0;
        assert!(ThresholdTable::standard().with_channel(Channel::No2, bad).is_err());
    }

    #[test]
    fn test_table_is_send_and_sync() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<ThresholdTable>();
    }

    // --- Classification -----------------------------------------------------

    #[test]
    fn test_classify_is_lower_inclusive() {
        let aqi = *ThresholdTable::standard().boundaries_for(Channel::Aqi);
        assert_eq!(classify(50.0, &aqi), None);
        assert_eq!(classify(51.0, &aqi), Some(Tier::Moderate));
        assert_eq!(classify(100.9, &aqi), Some(Tier::Moderate));
        assert_eq!(classify(101.0, &aqi), Some(Tier::UnhealthySensitive));
        assert_eq!(classify(151.0, &aqi), Some(Tier::Unhealthy));
        assert_eq!(classify(201.0, &aqi), Some(Tier::VeryUnhealthy));
        assert_eq!(classify(301.0, &aqi), Some(Tier::Hazardous));
        assert_eq!(classify(500.0, &aqi), Some(Tier::Hazardous));
    }

    #[test]
    fn test_classify_nan_has_no_tier() {
        let aqi = *ThresholdTable::standard().boundaries_for(Channel::Aqi);
        assert_eq!(classify(f64::NAN, &aqi), None);
    }
}
