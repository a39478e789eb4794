//! Conditional health precaution engine for the air quality dashboard.
//!
//! A `ReadingSnapshot` goes in, an ordered `ActiveAdvisorySet` comes out.
//! Fetching readings and rendering advisories both happen outside this crate.
//!
//! ```
//! use airmon_service::alert::{AdvisoryKey, RuleEvaluator};
//! use airmon_service::ingest::parse_snapshot_json;
//!
//! let snapshot = parse_snapshot_json(
//!     r#"{"aqi": {"value": 120, "details": {"pm25": 40, "pm10": 30, "no2": 20, "o3": 20}}}"#,
//! ).unwrap();
//! let active = RuleEvaluator::default().evaluate(&snapshot);
//! assert_eq!(
//!     active.active_keys(),
//!     vec![AdvisoryKey::AqiUnhealthySensitive, AdvisoryKey::Pm25High],
//! );
//! ```

pub mod alert;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod thresholds;
