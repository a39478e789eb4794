/// Decoding of reading snapshots from external payloads.
///
/// Fetching readings is the data source's job. This module only turns the
/// JSON it hands over into a `ReadingSnapshot`.
///
/// Submodules:
/// - `dashboard` — the flat `/api/aqi` payload served to the dashboard.

pub mod dashboard;

use crate::model::{ReadingSnapshot, SnapshotError};

/// Payload shapes accepted on the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// `{"aqi": {"value": .., "details": {..}}, "spm": {"value": ..}}`
    #[default]
    Nested,
    /// `{"aqi": .., "pm25": .., "pm10": .., ...}`
    Dashboard,
}

/// Decodes a snapshot already in the nested snapshot shape.
pub fn parse_snapshot_json(json: &str) -> Result<ReadingSnapshot, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))
}

/// Decodes `json` according to `format`.
pub fn decode(format: SnapshotFormat, json: &str) -> Result<ReadingSnapshot, SnapshotError> {
    match format {
        SnapshotFormat::Nested => parse_snapshot_json(json),
        SnapshotFormat::Dashboard => dashboard::parse_dashboard_payload(json),
    }
}
