/// Flat dashboard payload decoder.
///
/// The dashboard's `/api/aqi` endpoint returns one flat object. The AQI is a
/// number, but pollutant values are often pre-formatted strings:
///
/// ```json
/// {"aqi": 87, "pm25": "41.2", "pm10": "133.0", "no2": "18.4", "o3": "64.9"}
/// ```
///
/// Each field may be a number, a finite numeric string, `null`, or missing.

use serde::Deserialize;

use crate::model::{AqiReading, PollutantDetails, ReadingSnapshot, SnapshotError, SpmReading};

// ============================================================================
// Payload Structures
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DashboardPayload {
    aqi: Option<LenientNumber>,
    pm25: Option<LenientNumber>,
    pm10: Option<LenientNumber>,
    no2: Option<LenientNumber>,
    o3: Option<LenientNumber>,
    so2: Option<LenientNumber>,
    co: Option<LenientNumber>,
    spm: Option<LenientNumber>,
    #[serde(alias = "timestamp")]
    observed_at: Option<String>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a flat dashboard payload into a snapshot.
///
/// `details` is only populated when at least one pollutant field is present,
/// so a payload carrying just an AQI leaves `details` as `None`.
pub fn parse_dashboard_payload(json: &str) -> Result<ReadingSnapshot, SnapshotError> {
    let payload: DashboardPayload =
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))?;

    let details = PollutantDetails {
        pm25: to_number("pm25", payload.pm25)?,
        pm10: to_number("pm10", payload.pm10)?,
        no2: to_number("no2", payload.no2)?,
        o3: to_number("o3", payload.o3)?,
        so2: to_number("so2", payload.so2)?,
        co: to_number("co", payload.co)?,
    };
    let has_details = details != PollutantDetails::default();

    let aqi_value = to_number("aqi", payload.aqi)?;
    let aqi = if aqi_value.is_some() || has_details {
        Some(AqiReading {
            value: aqi_value,
            details: has_details.then_some(details),
        })
    } else {
        None
    };

    let spm = to_number("spm", payload.spm)?.map(|v| SpmReading { value: Some(v) });

    Ok(ReadingSnapshot {
        aqi,
        spm,
        observed_at: payload.observed_at,
    })
}

fn to_number(field: &str, raw: Option<LenientNumber>) -> Result<Option<f64>, SnapshotError> {
    match raw {
        None => Ok(None),
        Some(LenientNumber::Number(v)) => Ok(Some(v)),
        // `str::parse` accepts "inf" and "NaN"; only finite readings count.
        Some(LenientNumber::Text(text)) => match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(SnapshotError::InvalidNumber {
                field: field.to_string(),
                raw: text,
            }),
        },
    }
}
