/// The fixed advisory catalog.
///
/// Each advisory is a plain record plus a predicate function. Declaration
/// order in `ADVISORY_CATALOG` is the order advisories are reported in.

use serde::Serialize;

use crate::model::{Channel, ReadingSnapshot, Tier};
use crate::thresholds::{ThresholdTable, classify};

// ---------------------------------------------------------------------------
// Advisory keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKey {
    AqiModerate,
    AqiUnhealthySensitive,
    AqiUnhealthy,
    AqiVeryUnhealthy,
    AqiHazardous,
    Pm25High,
    Pm10High,
    OzoneHigh,
    No2High,
    So2High,
    MultiplePollutants,
}

impl AdvisoryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            AdvisoryKey::AqiModerate => "aqi_moderate",
            AdvisoryKey::AqiUnhealthySensitive => "aqi_unhealthy_sensitive",
            AdvisoryKey::AqiUnhealthy => "aqi_unhealthy",
            AdvisoryKey::AqiVeryUnhealthy => "aqi_very_unhealthy",
            AdvisoryKey::AqiHazardous => "aqi_hazardous",
            AdvisoryKey::Pm25High => "pm25_high",
            AdvisoryKey::Pm10High => "pm10_high",
            AdvisoryKey::OzoneHigh => "ozone_high",
            AdvisoryKey::No2High => "no2_high",
            AdvisoryKey::So2High => "so2_high",
            AdvisoryKey::MultiplePollutants => "multiple_pollutants",
        }
    }

    /// The AQI tier this key reports, for the five AQI tier advisories.
    pub fn aqi_tier(self) -> Option<Tier> {
        match self {
            AdvisoryKey::AqiModerate => Some(Tier::Moderate),
            AdvisoryKey::AqiUnhealthySensitive => Some(Tier::UnhealthySensitive),
            AdvisoryKey::AqiUnhealthy => Some(Tier::Unhealthy),
            AdvisoryKey::AqiVeryUnhealthy => Some(Tier::VeryUnhealthy),
            AdvisoryKey::AqiHazardous => Some(Tier::Hazardous),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdvisoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdvisoryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ADVISORY_CATALOG
            .iter()
            .map(|a| a.key)
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown advisory '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Advisory definitions
// ---------------------------------------------------------------------------

/// Predicate deciding whether an advisory applies to a snapshot.
pub type Predicate = fn(&ReadingSnapshot, &ThresholdTable) -> bool;

/// A statically declared advisory: display metadata plus its trigger.
#[derive(Debug, Serialize)]
pub struct AdvisoryDefinition {
    pub key: AdvisoryKey,
    pub title: &'static str,
    pub severity_icon: &'static str,
    pub precautions: &'static [&'static str],
    /// Presentation hint, e.g. a CSS class name.
    pub style_tag: &'static str,
    #[serde(skip)]
    pub predicate: Predicate,
}

impl AdvisoryDefinition {
    pub fn applies_to(&self, snapshot: &ReadingSnapshot, table: &ThresholdTable) -> bool {
        (self.predicate)(snapshot, table)
    }
}

/// All advisories, in reporting order.
pub static ADVISORY_CATALOG: &[AdvisoryDefinition] = &[
    AdvisoryDefinition {
        key: AdvisoryKey::AqiModerate,
        title: "Moderate Air Quality Detected",
        severity_icon: "⚠️",
        precautions: &[
            "Sensitive individuals (children, elderly, people with lung/heart disease) should limit prolonged outdoor exertion",
            "Consider wearing a light filtering mask if you have respiratory sensitivities",
            "Reduce outdoor exercise intensity and duration",
            "Keep windows closed during peak pollution hours (10 AM - 4 PM)",
        ],
        style_tag: "precaution-moderate-aqi",
        predicate: aqi_is_moderate,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::AqiUnhealthySensitive,
        title: "Air Quality Unhealthy for Sensitive Groups",
        severity_icon: "🚨",
        precautions: &[
            "People with lung disease, asthma, or heart disease should avoid outdoor activities",
            "Children and elderly should stay indoors",
            "Wear N95 masks when going outside is necessary",
            "Cancel outdoor sports and recreational activities",
            "Use air purifiers with HEPA filters indoors",
        ],
        style_tag: "precaution-unhealthy-sensitive-aqi",
        predicate: aqi_is_unhealthy_sensitive,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::AqiUnhealthy,
        title: "Unhealthy Air Quality - Everyone Affected",
        severity_icon: "🔴",
        precautions: &[
            "Everyone should avoid prolonged or heavy exertion outdoors",
            "All residents should wear protective masks (N95 or equivalent) when outside",
            "Schools should cancel outdoor activities and sports",
            "Close all windows and use air conditioning with recirculation",
            "Avoid driving with windows down or using fans that bring in outside air",
        ],
        style_tag: "precaution-unhealthy-aqi",
        predicate: aqi_is_unhealthy,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::AqiVeryUnhealthy,
        title: "Very Unhealthy Air Quality - Emergency Conditions",
        severity_icon: "☢️",
        precautions: &[
            "Everyone should avoid all outdoor activities",
            "Mandatory N95 or N99 mask use if you must go outside",
            "Seal gaps around doors and windows with tape",
            "Run air purifiers continuously on highest setting",
            "Create a 'clean room' in your home with portable air cleaners",
            "Postpone all non-essential travel and outdoor work",
        ],
        style_tag: "precaution-very-unhealthy-aqi",
        predicate: aqi_is_very_unhealthy,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::AqiHazardous,
        title: "HAZARDOUS AIR QUALITY - HEALTH EMERGENCY",
        severity_icon: "🆘",
        precautions: &[
            "HEALTH EMERGENCY: Avoid all outdoor exposure",
            "Wear P100 respirators if outdoor exposure is unavoidable",
            "Consider evacuation to cleaner areas if possible",
            "Seek immediate medical attention for breathing difficulties",
            "All schools, businesses, and public facilities should close",
            "Emergency services should be on high alert",
        ],
        style_tag: "precaution-hazardous-aqi",
        predicate: aqi_is_hazardous,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::Pm25High,
        title: "High PM2.5 Levels Detected",
        severity_icon: "🫁",
        precautions: &[
            "PM2.5 particles can penetrate deep into lungs and bloodstream",
            "Avoid outdoor cardiovascular exercises like running or cycling",
            "People with asthma should have rescue inhalers readily available",
            "Pregnant women should minimize outdoor exposure",
            "Use N95 masks specifically rated for fine particles",
        ],
        style_tag: "precaution-pm25-high",
        predicate: pm25_is_high,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::Pm10High,
        title: "High Suspended Particulate Matter (PM10/SPM)",
        severity_icon: "💨",
        precautions: &[
            "Coarse particles may irritate eyes, nose, and throat",
            "Wear wraparound sunglasses to protect eyes from particle irritation",
            "Rinse eyes with clean water if experiencing irritation",
            "Avoid areas with visible dust, construction, or unpaved roads",
            "Keep car windows closed and use cabin air filters",
        ],
        style_tag: "precaution-pm10-high",
        predicate: particulates_are_high,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::OzoneHigh,
        title: "High Ground-Level Ozone Alert",
        severity_icon: "☀️",
        precautions: &[
            "Ozone levels are highest during hot, sunny afternoons",
            "Avoid outdoor activities between 10 AM and 4 PM",
            "Ground-level ozone can cause chest pain, coughing, and throat irritation",
            "People with asthma are especially sensitive to ozone",
            "Choose early morning or evening for outdoor activities",
        ],
        style_tag: "precaution-ozone-high",
        predicate: ozone_is_high,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::No2High,
        title: "High Nitrogen Dioxide (NO2) Levels",
        severity_icon: "🚗",
        precautions: &[
            "NO2 mainly comes from vehicle emissions and power plants",
            "Avoid busy roads, highways, and industrial areas",
            "NO2 can trigger asthma attacks and reduce lung function",
            "Choose routes with less traffic when walking or cycling",
            "Avoid outdoor exercise near major roadways",
        ],
        style_tag: "precaution-no2-high",
        predicate: no2_is_high,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::So2High,
        title: "High Sulfur Dioxide (SO2) Alert",
        severity_icon: "🏭",
        precautions: &[
            "SO2 primarily comes from fossil fuel combustion at power plants",
            "People with asthma are extremely sensitive to SO2",
            "Avoid areas downwind from industrial facilities",
            "SO2 can cause breathing problems within minutes of exposure",
            "Keep bronchodilator medications easily accessible",
        ],
        style_tag: "precaution-so2-high",
        predicate: so2_is_high,
    },
    AdvisoryDefinition {
        key: AdvisoryKey::MultiplePollutants,
        title: "Multiple Pollutants at Dangerous Levels",
        severity_icon: "⚡",
        precautions: &[
            "Complex pollution mix creates elevated health risks",
            "Synergistic effects of multiple pollutants increase health impacts",
            "Extra precautions needed - avoid ALL outdoor activities",
            "Consider temporary relocation if conditions persist",
            "Monitor news and health department advisories closely",
        ],
        style_tag: "precaution-multiple-pollutants",
        predicate: multiple_pollutants_elevated,
    },
];

/// Looks up an advisory by key.
pub fn find_advisory(key: AdvisoryKey) -> Option<&'static AdvisoryDefinition> {
    ADVISORY_CATALOG.iter().find(|a| a.key == key)
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Channels counted by the composite rule. SPM is deliberately absent.
pub const COMPOSITE_CHANNELS: [Channel; 4] =
    [Channel::Pm25, Channel::Pm10, Channel::No2, Channel::O3];

/// Number of elevated composite channels needed to fire the composite rule.
pub const COMPOSITE_MIN_ELEVATED: usize = 2;

/// Tier of the snapshot's AQI value, if it has one.
pub fn aqi_tier(snapshot: &ReadingSnapshot, table: &ThresholdTable) -> Option<Tier> {
    snapshot
        .aqi_value()
        .and_then(|v| classify(v, table.boundaries_for(Channel::Aqi)))
}

/// `true` when the detail channel is present and at or above its
/// `unhealthy_sensitive` boundary. Absent channels are never elevated.
pub fn detail_is_elevated(
    snapshot: &ReadingSnapshot,
    table: &ThresholdTable,
    channel: Channel,
) -> bool {
    snapshot
        .detail(channel)
        .is_some_and(|v| v >= table.sensitive_level(channel))
}

/// Suspended particulate value used by the PM10 rule.
///
/// Falls back from the standalone SPM reading to `details.pm10`, then to 0.
/// This is the only place an absent reading is treated as a number.
pub fn derived_spm(snapshot: &ReadingSnapshot) -> f64 {
    snapshot
        .spm_value()
        .or_else(|| snapshot.detail(Channel::Pm10))
        .unwrap_or(0.0)
}

/// How many of `COMPOSITE_CHANNELS` are elevated.
pub fn elevated_pollutant_count(snapshot: &ReadingSnapshot, table: &ThresholdTable) -> usize {
    COMPOSITE_CHANNELS
        .iter()
        .filter(|&&c| detail_is_elevated(snapshot, table, c))
        .count()
}

fn aqi_is_moderate(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    aqi_tier(s, t) == Some(Tier::Moderate)
}

fn aqi_is_unhealthy_sensitive(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    aqi_tier(s, t) == Some(Tier::UnhealthySensitive)
}

fn aqi_is_unhealthy(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    aqi_tier(s, t) == Some(Tier::Unhealthy)
}

fn aqi_is_very_unhealthy(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    aqi_tier(s, t) == Some(Tier::VeryUnhealthy)
}

fn aqi_is_hazardous(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    aqi_tier(s, t) == Some(Tier::Hazardous)
}

fn pm25_is_high(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    detail_is_elevated(s, t, Channel::Pm25)
}

// PM10 and SPM share one advisory: either source over its own boundary fires it.
fn particulates_are_high(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    detail_is_elevated(s, t, Channel::Pm10) || derived_spm(s) >= t.sensitive_level(Channel::Spm)
}

fn ozone_is_high(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    detail_is_elevated(s, t, Channel::O3)
}

fn no2_is_high(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    detail_is_elevated(s, t, Channel::No2)
}

fn so2_is_high(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    detail_is_elevated(s, t, Channel::So2)
}

fn multiple_pollutants_elevated(s: &ReadingSnapshot, t: &ThresholdTable) -> bool {
    elevated_pollutant_count(s, t) >= COMPOSITE_MIN_ELEVATED
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
