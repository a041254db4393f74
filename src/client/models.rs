//! Permit record models
//!
//! `RawPermit` mirrors one row of the Socrata dataset, where every column may be
//! absent and numeric columns arrive as strings. `PermitRecord` is the typed,
//! immutable record the cache and query engine work with.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status reported for rows without a `statuscurrent` value
const UNKNOWN_STATUS: &str = "Unknown";

/// A single row as returned by the open-data endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPermit {
    #[serde(default, deserialize_with = "lenient_string")]
    pub permitnum: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub statuscurrent: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub applieddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub issueddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub completeddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub permittype: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub permittypemapped: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub permitclass: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub permitclassgroup: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub permitclassmapped: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub workclass: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub workclassgroup: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub workclassmapped: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub applicantname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contractorname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub housingunits: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub estprojectcost: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub totalsqft: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub originaladdress: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub communitycode: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub communityname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub longitude: Option<String>,
}

/// Accept strings, numbers and booleans; anything else (null, objects) is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A normalized building permit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitRecord {
    /// Permit number
    pub permit_num: String,

    /// Current status (open vocabulary, e.g. "Issued Permit")
    pub status: String,

    pub applied_date: Option<DateTime<Utc>>,
    pub issued_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,

    pub permit_type: String,
    pub permit_type_mapped: String,
    pub permit_class: String,
    pub permit_class_group: String,
    pub permit_class_mapped: String,
    pub work_class: String,
    pub work_class_group: String,
    pub work_class_mapped: String,

    pub description: String,
    pub applicant_name: Option<String>,
    pub contractor_name: Option<String>,

    /// Estimated project cost; zero when the source value is missing or not numeric
    pub estimated_cost: f64,

    pub housing_units: u32,
    pub total_sqft: Option<f64>,

    pub address: String,
    pub community_code: String,
    pub community_name: Option<String>,

    pub latitude: f64,
    pub longitude: f64,
}

impl PermitRecord {
    /// Normalize a raw row.
    ///
    /// Returns `None` when latitude or longitude is missing or not a number;
    /// such rows cannot be placed on a map and are never cached.
    pub fn from_raw(raw: RawPermit) -> Option<Self> {
        let latitude = parse_coordinate(raw.latitude.as_deref())?;
        let longitude = parse_coordinate(raw.longitude.as_deref())?;

        Some(Self {
            permit_num: raw.permitnum.unwrap_or_default(),
            status: non_blank(raw.statuscurrent).unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            applied_date: raw.applieddate.as_deref().and_then(parse_timestamp),
            issued_date: raw.issueddate.as_deref().and_then(parse_timestamp),
            completed_date: raw.completeddate.as_deref().and_then(parse_timestamp),
            permit_type: raw.permittype.unwrap_or_default(),
            permit_type_mapped: raw.permittypemapped.unwrap_or_default(),
            permit_class: raw.permitclass.unwrap_or_default(),
            permit_class_group: raw.permitclassgroup.unwrap_or_default(),
            permit_class_mapped: raw.permitclassmapped.unwrap_or_default(),
            work_class: raw.workclass.unwrap_or_default(),
            work_class_group: raw.workclassgroup.unwrap_or_default(),
            work_class_mapped: raw.workclassmapped.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            applicant_name: non_blank(raw.applicantname),
            contractor_name: non_blank(raw.contractorname),
            estimated_cost: parse_cost(raw.estprojectcost.as_deref()),
            housing_units: parse_units(raw.housingunits.as_deref()),
            total_sqft: raw
                .totalsqft
                .as_deref()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite()),
            address: raw.originaladdress.unwrap_or_default(),
            community_code: raw.communitycode.unwrap_or_default(),
            community_name: non_blank(raw.communityname),
            latitude,
            longitude,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient cost parsing: absent, non-numeric or negative input is zero.
pub fn parse_cost(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn parse_units(value: Option<&str>) -> u32 {
    let Some(s) = value.map(str::trim) else {
        return 0;
    };
    s.parse::<u32>()
        .ok()
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u32)
        })
        .unwrap_or(0)
}

/// Parse the timestamp shapes the dataset uses.
///
/// Socrata floating timestamps (`2024-05-01T13:45:00.000`) carry no zone and are
/// read as UTC. Unparsable input is `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
