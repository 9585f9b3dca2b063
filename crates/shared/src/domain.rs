use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dataset row: a (location, date) pair with its public-health metrics.
///
/// Numeric columns are sparse in the source data, so every metric is
/// optional. The continent field is guaranteed non-empty for any observation
/// that survives loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub location: String,
    pub continent: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cases: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_deaths: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cases_per_million: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_cases_per_million: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stringency_index: Option<f64>,
}
