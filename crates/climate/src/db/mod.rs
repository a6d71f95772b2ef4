mod climate_data;
mod sqlite;

pub use climate_data::*;
pub use sqlite::*;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One row of the `measurement` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl Measurement {
    pub const TABLE: &'static str = "measurement";
    pub const COLUMNS: &'static [&'static str] = &["station", "date", "prcp", "tobs"];
}

/// The part of a `station` row the API reads. Descriptive columns (name,
/// coordinates, elevation) are left to the table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
}

impl Station {
    pub const TABLE: &'static str = "station";
    pub const COLUMNS: &'static [&'static str] = &["station"];
}

/// Precipitation keyed by measurement date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Precipitation(pub BTreeMap<String, Option<f64>>);

impl Precipitation {
    /// Collapses `(date, prcp)` rows into one value per date. When several
    /// rows share a date the last one wins, nothing is averaged.
    pub fn collapse<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<f64>)>,
    {
        Self(rows.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub min: f64,
    #[serde(rename = "TAVG")]
    pub avg: f64,
    #[serde(rename = "TMAX")]
    pub max: f64,
}

impl TemperatureStats {
    /// `MIN`/`AVG`/`MAX` are all null when no row matched.
    pub fn from_aggregates(min: Option<f64>, avg: Option<f64>, max: Option<f64>) -> Option<Self> {
        match (min, avg, max) {
            (Some(min), Some(avg), Some(max)) => Some(Self { min, avg, max }),
            _ => None,
        }
    }
}
