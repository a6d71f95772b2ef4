use async_trait::async_trait;

use super::{Precipitation, TemperatureObservation, TemperatureStats};
use crate::DateRange;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("Stored date '{value}' is not YYYY-MM-DD: {source}")]
    StoredDate {
        value: String,
        #[source]
        source: time::error::Parse,
    },
}

/// Read-only aggregations over the `measurement` and `station` tables.
///
/// Every call is a complete unit of work: implementations hold their data
/// source connection for the duration of the call only.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Precipitation for the 365 days ending at the most recent measurement,
    /// one value per date. Empty when there are no measurements.
    async fn precipitation(&self) -> Result<Precipitation, Error>;

    /// Every station identifier, ascending.
    async fn stations(&self) -> Result<Vec<String>, Error>;

    /// Temperature observations of the station with the most measurements,
    /// over the same window as [`ClimateData::precipitation`]. Ties go to the
    /// lexicographically smallest station id.
    async fn most_active_temperatures(&self) -> Result<Vec<TemperatureObservation>, Error>;

    /// `None` when no measurement falls inside `range`.
    async fn temperature_stats(&self, range: DateRange) -> Result<Option<TemperatureStats>, Error>;
}
