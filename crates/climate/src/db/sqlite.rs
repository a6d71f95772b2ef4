use anyhow::{bail, Context};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    QueryBuilder, Sqlite, SqliteConnection,
};
use std::{str::FromStr, time::Duration};
use time::Date;

use super::{
    ClimateData, Error, Measurement, Precipitation, Station, TemperatureObservation,
    TemperatureStats,
};
use crate::{window_start, DateRange, DATE_FORMAT};

/// [`ClimateData`] backed by a read-only SQLite pool.
#[derive(Clone)]
pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    pub async fn connect(path: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open climate database at {}", path))?;

        let access = Self::from_pool(pool);
        access.verify_schema().await?;
        info!("Climate database opened read-only at: {}", path);

        Ok(access)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that both tables exist and carry the columns the queries read.
    pub async fn verify_schema(&self) -> anyhow::Result<()> {
        let tables = [
            (Measurement::TABLE, Measurement::COLUMNS),
            (Station::TABLE, Station::COLUMNS),
        ];

        for (table, required) in tables {
            let present: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                    .bind(table)
                    .fetch_all(&self.pool)
                    .await
                    .with_context(|| format!("Failed to inspect table `{}`", table))?;

            if present.is_empty() {
                bail!("Climate database has no `{}` table", table);
            }

            let missing: Vec<&str> = required
                .iter()
                .copied()
                .filter(|column| !present.iter().any(|p| p == column))
                .collect();
            if !missing.is_empty() {
                bail!(
                    "Table `{}` is missing column(s): {}",
                    table,
                    missing.join(", ")
                );
            }
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Climate database pool closed");
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, Error> {
        Ok(self.pool.acquire().await?)
    }
}

async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<Date>, Error> {
    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;

    latest
        .map(|value| {
            Date::parse(&value, DATE_FORMAT).map_err(|source| Error::StoredDate { value, source })
        })
        .transpose()
}

/// First date of the trailing window, formatted for comparison against
/// `measurement.date`. `None` when the table is empty.
async fn window_cutoff(conn: &mut SqliteConnection) -> Result<Option<String>, Error> {
    match latest_date(conn).await? {
        Some(latest) => {
            let cutoff = window_start(latest).format(DATE_FORMAT)?;
            debug!("latest measurement {}, window starts {}", latest, cutoff);
            Ok(Some(cutoff))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation(&self) -> Result<Precipitation, Error> {
        let mut conn = self.acquire().await?;

        let Some(cutoff) = window_cutoff(&mut conn).await? else {
            debug!("no measurements, returning empty precipitation");
            return Ok(Precipitation::default());
        };

        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            "SELECT date, prcp FROM measurement
             WHERE date >= ?
             ORDER BY date, rowid",
        )
        .bind(&cutoff)
        .fetch_all(&mut *conn)
        .await?;

        debug!("precipitation rows since {}: {}", cutoff, rows.len());
        Ok(Precipitation::collapse(rows))
    }

    async fn stations(&self) -> Result<Vec<String>, Error> {
        let mut conn = self.acquire().await?;

        let stations: Vec<Station> =
            sqlx::query_as("SELECT station FROM station ORDER BY station")
                .fetch_all(&mut *conn)
                .await?;

        Ok(stations.into_iter().map(|s| s.station).collect())
    }

    async fn most_active_temperatures(&self) -> Result<Vec<TemperatureObservation>, Error> {
        let mut conn = self.acquire().await?;

        let Some(cutoff) = window_cutoff(&mut conn).await? else {
            debug!("no measurements, returning empty temperature observations");
            return Ok(vec![]);
        };

        let most_active: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&mut *conn)
        .await?;

        let Some(station) = most_active else {
            return Ok(vec![]);
        };
        debug!("most active station: {}", station);

        let observations: Vec<TemperatureObservation> = sqlx::query_as(
            "SELECT date, tobs FROM measurement
             WHERE station = ? AND date >= ?
             ORDER BY date, rowid",
        )
        .bind(&station)
        .bind(&cutoff)
        .fetch_all(&mut *conn)
        .await?;

        Ok(observations)
    }

    async fn temperature_stats(&self, range: DateRange) -> Result<Option<TemperatureStats>, Error> {
        let mut conn = self.acquire().await?;

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement WHERE date >= ",
        );
        query.push_bind(range.start.format(DATE_FORMAT)?);
        if let Some(end) = range.end {
            query.push(" AND date <= ");
            query.push_bind(end.format(DATE_FORMAT)?);
        }

        let (min, avg, max): (Option<f64>, Option<f64>, Option<f64>) = query
            .build_query_as()
            .fetch_one(&mut *conn)
            .await?;

        Ok(TemperatureStats::from_aggregates(min, avg, max))
    }
}
