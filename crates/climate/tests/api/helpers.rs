use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate::{
    app, AppState, ClimateData, DateRange, Error, Measurement, Precipitation,
    TemperatureObservation, TemperatureStats,
};
use hyper::{header, Method};
use mockall::mock;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

mock! {
    pub ClimateAccess {}
    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn precipitation(&self) -> Result<Precipitation, Error>;
        async fn stations(&self) -> Result<Vec<String>, Error>;
        async fn most_active_temperatures(&self) -> Result<Vec<TemperatureObservation>, Error>;
        async fn temperature_stats(&self, range: DateRange) -> Result<Option<TemperatureStats>, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub fn spawn_app(climate_db: Arc<dyn ClimateData>) -> TestApp {
    TestApp {
        app: app(AppState { climate_db }),
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_slice(&body)
            .unwrap_or_else(|e| panic!("{} returned non-json body: {}", uri, e));
        (status, json)
    }
}

pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}

/// In-memory database shaped like `hawaii.sqlite`. A single connection keeps
/// the memory database alive and makes a leaked connection show up as an
/// acquire timeout on the next request.
pub async fn seeded_pool(stations: &[&str], measurements: &[Measurement]) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory sqlite");

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    for station in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?, ?)")
            .bind(*station)
            .bind(format!("{} station", station))
            .execute(&pool)
            .await
            .unwrap();
    }

    for m in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(&m.station)
            .bind(&m.date)
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool
}

pub async fn spawn_sqlite_app(stations: &[&str], measurements: &[Measurement]) -> (TestApp, SqlitePool) {
    let pool = seeded_pool(stations, measurements).await;
    let access = climate::ClimateAccess::from_pool(pool.clone());
    access
        .verify_schema()
        .await
        .expect("seeded schema should match");
    (spawn_app(Arc::new(access)), pool)
}
