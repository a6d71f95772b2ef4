use crate::{
    db, precipitation, routes, stations, temp_stats_between, temp_stats_from, tobs, welcome,
    ClimateAccess, ClimateData,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::temp_stats_from,
        routes::climate::climate_routes::temp_stats_between,
    ),
    components(
        schemas(
            db::Precipitation,
            db::TemperatureObservation,
            db::TemperatureStats,
            routes::ErrorBody,
        )
    ),
    tags(
        (name = "climate api", description = "a read-only api over station precipitation and temperature measurements")
    )
)]
struct ApiDoc;

/// Opens the read-only database pool. The returned access handle is shared
/// with the router state and kept by the caller so the pool can be closed on
/// shutdown.
pub async fn build_app_state(
    database: &str,
    max_connections: u32,
) -> Result<(AppState, Arc<ClimateAccess>), anyhow::Error> {
    let climate_db = Arc::new(
        ClimateAccess::connect(database, max_connections)
            .await
            .map_err(|e| anyhow!("error setting up climate database: {:#}", e))?,
    );

    let app_state = AppState {
        climate_db: climate_db.clone(),
    };

    Ok((app_state, climate_db))
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(welcome))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temp_stats_from))
        .route("/api/v1.0/{start}/{end}", get(temp_stats_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
