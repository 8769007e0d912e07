use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tenderboard::error::AppError;
use tenderboard::ingest::{self, Table};
use tenderboard::workflows::blacklist::{self, BlacklistView};
use tenderboard::workflows::rates::{
    self, DatasetKind, DatasetProfile, DateRange, Facet, FilterSelection, RatesReportView,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RatesReportRequest {
    pub(crate) dataset: DatasetKind,
    /// Column name to selected value; omitted columns (or the "All"
    /// sentinel) leave that dropdown unfiltered.
    #[serde(default)]
    pub(crate) filters: HashMap<String, String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) to: Option<NaiveDate>,
    /// Inline CSV payload overriding the configured dataset file, for
    /// ad-hoc what-if reports.
    #[serde(default)]
    pub(crate) inline_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RatesReportResponse {
    pub(crate) data_source: RatesDataSource,
    pub(crate) report: RatesReportView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RatesDataSource {
    Inline,
    File,
}

#[derive(Debug, Serialize)]
pub(crate) struct FacetsResponse {
    pub(crate) dataset: DatasetKind,
    pub(crate) facets: Vec<Facet>,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/rates/report",
            axum::routing::post(rates_report_endpoint),
        )
        .route(
            "/api/v1/rates/facets/:dataset",
            axum::routing::get(facets_endpoint),
        )
        .route("/api/v1/blacklist", axum::routing::get(blacklist_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rates_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RatesReportRequest>,
) -> Result<Json<RatesReportResponse>, AppError> {
    let RatesReportRequest {
        dataset,
        filters,
        from,
        to,
        inline_csv,
    } = payload;

    let profile = DatasetProfile::for_kind(dataset);
    let (table, data_source): (Arc<Table>, _) = match inline_csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            (Arc::new(ingest::read_csv_table(reader)?), RatesDataSource::Inline)
        }
        None => {
            let path = dataset_path(&state, dataset);
            (state.datasets.load(&path)?, RatesDataSource::File)
        }
    };

    let selection = FilterSelection {
        categorical: filters,
        date_range: match (from, to) {
            (Some(from), Some(to)) => Some(DateRange { from, to }),
            _ => None,
        },
    };

    let report = rates::build_report(
        &table,
        profile,
        &selection,
        &state.config.data.own_company,
    )?;

    Ok(Json(RatesReportResponse {
        data_source,
        report,
    }))
}

pub(crate) async fn facets_endpoint(
    Extension(state): Extension<AppState>,
    Path(dataset): Path<DatasetKind>,
) -> Result<Json<FacetsResponse>, AppError> {
    let profile = DatasetProfile::for_kind(dataset);
    let table = state.datasets.load(&dataset_path(&state, dataset))?;
    let facets = rates::facets(&table, profile)?;

    Ok(Json(FacetsResponse { dataset, facets }))
}

pub(crate) async fn blacklist_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<BlacklistView>, AppError> {
    let view = blacklist::load_view(&state.config.data.blacklist_path)?;
    Ok(Json(view))
}

fn dataset_path(state: &AppState, dataset: DatasetKind) -> PathBuf {
    match dataset {
        DatasetKind::Railways => state.config.data.railways_path.clone(),
        DatasetKind::Accounts => state.config.data.accounts_path.clone(),
    }
}
