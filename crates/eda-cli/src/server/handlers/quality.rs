//! Quality assessment handlers.

use std::time::Instant;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection, rejection::JsonRejection},
};
use eda::{DatasetMetrics, DatasetReport, MetricFlags, MetricsAssessment, QualityFlags, assess_metrics};
use serde::Serialize;
use tracing::info;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Content types accepted for uploaded CSV files.
const CSV_CONTENT_TYPES: &[&str] = &[
    "text/csv",
    "application/csv",
    "text/plain",
    "application/vnd.ms-excel",
    "application/octet-stream",
];

#[derive(Debug, Serialize)]
pub struct DatasetShape {
    pub n_rows: usize,
    pub n_cols: usize,
}

/// Response of `/quality` and `/quality-from-csv`.
#[derive(Debug, Serialize)]
pub struct QualityResponse {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub message: String,
    pub latency_ms: f64,
    pub flags: MetricFlags,
    pub dataset_shape: DatasetShape,
}

impl QualityResponse {
    fn new(assessment: MetricsAssessment, shape: DatasetShape, started: Instant) -> Self {
        Self {
            ok_for_model: assessment.ok_for_model,
            quality_score: assessment.quality_score,
            message: assessment.message,
            latency_ms: started.elapsed().as_secs_f64() * 1000.0,
            flags: assessment.flags,
            dataset_shape: shape,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QualityFlagsResponse {
    pub flags: QualityFlags,
}

/// POST /quality
pub async fn quality(
    State(state): State<AppState>,
    body: Result<Json<DatasetMetrics>, JsonRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
    let started = Instant::now();
    let Json(metrics) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let config = state.config();
    let assessment = assess_metrics(&metrics, &config.quality, &config.weights)?;

    info!(
        n_rows = metrics.n_rows,
        n_cols = metrics.n_cols,
        score = assessment.quality_score,
        "assessed dataset metrics"
    );

    let shape = DatasetShape {
        n_rows: metrics.n_rows,
        n_cols: metrics.n_cols,
    };
    Ok(Json(QualityResponse::new(assessment, shape, started)))
}

/// POST /quality-from-csv
pub async fn quality_from_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
    let started = Instant::now();
    let report = profile_upload(&state, multipart).await?;

    let assessment = report.assessment(&state.config().quality);
    let shape = DatasetShape {
        n_rows: report.row_count,
        n_cols: report.column_count,
    };
    Ok(Json(QualityResponse::new(assessment, shape, started)))
}

/// POST /quality-flags-from-csv
pub async fn quality_flags_from_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QualityFlagsResponse>, ApiError> {
    let report = profile_upload(&state, multipart).await?;
    Ok(Json(QualityFlagsResponse {
        flags: report.flags,
    }))
}

/// Match the media type only, ignoring parameters such as `charset`.
fn is_csv_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    CSV_CONTENT_TYPES.contains(&media_type.as_str())
}

/// Read the `file` field of a multipart upload and profile it off the
/// async runtime.
async fn profile_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<DatasetReport, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let bytes = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?
            .ok_or_else(|| ApiError::BadRequest("Missing multipart field 'file'".to_string()))?;

        if field.name() != Some("file") {
            continue;
        }
        if let Some(content_type) = field.content_type() {
            if !is_csv_content_type(content_type) {
                return Err(ApiError::BadRequest(format!(
                    "Expected a CSV file, got content type {}",
                    content_type
                )));
            }
        }
        break field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    };

    let size = bytes.len();
    let profiler = state.profiler.clone();
    let report = tokio::task::spawn_blocking(move || profiler.analyze_bytes(&bytes))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!(
        bytes = size,
        rows = report.row_count,
        columns = report.column_count,
        score = report.quality_score,
        "profiled uploaded file"
    );
    Ok(report)
}
