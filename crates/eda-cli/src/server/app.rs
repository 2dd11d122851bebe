//! Axum application setup.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Largest accepted request body.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/quality", post(handlers::quality))
        .route("/quality-from-csv", post(handlers::quality_from_csv))
        .route(
            "/quality-flags-from-csv",
            post(handlers::quality_flags_from_csv),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;

    info!(address = %listener.local_addr()?, "server listening");
    println!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const BOUNDARY: &str = "eda-test-boundary";

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(AppState::default())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload(uri: &str, field: &str, content_type: &str, csv: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"data.csv\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {csv}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn zero_heavy_csv() -> String {
        let mut csv = String::from("amount,city\n");
        for i in 0..50 {
            let amount = if i == 0 { 5 } else { 0 };
            csv.push_str(&format!("{},{}\n", amount, ["a", "b"][i % 2]));
        }
        csv
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_quality_from_metrics() {
        let request = json_request(
            "/quality",
            json!({
                "n_rows": 1000,
                "n_cols": 12,
                "max_missing_share": 0.1,
                "numeric_cols": 8,
                "categorical_cols": 4
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok_for_model"], true);
        assert!((body["quality_score"].as_f64().unwrap() - 0.9).abs() < 1e-9);
        assert_eq!(body["flags"]["too_few_rows"], false);
        assert_eq!(body["dataset_shape"], json!({"n_rows": 1000, "n_cols": 12}));
        assert!(body["latency_ms"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_quality_rejects_bad_metrics() {
        let request = json_request(
            "/quality",
            json!({
                "n_rows": 10,
                "n_cols": 2,
                "max_missing_share": 1.5,
                "numeric_cols": 1,
                "categorical_cols": 1
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_quality_rejects_malformed_json() {
        let request = json_request("/quality", json!({"n_rows": -1}));
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_quality_from_csv() {
        let request = upload("/quality-from-csv", "file", "text/csv", &zero_heavy_csv());
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataset_shape"], json!({"n_rows": 50, "n_cols": 2}));
        assert_eq!(body["flags"]["too_few_rows"], true);
        assert_eq!(body["flags"]["no_numeric_columns"], false);
        let score = body["quality_score"].as_f64().unwrap();
        assert!((score - 0.75).abs() < 1e-9);
        assert_eq!(body["ok_for_model"], true);
    }

    #[tokio::test]
    async fn test_quality_flags_from_csv() {
        let request = upload(
            "/quality-flags-from-csv",
            "file",
            "text/csv",
            &zero_heavy_csv(),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let flags = &body["flags"];
        assert_eq!(flags["has_many_zero_values"], true);
        assert_eq!(flags["too_few_rows"], true);
        assert_eq!(flags["has_constant_columns"], false);
        assert_eq!(flags.as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let request = upload("/quality-from-csv", "other", "text/csv", "a\n1\n");
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_upload_with_wrong_content_type() {
        let request = upload("/quality-from-csv", "file", "image/png", "a\n1\n");
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_with_charset_parameter() {
        let request = upload(
            "/quality-flags-from-csv",
            "file",
            "text/csv; charset=utf-8",
            &zero_heavy_csv(),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flags"]["has_many_zero_values"], true);
    }

    #[tokio::test]
    async fn test_upload_header_only_csv() {
        let request = upload("/quality-flags-from-csv", "file", "text/csv", "a,b\n");
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "schema_error");
    }
}
