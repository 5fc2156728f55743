//! Integration tests for the research dashboard server
//!
//! These tests verify end-to-end functionality including:
//! - Page rendering from a CSV on disk
//! - JSON snapshot and chart endpoints
//! - The card animation stream
//! - Failure behavior when the metrics file is unusable

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use research_dash::cli::{router, AppState, Config};
use research_dash::{DashboardSnapshot, MetricValue};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

const SAMPLE_CSV: &str = "Category,Publications,Citations,h-index\nCSE,100,500,20.0\nECE,50,300,15.0\n";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn app_for(path: &Path) -> axum::Router {
    let mut config = Config::default();
    config.data.path = path.to_path_buf();
    config.animation.tick_ms = 0;
    router(Arc::new(AppState::new(config)))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

mod page_tests {
    use super::*;

    #[tokio::test]
    async fn test_index_renders_page() {
        let csv = write_csv(SAMPLE_CSV);
        let (status, body) = get(app_for(csv.path()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Research Dashboard | NIT Jalandhar"));
        assert!(body.contains(r#"id="card-value-4""#));
        assert!(body.contains("\"CSE\""));
        assert!(body.contains("Developed for Data Visualization Course Project"));
    }

    #[tokio::test]
    async fn test_missing_csv_renders_nothing() {
        let (status, body) = get(app_for(Path::new("missing/h-index.csv")), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("<html"));
        assert!(!body.contains("chart-bar"));

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["type"], "data_unavailable");
    }

    #[tokio::test]
    async fn test_missing_column_renders_nothing() {
        let csv = write_csv("Category,Publications,h-index\nCSE,100,20.0\n");
        let (status, body) = get(app_for(csv.path()), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["type"], "data_malformed");
    }

    #[tokio::test]
    async fn test_empty_table_renders_nothing() {
        let csv = write_csv("Category,Publications,Citations,h-index\n");
        let (status, body) = get(app_for(csv.path()), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["type"], "data_empty");
    }

    #[tokio::test]
    async fn test_oversized_totals_render_nothing() {
        let csv = write_csv(
            "Category,Publications,Citations,h-index\nA,18446744073709551615,1,1.0\nB,1,1,1.0\n",
        );

        for uri in ["/", "/api/dashboard", "/api/metrics/stream"] {
            let (status, body) = get(app_for(csv.path()), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");

            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["error"]["type"], "data_out_of_range", "{uri}");
            assert!(json["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Publications"));
        }
    }
}

mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let csv = write_csv(SAMPLE_CSV);
        let (status, body) = get(app_for(csv.path()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn test_dashboard_snapshot() {
        let csv = write_csv(SAMPLE_CSV);
        let (status, body) = get(app_for(csv.path()), "/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);

        let snapshot: DashboardSnapshot = serde_json::from_str(&body).unwrap();
        assert_eq!(snapshot.metrics[0].value, MetricValue::Integer(150));
        assert_eq!(snapshot.metrics[1].value, MetricValue::Integer(800));
        assert_eq!(snapshot.metrics[2].value, MetricValue::Float(17.5));
        assert_eq!(snapshot.locations.len(), 6);
    }

    #[tokio::test]
    async fn test_table_is_reread_per_request() {
        let mut csv = write_csv(SAMPLE_CSV);
        let app = app_for(csv.path());

        let (_, body) = get(app.clone(), "/api/dashboard").await;
        let first: DashboardSnapshot = serde_json::from_str(&body).unwrap();
        assert_eq!(first.departments.departments.len(), 2);

        writeln!(csv, "ME,10,20,5.0").unwrap();
        csv.flush().unwrap();

        let (_, body) = get(app, "/api/dashboard").await;
        let second: DashboardSnapshot = serde_json::from_str(&body).unwrap();
        assert_eq!(second.departments.departments.len(), 3);
        assert_eq!(second.metrics[0].value, MetricValue::Integer(160));
    }

    #[tokio::test]
    async fn test_charts() {
        let csv = write_csv(SAMPLE_CSV);
        let (status, body) = get(app_for(csv.path()), "/api/charts").await;
        assert_eq!(status, StatusCode::OK);

        let charts: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(charts["bar"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(charts["line"]["data"][0]["x"].as_array().unwrap().len(), 10);
        assert_eq!(charts["donut"]["data"][0]["hole"], 0.4);
        assert_eq!(charts["map"]["data"][0]["lat"].as_array().unwrap().len(), 6);
    }
}

mod stream_tests {
    use super::*;
    use research_dash::CardFrame;

    fn frames(body: &str) -> Vec<CardFrame> {
        body.split("\n\n")
            .filter(|event| event.starts_with("event: frame"))
            .map(|event| {
                let data = event.lines().find_map(|l| l.strip_prefix("data: ")).unwrap();
                serde_json::from_str(data).unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_metrics_stream() {
        let csv = write_csv(SAMPLE_CSV);
        let app = app_for(csv.path());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/metrics/stream")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/event-stream"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.ends_with("event: done\ndata: {}\n\n"));

        let frames = frames(&body);
        let final_display = |card: usize| {
            frames
                .iter()
                .filter(|f| f.card == card)
                .last()
                .map(|f| f.display.clone())
                .unwrap()
        };
        assert_eq!(final_display(0), "150");
        assert_eq!(final_display(1), "800");
        assert_eq!(final_display(2), "17.50");
        assert_eq!(final_display(3), "AI & IoT");
        assert_eq!(final_display(4), "32");

        assert_eq!(frames.iter().filter(|f| f.card == 3).count(), 1);
    }

    #[tokio::test]
    async fn test_stream_fails_before_frames() {
        let (status, body) = get(
            app_for(Path::new("missing/h-index.csv")),
            "/api/metrics/stream",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("event: frame"));
    }
}
