use std::net::SocketAddr;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use farmconnect_sensors::{routes, AnalysisService, MemoryTree};

#[derive(Debug, Deserialize)]
struct Reading {
    id: String,
    user_id: String,
    sensor_type: String,
    value: f64,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Analysis {
    status: String,
    deviation_percent: f64,
    interpretation: String,
    possible_causes: Vec<String>,
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Report {
    id: String,
    user_id: String,
    reading: Reading,
    analysis: Analysis,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Submitted {
    reading: Reading,
    report: Report,
}

/// Serve the full router on an ephemeral port backed by an in-memory tree.
async fn spawn_app() -> Result<String> {
    // ---
    let app = routes::router(AnalysisService::new(MemoryTree::new()));
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", addr))
}

async fn submit(client: &Client, base: &str, user: &str, body: serde_json::Value) -> Result<Submitted> {
    // ---
    let response = client
        .post(format!("{}/users/{}/readings", base, user))
        .json(&body)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(response.json().await?)
}

#[tokio::test]
async fn submit_reading_returns_analyzed_report() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let submitted = submit(
        &client,
        &base,
        "farmer-1",
        json!({"sensor_type": "soil_moisture", "value": 10, "notes": "east plot"}),
    )
    .await?;

    let report = &submitted.report;
    assert_eq!(report.reading.id, submitted.reading.id);
    assert_eq!(report.user_id, "farmer-1");
    assert_eq!(report.reading.user_id, "farmer-1");
    assert_eq!(report.reading.sensor_type, "soil_moisture");
    assert_eq!(report.reading.value, 10.0);
    assert_eq!(report.reading.notes.as_deref(), Some("east plot"));

    assert_eq!(report.analysis.status, "critical");
    assert_eq!(report.analysis.deviation_percent, 50.0);
    assert!(report.analysis.interpretation.contains("too low"));
    assert!(!report.analysis.possible_causes.is_empty());
    assert!(report
        .analysis
        .recommendations
        .iter()
        .any(|r| r.contains("irrigation")));

    // The report can be resolved from its id alone
    let fetched: Report = client
        .get(format!("{}/reports/{}", base, report.id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched.id, report.id);
    assert_eq!(fetched.created_at, report.created_at);

    Ok(())
}

#[tokio::test]
async fn reports_listed_newest_first() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    for value in [6.2, 8.0, 4.0] {
        submit(
            &client,
            &base,
            "farmer-2",
            json!({"sensor_type": "soil_ph", "value": value}),
        )
        .await?;
    }

    let reports: Vec<Report> = client
        .get(format!("{}/users/farmer-2/reports?limit=2", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(reports.len(), 2);
    assert!(reports[0].created_at >= reports[1].created_at);

    let empty: Vec<Report> = client
        .get(format!("{}/users/nobody/reports", base))
        .send()
        .await?
        .json()
        .await?;
    assert!(empty.is_empty());

    Ok(())
}

#[tokio::test]
async fn readings_filtered_by_sensor_type() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    submit(&client, &base, "farmer-3", json!({"sensor_type": "soil_ph", "value": 6.0})).await?;
    submit(&client, &base, "farmer-3", json!({"sensor_type": "rainfall", "value": 12})).await?;

    let readings: Vec<Reading> = client
        .get(format!("{}/users/farmer-3/readings?sensor_type=rainfall", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].sensor_type, "rainfall");

    Ok(())
}

#[tokio::test]
async fn error_statuses() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let response = client
        .post(format!("{}/users/farmer-4/readings", base))
        .json(&json!({"sensor_type": "soil_salinity", "value": 1}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .get(format!("{}/reports/{}", base, uuid::Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let health: serde_json::Value = client
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["sensor_types"], 11);

    let sensors: Vec<serde_json::Value> = client
        .get(format!("{}/sensors", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(sensors.len(), 11);
    assert_eq!(sensors[0]["sensor_type"], "soil_moisture");

    Ok(())
}
