use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use trendarr::config::Config;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // In-memory SQLite is per-connection; keep the pool at one.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = trendarr::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    trendarr::api::router(state).await
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn post_json(app: &Router, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    let request = if let Some(json) = body {
        builder = builder.header("Content-Type", "application/json");
        builder
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_dashboard_stats_on_empty_store() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_views"], 0);
    assert_eq!(body["data"]["avg_engagement"], 0.0);
    assert_eq!(body["data"]["viral_videos_found"], 0);
}

#[tokio::test]
async fn test_automation_start_stop_is_idempotent() {
    let app = spawn_app().await;

    let (status, body) = post_json(&app, "/api/automation/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "started");

    let (_, body) = post_json(&app, "/api/automation/start", None).await;
    assert_eq!(body["data"]["status"], "already_running");

    let (_, body) = get_json(&app, "/api/automation/status").await;
    assert_eq!(body["data"]["running"], true);

    let (_, body) = post_json(&app, "/api/automation/stop", None).await;
    assert_eq!(body["data"]["status"], "stopped");

    let (status, body) = post_json(&app, "/api/automation/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "not_running");

    let (_, body) = get_json(&app, "/api/automation/status").await;
    assert_eq!(body["data"]["running"], false);
    assert_eq!(body["data"]["posts_published"], 0);
}

#[tokio::test]
async fn test_seed_then_list_videos() {
    let app = spawn_app().await;

    let (status, _) = post_json(&app, "/api/system/seed", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, "/api/videos").await;
    assert_eq!(status, StatusCode::OK);

    let videos = body["data"].as_array().unwrap();
    assert_eq!(videos.len(), 5);

    let scores: Vec<i64> = videos
        .iter()
        .map(|v| v["relevance_score"].as_i64().unwrap())
        .collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);
}

#[tokio::test]
async fn test_products_are_config_passthrough() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    let before = body["data"].as_array().unwrap().len();
    assert_eq!(before, 6);

    // Product rows in the store do not affect the passthrough
    post_json(&app, "/api/system/seed", None).await;

    let (_, body) = get_json(&app, "/api/products").await;
    assert_eq!(body["data"].as_array().unwrap().len(), before);
    assert_eq!(body["data"][0]["name"], "Systeme.io");
}

#[tokio::test]
async fn test_add_and_list_scripts_newest_first() {
    let app = spawn_app().await;

    for title in ["First script", "Second script"] {
        let (status, _) = post_json(
            &app,
            "/api/scripts",
            Some(serde_json::json!({
                "title": title,
                "content": "🎯 Hook: test content",
                "content_type": "AI Tools",
                "video_length": "60 seconds",
                "target_audience": "Entrepreneurs",
                "template_type": "tips-tricks"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get_json(&app, "/api/scripts").await;
    let scripts = body["data"].as_array().unwrap();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0]["title"], "Second script");
    assert_eq!(scripts[1]["title"], "First script");
}

#[tokio::test]
async fn test_generate_script_without_key_persists_fallback() {
    let app = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/scripts/generate",
        Some(serde_json::json!({
            "content_type": "AI Tools",
            "video_length": "60s",
            "target_audience": "Entrepreneurs",
            "key_message": "automation pays",
            "template_type": "tips-tricks"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ai_generated"], true);
    assert_eq!(body["data"]["status"], "generated");
    assert_eq!(body["data"]["content_type"], "AI Tools");

    let (_, body) = get_json(&app, "/api/scripts").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_generate_script_rejects_missing_fields() {
    let app = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/scripts/generate",
        Some(serde_json::json!({
            "content_type": "",
            "video_length": "60s",
            "target_audience": "Entrepreneurs",
            "key_message": "automation pays",
            "template_type": "tips-tricks"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_add_video_validation_and_analyze_unknown() {
    let app = spawn_app().await;

    let (status, _) = post_json(
        &app,
        "/api/videos",
        Some(serde_json::json!({
            "title": "",
            "platform": "TikTok",
            "url": "https://tiktok.com/x"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/videos/4242/analyze", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_without_key_records_zero_score() {
    let app = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/videos",
        Some(serde_json::json!({
            "title": "Analyze me",
            "platform": "TikTok",
            "url": "https://tiktok.com/x",
            "relevance_score": 70
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = post_json(&app, &format!("/api/videos/{id}/analyze"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["analysis"]["score"], 0);
    assert_eq!(body["data"]["video"]["status"], "processed");
}

#[tokio::test]
async fn test_analytics_append_and_list() {
    let app = spawn_app().await;

    let (status, _) = post_json(
        &app,
        "/api/analytics",
        Some(serde_json::json!({
            "platform": "TikTok",
            "views": 1000,
            "engagement_rate": 8.5,
            "revenue": 120.0,
            "conversion_rate": 3.1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(&app, "/api/analytics").await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["platform"], "TikTok");
}

#[tokio::test]
async fn test_system_status_reports_missing_config() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/system/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["automation_running"], false);

    // The test config carries no credentials, so every collaborator is
    // reported as disabled.
    let missing = body["data"]["missing_config"].as_array().unwrap();
    assert_eq!(missing.len(), 5);
    assert!(missing.contains(&serde_json::json!("OPENAI_API_KEY")));
    assert_eq!(body["data"]["products"], 6);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/system/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = get_json(&app, "/api/system/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
}
