use trendarr::config::Config;
use trendarr::db::Store;
use trendarr::models::script::{NewScript, ScriptStatus};
use trendarr::models::video::{NewVideo, VideoStatus};
use trendarr::services::seed::SAMPLE_VIDEO_COUNT;
use trendarr::services::{SeedService, StatsService};

// Single connection: an in-memory SQLite database is per-connection.
async fn memory_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

fn video(title: &str, score: i32) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        platform: "TikTok".to_string(),
        url: format!("https://tiktok.com/{title}"),
        views: 100,
        engagement_rate: 5.0,
        relevance_score: score,
        captions: None,
        hashtags: vec!["#test".to_string()],
        status: VideoStatus::Discovered,
        transcript: None,
    }
}

fn script(title: &str) -> NewScript {
    NewScript {
        title: title.to_string(),
        content: "🎯 Hook: something compelling".to_string(),
        content_type: "AI Tools".to_string(),
        video_length: "60 seconds".to_string(),
        target_audience: "Entrepreneurs".to_string(),
        template_type: "tips-tricks".to_string(),
        ai_generated: true,
        status: ScriptStatus::Generated,
    }
}

#[tokio::test]
async fn test_reseed_populates_videos_by_descending_relevance() {
    let store = memory_store().await;
    let config = Config::default();

    SeedService::new(store.clone())
        .reseed(&config.products)
        .await
        .unwrap();

    let videos = store.list_videos().await.unwrap();
    assert_eq!(videos.len(), SAMPLE_VIDEO_COUNT);

    for pair in videos.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
}

#[tokio::test]
async fn test_reseed_is_repeatable() {
    let store = memory_store().await;
    let config = Config::default();
    let seeder = SeedService::new(store.clone());

    seeder.reseed(&config.products).await.unwrap();
    seeder.reseed(&config.products).await.unwrap();

    assert_eq!(
        store.video_count().await.unwrap(),
        SAMPLE_VIDEO_COUNT as i64
    );
    assert_eq!(
        store.product_count().await.unwrap(),
        config.products.len() as i64
    );
}

#[tokio::test]
async fn test_scripts_list_newest_first() {
    let store = memory_store().await;

    for i in 1..=4 {
        store.add_script(&script(&format!("Script {i}"))).await.unwrap();
    }

    let scripts = store.list_scripts().await.unwrap();
    assert_eq!(scripts.len(), 4);

    let titles: Vec<&str> = scripts.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Script 4", "Script 3", "Script 2", "Script 1"]);
}

#[tokio::test]
async fn test_video_ties_keep_insertion_order() {
    let store = memory_store().await;

    store.add_video(&video("first", 90)).await.unwrap();
    store.add_video(&video("second", 90)).await.unwrap();
    store.add_video(&video("third", 95)).await.unwrap();

    let videos = store.list_videos().await.unwrap();
    let titles: Vec<&str> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "first", "second"]);
}

#[tokio::test]
async fn test_identifiers_are_assigned_and_distinct() {
    let store = memory_store().await;

    let a = store.add_video(&video("a", 10)).await.unwrap();
    let b = store.add_video(&video("b", 10)).await.unwrap();
    assert_ne!(a, b);

    let stored = store.get_video(a).await.unwrap().unwrap();
    assert_eq!(stored.id, a);
    assert_eq!(stored.title, "a");
}

#[tokio::test]
async fn test_script_status_promotion() {
    let store = memory_store().await;

    let id = store.add_script(&script("Promote me")).await.unwrap();
    assert!(
        store
            .update_script_status(id, ScriptStatus::Approved)
            .await
            .unwrap()
    );

    let stored = store.get_script(id).await.unwrap().unwrap();
    assert_eq!(stored.status, ScriptStatus::Approved);

    // Unknown id is reported, not a fault
    assert!(
        !store
            .update_script_status(9999, ScriptStatus::Approved)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_returned_records_are_snapshots() {
    let store = memory_store().await;
    store.add_video(&video("snapshot", 50)).await.unwrap();

    let mut copy = store.list_videos().await.unwrap();
    copy[0].title = "mutated".to_string();
    copy[0].hashtags.push("#extra".to_string());

    let again = store.list_videos().await.unwrap();
    assert_eq!(again[0].title, "snapshot");
    assert_eq!(again[0].hashtags, vec!["#test".to_string()]);
}

#[tokio::test]
async fn test_dashboard_stats_on_empty_store() {
    let store = memory_store().await;
    let stats = StatsService::new(store, Config::default().products);

    let dashboard = stats.dashboard_stats().await.unwrap();
    assert_eq!(dashboard.total_views, 0);
    assert_eq!(dashboard.avg_engagement, 0.0);
    assert_eq!(dashboard.viral_videos_found, 0);
}

#[tokio::test]
async fn test_products_passthrough_matches_config_regardless_of_store() {
    let store = memory_store().await;
    let config = Config::default();

    let stats = StatsService::new(store.clone(), config.products.clone());
    let before: Vec<String> = stats
        .affiliate_products()
        .iter()
        .map(|p| p.name.clone())
        .collect();

    SeedService::new(store.clone())
        .reseed(&config.products)
        .await
        .unwrap();
    store.clear_all_records().await.unwrap();

    let after: Vec<String> = stats
        .affiliate_products()
        .iter()
        .map(|p| p.name.clone())
        .collect();

    assert_eq!(before, after);
    assert_eq!(before.len(), config.products.len());
}

#[tokio::test]
async fn test_out_of_range_values_are_accepted_as_is() {
    let store = memory_store().await;

    let mut bad = video("out of range", 250);
    bad.views = -5;
    bad.engagement_rate = 150.0;

    let id = store.add_video(&bad).await.unwrap();
    let stored = store.get_video(id).await.unwrap().unwrap();

    assert_eq!(stored.relevance_score, 250);
    assert_eq!(stored.views, -5);
    assert_eq!(stored.engagement_rate, 150.0);
}
