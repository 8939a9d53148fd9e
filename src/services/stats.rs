use anyhow::Result;
use serde::Serialize;

use crate::config::AffiliateProductConfig;
use crate::db::Store;

/// Relevance threshold above which a video counts as a viral find.
const VIRAL_SCORE_CUTOFF: i32 = 85;

/// Dashboard summary derived from the current store contents.
///
/// `monthly_revenue` and `conversion_rate` are constant placeholder
/// figures, not live metrics.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub monthly_revenue: f64,
    pub videos_created: i64,
    pub avg_engagement: f64,
    pub conversion_rate: f64,
    pub total_views: i64,
    pub viral_videos_found: usize,
}

/// Read-only aggregation over the record store. Performs no writes.
#[derive(Clone)]
pub struct StatsService {
    store: Store,
    products: Vec<AffiliateProductConfig>,
}

impl StatsService {
    pub fn new(store: Store, products: Vec<AffiliateProductConfig>) -> Self {
        Self { store, products }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let videos = self.store.list_videos().await?;
        let script_count = self.store.script_count().await?;

        let total_views: i64 = videos.iter().map(|v| v.views).sum();

        let avg_engagement = if videos.is_empty() {
            0.0
        } else {
            let sum: f64 = videos.iter().map(|v| v.engagement_rate).sum();
            let mean = sum / videos.len() as f64;
            (mean * 10.0).round() / 10.0
        };

        let viral_videos_found = videos
            .iter()
            .filter(|v| v.relevance_score > VIRAL_SCORE_CUTOFF)
            .count();

        Ok(DashboardStats {
            monthly_revenue: 5600.0,
            videos_created: script_count,
            avg_engagement,
            conversion_rate: 4.2,
            total_views,
            viral_videos_found,
        })
    }

    /// The configured product list, verbatim. Independent of store state.
    #[must_use]
    pub fn affiliate_products(&self) -> &[AffiliateProductConfig] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::video::NewVideo;

    // Single connection: an in-memory SQLite database is per-connection.
    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1).await.unwrap()
    }

    fn video(views: i64, engagement: f64, score: i32) -> NewVideo {
        NewVideo {
            title: format!("video with score {score}"),
            platform: "TikTok".to_string(),
            url: "https://tiktok.com/sample".to_string(),
            views,
            engagement_rate: engagement,
            relevance_score: score,
            captions: None,
            hashtags: vec![],
            status: crate::models::video::VideoStatus::Discovered,
            transcript: None,
        }
    }

    #[tokio::test]
    async fn test_empty_store_stats_are_zero_without_fault() {
        let store = memory_store().await;
        let stats = StatsService::new(store, Config::default().products);

        let dashboard = stats.dashboard_stats().await.unwrap();
        assert_eq!(dashboard.total_views, 0);
        assert_eq!(dashboard.avg_engagement, 0.0);
        assert_eq!(dashboard.videos_created, 0);
        assert_eq!(dashboard.viral_videos_found, 0);
    }

    #[tokio::test]
    async fn test_stats_aggregate_over_videos() {
        let store = memory_store().await;
        store.add_video(&video(1000, 10.0, 90)).await.unwrap();
        store.add_video(&video(500, 5.0, 85)).await.unwrap();

        let stats = StatsService::new(store, Config::default().products);
        let dashboard = stats.dashboard_stats().await.unwrap();

        assert_eq!(dashboard.total_views, 1500);
        assert_eq!(dashboard.avg_engagement, 7.5);
        // 85 is not strictly greater than the cutoff
        assert_eq!(dashboard.viral_videos_found, 1);
    }

    #[tokio::test]
    async fn test_products_passthrough_ignores_store_state() {
        let store = memory_store().await;
        let products = Config::default().products;
        let expected = products.len();

        let stats = StatsService::new(store.clone(), products);
        assert_eq!(stats.affiliate_products().len(), expected);

        store.add_video(&video(1, 1.0, 1)).await.unwrap();
        assert_eq!(stats.affiliate_products().len(), expected);
    }

    #[tokio::test]
    async fn test_placeholder_figures_are_constant() {
        let store = memory_store().await;
        let stats = StatsService::new(store.clone(), vec![]);

        let before = stats.dashboard_stats().await.unwrap();
        store.add_video(&video(99, 9.0, 99)).await.unwrap();
        let after = stats.dashboard_stats().await.unwrap();

        assert_eq!(before.monthly_revenue, after.monthly_revenue);
        assert_eq!(before.conversion_rate, after.conversion_rate);
    }
}
