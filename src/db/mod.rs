use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::analytics::{AnalyticsEntry, NewAnalyticsEntry};
use crate::models::product::{AffiliateProduct, NewProduct};
use crate::models::script::{GeneratedScript, NewScript, ScriptStatus};
use crate::models::video::{NewVideo, VideoRecord, VideoStatus};

pub mod migrator;
pub mod repositories;

/// Narrow CRUD facade over the four record tables. Identifiers are
/// assigned on insert and immutable afterwards; callers receive value
/// snapshots, never live references into stored state.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn video_repo(&self) -> repositories::video::VideoRepository {
        repositories::video::VideoRepository::new(self.conn.clone())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn script_repo(&self) -> repositories::script::ScriptRepository {
        repositories::script::ScriptRepository::new(self.conn.clone())
    }

    fn analytics_repo(&self) -> repositories::analytics::AnalyticsRepository {
        repositories::analytics::AnalyticsRepository::new(self.conn.clone())
    }

    // ========== Viral Videos ==========

    pub async fn add_video(&self, video: &NewVideo) -> Result<i32> {
        self.video_repo().add(video).await
    }

    pub async fn get_video(&self, id: i32) -> Result<Option<VideoRecord>> {
        self.video_repo().get(id).await
    }

    /// All videos, highest relevance score first (ties in insertion order).
    pub async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        self.video_repo().list().await
    }

    /// Most recently inserted video, regardless of score.
    pub async fn latest_video(&self) -> Result<Option<VideoRecord>> {
        self.video_repo().latest().await
    }

    pub async fn update_video_analysis(
        &self,
        id: i32,
        score: i32,
        status: VideoStatus,
    ) -> Result<bool> {
        self.video_repo().update_analysis(id, score, status).await
    }

    pub async fn video_count(&self) -> Result<i64> {
        self.video_repo().count().await
    }

    // ========== Affiliate Products ==========

    pub async fn add_product(&self, product: &NewProduct) -> Result<i32> {
        self.product_repo().add(product).await
    }

    pub async fn list_products(&self) -> Result<Vec<AffiliateProduct>> {
        self.product_repo().list().await
    }

    pub async fn product_count(&self) -> Result<i64> {
        self.product_repo().count().await
    }

    // ========== Generated Scripts ==========

    pub async fn add_script(&self, script: &NewScript) -> Result<i32> {
        self.script_repo().add(script).await
    }

    pub async fn get_script(&self, id: i32) -> Result<Option<GeneratedScript>> {
        self.script_repo().get(id).await
    }

    /// All scripts, newest first.
    pub async fn list_scripts(&self) -> Result<Vec<GeneratedScript>> {
        self.script_repo().list().await
    }

    pub async fn update_script_status(&self, id: i32, status: ScriptStatus) -> Result<bool> {
        self.script_repo().update_status(id, status).await
    }

    pub async fn script_count(&self) -> Result<i64> {
        self.script_repo().count().await
    }

    // ========== Analytics ==========

    pub async fn add_analytics(&self, entry: &NewAnalyticsEntry) -> Result<i32> {
        self.analytics_repo().add(entry).await
    }

    pub async fn list_analytics(&self) -> Result<Vec<AnalyticsEntry>> {
        self.analytics_repo().list().await
    }

    pub async fn analytics_count(&self) -> Result<i64> {
        self.analytics_repo().count().await
    }

    /// Deletes every row in all four tables. Table by table, no
    /// transaction: an interruption can leave some tables cleared and
    /// others untouched, which callers of reseed accept.
    pub async fn clear_all_records(&self) -> Result<()> {
        self.video_repo().clear().await?;
        self.product_repo().clear().await?;
        self.script_repo().clear().await?;
        self.analytics_repo().clear().await?;
        Ok(())
    }
}
