use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, viral_videos};
use crate::models::video::{NewVideo, VideoRecord, VideoStatus, join_hashtags, split_hashtags};

/// Repository for viral video records
pub struct VideoRepository {
    conn: DatabaseConnection,
}

impl VideoRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_video_model(v: viral_videos::Model) -> VideoRecord {
        VideoRecord {
            id: v.id,
            title: v.title,
            platform: v.platform,
            url: v.url,
            views: v.views,
            engagement_rate: v.engagement_rate,
            relevance_score: v.relevance_score,
            captions: v.captions,
            hashtags: v.hashtags.as_deref().map(split_hashtags).unwrap_or_default(),
            status: VideoStatus::parse(&v.status),
            transcript: v.transcript,
            created_at: v.created_at.unwrap_or_default(),
        }
    }

    pub async fn add(&self, video: &NewVideo) -> Result<i32> {
        let active_model = viral_videos::ActiveModel {
            title: Set(video.title.clone()),
            platform: Set(video.platform.clone()),
            url: Set(video.url.clone()),
            views: Set(video.views),
            engagement_rate: Set(video.engagement_rate),
            relevance_score: Set(video.relevance_score),
            captions: Set(video.captions.clone()),
            hashtags: Set(Some(join_hashtags(&video.hashtags))),
            status: Set(video.status.as_str().to_string()),
            transcript: Set(video.transcript.clone()),
            created_at: Set(Some(super::now_timestamp())),
            ..Default::default()
        };

        let res = ViralVideos::insert(active_model).exec(&self.conn).await?;
        info!("Recorded viral video: {}", video.title);
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<VideoRecord>> {
        let result = ViralVideos::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Self::map_video_model))
    }

    /// Highest relevance first; equal scores keep insertion order.
    pub async fn list(&self) -> Result<Vec<VideoRecord>> {
        let rows = ViralVideos::find()
            .order_by_desc(viral_videos::Column::RelevanceScore)
            .order_by_asc(viral_videos::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_video_model).collect())
    }

    pub async fn latest(&self) -> Result<Option<VideoRecord>> {
        let row = ViralVideos::find()
            .order_by_desc(viral_videos::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_video_model))
    }

    pub async fn update_analysis(&self, id: i32, score: i32, status: VideoStatus) -> Result<bool> {
        let result = ViralVideos::update_many()
            .col_expr(
                viral_videos::Column::RelevanceScore,
                sea_orm::sea_query::Expr::value(score),
            )
            .col_expr(
                viral_videos::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .filter(viral_videos::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = ViralVideos::find().count(&self.conn).await?;
        Ok(count as i64)
    }

    pub async fn clear(&self) -> Result<()> {
        ViralVideos::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
