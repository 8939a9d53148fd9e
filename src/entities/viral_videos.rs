use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "viral_videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub platform: String,
    pub url: String,
    pub views: i64,
    pub engagement_rate: f64,
    pub relevance_score: i32,
    pub captions: Option<String>,
    /// Space-joined hashtag list.
    pub hashtags: Option<String>,
    pub status: String,
    pub transcript: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
