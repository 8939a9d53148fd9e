use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::entities::{analytics_entries, prelude::*};
use crate::models::analytics::{AnalyticsEntry, NewAnalyticsEntry};

/// Repository for append-only analytics entries
pub struct AnalyticsRepository {
    conn: DatabaseConnection,
}

impl AnalyticsRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_entry_model(a: analytics_entries::Model) -> AnalyticsEntry {
        AnalyticsEntry {
            id: a.id,
            platform: a.platform,
            views: a.views,
            engagement_rate: a.engagement_rate,
            revenue: a.revenue,
            conversion_rate: a.conversion_rate,
            date: a.date.unwrap_or_default(),
        }
    }

    pub async fn add(&self, entry: &NewAnalyticsEntry) -> Result<i32> {
        let active_model = analytics_entries::ActiveModel {
            platform: Set(entry.platform.clone()),
            views: Set(entry.views),
            engagement_rate: Set(entry.engagement_rate),
            revenue: Set(entry.revenue),
            conversion_rate: Set(entry.conversion_rate),
            date: Set(Some(super::now_timestamp())),
            ..Default::default()
        };

        let res = AnalyticsEntries::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn list(&self) -> Result<Vec<AnalyticsEntry>> {
        let rows = AnalyticsEntries::find()
            .order_by_asc(analytics_entries::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_entry_model).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = AnalyticsEntries::find().count(&self.conn).await?;
        Ok(count as i64)
    }

    pub async fn clear(&self) -> Result<()> {
        AnalyticsEntries::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
