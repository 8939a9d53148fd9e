use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{generated_scripts, prelude::*};
use crate::models::script::{GeneratedScript, NewScript, ScriptStatus};

/// Repository for generated script records
pub struct ScriptRepository {
    conn: DatabaseConnection,
}

impl ScriptRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_script_model(s: generated_scripts::Model) -> GeneratedScript {
        GeneratedScript {
            id: s.id,
            title: s.title,
            content: s.content,
            content_type: s.content_type,
            video_length: s.video_length,
            target_audience: s.target_audience,
            template_type: s.template_type,
            ai_generated: s.ai_generated,
            status: ScriptStatus::parse(&s.status),
            created_at: s.created_at.unwrap_or_default(),
        }
    }

    pub async fn add(&self, script: &NewScript) -> Result<i32> {
        let active_model = generated_scripts::ActiveModel {
            title: Set(script.title.clone()),
            content: Set(script.content.clone()),
            content_type: Set(script.content_type.clone()),
            video_length: Set(script.video_length.clone()),
            target_audience: Set(script.target_audience.clone()),
            template_type: Set(script.template_type.clone()),
            ai_generated: Set(script.ai_generated),
            status: Set(script.status.as_str().to_string()),
            created_at: Set(Some(super::now_timestamp())),
            ..Default::default()
        };

        let res = GeneratedScripts::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<GeneratedScript>> {
        let result = GeneratedScripts::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Self::map_script_model))
    }

    /// Newest first; same-second inserts keep reverse insertion order.
    pub async fn list(&self) -> Result<Vec<GeneratedScript>> {
        let rows = GeneratedScripts::find()
            .order_by_desc(generated_scripts::Column::CreatedAt)
            .order_by_desc(generated_scripts::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_script_model).collect())
    }

    pub async fn update_status(&self, id: i32, status: ScriptStatus) -> Result<bool> {
        let result = GeneratedScripts::update_many()
            .col_expr(
                generated_scripts::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .filter(generated_scripts::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = GeneratedScripts::find().count(&self.conn).await?;
        Ok(count as i64)
    }

    pub async fn clear(&self) -> Result<()> {
        GeneratedScripts::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
