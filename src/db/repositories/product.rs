use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::entities::{affiliate_products, prelude::*};
use crate::models::product::{AffiliateProduct, NewProduct};

/// Repository for affiliate product records
pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_product_model(p: affiliate_products::Model) -> AffiliateProduct {
        AffiliateProduct {
            id: p.id,
            name: p.name,
            category: p.category,
            commission_rate: p.commission_rate,
            commission_amount: p.commission_amount,
            url: p.url,
            is_recurring: p.is_recurring,
            created_at: p.created_at.unwrap_or_default(),
        }
    }

    pub async fn add(&self, product: &NewProduct) -> Result<i32> {
        let active_model = affiliate_products::ActiveModel {
            name: Set(product.name.clone()),
            category: Set(product.category.clone()),
            commission_rate: Set(product.commission_rate),
            commission_amount: Set(product.commission_amount),
            url: Set(product.url.clone()),
            is_recurring: Set(product.is_recurring),
            created_at: Set(Some(super::now_timestamp())),
            ..Default::default()
        };

        let res = AffiliateProducts::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn list(&self) -> Result<Vec<AffiliateProduct>> {
        let rows = AffiliateProducts::find()
            .order_by_asc(affiliate_products::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_product_model).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = AffiliateProducts::find().count(&self.conn).await?;
        Ok(count as i64)
    }

    pub async fn clear(&self) -> Result<()> {
        AffiliateProducts::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
