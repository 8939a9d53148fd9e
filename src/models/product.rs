use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateProduct {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub url: String,
    pub is_recurring: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub url: String,
    #[serde(default)]
    pub is_recurring: bool,
}

impl From<&crate::config::AffiliateProductConfig> for NewProduct {
    fn from(p: &crate::config::AffiliateProductConfig) -> Self {
        Self {
            name: p.name.clone(),
            category: p.category.clone(),
            commission_rate: p.commission_rate,
            commission_amount: p.commission_amount,
            url: p.url.clone(),
            is_recurring: p.is_recurring,
        }
    }
}
