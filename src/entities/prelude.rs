pub use super::affiliate_products::Entity as AffiliateProducts;
pub use super::analytics_entries::Entity as AnalyticsEntries;
pub use super::generated_scripts::Entity as GeneratedScripts;
pub use super::viral_videos::Entity as ViralVideos;
