pub mod prelude;

pub mod affiliate_products;
pub mod analytics_entries;
pub mod generated_scripts;
pub mod viral_videos;
