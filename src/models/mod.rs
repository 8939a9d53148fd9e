pub mod analytics;
pub mod product;
pub mod script;
pub mod video;
