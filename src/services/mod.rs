pub mod generator;
pub mod seed;
pub mod stats;

pub use generator::GeneratorService;
pub use seed::SeedService;
pub use stats::StatsService;
