// Analyzer module: aggregates the scoring components of the pipeline.

pub mod competition;
pub mod demographics;
pub mod gaps;
pub mod synthesis;
pub mod traffic;

pub use competition::CompetitionAnalyzer;
pub use demographics::DemographicProfiler;
pub use gaps::GapFinder;
pub use synthesis::RecommendationSynthesizer;
pub use traffic::TrafficEstimator;
