pub mod aggregate;
pub mod engine;
pub mod weighting;
