//! Trailhead - travel destination recommendations from free-text queries
//!
//! A query such as "cheap hill trip for a weekend" is parsed into structured constraints, the
//! catalog is filtered through an inverted index, and the survivors are scored and ranked.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    CatalogSnapshot, DestinationIndex, QueryProcessor, Ranker, RecommendError, Recommender,
};
pub use models::{
    Constraints, Destination, RankingConfig, RankingWeights, RecommendResponse, Recommendation,
};
pub use services::{CatalogError, CatalogStore};
