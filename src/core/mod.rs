// Core algorithm exports
pub mod filters;
pub mod indexer;
pub mod keywords;
pub mod query;
pub mod ranker;
pub mod recommender;
pub mod scoring;
pub mod snapshot;
pub mod tokenizer;

pub use filters::{check_hard_constraints, passes_hard_constraints};
pub use indexer::DestinationIndex;
pub use keywords::{MoodLexicon, NameTier, NameTiers};
pub use query::QueryProcessor;
pub use ranker::{RankError, Ranker};
pub use recommender::{RecommendError, Recommender};
pub use scoring::calculate_relevance;
pub use snapshot::CatalogSnapshot;
