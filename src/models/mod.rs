// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetRange, Constraints, Destination, FilterRejection, QueryRules, RankedDestination,
    RankingConfig, RankingWeights, ScoreBreakdown,
};
pub use requests::{AddDestinationRequest, ExplainParams, RecommendRequest};
pub use responses::{
    CatalogUpdateResponse, DestinationView, DestinationsResponse, ErrorResponse, Explanation,
    HealthResponse, RecommendResponse, Recommendation,
};
