use serde::{Deserialize, Serialize};
use crate::models::domain::{
    Constraints, Destination, FilterRejection, RankedDestination, ScoreBreakdown,
};

/// One ranked destination, with display-ready fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: usize,
    pub id: u32,
    pub name: String,
    pub relevance_score: f64,
    pub moods: Vec<String>,
    pub budget_range: String,
    pub budget_min: u32,
    pub budget_max: u32,
    pub duration_days: u32,
    pub duration: String,
    pub distance_km: f64,
    pub rating: f64,
    pub description: String,
    pub best_months: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

impl From<&RankedDestination<'_>> for Recommendation {
    fn from(ranked: &RankedDestination<'_>) -> Self {
        let d = ranked.destination;
        Self {
            rank: ranked.rank,
            id: d.id,
            name: d.name.clone(),
            relevance_score: round4(ranked.score),
            moods: d.moods.clone(),
            budget_range: d.budget_range(),
            budget_min: d.budget_min,
            budget_max: d.budget_max,
            duration_days: d.duration_days,
            duration: d.duration_label(),
            distance_km: d.distance_km,
            rating: d.rating,
            description: d.description.clone(),
            best_months: d.best_months.clone(),
            breakdown: ranked.breakdown,
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub query: String,
    pub recommendations: Vec<Recommendation>,
    /// Candidates that survived the hard filters, before truncation
    pub total_results: usize,
    pub parsed_constraints: Constraints,
}

/// Catalog entry with display fields, used by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationView {
    pub id: u32,
    pub name: String,
    pub moods: Vec<String>,
    pub budget: String,
    pub budget_min: u32,
    pub budget_max: u32,
    pub duration: String,
    pub duration_days: u32,
    pub distance: String,
    pub distance_km: f64,
    pub rating: f64,
    pub best_months: Vec<String>,
    pub description: String,
}

impl From<&Destination> for DestinationView {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            moods: d.moods.clone(),
            budget: d.budget_range(),
            budget_min: d.budget_min,
            budget_max: d.budget_max,
            duration: d.duration_label(),
            duration_days: d.duration_days,
            distance: format!("{} km", d.distance_km),
            distance_km: d.distance_km,
            rating: d.rating,
            best_months: d.best_months.clone(),
            description: d.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<DestinationView>,
    pub total: usize,
}

/// Score breakdown of one destination against one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub id: u32,
    pub name: String,
    pub relevance_score: f64,
    pub breakdown: ScoreBreakdown,
    /// Hard filter that would exclude this destination, if any
    pub rejected_by: Option<FilterRejection>,
    pub parsed_constraints: Constraints,
}

impl Explanation {
    pub fn new(
        destination: &Destination,
        score: f64,
        breakdown: ScoreBreakdown,
        rejected_by: Option<FilterRejection>,
        parsed_constraints: Constraints,
    ) -> Self {
        Self {
            id: destination.id,
            name: destination.name.clone(),
            relevance_score: round4(score),
            breakdown,
            rejected_by,
            parsed_constraints,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub destinations: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Catalog mutation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogUpdateResponse {
    pub success: bool,
    pub id: u32,
    pub total: usize,
}
