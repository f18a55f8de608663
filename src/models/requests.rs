use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Request to get recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1, max = 500))]
    pub query: String,
    /// Anything that is not a positive integer falls back to the configured default
    #[serde(default, alias = "topK", deserialize_with = "lenient_top_k")]
    pub top_k: Option<i64>,
}

/// Accept `5`, `"5"` or garbage; garbage becomes `None`.
fn lenient_top_k<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Query string of the explain endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainParams {
    #[serde(default)]
    pub query: String,
}

/// Request to add a destination to the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddDestinationRequest {
    pub id: Option<u32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "mood", alias = "moods")]
    #[validate(length(min = 1))]
    pub moods: Vec<String>,
    pub budget_min: u32,
    pub budget_max: u32,
    #[validate(range(min = 1))]
    pub duration_days: u32,
    #[validate(range(min = 0.0))]
    pub distance_km: f64,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub best_months: Vec<String>,
}
