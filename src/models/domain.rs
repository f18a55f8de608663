use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A catalog destination. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: u32,
    pub name: String,
    #[serde(rename = "mood", alias = "moods")]
    pub moods: Vec<String>,
    pub budget_min: u32,
    pub budget_max: u32,
    pub duration_days: u32,
    pub distance_km: f64,
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub best_months: Vec<String>,
}

impl Destination {
    /// Display form of the budget interval, e.g. `"2500-6000"`
    pub fn budget_range(&self) -> String {
        format!("{}-{}", self.budget_min, self.budget_max)
    }

    /// Display form of the trip length, e.g. `"4 days"`
    pub fn duration_label(&self) -> String {
        if self.duration_days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.duration_days)
        }
    }

    pub fn has_mood(&self, tag: &str) -> bool {
        self.moods.iter().any(|m| m.eq_ignore_ascii_case(tag))
    }
}

/// Explicit budget interval requested by the user (`"2000-5000"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

impl BudgetRange {
    /// Build a range, swapping the bounds if they arrive reversed
    pub fn new(a: u32, b: u32) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn span(&self) -> u32 {
        self.max - self.min
    }

    pub fn overlaps(&self, min: u32, max: u32) -> bool {
        min <= self.max && max >= self.min
    }
}

/// Structured constraints parsed from a free-text query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub budget_max: Option<u32>,
    pub budget_range: Option<BudgetRange>,
    pub mood: BTreeSet<String>,
    pub duration_days: Option<u32>,
    pub distance_km: Option<f64>,
    pub best_months: Vec<String>,
    pub free_keywords: Vec<String>,
    pub query_terms: Vec<String>,
}

impl Constraints {
    /// True when no structured constraint was detected.
    ///
    /// Free keywords and query terms are not constraints; they only feed the keyword boost.
    pub fn is_empty(&self) -> bool {
        self.budget_max.is_none()
            && self.budget_range.is_none()
            && self.mood.is_empty()
            && self.duration_days.is_none()
            && self.distance_km.is_none()
            && self.best_months.is_empty()
    }
}

/// Per-factor scores behind a relevance score, each in `0.0..=1.0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub mood: f64,
    pub budget: f64,
    pub duration: f64,
    pub distance: f64,
    pub season: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    pub keyword: f64,
    pub mood: f64,
    pub budget: f64,
    pub duration: f64,
    pub distance: f64,
    pub season: f64,
}

impl RankingWeights {
    pub fn total(&self) -> f64 {
        self.keyword + self.mood + self.budget + self.duration + self.distance + self.season
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            keyword: 0.20,
            mood: 0.40,
            budget: 0.20,
            duration: 0.12,
            distance: 0.08,
            season: 0.0,
        }
    }
}

/// Tunable parameters of the ranker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    pub weights: RankingWeights,
    /// Allowed overshoot of `budget_min` above a budget cap, as a fraction of the cap
    pub budget_tolerance: f64,
    /// Lowest budget-fit score a surviving candidate can receive
    pub budget_floor: f64,
    /// Results scoring below this are dropped, unless that would drop all of them
    pub min_score: f64,
    /// Score used for a factor the query says nothing about
    pub neutral_score: f64,
    /// Day difference at which the duration fit reaches zero
    pub max_duration_diff: u32,
    pub default_top_k: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            budget_tolerance: 0.15,
            budget_floor: 0.25,
            min_score: 0.4,
            neutral_score: 0.5,
            max_duration_diff: 5,
            default_top_k: 5,
        }
    }
}

/// Constants applied when a query uses qualitative wording instead of numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryRules {
    /// Budget cap implied by "cheap", "affordable" and friends
    pub cheap_budget: u32,
    /// Distance cap implied by "near me" / "nearby" without a number
    pub near_me_km: f64,
    pub weekend_days: u32,
    pub week_days: u32,
}

impl Default for QueryRules {
    fn default() -> Self {
        Self {
            cheap_budget: 3500,
            near_me_km: 1000.0,
            weekend_days: 2,
            week_days: 7,
        }
    }
}

/// A candidate that survived filtering, with its position in the ordering
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDestination<'a> {
    pub rank: usize,
    pub destination: &'a Destination,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Hard filter that removed a destination from the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterRejection {
    BudgetRange,
    BudgetCap,
    Distance,
    Mood,
}
