use crate::core::indexer::DestinationIndex;
use crate::core::keywords::{NameTier, NameTiers};
use crate::core::tokenizer::tokenize_text;
use crate::models::{Constraints, Destination, RankingConfig, ScoreBreakdown};

/// Name boost when the destination name carries a query term or a high-priority keyword
pub const HIGH_TIER_BOOST: f64 = 1.0;
/// Name boost for a medium-priority keyword, and the ceiling for description-only matches
pub const MEDIUM_TIER_BOOST: f64 = 0.85;

/// Calculate a relevance score (0-1) for a destination that passed the hard filters
///
/// Scoring formula (default weights):
/// score = (
///     keyword_score * 0.20 +     # query words in the name, tiered keywords, description hits
///     mood_score * 0.40 +        # share of requested moods the destination carries
///     budget_score * 0.20 +      # how well the price band fits the cap or range
///     duration_score * 0.12 +    # closeness to the requested number of days
///     distance_score * 0.08 +    # closer is better, within the requested maximum
///     season_score * 0.00        # requested months among the best months (opt-in)
/// ) / total_weight
pub fn calculate_relevance(
    destination: &Destination,
    constraints: &Constraints,
    index: &DestinationIndex,
    tiers: &NameTiers,
    config: &RankingConfig,
) -> (f64, ScoreBreakdown) {
    let neutral = config.neutral_score;

    let breakdown = ScoreBreakdown {
        keyword: calculate_keyword_score(destination, constraints, index, tiers, neutral),
        mood: calculate_mood_score(destination, constraints),
        budget: calculate_budget_score(destination, constraints, config),
        duration: calculate_duration_score(
            destination.duration_days,
            constraints.duration_days,
            config.max_duration_diff,
            neutral,
        ),
        distance: calculate_distance_score(
            destination.distance_km,
            constraints.distance_km,
            neutral,
        ),
        season: calculate_season_score(destination, constraints, neutral),
    };

    let w = &config.weights;
    let total_weight = w.total();
    if total_weight <= 0.0 {
        return (0.0, breakdown);
    }

    let weighted = breakdown.keyword * w.keyword
        + breakdown.mood * w.mood
        + breakdown.budget * w.budget
        + breakdown.duration * w.duration
        + breakdown.distance * w.distance
        + breakdown.season * w.season;

    (sanitise(weighted / total_weight), breakdown)
}

/// Clamp to `0.0..=1.0`, mapping non-finite values to zero
#[inline]
fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Keyword score (0-1)
///
/// - a query term that is a token of the name: 1.0
/// - any high-priority keyword in the query and any in the name: 1.0
/// - a medium-priority keyword in both query and name: 0.85
/// - free keywords found in the description: neutral raised towards 0.85 by their idf share
/// - otherwise neutral
pub fn calculate_keyword_score(
    destination: &Destination,
    constraints: &Constraints,
    index: &DestinationIndex,
    tiers: &NameTiers,
    neutral: f64,
) -> f64 {
    if constraints.query_terms.is_empty() {
        return neutral;
    }

    let name_tokens = tokenize_text(&destination.name);
    let name_keywords: Vec<(NameTier, &str)> = name_tokens
        .iter()
        .filter_map(|t| tiers.keyword_for(t))
        .collect();

    let mut best = neutral;
    let mut query_mentions_high = false;

    for term in &constraints.query_terms {
        match tiers.keyword_for(term) {
            Some((NameTier::High, _)) => query_mentions_high = true,
            Some((NameTier::Medium, keyword)) => {
                if name_keywords.contains(&(NameTier::Medium, keyword)) {
                    best = best.max(MEDIUM_TIER_BOOST);
                }
            }
            None => {
                if name_tokens.iter().any(|t| t == term) {
                    return HIGH_TIER_BOOST;
                }
            }
        }
    }

    if query_mentions_high && name_keywords.iter().any(|(tier, _)| *tier == NameTier::High) {
        return HIGH_TIER_BOOST;
    }

    let content = description_match_share(destination.id, &constraints.free_keywords, index);
    if content > 0.0 {
        best = best.max(neutral + (MEDIUM_TIER_BOOST - neutral) * content);
    }

    best
}

/// Share of the free keywords' idf mass that hits this destination's indexed text
fn description_match_share(id: u32, keywords: &[String], index: &DestinationIndex) -> f64 {
    let mut hit = 0.0;
    let mut total = 0.0;

    for keyword in keywords {
        let idf = index.idf(keyword);
        if idf <= 0.0 {
            continue;
        }
        total += idf;
        if index.lookup_term(keyword).contains(&id) {
            hit += idf;
        }
    }

    if total > 0.0 {
        hit / total
    } else {
        0.0
    }
}

/// Mood score (0-1): fraction of requested moods present, 1.0 when none requested
#[inline]
pub fn calculate_mood_score(destination: &Destination, constraints: &Constraints) -> f64 {
    if constraints.mood.is_empty() {
        return 1.0;
    }

    let matched = constraints
        .mood
        .iter()
        .filter(|tag| destination.has_mood(tag))
        .count();

    matched as f64 / constraints.mood.len() as f64
}

/// Budget score (0-1)
///
/// With a cap, anything starting at or under it fits fully and the score falls linearly to
/// the floor across the tolerance band. With a range, containment either way fits fully and
/// partial overlap scores by its share of the requested span.
pub fn calculate_budget_score(
    destination: &Destination,
    constraints: &Constraints,
    config: &RankingConfig,
) -> f64 {
    let floor = config.budget_floor;
    let (d_min, d_max) = (destination.budget_min, destination.budget_max);

    if let Some(range) = constraints.budget_range {
        let contains = d_min <= range.min && d_max >= range.max;
        let contained = d_min >= range.min && d_max <= range.max;
        if contains || contained {
            return 1.0;
        }

        let span = range.span();
        if span == 0 {
            return floor;
        }
        let overlap = range.max.min(d_max).saturating_sub(range.min.max(d_min));
        return (overlap as f64 / span as f64).clamp(floor, 1.0);
    }

    if let Some(cap) = constraints.budget_max {
        if d_min <= cap {
            return 1.0;
        }

        let band = cap as f64 * config.budget_tolerance;
        if band <= 0.0 {
            return floor;
        }
        let overshoot = ((d_min - cap) as f64 / band).min(1.0);
        return 1.0 - (1.0 - floor) * overshoot;
    }

    config.neutral_score
}

/// Duration score (0-1): 1.0 for an exact match, decaying linearly to 0 at `max_diff` days
#[inline]
pub fn calculate_duration_score(
    duration_days: u32,
    requested: Option<u32>,
    max_diff: u32,
    neutral: f64,
) -> f64 {
    let Some(requested) = requested else {
        return neutral;
    };

    let diff = duration_days.abs_diff(requested) as f64;
    if max_diff == 0 {
        return if diff == 0.0 { 1.0 } else { 0.0 };
    }

    (1.0 - diff / max_diff as f64).max(0.0)
}

/// Distance score (0-1): 1.0 at zero distance, 0 at the requested maximum
#[inline]
pub fn calculate_distance_score(distance_km: f64, max_km: Option<f64>, neutral: f64) -> f64 {
    let Some(max_km) = max_km else {
        return neutral;
    };

    if max_km <= 0.0 {
        return if distance_km <= 0.0 { 1.0 } else { 0.0 };
    }

    (1.0 - distance_km / max_km).clamp(0.0, 1.0)
}

/// Season score (0-1): share of requested months that are among the best months
#[inline]
pub fn calculate_season_score(
    destination: &Destination,
    constraints: &Constraints,
    neutral: f64,
) -> f64 {
    if constraints.best_months.is_empty() || destination.best_months.is_empty() {
        return neutral;
    }

    let matched = constraints
        .best_months
        .iter()
        .filter(|m| destination.best_months.iter().any(|b| b.eq_ignore_ascii_case(m)))
        .count();

    matched as f64 / constraints.best_months.len() as f64
}
