use crate::core::{
    filters::check_hard_constraints,
    keywords::NameTiers,
    scoring::calculate_relevance,
    snapshot::CatalogSnapshot,
};
use crate::models::{Constraints, FilterRejection, RankedDestination, RankingConfig, ScoreBreakdown};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while ranking a single query
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("index entry references missing destination {0}")]
    DanglingIndexEntry(u32),
}

/// Filters, scores and orders destinations for a constraint set
///
/// # Pipeline Stages
/// 1. Candidate lookup (mood index when moods are requested, whole catalog otherwise)
/// 2. Hard filters (budget, distance, mood)
/// 3. Scoring
/// 4. Ordering, threshold and rank assignment
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankingConfig,
    tiers: NameTiers,
}

impl Ranker {
    pub fn new(config: RankingConfig, tiers: NameTiers) -> Self {
        Self { config, tiers }
    }

    pub fn with_default_config() -> Self {
        Self::new(RankingConfig::default(), NameTiers::default())
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank every candidate in `snapshot` against `constraints`
    ///
    /// The result is ordered by score (descending), rating (descending), then id (ascending),
    /// with ranks starting at 1. Results under the minimum score are dropped unless that would
    /// leave nothing.
    pub fn rank<'a>(
        &self,
        constraints: &Constraints,
        snapshot: &'a CatalogSnapshot,
    ) -> Result<Vec<RankedDestination<'a>>, RankError> {
        let index = snapshot.index();
        let candidate_ids = self.candidate_ids(constraints, snapshot);
        let looked_up = candidate_ids.len();

        let mut ranked = Vec::with_capacity(looked_up);
        for id in candidate_ids {
            let Some(destination) = snapshot.get(id) else {
                tracing::error!("Index references destination {} which is not in the catalog", id);
                return Err(RankError::DanglingIndexEntry(id));
            };

            if check_hard_constraints(destination, constraints, &self.config).is_some() {
                continue;
            }

            let (score, breakdown) =
                calculate_relevance(destination, constraints, index, &self.tiers, &self.config);

            ranked.push(RankedDestination {
                rank: 0,
                destination,
                score,
                breakdown,
            });
        }

        let survivors = ranked.len();
        ranked.sort_by(compare_ranked);

        if ranked.iter().any(|r| r.score >= self.config.min_score) {
            ranked.retain(|r| r.score >= self.config.min_score);
        }

        for (position, entry) in ranked.iter_mut().enumerate() {
            entry.rank = position + 1;
        }

        tracing::debug!(
            "Ranked {} of {} looked-up candidates ({} passed filters)",
            ranked.len(),
            looked_up,
            survivors
        );

        Ok(ranked)
    }

    /// Score one destination regardless of the hard filters, reporting which one rejects it
    pub fn explain(
        &self,
        constraints: &Constraints,
        snapshot: &CatalogSnapshot,
        id: u32,
    ) -> Option<(f64, ScoreBreakdown, Option<FilterRejection>)> {
        let destination = snapshot.get(id)?;
        let rejection = check_hard_constraints(destination, constraints, &self.config);
        let (score, breakdown) = calculate_relevance(
            destination,
            constraints,
            snapshot.index(),
            &self.tiers,
            &self.config,
        );
        Some((score, breakdown, rejection))
    }

    fn candidate_ids(
        &self,
        constraints: &Constraints,
        snapshot: &CatalogSnapshot,
    ) -> BTreeSet<u32> {
        let index = snapshot.index();
        if constraints.mood.is_empty() {
            return index.ids().clone();
        }

        constraints
            .mood
            .iter()
            .flat_map(|tag| index.lookup_mood(tag).iter().copied())
            .collect()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_config()
    }
}

fn compare_ranked(a: &RankedDestination<'_>, b: &RankedDestination<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.destination.rating.total_cmp(&a.destination.rating))
        .then_with(|| a.destination.id.cmp(&b.destination.id))
}
