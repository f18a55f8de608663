use crate::core::{
    query::QueryProcessor,
    ranker::{RankError, Ranker},
    snapshot::CatalogSnapshot,
};
use crate::models::{Constraints, Destination, Explanation, RecommendResponse, Recommendation};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// Errors that fail a single recommendation request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error(transparent)]
    Rank(#[from] RankError),

    #[error("destination {0} not found")]
    UnknownDestination(u32),
}

/// Entry point for recommendations: parse, rank, truncate, package
///
/// Owns the current [`CatalogSnapshot`]. Queries clone the `Arc` and work on that snapshot
/// without holding the lock; [`Recommender::rebuild`] builds a replacement first and swaps it in
/// under a short write lock.
#[derive(Debug)]
pub struct Recommender {
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    processor: QueryProcessor,
    ranker: Ranker,
}

impl Recommender {
    pub fn new(catalog: Vec<Destination>, processor: QueryProcessor, ranker: Ranker) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::new(catalog))),
            processor,
            ranker,
        }
    }

    pub fn with_defaults(catalog: Vec<Destination>) -> Self {
        Self::new(catalog, QueryProcessor::default(), Ranker::default())
    }

    /// Current catalog and index
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Replace the catalog; queries already running keep the snapshot they started with
    pub fn rebuild(&self, catalog: Vec<Destination>) {
        let next = Arc::new(CatalogSnapshot::new(catalog));
        let size = next.len();
        *self.snapshot.write() = next;
        tracing::info!("Catalog index rebuilt with {} destinations", size);
    }

    pub fn parse(&self, query: &str) -> Constraints {
        self.processor.parse(query)
    }

    /// Non-positive values fall back to the configured default
    pub fn resolve_top_k(&self, top_k: i64) -> usize {
        if top_k <= 0 {
            self.ranker.config().default_top_k
        } else {
            usize::try_from(top_k).unwrap_or(usize::MAX)
        }
    }

    /// Recommend up to `top_k` destinations for a free-text query
    pub fn recommend(&self, query: &str, top_k: i64) -> Result<RecommendResponse, RecommendError> {
        let top_k = self.resolve_top_k(top_k);
        let snapshot = self.snapshot();
        let constraints = self.processor.parse(query);

        let ranked = self.ranker.rank(&constraints, &snapshot)?;
        let total_results = ranked.len();

        let recommendations: Vec<Recommendation> =
            ranked.iter().take(top_k).map(Recommendation::from).collect();

        tracing::info!(
            "Generated {} recommendations for query {:?} ({} candidates)",
            recommendations.len(),
            query,
            total_results
        );

        Ok(RecommendResponse {
            query: query.to_string(),
            recommendations,
            total_results,
            parsed_constraints: constraints,
        })
    }

    /// Score breakdown for one destination, including which filter would reject it
    pub fn explain(&self, query: &str, id: u32) -> Result<Explanation, RecommendError> {
        let snapshot = self.snapshot();
        let constraints = self.processor.parse(query);

        let (score, breakdown, rejected_by) = self
            .ranker
            .explain(&constraints, &snapshot, id)
            .ok_or(RecommendError::UnknownDestination(id))?;
        let destination = snapshot
            .get(id)
            .ok_or(RecommendError::UnknownDestination(id))?;

        Ok(Explanation::new(destination, score, breakdown, rejected_by, constraints))
    }

    /// Every destination in the current catalog, ascending by id
    pub fn destinations(&self) -> Vec<Destination> {
        self.snapshot().destinations().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_destination(
        id: u32,
        name: &str,
        moods: &[&str],
        duration_days: u32,
        rating: f64,
    ) -> Destination {
        Destination {
            id,
            name: name.to_string(),
            moods: moods.iter().map(|m| m.to_string()).collect(),
            budget_min: 2000,
            budget_max: 5000,
            duration_days,
            distance_km: 400.0,
            rating,
            description: format!("{} getaway", name),
            best_months: vec![],
        }
    }

    fn catalog() -> Vec<Destination> {
        (1..=8)
            .map(|i| {
                let rating = 4.0 + i as f64 / 10.0;
                create_destination(i, &format!("Spot {}", i), &["nature"], 3, rating)
            })
            .collect()
    }

    #[test]
    fn test_default_top_k() {
        let recommender = Recommender::with_defaults(catalog());

        assert_eq!(recommender.recommend("nature", 0).unwrap().recommendations.len(), 5);
        assert_eq!(recommender.recommend("nature", -3).unwrap().recommendations.len(), 5);
        assert_eq!(recommender.recommend("nature", 2).unwrap().recommendations.len(), 2);
    }

    #[test]
    fn test_total_results_counts_before_truncation() {
        let recommender = Recommender::with_defaults(catalog());
        let response = recommender.recommend("nature", 3).unwrap();

        assert_eq!(response.total_results, 8);
        assert_eq!(response.recommendations.len(), 3);
    }

    #[test]
    fn test_rebuild_swaps_catalog() {
        let recommender = Recommender::with_defaults(catalog());
        let before = recommender.snapshot();

        recommender.rebuild(vec![create_destination(42, "Lone Peak", &["adventure"], 2, 4.9)]);

        // the old snapshot is untouched for whoever still holds it
        assert_eq!(before.len(), 8);
        assert_eq!(recommender.len(), 1);
        let response = recommender.recommend("adventure", 5).unwrap();
        assert_eq!(response.recommendations[0].id, 42);
        assert!(recommender.recommend("nature", 5).unwrap().recommendations.is_empty());
    }

    #[test]
    fn test_explain_unknown_destination() {
        let recommender = Recommender::with_defaults(catalog());

        assert_eq!(
            recommender.explain("nature", 99).unwrap_err(),
            RecommendError::UnknownDestination(99)
        );
        assert_eq!(recommender.explain("nature", 3).unwrap().id, 3);
    }

    #[test]
    fn test_fallback_orders_by_rating() {
        let recommender = Recommender::with_defaults(catalog());
        let response = recommender.recommend("zzyzx", 8).unwrap();

        assert!(response.parsed_constraints.is_empty());
        let ids: Vec<u32> = response.recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_concurrent_queries_share_snapshot() {
        let recommender = Arc::new(Recommender::with_defaults(catalog()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let recommender = Arc::clone(&recommender);
                std::thread::spawn(move || recommender.recommend("nature 3 days", 5).unwrap())
            })
            .collect();

        let results: Vec<Vec<u32>> = handles
            .into_iter()
            .map(|h| h.join().unwrap().recommendations.iter().map(|r| r.id).collect())
            .collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
