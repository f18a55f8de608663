use crate::models::{Constraints, Destination, FilterRejection, RankingConfig};

/// Check a destination against the hard constraints of a query
///
/// Returns the first filter that rejects it, or `None` if it is a candidate.
#[inline]
pub fn check_hard_constraints(
    destination: &Destination,
    constraints: &Constraints,
    config: &RankingConfig,
) -> Option<FilterRejection> {
    if let Some(range) = constraints.budget_range {
        if !range.overlaps(destination.budget_min, destination.budget_max) {
            return Some(FilterRejection::BudgetRange);
        }
    } else if let Some(cap) = constraints.budget_max {
        if !within_budget_tolerance(destination, cap, config.budget_tolerance) {
            return Some(FilterRejection::BudgetCap);
        }
    }

    if let Some(max_km) = constraints.distance_km {
        if destination.distance_km > max_km {
            return Some(FilterRejection::Distance);
        }
    }

    if !constraints.mood.is_empty() && !shares_mood(destination, constraints) {
        return Some(FilterRejection::Mood);
    }

    None
}

#[inline]
pub fn passes_hard_constraints(
    destination: &Destination,
    constraints: &Constraints,
    config: &RankingConfig,
) -> bool {
    check_hard_constraints(destination, constraints, config).is_none()
}

/// Slack for float rounding in the tolerance band; budgets are whole rupees
const BUDGET_EPSILON: f64 = 1e-6;

/// A destination starting slightly above the cap still qualifies, up to `cap * (1 + tolerance)`
/// inclusive
#[inline]
pub fn within_budget_tolerance(destination: &Destination, cap: u32, tolerance: f64) -> bool {
    let overshoot = destination.budget_min as f64 - cap as f64;
    overshoot <= cap as f64 * tolerance + BUDGET_EPSILON
}

#[inline]
pub fn shares_mood(destination: &Destination, constraints: &Constraints) -> bool {
    constraints.mood.iter().any(|tag| destination.has_mood(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetRange;

    fn create_destination(
        budget_min: u32,
        budget_max: u32,
        distance_km: f64,
        moods: &[&str],
    ) -> Destination {
        Destination {
            id: 1,
            name: "Test Spot".to_string(),
            moods: moods.iter().map(|m| m.to_string()).collect(),
            budget_min,
            budget_max,
            duration_days: 3,
            distance_km,
            rating: 4.0,
            description: String::new(),
            best_months: vec![],
        }
    }

    fn with_cap(cap: u32) -> Constraints {
        Constraints {
            budget_max: Some(cap),
            ..Constraints::default()
        }
    }

    #[test]
    fn test_budget_cap_tolerance() {
        let config = RankingConfig::default();

        // 3500 * 1.15 = 4025
        let inside = create_destination(4000, 8000, 100.0, &["nature"]);
        let outside = create_destination(4100, 8000, 100.0, &["nature"]);

        assert!(passes_hard_constraints(&inside, &with_cap(3500), &config));
        assert_eq!(
            check_hard_constraints(&outside, &with_cap(3500), &config),
            Some(FilterRejection::BudgetCap)
        );
    }

    #[test]
    fn test_budget_cap_tolerance_is_inclusive() {
        let config = RankingConfig::default();

        // cap * 1.15 is not exact in floating point for these caps
        for (cap, limit) in [(3000, 3450), (3500, 4025), (7000, 8050), (200, 230)] {
            let at_limit = create_destination(limit, limit + 1000, 100.0, &["nature"]);
            let past_limit = create_destination(limit + 1, limit + 1000, 100.0, &["nature"]);

            assert!(passes_hard_constraints(&at_limit, &with_cap(cap), &config), "cap {}", cap);
            assert!(!passes_hard_constraints(&past_limit, &with_cap(cap), &config), "cap {}", cap);
        }
    }

    #[test]
    fn test_budget_range_needs_overlap() {
        let config = RankingConfig::default();
        let constraints = Constraints {
            budget_range: Some(BudgetRange::new(2000, 5000)),
            ..Constraints::default()
        };

        let overlapping = create_destination(4500, 9000, 100.0, &["party"]);
        let touching = create_destination(5000, 9000, 100.0, &["party"]);
        let above = create_destination(5500, 9000, 100.0, &["party"]);
        let below = create_destination(500, 1500, 100.0, &["party"]);

        assert!(passes_hard_constraints(&overlapping, &constraints, &config));
        assert!(passes_hard_constraints(&touching, &constraints, &config));
        assert!(!passes_hard_constraints(&above, &constraints, &config));
        assert!(!passes_hard_constraints(&below, &constraints, &config));
    }

    #[test]
    fn test_distance_limit() {
        let config = RankingConfig::default();
        let constraints = Constraints {
            distance_km: Some(1000.0),
            ..Constraints::default()
        };

        let at_limit = create_destination(1000, 2000, 1000.0, &["nature"]);
        let beyond = create_destination(1000, 2000, 1000.5, &["nature"]);

        assert!(passes_hard_constraints(&at_limit, &constraints, &config));
        assert_eq!(
            check_hard_constraints(&beyond, &constraints, &config),
            Some(FilterRejection::Distance)
        );
    }

    #[test]
    fn test_mood_needs_one_shared_tag() {
        let config = RankingConfig::default();
        let constraints = Constraints {
            mood: ["adventure".to_string(), "party".to_string()].into(),
            ..Constraints::default()
        };

        let one_shared = create_destination(1000, 2000, 10.0, &["party", "relaxing"]);
        let none_shared = create_destination(1000, 2000, 10.0, &["spiritual"]);

        assert!(passes_hard_constraints(&one_shared, &constraints, &config));
        assert_eq!(
            check_hard_constraints(&none_shared, &constraints, &config),
            Some(FilterRejection::Mood)
        );
    }

    #[test]
    fn test_no_constraints_pass_everything() {
        let config = RankingConfig::default();
        let destination = create_destination(90_000, 120_000, 9000.0, &["romantic"]);

        assert!(passes_hard_constraints(&destination, &Constraints::default(), &config));
    }
}
