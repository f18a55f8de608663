use crate::core::tokenizer::tokenize_text;
use crate::models::Destination;
use std::collections::{BTreeSet, HashMap};

static EMPTY: BTreeSet<u32> = BTreeSet::new();

/// Inverted lookup structures over a catalog
///
/// Holds term → destination ids, mood → destination ids and per-term document frequencies.
/// An index is built in one go from a catalog slice and never mutated afterwards; rebuilding
/// replaces every structure at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationIndex {
    terms: HashMap<String, BTreeSet<u32>>,
    moods: HashMap<String, BTreeSet<u32>>,
    ids: BTreeSet<u32>,
}

impl DestinationIndex {
    /// Build an index from the name, description and mood tags of each destination
    pub fn build(catalog: &[Destination]) -> Self {
        let mut index = Self::default();

        for destination in catalog {
            index.ids.insert(destination.id);

            for tag in &destination.moods {
                index
                    .moods
                    .entry(tag.to_lowercase())
                    .or_default()
                    .insert(destination.id);
            }

            let text = format!(
                "{} {} {}",
                destination.name,
                destination.description,
                destination.moods.join(" ")
            );

            // A set per term means a destination counts once towards document frequency
            for token in tokenize_text(&text) {
                index.terms.entry(token).or_default().insert(destination.id);
            }
        }

        tracing::debug!(
            "Indexed {} destinations ({} terms, {} moods)",
            index.ids.len(),
            index.terms.len(),
            index.moods.len()
        );

        index
    }

    /// Replace this index with one built from `catalog`
    pub fn rebuild(&mut self, catalog: &[Destination]) {
        *self = Self::build(catalog);
    }

    pub fn lookup_term(&self, token: &str) -> &BTreeSet<u32> {
        self.terms.get(&token.to_lowercase()).unwrap_or(&EMPTY)
    }

    pub fn lookup_mood(&self, tag: &str) -> &BTreeSet<u32> {
        self.moods.get(&tag.to_lowercase()).unwrap_or(&EMPTY)
    }

    /// Number of destinations whose text contains `token`
    pub fn document_frequency(&self, token: &str) -> usize {
        self.lookup_term(token).len()
    }

    /// Smoothed inverse document frequency, `ln(1 + N / df)`; zero for unknown tokens
    pub fn idf(&self, token: &str) -> f64 {
        let df = self.document_frequency(token);
        if df == 0 {
            return 0.0;
        }
        (1.0 + self.ids.len() as f64 / df as f64).ln()
    }

    /// Every indexed destination id, ascending
    pub fn ids(&self) -> &BTreeSet<u32> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination(id: u32, name: &str, moods: &[&str], description: &str) -> Destination {
        Destination {
            id,
            name: name.to_string(),
            moods: moods.iter().map(|m| m.to_string()).collect(),
            budget_min: 1000,
            budget_max: 5000,
            duration_days: 3,
            distance_km: 500.0,
            rating: 4.0,
            description: description.to_string(),
            best_months: vec![],
        }
    }

    fn catalog() -> Vec<Destination> {
        vec![
            destination(1, "Goa Beach", &["relaxing", "party"], "Sun, sand and beach shacks"),
            destination(
                2,
                "Manali Hill Station",
                &["nature", "adventure"],
                "Snow peaks and river rafting",
            ),
            destination(
                3,
                "Kerala Backwaters",
                &["relaxing", "nature"],
                "Houseboats drifting through palm-lined canals",
            ),
        ]
    }

    #[test]
    fn test_lookup_term() {
        let index = DestinationIndex::build(&catalog());

        assert_eq!(index.lookup_term("beach"), &BTreeSet::from([1]));
        assert_eq!(index.lookup_term("SNOW"), &BTreeSet::from([2]));
        assert!(index.lookup_term("desert").is_empty());
    }

    #[test]
    fn test_mood_tags_are_indexed_as_terms_and_moods() {
        let index = DestinationIndex::build(&catalog());

        assert_eq!(index.lookup_mood("nature"), &BTreeSet::from([2, 3]));
        assert_eq!(index.lookup_term("nature"), &BTreeSet::from([2, 3]));
        assert!(index.lookup_mood("spiritual").is_empty());
    }

    #[test]
    fn test_document_frequency_counts_destinations_once() {
        let index = DestinationIndex::build(&catalog());

        // "beach" appears twice in Goa's text but Goa is one document
        assert_eq!(index.document_frequency("beach"), 1);
        assert_eq!(index.document_frequency("relaxing"), 2);
        assert_eq!(index.document_frequency("unknown"), 0);
    }

    #[test]
    fn test_stop_words_and_short_tokens_excluded() {
        let index = DestinationIndex::build(&catalog());

        assert!(index.lookup_term("and").is_empty());
        assert!(index.lookup_term("the").is_empty());
    }

    #[test]
    fn test_idf_rarer_terms_weigh_more() {
        let index = DestinationIndex::build(&catalog());

        assert!(index.idf("houseboats") > index.idf("relaxing"));
        assert_eq!(index.idf("unknown"), 0.0);
    }

    #[test]
    fn test_rebuild_drops_stale_entries() {
        let mut index = DestinationIndex::build(&catalog());
        index.rebuild(&catalog()[..1]);

        assert_eq!(index.len(), 1);
        assert!(index.lookup_term("snow").is_empty());
        assert!(index.lookup_mood("nature").is_empty());
    }

    #[test]
    fn test_build_is_idempotent() {
        let first = DestinationIndex::build(&catalog());
        let second = DestinationIndex::build(&catalog());

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalog() {
        let index = DestinationIndex::build(&[]);

        assert!(index.is_empty());
        assert!(index.lookup_term("beach").is_empty());
    }
}
