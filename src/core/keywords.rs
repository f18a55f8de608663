//! Fixed keyword tables used by query parsing and the name boost.
//!
//! The tables are plain data so the extraction rules can be read, tested and swapped without
//! touching the parser or the ranker.

use std::collections::{HashMap, HashSet};

/// Query keyword → mood tags it implies
pub const MOOD_KEYWORDS: &[(&str, &[&str])] = &[
    // nature / mountains
    ("hill", &["nature"]),
    ("hills", &["nature"]),
    ("mountain", &["nature", "adventure"]),
    ("mountains", &["nature", "adventure"]),
    ("snow", &["nature", "adventure"]),
    ("leh", &["nature", "adventure"]),
    ("ladakh", &["nature", "adventure"]),
    ("nature", &["nature"]),
    ("wildlife", &["nature"]),
    ("forest", &["nature"]),
    ("scenic", &["nature"]),
    ("landscape", &["nature"]),
    // relaxing
    ("beach", &["relaxing"]),
    ("beaches", &["relaxing"]),
    ("backwater", &["relaxing"]),
    ("backwaters", &["relaxing"]),
    ("relax", &["relaxing"]),
    ("relaxing", &["relaxing"]),
    ("peaceful", &["relaxing"]),
    ("calm", &["relaxing"]),
    ("quiet", &["relaxing"]),
    ("chill", &["relaxing"]),
    // adventure
    ("adventure", &["adventure"]),
    ("adventurous", &["adventure"]),
    ("trek", &["adventure"]),
    ("treks", &["adventure"]),
    ("trekking", &["adventure"]),
    ("hiking", &["adventure"]),
    ("climb", &["adventure"]),
    ("climbing", &["adventure"]),
    ("thrill", &["adventure"]),
    ("extreme", &["adventure"]),
    // spiritual
    ("spiritual", &["spiritual"]),
    ("yoga", &["spiritual"]),
    ("meditation", &["spiritual"]),
    ("zen", &["spiritual"]),
    ("pilgrimage", &["spiritual"]),
    // party
    ("party", &["party"]),
    ("parties", &["party"]),
    ("nightlife", &["party"]),
    ("club", &["party"]),
    ("clubs", &["party"]),
    ("clubbing", &["party"]),
    ("disco", &["party"]),
    // cultural
    ("culture", &["cultural"]),
    ("cultural", &["cultural"]),
    ("heritage", &["cultural"]),
    ("museum", &["cultural"]),
    ("museums", &["cultural"]),
    ("art", &["cultural"]),
    // history
    ("history", &["history"]),
    ("historical", &["history"]),
    ("historic", &["history"]),
    ("monument", &["history"]),
    ("monuments", &["history"]),
    ("ancient", &["history"]),
    ("fort", &["history"]),
    ("forts", &["history"]),
    // romantic
    ("romantic", &["romantic"]),
    ("romance", &["romantic"]),
    ("honeymoon", &["romantic"]),
    ("couple", &["romantic"]),
];

/// Names containing any of these get the top name boost when the query mentions any of them
pub const HIGH_PRIORITY_NAME_KEYWORDS: &[&str] = &["hill", "mountain", "snow", "leh", "ladakh"];

/// Names containing one of these get the medium name boost when the query mentions that word
pub const MEDIUM_PRIORITY_NAME_KEYWORDS: &[&str] =
    &["backwater", "wildlife", "trek", "beach", "yoga", "city", "heritage"];

pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Season word → months it covers
pub const SEASONS: &[(&str, &[&str])] = &[
    ("winter", &["december", "january", "february"]),
    ("summer", &["march", "april", "may", "june"]),
    ("monsoon", &["june", "july", "august", "september"]),
    ("autumn", &["september", "october", "november"]),
];

/// Town or older spelling → the name token the catalog uses for that place
pub const PLACE_ALIASES: &[(&str, &str)] = &[
    ("kochi", "kerala"),
    ("cochin", "kerala"),
    ("alleppey", "kerala"),
    ("alappuzha", "kerala"),
    ("munnar", "kerala"),
    ("bombay", "mumbai"),
    ("benares", "varanasi"),
    ("banaras", "varanasi"),
    ("kashi", "varanasi"),
    ("tirumala", "tirupati"),
    ("panaji", "goa"),
    ("panjim", "goa"),
    ("simla", "shimla"),
    ("ootacamund", "ooty"),
    ("udhagamandalam", "ooty"),
    ("kullu", "manali"),
    ("havelock", "andaman"),
    ("nainital", "corbett"),
];

/// Keyword → mood tag lookup
#[derive(Debug, Clone)]
pub struct MoodLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl MoodLexicon {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (keyword, tags) in pairs {
            let slot = entries.entry(keyword.to_lowercase()).or_default();
            for tag in tags.iter() {
                let tag = tag.to_lowercase();
                if !slot.contains(&tag) {
                    slot.push(tag);
                }
            }
        }
        Self { entries }
    }

    /// Mood tags implied by `word`, empty when the word is not a mood keyword
    pub fn tags_for(&self, word: &str) -> &[String] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_mood_keyword(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }
}

impl Default for MoodLexicon {
    fn default() -> Self {
        Self::from_pairs(MOOD_KEYWORDS.iter().copied())
    }
}

/// Name boost tier of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameTier {
    Medium,
    High,
}

/// Tiered keyword lists for the name boost
#[derive(Debug, Clone)]
pub struct NameTiers {
    high: HashSet<String>,
    medium: HashSet<String>,
}

impl NameTiers {
    pub fn new<'a>(
        high: impl IntoIterator<Item = &'a str>,
        medium: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            high: high.into_iter().map(str::to_lowercase).collect(),
            medium: medium.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Tier keyword that `word` stands for, accepting a trailing plural `s`
    pub fn keyword_for<'a>(&self, word: &'a str) -> Option<(NameTier, &'a str)> {
        let candidates = std::iter::once(word).chain(word.strip_suffix('s'));
        for candidate in candidates {
            if self.high.contains(candidate) {
                return Some((NameTier::High, candidate));
            }
            if self.medium.contains(candidate) {
                return Some((NameTier::Medium, candidate));
            }
        }
        None
    }
}

impl Default for NameTiers {
    fn default() -> Self {
        Self::new(
            HIGH_PRIORITY_NAME_KEYWORDS.iter().copied(),
            MEDIUM_PRIORITY_NAME_KEYWORDS.iter().copied(),
        )
    }
}

/// Months named by `word`: itself if it is a month, the season's months if it is a season
pub fn months_for(word: &str) -> &'static [&'static str] {
    if let Some(i) = MONTHS.iter().position(|m| *m == word) {
        return &MONTHS[i..=i];
    }
    SEASONS
        .iter()
        .find(|(season, _)| *season == word)
        .map(|(_, months)| *months)
        .unwrap_or(&[])
}

/// Calendar position of a month name, used to keep month lists in order
/// Catalog name token for a known alias of a place
pub fn alias_for(word: &str) -> Option<&'static str> {
    PLACE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == word)
        .map(|(_, name)| *name)
}

pub fn month_index(month: &str) -> Option<usize> {
    MONTHS.iter().position(|m| m.eq_ignore_ascii_case(month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_table_entries() {
        let lexicon = MoodLexicon::default();

        assert_eq!(lexicon.tags_for("hill"), ["nature"]);
        assert_eq!(lexicon.tags_for("ladakh"), ["nature", "adventure"]);
        assert_eq!(lexicon.tags_for("backwater"), ["relaxing"]);
        assert_eq!(lexicon.tags_for("honeymoon"), ["romantic"]);
        assert!(lexicon.tags_for("goa").is_empty());
    }

    #[test]
    fn test_lexicon_merges_duplicate_keywords() {
        let pairs: [(&str, &[&str]); 2] =
            [("Trek", &["adventure"]), ("trek", &["nature", "adventure"])];
        let lexicon = MoodLexicon::from_pairs(pairs);

        assert_eq!(lexicon.tags_for("trek"), ["adventure", "nature"]);
    }

    #[test]
    fn test_name_tiers_accept_plurals() {
        let tiers = NameTiers::default();

        assert_eq!(tiers.keyword_for("hills"), Some((NameTier::High, "hill")));
        assert_eq!(tiers.keyword_for("backwaters"), Some((NameTier::Medium, "backwater")));
        assert_eq!(tiers.keyword_for("goa"), None);
    }

    #[test]
    fn test_place_aliases() {
        assert_eq!(alias_for("kochi"), Some("kerala"));
        assert_eq!(alias_for("bombay"), Some("mumbai"));
        assert_eq!(alias_for("kerala"), None);
    }

    #[test]
    fn test_months_for_seasons() {
        assert_eq!(months_for("november"), ["november"]);
        assert_eq!(months_for("winter"), ["december", "january", "february"]);
        assert!(months_for("someday").is_empty());
    }
}
