use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Shortest token kept by the index and by free-keyword extraction
pub const MIN_TOKEN_LEN: usize = 3;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").unwrap());

/// Lexer for queries: numbers (with optional decimals), words, and the few symbols that carry
/// meaning (`-` in ranges, `₹` as a currency cue).
static QUERY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?|[a-z]+|-|₹").unwrap());

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "with", "from", "into", "onto", "that", "this", "these", "those",
        "are", "was", "were", "been", "being", "have", "has", "had", "having", "you", "your",
        "our", "ours", "their", "them", "they", "its", "his", "her", "him", "she", "who", "whom",
        "what", "which", "where", "when", "why", "how", "all", "any", "some", "can", "could",
        "would", "should", "will", "shall", "may", "might", "must", "not", "but", "than", "then",
        "too", "very", "just", "also", "only", "about", "over", "under", "again", "there",
        "here", "each", "few", "more", "most", "other", "such", "own", "same", "both", "out",
        "off", "per", "via", "want", "wants", "need", "needs", "like", "looking", "find",
        "show", "give", "suggest", "recommend", "please", "somewhere", "place", "places",
        "trip", "trips", "travel", "visit", "destination", "destinations", "spot", "spots",
        "plan", "planning", "going", "get", "let", "lets", "one",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercase alphabetic tokens of indexable length, stop words removed.
///
/// Order follows the input and duplicates are kept; callers that need a set collect into one.
pub fn tokenize_text(text: &str) -> Vec<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str())
        .filter(|word| word.len() >= MIN_TOKEN_LEN && !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// A lexed piece of a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryToken {
    Number(f64),
    Word(String),
    Dash,
    Currency,
}

impl QueryToken {
    pub fn word(&self) -> Option<&str> {
        match self {
            QueryToken::Word(w) => Some(w.as_str()),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            QueryToken::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Split a query into numbers, words and cue symbols.
///
/// `"2000-5000"`, `"4days"` and `"1000km"` lex into separate tokens; any other punctuation is
/// dropped.
pub fn lex_query(query: &str) -> Vec<QueryToken> {
    QUERY_TOKEN
        .find_iter(&query.to_lowercase())
        .filter_map(|m| {
            let text = m.as_str();
            match text {
                "-" => Some(QueryToken::Dash),
                "₹" => Some(QueryToken::Currency),
                _ if text.starts_with(|c: char| c.is_ascii_digit()) => {
                    text.parse().ok().map(QueryToken::Number)
                }
                _ => Some(QueryToken::Word(text.to_string())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_text_lowercases_and_filters() {
        let tokens = tokenize_text("Goa Beach: the SUN, sand and a party");

        assert_eq!(tokens, vec!["goa", "beach", "sun", "sand", "party"]);
    }

    #[test]
    fn test_tokenize_text_drops_digits_and_short_words() {
        let tokens = tokenize_text("Leh is 3500m up");

        assert_eq!(tokens, vec!["leh"]);
    }

    #[test]
    fn test_lex_query_splits_glued_units() {
        let tokens = lex_query("Within 1000km, 4days");

        assert_eq!(
            tokens,
            vec![
                QueryToken::Word("within".to_string()),
                QueryToken::Number(1000.0),
                QueryToken::Word("km".to_string()),
                QueryToken::Number(4.0),
                QueryToken::Word("days".to_string()),
            ]
        );
    }

    #[test]
    fn test_lex_query_range_and_currency() {
        let tokens = lex_query("₹2000-5000");

        assert_eq!(
            tokens,
            vec![
                QueryToken::Currency,
                QueryToken::Number(2000.0),
                QueryToken::Dash,
                QueryToken::Number(5000.0),
            ]
        );
    }

    #[test]
    fn test_lex_query_never_fails_on_noise() {
        assert!(lex_query("!!! ??? ...").is_empty());
        assert!(lex_query("").is_empty());
    }
}
