use crate::core::keywords::{alias_for, month_index, months_for, MoodLexicon};
use crate::core::tokenizer::{is_stop_word, lex_query, QueryToken, MIN_TOKEN_LEN};
use crate::models::{BudgetRange, Constraints, QueryRules};

const DAY_UNITS: &[&str] = &["d", "day", "days", "night", "nights"];
const WEEK_UNITS: &[&str] = &["week", "weeks", "wk", "wks"];
const KM_UNITS: &[&str] = &["km", "kms", "kilometer", "kilometers", "kilometre", "kilometres"];
const MONEY_UNITS: &[&str] = &["rupees", "rupee", "rs", "inr", "budget"];
const BUDGET_CUES: &[&str] = &[
    "under", "below", "upto", "max", "maximum", "within", "around", "about",
];
const PROXIMITY_CUES: &[&str] = &["within", "near", "nearby", "close", "closer", "radius"];
const CHEAP_WORDS: &[&str] = &[
    "cheap", "cheaper", "cheapest", "affordable", "afford", "inexpensive", "economical", "budget",
];
const WEEKEND_WORDS: &[&str] = &["weekend", "weekends"];
const MONTH_CUES: &[&str] = &[
    "in", "during", "early", "late", "mid", "of", "till", "until", "through", "from", "by", "next",
    "this",
];
const MODAL_SUBJECTS: &[&str] = &["i", "you", "we", "it", "they", "he", "she"];

/// Numbers this small are only budgets when a currency or budget word says so
const MIN_BARE_BUDGET: f64 = 100.0;

/// What a number in the query measures, judged from its neighbours
#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Days,
    Weeks,
    Km,
    Thousand,
    Money,
}

fn unit_of(token: &QueryToken) -> Option<Unit> {
    match token {
        QueryToken::Currency => Some(Unit::Money),
        QueryToken::Word(w) => {
            let w = w.as_str();
            if DAY_UNITS.contains(&w) {
                Some(Unit::Days)
            } else if WEEK_UNITS.contains(&w) {
                Some(Unit::Weeks)
            } else if KM_UNITS.contains(&w) {
                Some(Unit::Km)
            } else if w == "k" {
                Some(Unit::Thousand)
            } else if MONEY_UNITS.contains(&w) {
                Some(Unit::Money)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Words that steer parsing and never become keywords on their own
fn is_cue_word(word: &str) -> bool {
    DAY_UNITS.contains(&word)
        || WEEK_UNITS.contains(&word)
        || KM_UNITS.contains(&word)
        || MONEY_UNITS.contains(&word)
        || BUDGET_CUES.contains(&word)
        || PROXIMITY_CUES.contains(&word)
        || CHEAP_WORDS.contains(&word)
        || WEEKEND_WORDS.contains(&word)
}

/// Turns free text into [`Constraints`].
///
/// Parsing is best effort: unknown words become keywords, unparseable fragments are ignored, and
/// nothing here returns an error.
#[derive(Debug, Clone, Default)]
pub struct QueryProcessor {
    lexicon: MoodLexicon,
    rules: QueryRules,
}

impl QueryProcessor {
    pub fn new(lexicon: MoodLexicon, rules: QueryRules) -> Self {
        Self { lexicon, rules }
    }

    pub fn with_rules(rules: QueryRules) -> Self {
        Self::new(MoodLexicon::default(), rules)
    }

    pub fn parse(&self, query: &str) -> Constraints {
        let tokens = lex_query(query);
        let mut consumed = vec![false; tokens.len()];
        let mut constraints = Constraints::default();

        self.extract_numbers(&tokens, &mut consumed, &mut constraints);
        self.extract_budget_words(&tokens, &mut consumed, &mut constraints);
        self.extract_moods(&tokens, &mut consumed, &mut constraints);
        self.extract_duration_words(&tokens, &mut consumed, &mut constraints);
        self.extract_proximity_words(&tokens, &mut consumed, &mut constraints);
        extract_months(&tokens, &mut consumed, &mut constraints);
        collect_keywords(&tokens, &consumed, &mut constraints);

        tracing::debug!("Parsed query {:?} into {:?}", query, constraints);
        constraints
    }

    fn extract_numbers(
        &self,
        tokens: &[QueryToken],
        consumed: &mut [bool],
        constraints: &mut Constraints,
    ) {
        let has_proximity_cue = tokens
            .iter()
            .filter_map(QueryToken::word)
            .any(|w| PROXIMITY_CUES.contains(&w));

        let mut i = 0;
        while i < tokens.len() {
            let Some(value) = tokens[i].number() else {
                i += 1;
                continue;
            };

            if let Some((end, upper)) = range_at(tokens, i) {
                let unit = tokens.get(end + 1).and_then(unit_of);
                match unit {
                    Some(Unit::Days) => set_duration(constraints, upper),
                    Some(Unit::Weeks) => set_duration(constraints, upper * 7.0),
                    Some(Unit::Km) => {
                        if has_proximity_cue && constraints.distance_km.is_none() {
                            constraints.distance_km = Some(upper.max(0.0));
                        }
                    }
                    Some(Unit::Thousand) => {
                        if let Some(Some(Unit::Money)) = tokens.get(end + 2).map(unit_of) {
                            consumed[end + 2] = true;
                        }
                        set_budget_range(constraints, value * 1000.0, upper * 1000.0);
                    }
                    Some(Unit::Money) => set_budget_range(constraints, value, upper),
                    None => {
                        let cue = i.checked_sub(1).map(|j| &tokens[j]);
                        let cued = cue.is_some_and(|t| {
                            unit_of(t) == Some(Unit::Money)
                                || t.word().is_some_and(|w| BUDGET_CUES.contains(&w))
                        });
                        if cued || value.min(upper) >= MIN_BARE_BUDGET {
                            set_budget_range(constraints, value, upper);
                        }
                    }
                }
                let last = if unit.is_some() { end + 1 } else { end };
                consumed[i..=last].iter_mut().for_each(|c| *c = true);
                i = last + 1;
                continue;
            }

            consumed[i] = true;

            let after = (i + 1 < tokens.len() && !consumed[i + 1])
                .then(|| unit_of(&tokens[i + 1]))
                .flatten();
            let before = (i > 0 && !consumed[i - 1])
                .then(|| unit_of(&tokens[i - 1]))
                .flatten()
                .filter(|u| *u != Unit::Thousand);

            let unit_index = match (after, before) {
                (Some(_), _) => Some(i + 1),
                (None, Some(_)) => Some(i - 1),
                (None, None) => None,
            };
            if let Some(idx) = unit_index {
                consumed[idx] = true;
            }

            match after.or(before) {
                Some(Unit::Days) => set_duration(constraints, value),
                Some(Unit::Weeks) => set_duration(constraints, value * 7.0),
                Some(Unit::Km) => {
                    if has_proximity_cue && constraints.distance_km.is_none() {
                        constraints.distance_km = Some(value);
                    } else if !has_proximity_cue {
                        tracing::debug!("Ignoring {} km without a proximity cue", value);
                    }
                }
                Some(Unit::Thousand) => {
                    // "5k rupees": the currency word belongs to this number too
                    if let Some(Some(Unit::Money)) = tokens.get(i + 2).map(unit_of) {
                        consumed[i + 2] = true;
                    }
                    set_budget_max(constraints, value * 1000.0);
                }
                Some(Unit::Money) => set_budget_max(constraints, value),
                None => {
                    let cued = i > 0
                        && tokens[i - 1]
                            .word()
                            .is_some_and(|w| BUDGET_CUES.contains(&w));
                    if cued || value >= MIN_BARE_BUDGET {
                        set_budget_max(constraints, value);
                    }
                }
            }

            i += 1;
        }
    }

    fn extract_budget_words(
        &self,
        tokens: &[QueryToken],
        consumed: &mut [bool],
        constraints: &mut Constraints,
    ) {
        let mut cheap = false;
        for (i, token) in tokens.iter().enumerate() {
            if let Some(word) = token.word() {
                if CHEAP_WORDS.contains(&word) && !consumed[i] {
                    consumed[i] = true;
                    cheap = true;
                }
            }
        }

        if cheap && constraints.budget_max.is_none() && constraints.budget_range.is_none() {
            constraints.budget_max = Some(self.rules.cheap_budget);
        }
    }

    fn extract_moods(
        &self,
        tokens: &[QueryToken],
        consumed: &mut [bool],
        constraints: &mut Constraints,
    ) {
        for (i, token) in tokens.iter().enumerate() {
            let Some(word) = token.word() else { continue };
            let tags = self.lexicon.tags_for(word);
            if tags.is_empty() {
                continue;
            }
            consumed[i] = true;
            constraints.mood.extend(tags.iter().cloned());
        }
    }

    fn extract_duration_words(
        &self,
        tokens: &[QueryToken],
        consumed: &mut [bool],
        constraints: &mut Constraints,
    ) {
        for (i, token) in tokens.iter().enumerate() {
            let Some(word) = token.word() else { continue };
            if consumed[i] {
                continue;
            }

            if WEEKEND_WORDS.contains(&word) {
                consumed[i] = true;
                if constraints.duration_days.is_none() {
                    constraints.duration_days = Some(self.rules.weekend_days);
                }
            } else if WEEK_UNITS.contains(&word) {
                consumed[i] = true;
                // "week-long"
                if matches!(tokens.get(i + 1), Some(QueryToken::Dash))
                    && tokens.get(i + 2).and_then(QueryToken::word) == Some("long")
                {
                    consumed[i + 1] = true;
                    consumed[i + 2] = true;
                }
                if constraints.duration_days.is_none() {
                    constraints.duration_days = Some(self.rules.week_days);
                }
            }
        }
    }

    fn extract_proximity_words(
        &self,
        tokens: &[QueryToken],
        consumed: &mut [bool],
        constraints: &mut Constraints,
    ) {
        for (i, token) in tokens.iter().enumerate() {
            let Some(word) = token.word() else { continue };
            let next = tokens.get(i + 1).and_then(QueryToken::word);

            let near_me = match word {
                "nearby" => true,
                "near" | "close" => matches!(next, Some("me") | Some("by") | Some("home")),
                _ => false,
            };
            if !near_me {
                continue;
            }

            consumed[i] = true;
            if word != "nearby" {
                consumed[i + 1] = true;
            }
            if constraints.distance_km.is_none() {
                constraints.distance_km = Some(self.rules.near_me_km);
            }
        }
    }
}

/// `2000-5000` / `2000 to 5000`: index of the upper bound and its value
fn range_at(tokens: &[QueryToken], i: usize) -> Option<(usize, f64)> {
    let joiner = tokens.get(i + 1)?;
    let is_joiner = matches!(joiner, QueryToken::Dash) || joiner.word() == Some("to");
    if !is_joiner {
        return None;
    }
    let upper = tokens.get(i + 2)?.number()?;
    Some((i + 2, upper))
}

fn to_amount(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn set_budget_max(constraints: &mut Constraints, value: f64) {
    if constraints.budget_max.is_none() && constraints.budget_range.is_none() {
        constraints.budget_max = Some(to_amount(value));
    }
}

/// An explicit range replaces any cap seen earlier in the query
fn set_budget_range(constraints: &mut Constraints, low: f64, high: f64) {
    if constraints.budget_range.is_none() {
        constraints.budget_range = Some(BudgetRange::new(to_amount(low), to_amount(high)));
        constraints.budget_max = None;
    }
}

fn set_duration(constraints: &mut Constraints, value: f64) {
    let days = value.round();
    if constraints.duration_days.is_none() && days >= 1.0 {
        constraints.duration_days = Some(days as u32);
    }
}

/// "may" is also a modal verb; it only names the month next to a month cue or on its own
fn is_month_may(tokens: &[QueryToken], i: usize) -> bool {
    let prev = i.checked_sub(1).and_then(|j| tokens[j].word());
    if prev.is_some_and(|w| MODAL_SUBJECTS.contains(&w)) {
        return false;
    }
    if prev.is_some_and(|w| MONTH_CUES.contains(&w)) {
        return true;
    }
    match tokens.get(i + 1) {
        None | Some(QueryToken::Number(_)) => true,
        Some(QueryToken::Word(w)) => w == "and" || w == "or" || !months_for(w).is_empty(),
        _ => false,
    }
}

fn extract_months(tokens: &[QueryToken], consumed: &mut [bool], constraints: &mut Constraints) {
    let mut months: Vec<&str> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let Some(word) = token.word() else { continue };
        let found = months_for(word);
        if found.is_empty() || (word == "may" && !is_month_may(tokens, i)) {
            continue;
        }
        consumed[i] = true;
        months.extend(found.iter().copied());
    }

    months.sort_by_key(|m| month_index(m));
    months.dedup();
    constraints.best_months = months.into_iter().map(str::to_string).collect();
}

fn collect_keywords(tokens: &[QueryToken], consumed: &[bool], constraints: &mut Constraints) {
    for (i, token) in tokens.iter().enumerate() {
        let Some(word) = token.word() else { continue };
        if word.len() < MIN_TOKEN_LEN || is_stop_word(word) || is_cue_word(word) {
            continue;
        }

        let names = std::iter::once(word).chain(alias_for(word));
        for name in names {
            if !constraints.query_terms.iter().any(|t| t == name) {
                constraints.query_terms.push(name.to_string());
            }
        }
        if !consumed[i] && !constraints.free_keywords.iter().any(|t| t == word) {
            constraints.free_keywords.push(word.to_string());
        }
    }
}
