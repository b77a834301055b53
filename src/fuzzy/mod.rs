//! Fuzzy subsequence matcher and picker selection state.
//!
//! ## fuzzy/ Invariants
//! - A candidate matches a non-empty query iff every query character appears in the candidate, in
//!   order, case-insensitively; the matched positions are strictly increasing.
//! - `filter` output is sorted by score descending and stable on ties.

mod walk;
pub mod picker;

pub use picker::Picker;
pub use walk::find_files;

/// One candidate the finder can match against: a filesystem path plus the string actually shown
/// and scored.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: String,
    pub display: String,
}

/// An entry after scoring against a query.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub entry: Entry,
    pub score: i32,
    pub match_positions: Vec<usize>,
}

/// Attempts to match `query` against `candidate`, case-insensitively, as an ordered subsequence.
/// Returns `None` if `query` is not a subsequence of `candidate`. An empty query always matches
/// with score 0 and no match positions.
pub fn score_match(candidate: &str, query: &str) -> Option<(i32, Vec<usize>)> {
    if query.is_empty() {
        return Some((0, Vec::new()));
    }

    let cand_chars: Vec<(usize, char)> = candidate.char_indices().collect();
    let query_lower: Vec<char> = query.chars().flat_map(|c| c.to_lowercase()).collect();

    let mut query_idx = 0;
    let mut consecutive: i32 = 0;
    let mut score: i32 = 0;
    let mut positions = Vec::new();

    for (i, &(byte_off, ch)) in cand_chars.iter().enumerate() {
        if query_idx >= query_lower.len() {
            break;
        }
        let ch_lower = ch.to_ascii_lowercase();
        if ch_lower == query_lower[query_idx] {
            consecutive += 1;
            score += 1 + consecutive;

            let at_boundary = i == 0
                || cand_chars[i - 1].1 == '/'
                || cand_chars[i - 1].1 == '_';
            if at_boundary {
                score += 5;
            }

            let camel_transition = i > 0 && cand_chars[i - 1].1.is_lowercase() && ch.is_uppercase();
            if camel_transition {
                score += 3;
            }

            positions.push(byte_off);
            query_idx += 1;
        } else {
            consecutive = 0;
            score -= 1;
        }
    }

    if query_idx == query_lower.len() {
        Some((score, positions))
    } else {
        None
    }
}

/// Holds a collection of entries and the result of the last `filter` call.
#[derive(Debug, Default)]
pub struct Finder {
    entries: Vec<Entry>,
}

impl Finder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, path: impl Into<String>, display: impl Into<String>) {
        self.entries.push(Entry {
            path: path.into(),
            display: display.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scores every entry against `query` and returns matches sorted by score descending, stable
    /// on ties. An empty query returns every entry with score 0.
    pub fn filter(&self, query: &str) -> Vec<ScoredEntry> {
        let mut scored: Vec<ScoredEntry> = self
            .entries
            .iter()
            .filter_map(|entry| {
                score_match(&entry.display, query).map(|(score, match_positions)| ScoredEntry {
                    entry: entry.clone(),
                    score,
                    match_positions,
                })
            })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }
}
