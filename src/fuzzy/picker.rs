//! Picker selection state layered on a [`super::Finder`].

use super::{Finder, ScoredEntry};

/// Tracks a query string and the currently highlighted result of filtering a [`Finder`] by it.
#[derive(Debug)]
pub struct Picker {
    finder: Finder,
    query: String,
    results: Vec<ScoredEntry>,
    selected_idx: usize,
}

impl Picker {
    pub fn new(finder: Finder) -> Self {
        let results = finder.filter("");
        Self {
            finder,
            query: String::new(),
            results,
            selected_idx: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[ScoredEntry] {
        &self.results
    }

    pub fn selected(&self) -> Option<&ScoredEntry> {
        self.results.get(self.selected_idx)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_idx
    }

    /// Replaces the query, re-runs the filter, and resets selection to the top result.
    pub fn update_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.results = self.finder.filter(&self.query);
        self.selected_idx = 0;
    }

    /// Moves the selection by `delta`, clamped to the result range.
    pub fn move_selection(&mut self, delta: isize) {
        if self.results.is_empty() {
            self.selected_idx = 0;
            return;
        }
        let max = self.results.len() - 1;
        let next = (self.selected_idx as isize + delta).clamp(0, max as isize);
        self.selected_idx = next as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_finder() -> Finder {
        let mut finder = Finder::new();
        finder.add_entry("/a/fzonly", "fzonly");
        finder.add_entry("/a/fuzzy_finder.zig", "fuzzy_finder.zig");
        finder.add_entry("/a/xfz.txt", "xfz.txt");
        finder
    }

    #[test]
    fn test_update_query_resets_selection() {
        let mut picker = Picker::new(sample_finder());
        picker.move_selection(2);
        picker.update_query("fz");
        assert_eq!(picker.selected_index(), 0);
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut picker = Picker::new(sample_finder());
        picker.update_query("fz");
        picker.move_selection(-5);
        assert_eq!(picker.selected_index(), 0);
        picker.move_selection(100);
        assert_eq!(picker.selected_index(), picker.results().len() - 1);
    }

    #[test]
    fn test_word_boundary_match_ranks_first() {
        let picker_finder = sample_finder();
        let results = picker_finder.filter("fz");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].entry.display, "fzonly");
    }

    #[test]
    fn test_empty_query_selects_all() {
        let picker = Picker::new(sample_finder());
        assert_eq!(picker.results().len(), 3);
    }
}
