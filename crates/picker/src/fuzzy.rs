use konf_store::StoreEntry;
use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32String};

/// Live filter for the konf picker using nucleo-matcher
///
/// Only answers match / no match. Context, cluster and file carry no weight relative to each
/// other, so they are joined into a single haystack and a query may span fields.
pub struct KonfMatcher {
    matcher: Matcher,
}

impl KonfMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// True when the characters of `query` appear in order (case-insensitive) in
    /// `"<context> <cluster> <file>"`.
    pub fn matches(&mut self, query: &str, entry: &StoreEntry) -> bool {
        if query.is_empty() {
            return true;
        }
        let atom = Atom::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
            false,
        );
        let haystack = Utf32String::from(search_surface(entry).as_str());
        atom.score(haystack.slice(..), &mut self.matcher).is_some()
    }
}

impl Default for KonfMatcher {
    fn default() -> Self {
        Self::new()
    }
}

pub fn search_surface(entry: &StoreEntry) -> String {
    format!(
        "{} {} {}",
        entry.context,
        entry.cluster,
        entry.file.display()
    )
}
