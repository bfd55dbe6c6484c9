#![forbid(unsafe_code)]

//! Filter predicates.
//!
//! A [`FilterPredicate`] decides whether a candidate's text value matches the
//! current query. Any `Fn(&str, &str) -> bool` is a predicate, so callers can
//! inject their own matching. [`TextFilter`] covers the common cases.
//!
//! Built-in predicates treat the empty query as match-all, which is what
//! lets an unfiltered picker show every candidate.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Decides whether `text` matches `query`.
pub trait FilterPredicate {
    /// Return `true` when the candidate text should stay visible.
    fn matches(&self, text: &str, query: &str) -> bool;
}

impl<F> FilterPredicate for F
where
    F: Fn(&str, &str) -> bool,
{
    fn matches(&self, text: &str, query: &str) -> bool {
        self(text, query)
    }
}

/// Where in the candidate text the query has to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Anywhere in the text.
    #[default]
    Contains,
    /// At the start of the text.
    StartsWith,
    /// At the end of the text.
    EndsWith,
}

/// Which differences between text and query are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sensitivity {
    /// Ignore case and combining accents ("Éclair" matches "ecl").
    #[default]
    Base,
    /// Compare canonically composed text exactly.
    Case,
}

/// Locale-neutral text predicate.
///
/// Both sides are normalized before comparison: NFC for [`Sensitivity::Case`],
/// NFD with combining marks stripped and lowercased for [`Sensitivity::Base`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFilter {
    mode: MatchMode,
    sensitivity: Sensitivity,
}

impl TextFilter {
    /// Match the query anywhere.
    #[must_use]
    pub const fn contains() -> Self {
        Self {
            mode: MatchMode::Contains,
            sensitivity: Sensitivity::Base,
        }
    }

    /// Match the query as a prefix.
    #[must_use]
    pub const fn starts_with() -> Self {
        Self {
            mode: MatchMode::StartsWith,
            sensitivity: Sensitivity::Base,
        }
    }

    /// Match the query as a suffix.
    #[must_use]
    pub const fn ends_with() -> Self {
        Self {
            mode: MatchMode::EndsWith,
            sensitivity: Sensitivity::Base,
        }
    }

    /// Set the sensitivity (builder).
    #[must_use]
    pub const fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Match mode.
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Sensitivity.
    pub const fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    fn fold(&self, s: &str) -> String {
        match self.sensitivity {
            Sensitivity::Case => s.nfc().collect(),
            Sensitivity::Base => s
                .nfd()
                .filter(|c| !is_combining_mark(*c))
                .flat_map(char::to_lowercase)
                .collect(),
        }
    }
}

impl FilterPredicate for TextFilter {
    fn matches(&self, text: &str, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let text = self.fold(text);
        let query = self.fold(query);
        match self.mode {
            MatchMode::Contains => text.contains(&query),
            MatchMode::StartsWith => text.starts_with(&query),
            MatchMode::EndsWith => text.ends_with(&query),
        }
    }
}
