use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Separator between identifiers in a selection form field
pub const SELECTION_SEPARATOR: &str = "||";

/// A recurring meeting that may have taken place this week and is
/// waiting for the caller to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringCandidate {
    pub uid: String,
    pub summary: String,
    /// BYDAY codes in rule order
    pub by_day: Vec<String>,
    pub exdates: BTreeSet<NaiveDate>,
    pub recurrence_text: String,
}

impl RecurringCandidate {
    pub fn occurs_on(&self, code: &str) -> bool {
        self.by_day.iter().any(|d| d == code)
    }
}

/// Candidates keyed by an identifier, iterated in the order each key
/// was first registered. Registering a key again replaces its
/// candidate in place.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    entries: Vec<(String, RecurringCandidate)>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: String, candidate: RecurringCandidate) {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => self.entries[idx].1 = candidate,
            None => self.entries.push((key, candidate)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RecurringCandidate> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, candidate)| candidate)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&RecurringCandidate) -> bool,
    {
        self.entries.retain(|(_, candidate)| keep(candidate));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecurringCandidate> {
        self.entries.iter().map(|(_, candidate)| candidate)
    }

    /// Look up every selected key. Keys that are not in the table are
    /// skipped.
    pub fn resolve<'a>(&'a self, selection: &'a RecurringSelection) -> Vec<&'a RecurringCandidate> {
        selection
            .iter()
            .filter_map(|key| {
                let found = self.get(key);
                if found.is_none() {
                    tracing::debug!("Ignoring unknown recurring selection {}", key);
                }
                found
            })
            .collect()
    }
}

/// Ordered identifiers of the candidates a caller wants applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringSelection(Vec<String>);

impl RecurringSelection {
    /// Split a `||` separated form value. Blank tokens are dropped.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(SELECTION_SEPARATOR)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RecurringSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
