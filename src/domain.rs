//! Candidate-date domains for meeting variables.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// The set of candidate dates for one meeting variable.
///
/// A domain starts out holding every date in the problem's inclusive range
/// and only ever shrinks: the consistency filters remove values, nothing
/// re-adds them, and the search phase never mutates domains at all.
///
/// Dates are kept ordered, so iteration enumerates candidates
/// chronologically. The search tries candidates in this order, which makes
/// the first solution found the lexicographically smallest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDomain {
    dates: BTreeSet<NaiveDate>,
}

impl MeetingDomain {
    /// Creates a domain holding every date in `[range_start, range_end]`,
    /// both endpoints included. An inverted range yields an empty domain;
    /// the solver rejects inverted ranges before building domains.
    pub fn new(range_start: NaiveDate, range_end: NaiveDate) -> Self {
        let mut dates = BTreeSet::new();
        let mut day = range_start;
        while day <= range_end {
            let _ = dates.insert(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        Self { dates }
    }

    /// Whether `date` is still a candidate.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of remaining candidates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no candidate remains. An empty domain is not an error; it
    /// is how unsatisfiability surfaces during search.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterates the remaining candidates in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Keeps only the candidates for which `keep` returns true and returns
    /// how many were removed. This is the only way a domain shrinks.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(NaiveDate) -> bool,
    {
        let before = self.dates.len();
        self.dates.retain(|&date| keep(date));
        before - self.dates.len()
    }

    /// Whether every candidate here is also a candidate in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.dates.is_subset(&other.dates)
    }
}
