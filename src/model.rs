//! Problem container and input validation.

use crate::constraint::{BinaryDateConstraint, DateConstraint, DateRelation, UnaryDateConstraint};
use chrono::NaiveDate;
use thiserror::Error;

/// Error produced by [`Problem::validate`] for malformed input.
///
/// Validation runs before any filtering, so a malformed problem never
/// touches a domain store. Unsatisfiability is *not* an error; see
/// [`SolveStatus`](crate::solver::SolveStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The date range ends before it starts.
    #[error("range end {end} precedes range start {start}")]
    InvertedRange {
        /// Start of the inclusive range.
        start: NaiveDate,
        /// End of the inclusive range.
        end: NaiveDate,
    },

    /// A constraint references a meeting index outside `[0, n_meetings)`.
    #[error("constraint references meeting {meeting}, but the problem has {n_meetings} meetings")]
    MeetingOutOfBounds {
        /// The offending meeting index.
        meeting: usize,
        /// Number of meetings in the problem.
        n_meetings: usize,
    },

    /// A binary constraint relates a meeting to itself.
    #[error("binary constraint relates meeting {meeting} to itself")]
    SelfReferential {
        /// The meeting index appearing on both sides.
        meeting: usize,
    },
}

/// A calendar scheduling problem: schedule `n_meetings` meetings, each on
/// a date within an inclusive range, subject to unary and binary date
/// constraints.
///
/// Meetings have no identity beyond their index in `[0, n_meetings)`; the
/// solution is a date per index.
///
/// # Examples
///
/// ```
/// use calendar_csp::{DateRelation, Problem, Solver};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
///
/// let mut problem = Problem::new(2, start, end);
/// problem.add_binary(0, DateRelation::Lt, 1);
///
/// let outcome = Solver::solve(&problem).unwrap();
/// assert!(outcome.is_satisfied());
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    /// Number of meetings to schedule.
    pub n_meetings: usize,
    /// First allowed date (inclusive) for every meeting.
    pub range_start: NaiveDate,
    /// Last allowed date (inclusive) for every meeting.
    pub range_end: NaiveDate,
    /// Constraints on the meeting dates.
    pub constraints: Vec<DateConstraint>,
}

impl Problem {
    /// Creates a problem with no constraints yet.
    pub fn new(n_meetings: usize, range_start: NaiveDate, range_end: NaiveDate) -> Self {
        Self {
            n_meetings,
            range_start,
            range_end,
            constraints: Vec::new(),
        }
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: DateConstraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add a unary constraint `date(meeting) REL date`.
    pub fn add_unary(&mut self, meeting: usize, relation: DateRelation, date: NaiveDate) {
        self.constraints
            .push(DateConstraint::Unary(UnaryDateConstraint::new(
                meeting, relation, date,
            )));
    }

    /// Convenience: add a binary constraint `date(left) REL date(right)`.
    pub fn add_binary(&mut self, left: usize, relation: DateRelation, right: usize) {
        self.constraints
            .push(DateConstraint::Binary(BinaryDateConstraint::new(
                left, relation, right,
            )));
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Validates the problem, failing fast on input that would corrupt the
    /// domain store: an inverted date range, a constraint operand outside
    /// `[0, n_meetings)`, or a binary constraint relating a meeting to
    /// itself.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.range_end < self.range_start {
            return Err(ModelError::InvertedRange {
                start: self.range_start,
                end: self.range_end,
            });
        }
        for constraint in &self.constraints {
            let (left, right) = constraint.meetings();
            for meeting in std::iter::once(left).chain(right) {
                if meeting >= self.n_meetings {
                    return Err(ModelError::MeetingOutOfBounds {
                        meeting,
                        n_meetings: self.n_meetings,
                    });
                }
            }
            if right == Some(left) {
                return Err(ModelError::SelfReferential { meeting: left });
            }
        }
        Ok(())
    }
}
