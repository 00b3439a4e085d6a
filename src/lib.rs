//! Calendar constraint-satisfaction solver.
//!
//! Assigns a concrete date to each of N meetings within a bounded
//! inclusive date range, subject to unary constraints (a meeting's date
//! against a fixed reference date) and binary constraints (a relation
//! between two meetings' dates), or reports that no such assignment
//! exists.
//!
//! # Pipeline
//!
//! - **Domains**: [`MeetingDomain`] — one candidate-date set per meeting,
//!   initialized to the full range.
//! - **Node consistency**: [`propagation::node_consistency`] — applies
//!   unary constraints once, shrinking each affected domain.
//! - **Arc consistency (AC-3)**: [`propagation::arc_consistency`] —
//!   propagates binary-constraint pruning over a worklist of arcs until
//!   fixpoint.
//! - **Backtracking search**: [`search::backtrack`] — depth-first
//!   assignment over the reduced domains with full-prefix consistency
//!   checking, returning the first complete solution.
//!
//! [`Solver::solve`] runs the whole pipeline as one sequential,
//! deterministic unit of work per problem.
//!
//! # Examples
//!
//! ```
//! use calendar_csp::{DateRelation, Problem, SolveStatus, Solver};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
//!
//! // Two meetings, the first strictly before the second.
//! let mut problem = Problem::new(2, start, end);
//! problem.add_binary(0, DateRelation::Lt, 1);
//!
//! let outcome = Solver::solve(&problem).unwrap();
//! assert_eq!(outcome.status, SolveStatus::Satisfied);
//!
//! let dates = outcome.assignment.unwrap();
//! assert!(dates[0] < dates[1]);
//! ```

pub mod constraint;
pub mod domain;
pub mod model;
pub mod propagation;
pub mod search;
pub mod solver;

pub use constraint::{
    BinaryDateConstraint, DateConstraint, DateRelation, ParseRelationError, UnaryDateConstraint,
};
pub use domain::MeetingDomain;
pub use model::{ModelError, Problem};
pub use search::SearchReport;
pub use solver::{SolveConfig, SolveOutcome, SolveStats, SolveStatus, Solver};
