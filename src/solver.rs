//! Top-level solve pipeline: validate, build domains, filter, search.

use crate::domain::MeetingDomain;
use crate::model::{ModelError, Problem};
use crate::propagation::{arc_consistency, node_consistency};
use crate::search::backtrack;
use chrono::NaiveDate;
use log::debug;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A complete satisfying assignment was found.
    Satisfied,
    /// The search space was exhausted; no assignment satisfies every
    /// constraint within the date range.
    Unsatisfiable,
    /// The node budget ran out before the search could conclude either
    /// way. Not an error: raise [`SolveConfig::max_nodes`] and re-solve.
    BudgetExceeded,
}

/// Solver configuration.
///
/// # Examples
///
/// ```
/// use calendar_csp::SolveConfig;
///
/// let config = SolveConfig::default().with_max_nodes(100_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveConfig {
    /// Maximum number of search nodes to enter. `0` = no limit.
    ///
    /// Backtracking is exponential in the number of meetings in the worst
    /// case; this is the only bounding mechanism the solver offers.
    pub max_nodes: usize,
}

impl SolveConfig {
    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }
}

/// Counters describing one solve run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveStats {
    /// Dates removed by the node-consistency (unary) filter.
    pub unary_pruned: usize,
    /// Dates removed by the arc-consistency (AC-3) filter.
    pub arc_pruned: usize,
    /// Arc revisions performed by AC-3.
    pub arc_revisions: usize,
    /// Search nodes entered by the backtracking phase.
    pub search_nodes: usize,
    /// Total solve time in milliseconds.
    pub solve_time_ms: i64,
}

/// Outcome of one solve run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// How the run ended.
    pub status: SolveStatus,
    /// One date per meeting, indexed by meeting index. `Some` exactly when
    /// `status` is [`SolveStatus::Satisfied`].
    pub assignment: Option<Vec<NaiveDate>>,
    /// Work counters.
    pub stats: SolveStats,
}

impl SolveOutcome {
    /// Whether a satisfying assignment was found.
    pub fn is_satisfied(&self) -> bool {
        self.status == SolveStatus::Satisfied
    }
}

/// The calendar CSP solver.
///
/// One call to [`Solver::solve`] is one atomic unit of work: it builds a
/// fresh domain store for the problem, runs both filters, then searches.
/// The whole pipeline is single-threaded and deterministic; identical
/// input yields identical output. Concurrent solves must each use their
/// own call (the domain store is never shared).
pub struct Solver;

impl Solver {
    /// Solves with the default configuration (no node budget).
    pub fn solve(problem: &Problem) -> Result<SolveOutcome, ModelError> {
        Self::solve_with(problem, &SolveConfig::default())
    }

    /// Solves the problem: validates it, builds one domain per meeting
    /// covering the full inclusive range, enforces node then arc
    /// consistency, and backtracks over the reduced domains.
    ///
    /// Returns `Err` only for malformed input (see [`ModelError`]);
    /// unsatisfiability and budget exhaustion are reported through
    /// [`SolveOutcome::status`].
    pub fn solve_with(
        problem: &Problem,
        config: &SolveConfig,
    ) -> Result<SolveOutcome, ModelError> {
        problem.validate()?;
        let start_time = std::time::Instant::now();

        let mut domains: Vec<MeetingDomain> = (0..problem.n_meetings)
            .map(|_| MeetingDomain::new(problem.range_start, problem.range_end))
            .collect();
        debug!(
            "solving: {} meetings, {} candidate dates each, {} constraints",
            problem.n_meetings,
            domains.first().map_or(0, MeetingDomain::len),
            problem.constraint_count()
        );

        let unary_pruned = node_consistency(&mut domains, &problem.constraints);
        let prune = arc_consistency(&mut domains, &problem.constraints);

        let search = backtrack(&domains, &problem.constraints, config.max_nodes);
        let status = if search.assignment.is_some() {
            SolveStatus::Satisfied
        } else if search.budget_hit {
            SolveStatus::BudgetExceeded
        } else {
            SolveStatus::Unsatisfiable
        };
        debug!("solve finished: {status:?} after {} nodes", search.nodes);

        Ok(SolveOutcome {
            status,
            assignment: search.assignment,
            stats: SolveStats {
                unary_pruned,
                arc_pruned: prune.removed_values,
                arc_revisions: prune.revisions,
                search_nodes: search.nodes,
                solve_time_ms: start_time.elapsed().as_millis() as i64,
            },
        })
    }
}
