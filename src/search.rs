//! Depth-first backtracking search over filtered domains.

use crate::constraint::DateConstraint;
use crate::domain::MeetingDomain;
use chrono::NaiveDate;
use log::trace;

/// What the search found, plus how much work it did.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The first complete satisfying assignment found, indexed by meeting,
    /// or `None` if the search space was exhausted or the budget ran out.
    pub assignment: Option<Vec<NaiveDate>>,
    /// Number of search nodes entered (one per recursive call).
    pub nodes: usize,
    /// Whether the node budget stopped the search before it concluded.
    pub budget_hit: bool,
}

/// Searches for the first complete assignment satisfying every constraint.
///
/// Meetings are assigned in index order; candidates for each meeting are
/// tried in the domain's own (chronological) enumeration order, so the
/// first solution found is the lexicographically smallest over that order.
/// Domains are read-only here; pruning happens purely by backtracking.
///
/// `max_nodes` bounds the number of recursive calls; `0` means unlimited.
/// The worst case is exponential in the number of meetings, so callers
/// wanting bounded runtime set a budget.
pub fn backtrack(
    domains: &[MeetingDomain],
    constraints: &[DateConstraint],
    max_nodes: usize,
) -> SearchReport {
    let mut search = Search {
        domains,
        constraints,
        max_nodes,
        nodes: 0,
        budget_hit: false,
    };
    let mut assignment = Vec::with_capacity(domains.len());
    let found = search.extend(&mut assignment);

    SearchReport {
        assignment: found,
        nodes: search.nodes,
        budget_hit: search.budget_hit,
    }
}

struct Search<'a> {
    domains: &'a [MeetingDomain],
    constraints: &'a [DateConstraint],
    max_nodes: usize,
    nodes: usize,
    budget_hit: bool,
}

impl Search<'_> {
    /// Tries to extend the partial assignment (covering meetings
    /// `0..assignment.len()`) to a complete one. The tentative push is
    /// undone on every exit path; a solution is returned by value.
    fn extend(&mut self, assignment: &mut Vec<NaiveDate>) -> Option<Vec<NaiveDate>> {
        if self.max_nodes != 0 && self.nodes >= self.max_nodes {
            self.budget_hit = true;
            return None;
        }
        self.nodes += 1;

        let index = assignment.len();
        if index == self.domains.len() {
            return Some(assignment.clone());
        }

        let domains = self.domains;
        for date in domains[index].iter() {
            assignment.push(date);
            let found = if consistent(assignment, self.constraints) {
                self.extend(assignment)
            } else {
                trace!("meeting {index} on {date}: inconsistent, backtracking");
                None
            };
            let _ = assignment.pop();

            if found.is_some() {
                return found;
            }
            if self.budget_hit {
                return None;
            }
        }
        None
    }
}

/// Whether the partial assignment violates no constraint whose operands
/// are all already assigned. A unary constraint on meeting `i` is checked
/// once `i` is assigned; a binary constraint on `(L, R)` once both are.
/// Every checkable constraint is re-validated on every extension, not just
/// the newest one.
fn consistent(assignment: &[NaiveDate], constraints: &[DateConstraint]) -> bool {
    constraints.iter().all(|constraint| match constraint {
        DateConstraint::Unary(unary) => {
            unary.meeting >= assignment.len() || unary.holds(assignment[unary.meeting])
        }
        DateConstraint::Binary(binary) => {
            binary.left >= assignment.len()
                || binary.right >= assignment.len()
                || binary.holds(assignment[binary.left], assignment[binary.right])
        }
    })
}
