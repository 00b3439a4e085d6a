//! Constraint propagation: node consistency and AC-3 arc consistency.
//!
//! Both filters shrink domains in place and never re-add values, so each
//! pass is monotonic and re-running a filter on already-consistent domains
//! changes nothing.
//!
//! Callers must have validated the problem first: every constraint operand
//! must index into `domains`.

use crate::constraint::{BinaryDateConstraint, DateConstraint};
use crate::domain::MeetingDomain;
use chrono::NaiveDate;
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

/// A directed arc `tail -> head` carrying the binary constraint oriented
/// in that direction: `tail` is the domain being filtered, `head` the
/// domain it is checked against.
///
/// Identity is structural over all three fields, so a forward arc and its
/// reverse coexist in the same working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Arc {
    tail: usize,
    head: usize,
    constraint: BinaryDateConstraint,
}

/// Counters reported by [`arc_consistency`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Total number of dates removed from domains.
    pub removed_values: usize,
    /// Number of arc revisions performed before reaching the fixpoint.
    pub revisions: usize,
}

/// Enforces node consistency: for every unary constraint anchored at
/// meeting `i`, removes from `domains[i]` every date violating it. Binary
/// constraints are ignored here.
///
/// Returns the number of dates removed. Never fails; a domain emptied
/// here simply makes the later search report unsatisfiability.
pub fn node_consistency(domains: &mut [MeetingDomain], constraints: &[DateConstraint]) -> usize {
    let mut removed = 0;
    for constraint in constraints {
        let DateConstraint::Unary(unary) = constraint else {
            continue;
        };
        let dropped = domains[unary.meeting].retain(|date| unary.holds(date));
        if dropped > 0 {
            trace!("node consistency: {unary} removed {dropped} candidates");
        }
        removed += dropped;
    }
    debug!("node consistency removed {removed} values");
    removed
}

/// Enforces arc consistency over all binary constraints with AC-3.
///
/// For each binary constraint on `(L, R)` two arcs are seeded: `L -> R`
/// with the constraint as given and `R -> L` with its reversed form. Arcs
/// are revised from a FIFO worklist; when a revision shrinks `D(tail)`,
/// every arc `X -> tail` with `X != head` is re-enqueued (unless already
/// queued), since its support may have been removed.
///
/// Terminates because domains only shrink: a value removed is never
/// reconsidered, so the number of effective revisions is bounded by the
/// total domain size.
pub fn arc_consistency(
    domains: &mut [MeetingDomain],
    constraints: &[DateConstraint],
) -> PruneReport {
    let mut arcs = Vec::new();
    for constraint in constraints {
        let DateConstraint::Binary(binary) = constraint else {
            continue;
        };
        arcs.push(Arc {
            tail: binary.left,
            head: binary.right,
            constraint: *binary,
        });
        arcs.push(Arc {
            tail: binary.right,
            head: binary.left,
            constraint: binary.reversed(),
        });
    }
    debug!("arc consistency: {} arcs seeded", arcs.len());

    let mut queue: VecDeque<Arc> = arcs.iter().copied().collect();
    let mut pending: HashSet<Arc> = queue.iter().copied().collect();
    let mut report = PruneReport::default();

    while let Some(arc) = queue.pop_front() {
        let _ = pending.remove(&arc);
        report.revisions += 1;

        let removed = revise(domains, arc);
        if removed == 0 {
            continue;
        }
        report.removed_values += removed;

        for &other in &arcs {
            if other.head == arc.tail && other.tail != arc.head && !pending.contains(&other) {
                queue.push_back(other);
                let _ = pending.insert(other);
            }
        }
    }

    debug!(
        "arc consistency removed {} values in {} revisions",
        report.removed_values, report.revisions
    );
    report
}

/// Removes from `D(tail)` every value with no supporting value in
/// `D(head)` under the arc's constraint. Returns the number of values
/// removed.
fn revise(domains: &mut [MeetingDomain], arc: Arc) -> usize {
    trace!("revise({} -> {})", arc.tail, arc.head);

    // Snapshot the head domain so the tail can be filtered freely even
    // though both live in the same slice.
    let head: Vec<NaiveDate> = domains[arc.head].iter().collect();
    domains[arc.tail].retain(|value| head.iter().any(|&support| arc.constraint.holds(value, support)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::DateRelation;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("valid test date")
    }

    fn domains(n: usize, start: u32, end: u32) -> Vec<MeetingDomain> {
        (0..n)
            .map(|_| MeetingDomain::new(day(start), day(end)))
            .collect()
    }

    fn unary(meeting: usize, relation: DateRelation, date: NaiveDate) -> DateConstraint {
        DateConstraint::Unary(crate::constraint::UnaryDateConstraint::new(
            meeting, relation, date,
        ))
    }

    fn binary(left: usize, relation: DateRelation, right: usize) -> DateConstraint {
        DateConstraint::Binary(BinaryDateConstraint::new(left, relation, right))
    }

    #[test]
    fn test_node_consistency_pins_meeting() {
        let mut doms = domains(2, 1, 5);
        let constraints = vec![unary(0, DateRelation::Eq, day(3))];

        let removed = node_consistency(&mut doms, &constraints);

        assert_eq!(removed, 4);
        assert_eq!(doms[0].iter().collect::<Vec<_>>(), vec![day(3)]);
        assert_eq!(doms[1].len(), 5, "unconstrained domain must be untouched");
    }

    #[test]
    fn test_node_consistency_unions_exclusions_on_same_meeting() {
        let mut doms = domains(1, 1, 5);
        let constraints = vec![
            unary(0, DateRelation::Gt, day(1)),
            unary(0, DateRelation::Lt, day(4)),
        ];

        let _ = node_consistency(&mut doms, &constraints);

        assert_eq!(doms[0].iter().collect::<Vec<_>>(), vec![day(2), day(3)]);
    }

    #[test]
    fn test_node_consistency_ignores_binary() {
        let mut doms = domains(2, 1, 3);
        let constraints = vec![binary(0, DateRelation::Lt, 1)];

        let removed = node_consistency(&mut doms, &constraints);

        assert_eq!(removed, 0);
        assert_eq!(doms[0].len(), 3);
        assert_eq!(doms[1].len(), 3);
    }

    #[test]
    fn test_node_consistency_can_empty_domain() {
        let mut doms = domains(1, 1, 3);
        let constraints = vec![unary(0, DateRelation::Eq, day(10))];

        let removed = node_consistency(&mut doms, &constraints);

        assert_eq!(removed, 3);
        assert!(doms[0].is_empty());
    }

    #[test]
    fn test_arc_consistency_prunes_unsupported_endpoints() {
        // meeting 0 < meeting 1 over three days: day 3 has no successor,
        // day 1 has no predecessor.
        let mut doms = domains(2, 1, 3);
        let constraints = vec![binary(0, DateRelation::Lt, 1)];

        let report = arc_consistency(&mut doms, &constraints);

        assert_eq!(doms[0].iter().collect::<Vec<_>>(), vec![day(1), day(2)]);
        assert_eq!(doms[1].iter().collect::<Vec<_>>(), vec![day(2), day(3)]);
        assert_eq!(report.removed_values, 2);
    }

    #[test]
    fn test_arc_consistency_empties_on_single_day_inequality() {
        let mut doms = domains(2, 1, 1);
        let constraints = vec![binary(0, DateRelation::Ne, 1)];

        let report = arc_consistency(&mut doms, &constraints);

        assert!(doms[0].is_empty());
        assert!(doms[1].is_empty());
        assert_eq!(report.removed_values, 2);
    }

    #[test]
    fn test_arc_consistency_propagates_through_chain() {
        // 0 < 1 < 2 over three days forces each domain down to one date.
        let mut doms = domains(3, 1, 3);
        let constraints = vec![
            binary(0, DateRelation::Lt, 1),
            binary(1, DateRelation::Lt, 2),
        ];

        let _ = arc_consistency(&mut doms, &constraints);

        assert_eq!(doms[0].iter().collect::<Vec<_>>(), vec![day(1)]);
        assert_eq!(doms[1].iter().collect::<Vec<_>>(), vec![day(2)]);
        assert_eq!(doms[2].iter().collect::<Vec<_>>(), vec![day(3)]);
    }

    #[test]
    fn test_arc_consistency_ignores_unary() {
        let mut doms = domains(1, 1, 3);
        let constraints = vec![unary(0, DateRelation::Eq, day(2))];

        let report = arc_consistency(&mut doms, &constraints);

        assert_eq!(report.revisions, 0);
        assert_eq!(doms[0].len(), 3);
    }

    #[test]
    fn test_filters_are_idempotent() {
        let mut doms = domains(3, 1, 5);
        let constraints = vec![
            unary(0, DateRelation::Ge, day(2)),
            binary(0, DateRelation::Lt, 1),
            binary(1, DateRelation::Lt, 2),
        ];

        let _ = node_consistency(&mut doms, &constraints);
        let _ = arc_consistency(&mut doms, &constraints);
        let settled = doms.clone();

        let removed = node_consistency(&mut doms, &constraints);
        let report = arc_consistency(&mut doms, &constraints);

        assert_eq!(removed, 0);
        assert_eq!(report.removed_values, 0);
        assert_eq!(doms, settled);
    }

    #[test]
    fn test_fixpoint_leaves_every_value_supported() {
        let mut doms = domains(3, 1, 4);
        let constraints = vec![
            binary(0, DateRelation::Lt, 1),
            binary(1, DateRelation::Le, 2),
            binary(0, DateRelation::Ne, 2),
        ];

        let _ = arc_consistency(&mut doms, &constraints);

        for constraint in &constraints {
            let DateConstraint::Binary(b) = constraint else {
                continue;
            };
            for (arc_constraint, tail, head) in
                [(*b, b.left, b.right), (b.reversed(), b.right, b.left)]
            {
                for value in doms[tail].iter() {
                    assert!(
                        doms[head].iter().any(|w| arc_constraint.holds(value, w)),
                        "{value} in D({tail}) lacks support in D({head})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_domains_only_shrink() {
        let original = domains(2, 1, 6);
        let mut doms = original.clone();
        let constraints = vec![
            unary(0, DateRelation::Gt, day(2)),
            binary(0, DateRelation::Lt, 1),
        ];

        let _ = node_consistency(&mut doms, &constraints);
        let _ = arc_consistency(&mut doms, &constraints);

        for (filtered, initial) in doms.iter().zip(&original) {
            assert!(filtered.is_subset(initial));
        }
    }
}
