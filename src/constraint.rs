//! Date relations and the unary/binary constraint representation.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A comparison relation between two dates.
///
/// Relations are written with the constrained meeting on the left, so a
/// unary constraint `meeting 2 < 2024-05-01` uses [`DateRelation::Lt`] and
/// a binary constraint `meeting 0 >= meeting 1` uses [`DateRelation::Ge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRelation {
    /// Left equals right.
    Eq,
    /// Left differs from right.
    Ne,
    /// Left is strictly before right.
    Lt,
    /// Left is strictly after right.
    Gt,
    /// Left is on or before right.
    Le,
    /// Left is on or after right.
    Ge,
}

impl DateRelation {
    /// Evaluates the relation for a concrete pair of dates.
    pub fn holds(self, left: NaiveDate, right: NaiveDate) -> bool {
        match self {
            DateRelation::Eq => left == right,
            DateRelation::Ne => left != right,
            DateRelation::Lt => left < right,
            DateRelation::Gt => left > right,
            DateRelation::Le => left <= right,
            DateRelation::Ge => left >= right,
        }
    }

    /// The mirror relation obtained by swapping the two operands.
    ///
    /// For all dates `a` and `b`: `rel.holds(a, b) == rel.flipped().holds(b, a)`.
    pub fn flipped(self) -> Self {
        match self {
            DateRelation::Eq => DateRelation::Eq,
            DateRelation::Ne => DateRelation::Ne,
            DateRelation::Lt => DateRelation::Gt,
            DateRelation::Gt => DateRelation::Lt,
            DateRelation::Le => DateRelation::Ge,
            DateRelation::Ge => DateRelation::Le,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            DateRelation::Eq => "==",
            DateRelation::Ne => "!=",
            DateRelation::Lt => "<",
            DateRelation::Gt => ">",
            DateRelation::Le => "<=",
            DateRelation::Ge => ">=",
        }
    }
}

impl fmt::Display for DateRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown relation operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown date relation operator: {0:?}")]
pub struct ParseRelationError(pub String);

impl FromStr for DateRelation {
    type Err = ParseRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(DateRelation::Eq),
            "!=" => Ok(DateRelation::Ne),
            "<" => Ok(DateRelation::Lt),
            ">" => Ok(DateRelation::Gt),
            "<=" => Ok(DateRelation::Le),
            ">=" => Ok(DateRelation::Ge),
            other => Err(ParseRelationError(other.to_owned())),
        }
    }
}

/// A constraint anchored on a single meeting, relating its date to a fixed
/// reference date: `date(meeting) REL reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnaryDateConstraint {
    /// Index of the constrained meeting.
    pub meeting: usize,
    /// Relation between the meeting's date and the reference date.
    pub relation: DateRelation,
    /// The fixed reference date.
    pub date: NaiveDate,
}

impl UnaryDateConstraint {
    pub fn new(meeting: usize, relation: DateRelation, date: NaiveDate) -> Self {
        Self {
            meeting,
            relation,
            date,
        }
    }

    /// Whether `candidate` is an acceptable date for the constrained
    /// meeting. The reference date is supplied by the constraint itself.
    pub fn holds(&self, candidate: NaiveDate) -> bool {
        self.relation.holds(candidate, self.date)
    }
}

impl fmt::Display for UnaryDateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meeting {} {} {}", self.meeting, self.relation, self.date)
    }
}

/// A constraint relating the dates of two meetings:
/// `date(left) REL date(right)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryDateConstraint {
    /// Index of the left-hand meeting.
    pub left: usize,
    /// Relation between the two meetings' dates.
    pub relation: DateRelation,
    /// Index of the right-hand meeting.
    pub right: usize,
}

impl BinaryDateConstraint {
    pub fn new(left: usize, relation: DateRelation, right: usize) -> Self {
        Self {
            left,
            relation,
            right,
        }
    }

    /// Whether the pair `(left_date, right_date)` satisfies the relation.
    pub fn holds(&self, left_date: NaiveDate, right_date: NaiveDate) -> bool {
        self.relation.holds(left_date, right_date)
    }

    /// The same constraint seen from the other side: operands swapped and
    /// the relation mirrored, so that for all dates `a` and `b`:
    /// `c.holds(a, b) == c.reversed().holds(b, a)`.
    ///
    /// Used to build reverse arcs during arc-consistency filtering.
    pub fn reversed(&self) -> Self {
        Self {
            left: self.right,
            relation: self.relation.flipped(),
            right: self.left,
        }
    }
}

impl fmt::Display for BinaryDateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meeting {} {} meeting {}",
            self.left, self.relation, self.right
        )
    }
}

/// A constraint on meeting dates, either unary or binary.
///
/// Constraints are immutable values; the solver only reads them. The two
/// payload shapes are dispatched by pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateConstraint {
    /// One meeting against a fixed reference date.
    Unary(UnaryDateConstraint),
    /// Two meetings against each other.
    Binary(BinaryDateConstraint),
}

impl DateConstraint {
    /// Number of meeting variables the constraint mentions: 1 or 2.
    pub fn arity(&self) -> usize {
        match self {
            DateConstraint::Unary(_) => 1,
            DateConstraint::Binary(_) => 2,
        }
    }

    /// Index of the meeting the constraint is anchored on (the left
    /// operand).
    pub fn left(&self) -> usize {
        match self {
            DateConstraint::Unary(unary) => unary.meeting,
            DateConstraint::Binary(binary) => binary.left,
        }
    }

    /// The operand indices: the anchor and, for binary constraints, the
    /// right-hand meeting.
    pub fn meetings(&self) -> (usize, Option<usize>) {
        match self {
            DateConstraint::Unary(unary) => (unary.meeting, None),
            DateConstraint::Binary(binary) => (binary.left, Some(binary.right)),
        }
    }
}

impl fmt::Display for DateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateConstraint::Unary(unary) => unary.fmt(f),
            DateConstraint::Binary(binary) => binary.fmt(f),
        }
    }
}
