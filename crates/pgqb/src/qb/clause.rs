//! Column/comparator/value triples and ordered clause sequences.
//!
//! A [`ClauseList`] is walked exactly once per render: each placeholder-consuming
//! clause pushes its value and emits `$n` in the same step, so the text and the
//! argument list can never drift apart.

use crate::error::BuildError;
use crate::qb::param::{IntoParam, Param};
use crate::qb::traits::BuiltQuery;

/// Comparison operator of a [`Clause`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `column = $n`
    Equal,
    /// `column < $n`
    LessThan,
    /// `column > $n`
    GreaterThan,
    /// `column IS NULL`
    IsNull,
    /// `column IS NOT NULL`
    IsNotNull,
}

impl Comparator {
    /// Whether this comparator consumes a placeholder.
    pub fn binds_value(self) -> bool {
        matches!(self, Self::Equal | Self::LessThan | Self::GreaterThan)
    }

    /// SQL operator text.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

/// A single column/comparator/value triple.
///
/// `Equal`, `LessThan` and `GreaterThan` always carry a value; `IsNull` and
/// `IsNotNull` never do.
#[derive(Clone, Debug)]
pub struct Clause {
    column: String,
    comparator: Comparator,
    value: Option<Param>,
}

impl Clause {
    /// Build a clause, normalizing absent values.
    ///
    /// - `Equal` with no value becomes `IsNull`.
    /// - `LessThan` / `GreaterThan` with no value yields `None`; there is no
    ///   clause to build.
    /// - `IsNull` / `IsNotNull` drop any value passed in.
    pub fn new(column: &str, value: Option<Param>, comparator: Comparator) -> Option<Self> {
        let (comparator, value) = match (comparator, value) {
            (Comparator::Equal, None) => (Comparator::IsNull, None),
            (Comparator::LessThan | Comparator::GreaterThan, None) => return None,
            (c @ (Comparator::IsNull | Comparator::IsNotNull), _) => (c, None),
            (c, Some(v)) => (c, Some(v)),
        };
        Some(Self {
            column: column.to_string(),
            comparator,
            value,
        })
    }

    /// `column = value`, always bound (SET / VALUES entries).
    pub fn assign(column: &str, value: Param) -> Self {
        Self {
            column: column.to_string(),
            comparator: Comparator::Equal,
            value: Some(value),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn value(&self) -> Option<&Param> {
        self.value.as_ref()
    }

    fn write_comparison(&self, out: &mut BuiltQuery) {
        out.push(&self.column).push(" ").push(self.comparator.as_sql());
        if let Some(value) = &self.value {
            out.push(" ").push_bind(value.clone());
        }
    }
}

/// An ordered sequence of clauses.
///
/// Order is significant: it decides both the emitted text and the placeholder
/// each value is bound to.
#[derive(Clone, Debug, Default)]
pub struct ClauseList {
    clauses: Vec<Clause>,
    /// First range condition added without a value.
    rejected: Option<BuildError>,
}

impl ClauseList {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            rejected: None,
        }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Append a condition. See [`Clause::new`] for how absent values are handled.
    ///
    /// A `<` / `>` condition without a value is recorded and reported by
    /// [`validate`](Self::validate).
    pub fn add_condition(&mut self, column: &str, value: impl IntoParam, comparator: Comparator) {
        match Clause::new(column, value.into_param(), comparator) {
            Some(clause) => self.clauses.push(clause),
            None => {
                self.rejected.get_or_insert(BuildError::MissingValue {
                    column: column.to_string(),
                    comparator,
                });
            }
        }
    }

    /// Fail if a condition was added without the value it needs.
    pub fn validate(&self) -> Result<(), BuildError> {
        match &self.rejected {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Append a bound `column = value` entry.
    pub fn add_value(&mut self, column: &str, value: Param) {
        self.clauses.push(Clause::assign(column, value));
    }

    /// Number of placeholders this sequence consumes.
    pub fn placeholder_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.value.is_some()).count()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.clauses.iter().map(Clause::column).collect()
    }

    /// Bound values in render order.
    pub fn extract_parameters(&self) -> Vec<Param> {
        self.clauses
            .iter()
            .filter_map(|c| c.value.clone())
            .collect()
    }

    /// ` WHERE c1 = $n AND c2 IS NULL ...`, numbering from `offset + 1`.
    ///
    /// Empty when there are no clauses.
    pub fn render_conditions(&self, offset: usize) -> String {
        let mut out = BuiltQuery::with_offset(offset);
        self.write_conditions(&mut out);
        out.sql
    }

    /// `c1 = $n, c2 = $n+1`, numbering from `offset + 1`.
    pub fn render_assignments(&self, offset: usize) -> String {
        let mut out = BuiltQuery::with_offset(offset);
        self.write_assignments(&mut out);
        out.sql
    }

    /// `$n, $n+1`, numbering from `offset + 1`.
    pub fn render_values(&self, offset: usize) -> String {
        let mut out = BuiltQuery::with_offset(offset);
        self.write_values(&mut out);
        out.sql
    }

    pub(crate) fn write_conditions(&self, out: &mut BuiltQuery) {
        for (i, clause) in self.clauses.iter().enumerate() {
            out.push(if i == 0 { " WHERE " } else { " AND " });
            clause.write_comparison(out);
        }
    }

    pub(crate) fn write_assignments(&self, out: &mut BuiltQuery) {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            clause.write_comparison(out);
        }
    }

    pub(crate) fn write_values(&self, out: &mut BuiltQuery) {
        let mut first = true;
        for value in self.clauses.iter().filter_map(Clause::value) {
            if !first {
                out.push(", ");
            }
            first = false;
            out.push_bind(value.clone());
        }
    }
}
