//! INSERT query builder.

use crate::error::{BuildError, QbResult};
use crate::qb::QueryBuilder;
use crate::qb::clause::ClauseList;
use crate::qb::cte::Cte;
use crate::qb::param::Param;
use crate::qb::traits::{BuiltQuery, MutationQb, QueryQb, SqlQb, StatementKind};
use tokio_postgres::types::ToSql;

/// INSERT query builder.
///
/// Every listed column is bound, `None` included (it binds SQL NULL).
#[derive(Clone, Debug)]
pub struct InsertQb {
    root: QueryBuilder,
    values: ClauseList,
    returning_cols: Vec<String>,
}

impl InsertQb {
    pub(crate) fn new(root: QueryBuilder) -> Self {
        Self {
            root,
            values: ClauseList::new(),
            returning_cols: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn value<T: ToSql + Send + Sync + 'static>(self, column: &str, value: T) -> Self {
        self.value_param(column, Param::new(value))
    }

    /// Set a column to a pre-wrapped value.
    pub fn value_param(mut self, column: &str, value: Param) -> Self {
        self.values.add_value(column, value);
        self
    }

    /// Set several columns at once, in iteration order.
    pub fn values<'a>(self, values: impl IntoIterator<Item = (&'a str, Param)>) -> Self {
        values
            .into_iter()
            .fold(self, |qb, (column, value)| qb.value_param(column, value))
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.returning_cols = cols.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl SqlQb for InsertQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn ctes(&self) -> &[Cte] {
        self.root.ctes()
    }

    fn write_statement(&self, out: &mut BuiltQuery) -> QbResult<()> {
        let table = self.root.require_table(StatementKind::Insert)?;
        if self.values.is_empty() {
            return Err(BuildError::EmptyValues.into());
        }

        out.push("INSERT INTO ")
            .push(table)
            .push(" (")
            .push(&self.values.column_names().join(", "))
            .push(") VALUES (");
        self.values.write_values(out);
        out.push(")");

        if !self.returning_cols.is_empty() {
            out.push(" RETURNING ").push(&self.returning_cols.join(", "));
        }

        Ok(())
    }
}

impl QueryQb for InsertQb {}

impl MutationQb for InsertQb {}
