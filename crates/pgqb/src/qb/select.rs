//! SELECT query builder.

use crate::error::{BuildError, QbResult};
use crate::qb::QueryBuilder;
use crate::qb::clause::ClauseList;
use crate::qb::cte::Cte;
use crate::qb::param::Param;
use crate::qb::traits::{BuiltQuery, QueryQb, SqlQb, StatementKind};
use std::fmt;
use std::str::FromStr;
use tokio_postgres::types::ToSql;

/// ORDER BY direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Error returned when a sort direction string is neither `asc` nor `desc`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort direction '{0}', expected 'asc' or 'desc'")]
pub struct ParseSortDirectionError(String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            d if d.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            d if d.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            other => Err(ParseSortDirectionError(other.to_string())),
        }
    }
}

/// `LEFT JOIN table ON base.local_key = table.foreign_key`
#[derive(Clone, Debug)]
struct LeftJoin {
    table: String,
    local_key: String,
    foreign_key: String,
}

/// SELECT query builder.
#[derive(Clone, Debug)]
pub struct SelectQb {
    root: QueryBuilder,
    /// SELECT columns
    columns: Vec<String>,
    join: Option<LeftJoin>,
    /// WHERE conditions
    conditions: ClauseList,
    order: Option<(String, SortDirection)>,
    limit: Option<u64>,
}

impl SelectQb {
    pub(crate) fn new(root: QueryBuilder, columns: &[&str]) -> Self {
        Self {
            root,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            join: None,
            conditions: ClauseList::new(),
            order: None,
            limit: None,
        }
    }

    /// Set (or replace) the table to select from.
    pub fn from(mut self, table: &str) -> Self {
        self.root.set_table(table);
        self
    }

    /// Add a LEFT JOIN: `LEFT JOIN table ON base.local_key = table.foreign_key`.
    ///
    /// Only one join is kept; a second call replaces the first.
    pub fn left_join(mut self, table: &str, local_key: &str, foreign_key: &str) -> Self {
        self.join = Some(LeftJoin {
            table: table.to_string(),
            local_key: local_key.to_string(),
            foreign_key: foreign_key.to_string(),
        });
        self
    }

    impl_where_methods!();

    /// Add WHERE: column < value, or nothing when `value` is `None`.
    ///
    /// For keyset pagination where the first page has no cursor.
    pub fn where_less_than_opt<T>(self, column: &str, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.where_less_than(column, Param::new(v)),
            None => self,
        }
    }

    /// Add WHERE: column > value, or nothing when `value` is `None`.
    pub fn where_greater_than_opt<T>(self, column: &str, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.where_greater_than(column, Param::new(v)),
            None => self,
        }
    }

    /// Set ORDER BY column and direction.
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    /// ORDER BY column ASC
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Asc)
    }

    /// ORDER BY column DESC
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Desc)
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }
}

impl SqlQb for SelectQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn ctes(&self) -> &[Cte] {
        self.root.ctes()
    }

    fn write_statement(&self, out: &mut BuiltQuery) -> QbResult<()> {
        let table = self.root.require_table(StatementKind::Select)?;
        self.conditions.validate()?;
        if self.columns.is_empty() {
            return Err(BuildError::EmptyColumns.into());
        }

        out.push("SELECT ")
            .push(&self.columns.join(", "))
            .push(" FROM ")
            .push(table);

        if let Some(join) = &self.join {
            out.push(" LEFT JOIN ")
                .push(&join.table)
                .push(" ON ")
                .push(table)
                .push(".")
                .push(&join.local_key)
                .push(" = ")
                .push(&join.table)
                .push(".")
                .push(&join.foreign_key);
        }

        self.conditions.write_conditions(out);

        if let Some((column, direction)) = &self.order {
            out.push(" ORDER BY ").push(column).push(" ").push(direction.as_sql());
        }

        if let Some(limit) = self.limit {
            out.push(" LIMIT ").push(&limit.to_string());
        }

        Ok(())
    }
}

impl QueryQb for SelectQb {}
