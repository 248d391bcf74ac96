//! Statement builders.
//!
//! A [`QueryBuilder`] is bound to a table and hands out one builder per
//! statement. Builders are values: every chained method consumes the builder
//! and returns the updated one, and forking is a `clone()`. Placeholder numbers
//! are never stored; they are assigned while rendering, in the same pass that
//! collects the arguments.
//!
//! # Usage
//!
//! ```ignore
//! use pgqb::prelude::*;
//!
//! let users = pgqb::table("users");
//!
//! // SELECT id, name FROM users WHERE deleted_at IS NULL AND age > $1 ORDER BY id DESC LIMIT 20
//! let rows = users
//!     .select(&["id", "name"])
//!     .where_equal("deleted_at", Null)
//!     .where_greater_than("age", 18_i32)
//!     .order_by_desc("id")
//!     .limit(20)
//!     .query(&client)
//!     .await?;
//!
//! // INSERT INTO users (name, age) VALUES ($1, $2) RETURNING id
//! let row = users
//!     .insert()
//!     .value("name", "John")
//!     .value("age", 30_i32)
//!     .returning(&["id"])
//!     .query_one(&client)
//!     .await?;
//!
//! // UPDATE users SET name = $1 WHERE id = $2
//! users.update().set("name", "Jane").where_equal("id", 1_i64).execute(&client).await?;
//!
//! // DELETE FROM users WHERE id = $1
//! users.delete().where_equal("id", 1_i64).execute(&client).await?;
//! ```

/// WHERE helpers shared by SELECT, UPDATE and DELETE builders.
macro_rules! impl_where_methods {
    () => {
        /// Add WHERE: column comparator value. See [`Clause::new`](crate::qb::Clause::new).
        pub fn where_clause(
            mut self,
            column: &str,
            value: impl crate::qb::IntoParam,
            comparator: crate::qb::Comparator,
        ) -> Self {
            self.conditions.add_condition(column, value, comparator);
            self
        }

        /// Add WHERE: column = value (`IS NULL` when the value is absent)
        pub fn where_equal(self, column: &str, value: impl crate::qb::IntoParam) -> Self {
            self.where_clause(column, value, crate::qb::Comparator::Equal)
        }

        /// Add WHERE: column < value (an absent value fails the build)
        pub fn where_less_than(self, column: &str, value: impl crate::qb::IntoParam) -> Self {
            self.where_clause(column, value, crate::qb::Comparator::LessThan)
        }

        /// Add WHERE: column > value (an absent value fails the build)
        pub fn where_greater_than(self, column: &str, value: impl crate::qb::IntoParam) -> Self {
            self.where_clause(column, value, crate::qb::Comparator::GreaterThan)
        }

        /// Add WHERE: column IS NULL
        pub fn where_null(self, column: &str) -> Self {
            self.where_clause(column, crate::qb::Null, crate::qb::Comparator::IsNull)
        }

        /// Add WHERE: column IS NOT NULL
        pub fn where_not_null(self, column: &str) -> Self {
            self.where_clause(column, crate::qb::Null, crate::qb::Comparator::IsNotNull)
        }
    };
}

mod clause;
mod cte;
mod delete;
mod insert;
mod param;
mod select;
mod traits;
mod update;

pub use clause::{Clause, ClauseList, Comparator};
pub use cte::Cte;
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use param::{IntoParam, Null, Param, ParamList};
pub use select::{ParseSortDirectionError, SelectQb, SortDirection};
pub use traits::{BuiltQuery, MutationQb, QueryQb, SqlQb, StatementKind};
pub use update::UpdateQb;

use crate::error::BuildError;

/// Whether UPDATE and DELETE may run without a WHERE clause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MutationPolicy {
    /// UPDATE/DELETE without conditions fail with [`BuildError::MissingWhere`].
    #[default]
    RequireWhere,
    /// Full-table UPDATE/DELETE are allowed.
    AllowUnconditional,
}

impl MutationPolicy {
    pub(crate) fn check(self, kind: StatementKind, conditions: &ClauseList) -> Result<(), BuildError> {
        if self == Self::RequireWhere && conditions.is_empty() {
            return Err(BuildError::MissingWhere(kind));
        }
        Ok(())
    }
}

/// Root builder: target table, registered CTEs and the mutation policy.
///
/// Statement builders snapshot this state; nothing flows back, so one root can
/// serve any number of independent statements.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    table: Option<String>,
    ctes: Vec<Cte>,
    policy: MutationPolicy,
}

impl QueryBuilder {
    /// Create a root builder with no table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base table.
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Register a named sub-query for every statement built from this root.
    pub fn with_cte(mut self, name: &str, query: impl SqlQb + 'static) -> Self {
        self.ctes.push(Cte::new(name, query));
        self
    }

    /// Allow UPDATE/DELETE without WHERE.
    pub fn allow_unconditional(self) -> Self {
        self.mutation_policy(MutationPolicy::AllowUnconditional)
    }

    /// Set the mutation policy.
    pub fn mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub(crate) fn policy(&self) -> MutationPolicy {
        self.policy
    }

    pub(crate) fn ctes(&self) -> &[Cte] {
        &self.ctes
    }

    /// Start a SELECT of `columns`.
    pub fn select(&self, columns: &[&str]) -> SelectQb {
        SelectQb::new(self.clone(), columns)
    }

    /// Start an INSERT.
    pub fn insert(&self) -> InsertQb {
        InsertQb::new(self.clone())
    }

    /// Start an UPDATE.
    pub fn update(&self) -> UpdateQb {
        UpdateQb::new(self.clone())
    }

    /// Start a DELETE.
    pub fn delete(&self) -> DeleteQb {
        DeleteQb::new(self.clone())
    }

    pub(crate) fn set_table(&mut self, table: &str) {
        self.table = Some(table.to_string());
    }

    pub(crate) fn set_policy(&mut self, policy: MutationPolicy) {
        self.policy = policy;
    }

    pub(crate) fn require_table(&self, kind: StatementKind) -> Result<&str, BuildError> {
        match self.table.as_deref() {
            Some(table) if !table.is_empty() => Ok(table),
            _ => Err(BuildError::MissingTable(kind)),
        }
    }
}

/// Create a root builder bound to `table`.
///
/// # Example
/// ```ignore
/// let users = pgqb::table("users");
/// let by_id = users.select(&["id", "name"]).where_equal("id", 1_i64);
/// ```
pub fn table(table: &str) -> QueryBuilder {
    QueryBuilder::new().table(table)
}

#[cfg(test)]
mod tests;
