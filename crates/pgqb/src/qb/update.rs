//! UPDATE query builder.

use crate::error::{BuildError, QbResult};
use crate::qb::clause::ClauseList;
use crate::qb::cte::Cte;
use crate::qb::param::Param;
use crate::qb::traits::{BuiltQuery, MutationQb, QueryQb, SqlQb, StatementKind};
use crate::qb::{MutationPolicy, QueryBuilder};
use tokio_postgres::types::ToSql;

/// UPDATE query builder.
///
/// SET takes the first block of placeholders and WHERE continues after it.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    root: QueryBuilder,
    /// SET clauses
    values: ClauseList,
    /// WHERE conditions
    conditions: ClauseList,
    returning_cols: Vec<String>,
}

impl UpdateQb {
    pub(crate) fn new(root: QueryBuilder) -> Self {
        Self {
            root,
            values: ClauseList::new(),
            conditions: ClauseList::new(),
            returning_cols: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn set<T: ToSql + Send + Sync + 'static>(self, column: &str, value: T) -> Self {
        self.set_param(column, Param::new(value))
    }

    /// Set a column to a pre-wrapped value.
    pub fn set_param(mut self, column: &str, value: Param) -> Self {
        self.values.add_value(column, value);
        self
    }

    /// Set several columns at once, in iteration order.
    pub fn set_values<'a>(self, values: impl IntoIterator<Item = (&'a str, Param)>) -> Self {
        values
            .into_iter()
            .fold(self, |qb, (column, value)| qb.set_param(column, value))
    }

    impl_where_methods!();

    /// Allow this UPDATE to run without WHERE (updates every row).
    pub fn allow_unconditional(mut self) -> Self {
        self.root.set_policy(MutationPolicy::AllowUnconditional);
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.returning_cols = cols.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl SqlQb for UpdateQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn ctes(&self) -> &[Cte] {
        self.root.ctes()
    }

    fn write_statement(&self, out: &mut BuiltQuery) -> QbResult<()> {
        let table = self.root.require_table(StatementKind::Update)?;
        self.conditions.validate()?;
        if self.values.is_empty() {
            return Err(BuildError::EmptySet.into());
        }
        self.root
            .policy()
            .check(StatementKind::Update, &self.conditions)?;

        out.push("UPDATE ").push(table).push(" SET ");
        self.values.write_assignments(out);
        self.conditions.write_conditions(out);

        if !self.returning_cols.is_empty() {
            out.push(" RETURNING ").push(&self.returning_cols.join(", "));
        }

        Ok(())
    }
}

impl QueryQb for UpdateQb {}

impl MutationQb for UpdateQb {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::{Comparator, Null, table};

    fn debug_params(qb: &UpdateQb) -> Vec<String> {
        qb.extract_parameters()
            .unwrap()
            .iter()
            .map(|p| format!("{p:?}"))
            .collect()
    }

    #[test]
    fn test_simple_update() {
        let qb = table("users").update().set("name", "John").where_equal("id", 1_i64);
        assert_eq!(qb.render().unwrap(), "UPDATE users SET name = $1 WHERE id = $2");
        assert_eq!(debug_params(&qb), ["\"John\"", "1"]);
    }

    #[test]
    fn test_update_where_continues_after_set() {
        let qb = table("users")
            .update()
            .set("name", "John")
            .set("age", 31_i32)
            .set("bio", "")
            .where_equal("id", 1_i64)
            .where_equal("deleted_at", Null)
            .where_less_than("version", 5_i32);

        assert_eq!(
            qb.render().unwrap(),
            "UPDATE users SET name = $1, age = $2, bio = $3 \
             WHERE id = $4 AND deleted_at IS NULL AND version < $5"
        );
        assert_eq!(debug_params(&qb), ["\"John\"", "31", "\"\"", "1", "5"]);
    }

    #[test]
    fn test_update_with_returning() {
        let qb = table("users")
            .update()
            .set("name", "John")
            .where_equal("id", 1_i64)
            .returning(&["id", "updated_at"]);
        assert_eq!(
            qb.render().unwrap(),
            "UPDATE users SET name = $1 WHERE id = $2 RETURNING id, updated_at"
        );
    }

    #[test]
    fn test_update_without_where_fails_by_default() {
        let err = table("users").update().set("name", "John").build().unwrap_err();
        assert_eq!(
            err.as_build_error(),
            Some(&BuildError::MissingWhere(StatementKind::Update))
        );
    }

    #[test]
    fn test_update_without_where_when_allowed() {
        let qb = table("users")
            .update()
            .set("status", "archived")
            .allow_unconditional()
            .returning(&["id"]);
        assert_eq!(
            qb.render().unwrap(),
            "UPDATE users SET status = $1 RETURNING id"
        );

        let root = table("users").allow_unconditional();
        assert!(root.update().set("status", "archived").build().is_ok());
    }

    #[test]
    fn test_absent_range_value_never_widens_update() {
        let cutoff: Option<i64> = None;
        let err = table("notes")
            .update()
            .set("archived", true)
            .where_equal("owner_id", 1_i64)
            .where_less_than("created_at", cutoff)
            .build()
            .unwrap_err();
        assert_eq!(
            err.as_build_error(),
            Some(&BuildError::MissingValue {
                column: "created_at".to_string(),
                comparator: Comparator::LessThan,
            })
        );

        let err = table("notes")
            .update()
            .set("archived", true)
            .allow_unconditional()
            .where_greater_than("created_at", cutoff)
            .build()
            .unwrap_err();
        assert!(matches!(err.as_build_error(), Some(BuildError::MissingValue { .. })));
    }

    #[test]
    fn test_update_requires_set_and_table() {
        let err = table("users").update().where_equal("id", 1_i64).build().unwrap_err();
        assert_eq!(err.as_build_error(), Some(&BuildError::EmptySet));

        let err = QueryBuilder::new()
            .update()
            .set("name", "John")
            .where_equal("id", 1_i64)
            .build()
            .unwrap_err();
        assert_eq!(
            err.as_build_error(),
            Some(&BuildError::MissingTable(StatementKind::Update))
        );
    }
}
