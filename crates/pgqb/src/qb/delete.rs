//! DELETE query builder.

use crate::error::QbResult;
use crate::qb::clause::ClauseList;
use crate::qb::cte::Cte;
use crate::qb::traits::{BuiltQuery, MutationQb, QueryQb, SqlQb, StatementKind};
use crate::qb::{MutationPolicy, QueryBuilder};

/// DELETE query builder.
///
/// Without WHERE conditions the statement fails to build unless
/// [`allow_unconditional`](Self::allow_unconditional) was called.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    root: QueryBuilder,
    /// WHERE conditions
    conditions: ClauseList,
    returning_cols: Vec<String>,
}

impl DeleteQb {
    pub(crate) fn new(root: QueryBuilder) -> Self {
        Self {
            root,
            conditions: ClauseList::new(),
            returning_cols: Vec::new(),
        }
    }

    impl_where_methods!();

    /// Allow this DELETE to run without WHERE (deletes every row).
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

impl SqlQb for DeleteQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn ctes(&self) -> &[Cte] {
        self.root.ctes()
    }

    fn write_statement(&self, out: &mut BuiltQuery) -> QbResult<()> {
        let table = self.root.require_table(StatementKind::Delete)?;
        self.conditions.validate()?;
        self.root
            .policy()
            .check(StatementKind::Delete, &self.conditions)?;

        out.push("DELETE FROM ").push(table);
        self.conditions.write_conditions(out);

        if !self.returning_cols.is_empty() {
            out.push(" RETURNING ").push(&self.returning_cols.join(", "));
        }

        Ok(())
    }
}

impl QueryQb for DeleteQb {}

impl MutationQb for DeleteQb {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::qb::{Null, table};

    #[test]
    fn test_simple_delete() {
        let qb = table("users").delete().where_equal("id", 1_i64);
        let built = qb.build().unwrap();
        assert_eq!(built.sql, "DELETE FROM users WHERE id = $1");
        assert_eq!(built.params.len(), 1);
    }

    #[test]
    fn test_delete_mixed_conditions() {
        let qb = table("tag_items")
            .delete()
            .where_equal("tagId", 4_i64)
            .where_not_null("itemId")
            .where_equal("itemType", "note")
            .returning(&["itemId"]);
        assert_eq!(
            qb.render().unwrap(),
            "DELETE FROM tag_items WHERE tagId = $1 AND itemId IS NOT NULL AND itemType = $2 RETURNING itemId"
        );
    }

    #[test]
    fn test_delete_requires_where() {
        let err = table("users").delete().build().unwrap_err();
        assert_eq!(
            err.as_build_error(),
            Some(&BuildError::MissingWhere(StatementKind::Delete))
        );
    }

    #[test]
    fn test_null_only_condition_counts_as_where() {
        let qb = table("sessions").delete().where_equal("user_id", Null);
        assert_eq!(qb.render().unwrap(), "DELETE FROM sessions WHERE user_id IS NULL");
    }

    #[test]
    fn test_delete_all_when_allowed() {
        let qb = table("sessions").delete().allow_unconditional();
        assert_eq!(qb.render().unwrap(), "DELETE FROM sessions");
    }

    #[test]
    fn test_absent_range_value_never_widens_delete() {
        let err = table("sessions")
            .delete()
            .allow_unconditional()
            .where_less_than("expires_at", Null)
            .build()
            .unwrap_err();
        assert!(matches!(err.as_build_error(), Some(BuildError::MissingValue { .. })));
    }

    #[test]
    fn test_delete_requires_table() {
        let err = QueryBuilder::new()
            .delete()
            .where_equal("id", 1_i64)
            .build()
            .unwrap_err();
        assert_eq!(
            err.as_build_error(),
            Some(&BuildError::MissingTable(StatementKind::Delete))
        );
    }
}
