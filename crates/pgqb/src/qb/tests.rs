//! Cross-builder tests for the qb module.

use crate::error::BuildError;
use crate::qb::{
    Comparator, MutationPolicy, Null, Param, QueryBuilder, SqlQb, StatementKind, table,
};

fn debug_params(qb: &impl SqlQb) -> Vec<String> {
    qb.extract_parameters()
        .unwrap()
        .iter()
        .map(|p| format!("{p:?}"))
        .collect()
}

#[test]
fn test_select_basic() {
    let qb = QueryBuilder::new().select(&["id", "name"]).from("users");
    let built = qb.build().unwrap();
    assert_eq!(built.sql, "SELECT id, name FROM users");
    assert!(built.params.is_empty());
}

#[test]
fn test_null_condition_in_any_position() {
    let orders = [
        (true, "SELECT id FROM users WHERE deleted_at IS NULL AND age = $1"),
        (false, "SELECT id FROM users WHERE age = $1 AND deleted_at IS NULL"),
    ];
    for (null_first, expected) in orders {
        let mut qb = table("users").select(&["id"]);
        if null_first {
            qb = qb.where_equal("deleted_at", Null).where_equal("age", 30_i32);
        } else {
            qb = qb.where_equal("age", 30_i32).where_equal("deleted_at", Null);
        }
        assert_eq!(qb.render().unwrap(), expected);
        assert_eq!(debug_params(&qb), ["30"]);
    }
}

#[test]
fn test_insert_returning() {
    let qb = table("users")
        .insert()
        .value("name", "John")
        .value("age", 30_i32)
        .returning(&["id", "created_at"]);
    assert_eq!(
        qb.render().unwrap(),
        "INSERT INTO users (name, age) VALUES ($1, $2) RETURNING id, created_at"
    );
    assert_eq!(debug_params(&qb), ["\"John\"", "30"]);
}

#[test]
fn test_update_set_and_where_never_collide() {
    let qb = table("users").update().set("name", "John").where_equal("id", 1_i64);
    assert_eq!(qb.render().unwrap(), "UPDATE users SET name = $1 WHERE id = $2");
    assert_eq!(debug_params(&qb), ["\"John\"", "1"]);

    let qb = table("users")
        .update()
        .set("a", 1_i32)
        .set("b", 2_i32)
        .set("c", 3_i32)
        .where_equal("x", 4_i32)
        .where_greater_than("y", 5_i32);
    assert_eq!(
        qb.render().unwrap(),
        "UPDATE users SET a = $1, b = $2, c = $3 WHERE x = $4 AND y > $5"
    );
}

#[test]
fn test_delete_without_where_issues_no_sql() {
    let qb = table("users").delete();
    let err = qb.build().unwrap_err();
    assert_eq!(
        err.as_build_error(),
        Some(&BuildError::MissingWhere(StatementKind::Delete))
    );
    assert!(qb.to_sql().starts_with("<Build error"));
}

#[test]
fn test_cte_update_into_select() {
    let updated = table("users")
        .update()
        .set("name", "John")
        .where_equal("id", 3_i64)
        .returning(&["*"]);

    let qb = QueryBuilder::new()
        .with_cte("updated_user", updated)
        .select(&["updated_user.updatedAt"])
        .from("updated_user")
        .where_greater_than("updated_user.version", 2_i32);

    assert_eq!(
        qb.render().unwrap(),
        "WITH updated_user AS (UPDATE users SET name = $1 WHERE id = $2 RETURNING *) \
         SELECT updated_user.updatedAt FROM updated_user WHERE updated_user.version > $3"
    );
    assert_eq!(debug_params(&qb), ["\"John\"", "3", "2"]);
}

#[test]
fn test_independent_statements_from_one_root() {
    let users = table("users");

    let first = users.update().set("name", "John").where_equal("id", 1_i64);
    let second = users.select(&["id"]).where_equal("name", "Jane");
    let third = users.delete().where_equal("id", 2_i64);

    assert_eq!(first.render().unwrap(), "UPDATE users SET name = $1 WHERE id = $2");
    assert_eq!(second.render().unwrap(), "SELECT id FROM users WHERE name = $1");
    assert_eq!(third.render().unwrap(), "DELETE FROM users WHERE id = $1");

    // Rendering twice gives the same numbering.
    assert_eq!(first.render().unwrap(), first.render().unwrap());
}

#[test]
fn test_forked_builders_are_independent() {
    let base = table("notes")
        .select(&["id", "title"])
        .where_equal("deletedAt", Null);

    let mine = base.clone().where_equal("ownerId", 5_i64);
    let recent = base.clone().where_greater_than("id", 100_i64).limit(5);

    assert_eq!(
        base.render().unwrap(),
        "SELECT id, title FROM notes WHERE deletedAt IS NULL"
    );
    assert_eq!(
        mine.render().unwrap(),
        "SELECT id, title FROM notes WHERE deletedAt IS NULL AND ownerId = $1"
    );
    assert_eq!(
        recent.render().unwrap(),
        "SELECT id, title FROM notes WHERE deletedAt IS NULL AND id > $1 LIMIT 5"
    );
}

#[test]
fn test_empty_string_is_bound_everywhere() {
    let select = table("companies").select(&["id"]).where_equal("name", "");
    assert_eq!(select.render().unwrap(), "SELECT id FROM companies WHERE name = $1");
    assert_eq!(debug_params(&select), ["\"\""]);

    let update = table("companies")
        .update()
        .set("description", String::new())
        .where_equal("icon", "");
    assert_eq!(
        update.render().unwrap(),
        "UPDATE companies SET description = $1 WHERE icon = $2"
    );
    assert_eq!(debug_params(&update), ["\"\"", "\"\""]);

    let absent: Option<String> = None;
    let select = table("companies").select(&["id"]).where_equal("name", absent);
    assert_eq!(select.render().unwrap(), "SELECT id FROM companies WHERE name IS NULL");
}

#[test]
fn test_root_policy_covers_update_and_delete() {
    let root = table("sessions").mutation_policy(MutationPolicy::AllowUnconditional);
    assert_eq!(root.delete().render().unwrap(), "DELETE FROM sessions");
    assert_eq!(
        root.update().set("expired", true).render().unwrap(),
        "UPDATE sessions SET expired = $1"
    );

    let strict = table("sessions");
    assert!(strict.delete().build().is_err());
    assert!(strict.update().set("expired", true).build().is_err());
}

#[test]
fn test_where_clause_with_explicit_comparator() {
    let qb = table("tasks")
        .select(&["id"])
        .where_clause("priority", 3_i32, Comparator::GreaterThan)
        .where_clause("doneAt", Null, Comparator::IsNotNull)
        .where_clause("startedAt", Param::new(Option::<i64>::None), Comparator::Equal);
    assert_eq!(
        qb.render().unwrap(),
        "SELECT id FROM tasks WHERE priority > $1 AND doneAt IS NOT NULL AND startedAt = $2"
    );
}

#[test]
fn test_cte_bodies_then_outer_insert() {
    let source = table("drafts")
        .select(&["title"])
        .where_equal("authorId", 9_i64);
    let qb = QueryBuilder::new()
        .table("notes")
        .with_cte("src", source)
        .insert()
        .value("title", "x")
        .returning(&["id"]);

    assert_eq!(
        qb.render().unwrap(),
        "WITH src AS (SELECT title FROM drafts WHERE authorId = $1) \
         INSERT INTO notes (title) VALUES ($2) RETURNING id"
    );
}
