//! # pgqb
//!
//! A small PostgreSQL statement assembler with positional (`$n`) placeholders.
//!
//! ## Features
//!
//! - **Positional binding**: SQL text and argument list are produced in the same pass
//! - **Absent values**: `where_equal(col, Null)` becomes `col IS NULL`, not a bound NULL
//! - **Safe defaults**: UPDATE/DELETE without WHERE fail unless explicitly allowed
//! - **CTEs**: any builder can be a `WITH` body; numbering continues across bodies
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is expected
//!
//! ## Example
//!
//! ```ignore
//! use pgqb::prelude::*;
//!
//! let notes = pgqb::table("item_notes")
//!     .select(&["notes.id", "notes.title"])
//!     .left_join("notes", "noteId", "id")
//!     .where_equal("item_notes.itemId", item_id)
//!     .where_equal("notes.deletedAt", Null)
//!     .where_less_than_opt("notes.id", cursor)
//!     .order_by_desc("notes.id")
//!     .limit(20)
//!     .fetch_all::<(i64, String)>(&client)
//!     .await?;
//!
//! // WITH updated AS (UPDATE tags SET name = $1 WHERE id = $2 RETURNING *)
//! // SELECT * FROM updated
//! let renamed = pgqb::table("tags")
//!     .update()
//!     .set("name", "rust")
//!     .where_equal("id", 7_i64)
//!     .returning(&["*"]);
//! let row = QueryBuilder::new()
//!     .with_cte("updated", renamed)
//!     .select(&["*"])
//!     .from("updated")
//!     .query_one(&client)
//!     .await?;
//! ```
//!
//! Statements are logged through `tracing` under the `pgqb.sql` target.

pub mod client;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod qb;
pub mod row;

pub use client::GenericClient;
pub use error::{BuildError, QbError, QbResult};
pub use ident::Ident;
pub use row::{FromRow, RowExt};

pub use qb::{
    BuiltQuery, Clause, ClauseList, Comparator, Cte, DeleteQb, InsertQb, IntoParam,
    MutationPolicy, MutationQb, Null, Param, ParamList, QueryBuilder, QueryQb, SelectQb,
    SortDirection, SqlQb, StatementKind, UpdateQb, table,
};

pub use tokio_postgres::types::Json;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
