//! CTE (WITH clause) composition.
//!
//! Any statement builder can be registered as a named sub-query on a
//! [`QueryBuilder`](crate::qb::QueryBuilder). Every statement built from that
//! root then starts with a single `WITH` followed by the comma-separated bodies,
//! and the bodies' parameters come first in the argument list.
//!
//! # Example
//! ```ignore
//! let updated = pgqb::table("users")
//!     .update()
//!     .set("name", "John")
//!     .where_equal("id", 3_i64)
//!     .returning(&["*"]);
//!
//! let row = pgqb::table("updated_user")
//!     .with_cte("updated_user", updated)
//!     .select(&["updated_user.updatedAt"])
//!     .query_one(&client)
//!     .await?;
//! ```

use crate::error::{BuildError, QbResult};
use crate::ident::Ident;
use crate::qb::traits::{BuiltQuery, SqlQb};
use std::fmt;
use std::sync::Arc;

/// A named sub-query.
#[derive(Clone)]
pub struct Cte {
    name: String,
    query: Arc<dyn SqlQb>,
}

impl Cte {
    pub fn new(name: &str, query: impl SqlQb + 'static) -> Self {
        Self {
            name: name.to_string(),
            query: Arc::new(query),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &dyn SqlQb {
        &*self.query
    }
}

impl fmt::Debug for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cte")
            .field("name", &self.name)
            .field("kind", &self.query.kind())
            .finish()
    }
}

/// Write `WITH a AS (...), b AS (...) ` (nothing when `ctes` is empty).
///
/// PostgreSQL only accepts data-modifying CTEs at the top level, so CTEs of a
/// CTE body are hoisted into the same list, ahead of the body that uses them.
/// Placeholders follow the order the bodies are written in.
pub(crate) fn write_with_clause(ctes: &[Cte], out: &mut BuiltQuery) -> QbResult<()> {
    let mut flat = Vec::new();
    hoist(ctes, &mut flat);
    if flat.is_empty() {
        return Ok(());
    }

    out.push("WITH ");
    for (i, cte) in flat.iter().enumerate() {
        if flat[..i].iter().any(|prev| prev.name == cte.name) {
            return Err(BuildError::DuplicateCte(cte.name.clone()).into());
        }
        if i > 0 {
            out.push(", ");
        }
        let ident = Ident::parse(&cte.name)?;
        out.push(&ident.to_sql()).push(" AS (");
        cte.query.write_statement(out)?;
        out.push(")");
    }
    out.push(" ");

    Ok(())
}

fn hoist<'a>(ctes: &'a [Cte], flat: &mut Vec<&'a Cte>) {
    for cte in ctes {
        hoist(cte.query.ctes(), flat);
        flat.push(cte);
    }
}
