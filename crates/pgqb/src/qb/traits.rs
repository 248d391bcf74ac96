//! Trait definitions for statement builders.

use crate::client::GenericClient;
use crate::error::QbResult;
use crate::qb::cte::{Cte, write_with_clause};
use crate::qb::param::{Param, ParamList};
use crate::row::FromRow;
use std::fmt;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Kind of SQL statement a builder produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement text and its argument list, assembled in one pass.
///
/// Placeholder numbers are always `offset() + 1` at the time of the push, so a
/// fragment written after another one continues its numbering.
#[derive(Clone, Debug, Default)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: ParamList,
    base: usize,
}

impl BuiltQuery {
    /// Create an empty statement numbering from `$1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty fragment whose first placeholder is `$offset+1`.
    pub(crate) fn with_offset(offset: usize) -> Self {
        Self {
            base: offset,
            ..Self::default()
        }
    }

    /// Index of the last placeholder written (0 when none).
    pub fn offset(&self) -> usize {
        self.base + self.params.len()
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Bind a value and append its placeholder.
    pub fn push_bind(&mut self, param: Param) -> &mut Self {
        let idx = self.base + self.params.push_param(param);
        self.sql.push('$');
        self.sql.push_str(&idx.to_string());
        self
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }
}

/// Base trait for all statement builders.
///
/// Object safe, so any builder can be registered as a CTE body.
pub trait SqlQb: Send + Sync {
    /// Statement kind, used in errors and logs.
    fn kind(&self) -> StatementKind;

    /// CTEs registered for this statement.
    fn ctes(&self) -> &[Cte] {
        &[]
    }

    /// Validate and append the statement itself, without its `WITH` list.
    ///
    /// Placeholders continue from `out.offset()`.
    fn write_statement(&self, out: &mut BuiltQuery) -> QbResult<()>;

    /// Append the `WITH` list (CTEs of CTE bodies hoisted first) and the statement.
    fn write_sql(&self, out: &mut BuiltQuery) -> QbResult<()> {
        write_with_clause(self.ctes(), out)?;
        self.write_statement(out)
    }

    /// Build the full statement, numbering from `$1`.
    fn build(&self) -> QbResult<BuiltQuery> {
        let mut out = BuiltQuery::new();
        self.write_sql(&mut out)?;
        Ok(out)
    }

    /// Render the statement text.
    fn render(&self) -> QbResult<String> {
        Ok(self.build()?.sql)
    }

    /// Bound values in the order their placeholders appear.
    fn extract_parameters(&self) -> QbResult<Vec<Param>> {
        Ok(self.build()?.params.into_vec())
    }

    /// Debug helper: the SQL text, or the build error message.
    fn to_sql(&self) -> String {
        match self.render() {
            Ok(sql) => sql,
            Err(err) => format!("<{err}>"),
        }
    }
}

fn prepare<Q: SqlQb + ?Sized>(qb: &Q) -> QbResult<BuiltQuery> {
    match qb.build() {
        Ok(built) => {
            tracing::debug!(
                target: "pgqb.sql",
                statement = %qb.kind(),
                params = built.params.len(),
                sql = %built.sql,
                "executing statement"
            );
            Ok(built)
        }
        Err(err) => {
            tracing::warn!(
                target: "pgqb.sql",
                statement = %qb.kind(),
                error = %err,
                "statement rejected before execution"
            );
            Err(err)
        }
    }
}

/// Terminal methods that return rows.
pub trait QueryQb: SqlQb {
    /// Execute query and return all rows.
    fn query(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<Vec<Row>>> + Send {
        async move {
            let built = prepare(self)?;
            conn.query(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and return the first row (`QbError::NotFound` when empty).
    fn query_one(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<Row>> + Send {
        async move {
            let built = prepare(self)?;
            conn.query_one(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and return at most one row.
    fn query_opt(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<Option<Row>>> + Send {
        async move {
            let built = prepare(self)?;
            conn.query_opt(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and map all rows to `T`.
    fn fetch_all<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<Vec<T>>> + Send {
        async move {
            let rows = self.query(conn).await?;
            rows.iter().map(T::from_row).collect()
        }
    }

    /// Execute query and map the first row to `T`.
    fn fetch_one<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<T>> + Send {
        async move {
            let row = self.query_one(conn).await?;
            T::from_row(&row)
        }
    }

    /// Execute query and map at most one row to `T`.
    fn fetch_opt<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<Option<T>>> + Send {
        async move {
            let row = self.query_opt(conn).await?;
            row.as_ref().map(T::from_row).transpose()
        }
    }
}

/// Trait for mutation builders (INSERT/UPDATE/DELETE).
pub trait MutationQb: QueryQb {
    /// Execute and return affected row count.
    fn execute(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        async move {
            let built = prepare(self)?;
            conn.execute(&built.sql, &built.params_ref()).await
        }
    }
}
