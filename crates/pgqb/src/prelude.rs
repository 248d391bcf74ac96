//! Convenient imports for typical `pgqb` usage.
//!
//! ```ignore
//! use pgqb::prelude::*;
//! ```

pub use crate::{
    Comparator, FromRow, GenericClient, MutationQb, Null, QbError, QbResult, QueryBuilder,
    QueryQb, RowExt, SortDirection, SqlQb, table,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
