//! Row mapping traits and utilities

use crate::error::{QbError, QbResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust value.
///
/// # Example
///
/// ```ignore
/// use pgqb::{FromRow, QbResult, RowExt};
///
/// struct Note {
///     id: i64,
///     title: String,
/// }
///
/// impl FromRow for Note {
///     fn from_row(row: &tokio_postgres::Row) -> QbResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             title: row.try_get_column("title")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> QbResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning `QbError::Decode` on failure
    fn try_get_column<T>(&self, column: &str) -> QbResult<T>
    where
        T: for<'a> FromSql<'a>;

    /// Try to get a value by position, returning `QbError::Decode` on failure
    fn try_get_index<T>(&self, idx: usize) -> QbResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> QbResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| QbError::decode(column, e.to_string()))
    }

    fn try_get_index<T>(&self, idx: usize) -> QbResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(idx)
            .map_err(|e| QbError::decode(format!("#{idx}"), e.to_string()))
    }
}

// Tuples map columns by position: `fetch_all::<(i64, String)>`.
macro_rules! impl_from_row_tuple {
    ($($idx:tt => $ty:ident),+) => {
        impl<$($ty),+> FromRow for ($($ty,)+)
        where
            $($ty: for<'a> FromSql<'a>,)+
        {
            fn from_row(row: &Row) -> QbResult<Self> {
                Ok(($(row.try_get_index::<$ty>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(0 => A);
impl_from_row_tuple!(0 => A, 1 => B);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
