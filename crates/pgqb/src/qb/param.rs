//! Parameter storage using Arc for clone-friendly query builders.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly parameter wrapper using Arc.
///
/// Builders are plain values that get cloned on every fork, so bound values
/// are shared instead of copied.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_sql(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// The ordered argument list of one statement.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a pre-wrapped Param and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over the parameters in binding order.
    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(Param::as_sql).collect()
    }

    /// Consume the list into its parameters.
    pub fn into_vec(self) -> Vec<Param> {
        self.params
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// SQL `NULL` for condition methods: `where_equal("deleted_at", Null)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Null;

/// A value that may be absent.
///
/// Condition methods accept `IntoParam` so that an absent value can turn into
/// `IS NULL` instead of binding a NULL that never compares equal.
/// `Some("")` is a present value and is always bound.
pub trait IntoParam {
    fn into_param(self) -> Option<Param>;
}

impl IntoParam for Param {
    fn into_param(self) -> Option<Param> {
        Some(self)
    }
}

impl IntoParam for Null {
    fn into_param(self) -> Option<Param> {
        None
    }
}

impl<T: ToSql + Send + Sync + 'static> IntoParam for Option<T> {
    fn into_param(self) -> Option<Param> {
        self.map(Param::new)
    }
}

macro_rules! impl_into_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoParam for $ty {
                fn into_param(self) -> Option<Param> {
                    Some(Param::new(self))
                }
            }
        )*
    };
}

impl_into_param!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u32,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    uuid::Uuid,
    serde_json::Value,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::Local>,
    chrono::DateTime<chrono::FixedOffset>,
);

impl<T: serde::Serialize + fmt::Debug + Send + Sync + 'static> IntoParam
    for tokio_postgres::types::Json<T>
{
    fn into_param(self) -> Option<Param> {
        Some(Param::new(self))
    }
}
