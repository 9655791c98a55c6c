//! Parameterized SQL fragment builders.
//!
//! Two builders live here:
//!
//! - [`build_set_clause`] turns a partial-update payload into the body of an
//!   `UPDATE ... SET` statement.
//! - [`build_filter_clause`] turns a search payload into the body of a
//!   `WHERE` clause, driven by a per-entity table of [`FilterDef`]s.
//!
//! Both return a [`SqlFragment`]: clause text using positional `$n`
//! placeholders plus the values to bind, in placeholder order.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Values and fragments
// ---------------------------------------------------------------------------

/// A scalar that can be bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Clause text paired with its ordered bound parameters.
///
/// The clause references exactly `values.len()` placeholders, numbered
/// `$1..=$n` without gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub values: Vec<SqlValue>,
}

impl SqlFragment {
    /// `true` when the fragment contributes no SQL at all.
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Index of the first placeholder a caller may append after this fragment.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Logical field name -> new value, in the order the caller supplied them.
pub type UpdatePayload = IndexMap<String, SqlValue>;

/// Filter key -> filter value, in the order the caller supplied them.
pub type FilterPayload = IndexMap<String, SqlValue>;

/// Logical field name -> physical column name.
pub type FieldTranslation<'a> = &'a [(&'a str, &'a str)];

// ---------------------------------------------------------------------------
// SET clause
// ---------------------------------------------------------------------------

/// Build the `SET` list of a partial update.
///
/// ```
/// use jobly_core::sql::{build_set_clause, SqlValue, UpdatePayload};
///
/// let mut payload = UpdatePayload::new();
/// payload.insert("numEmployees".into(), SqlValue::Int(12));
/// payload.insert("name".into(), SqlValue::Text("Acme".into()));
///
/// let set = build_set_clause(&payload, &[("numEmployees", "num_employees")]).unwrap();
/// assert_eq!(set.clause, r#""num_employees"=$1, "name"=$2"#);
/// assert_eq!(set.values.len(), 2);
/// ```
///
/// Fails with [`CoreError::InvalidInput`] when the payload is empty. Any
/// placeholder the caller appends (the row key, typically) starts at
/// [`SqlFragment::next_placeholder`].
pub fn build_set_clause(
    payload: &UpdatePayload,
    translation: FieldTranslation<'_>,
) -> Result<SqlFragment, CoreError> {
    if payload.is_empty() {
        return Err(CoreError::InvalidInput("No data".into()));
    }

    let cols: Vec<String> = payload
        .keys()
        .enumerate()
        .map(|(idx, field)| {
            let column = translation
                .iter()
                .find(|(logical, _)| *logical == field.as_str())
                .map_or(field.as_str(), |(_, physical)| *physical);
            format!("\"{column}\"=${}", idx + 1)
        })
        .collect();

    Ok(SqlFragment {
        clause: cols.join(", "),
        values: payload.values().cloned().collect(),
    })
}

// ---------------------------------------------------------------------------
// WHERE clause
// ---------------------------------------------------------------------------

/// How a filter key constrains its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `column ILIKE '%value%'`.
    SubstringMatch,
    /// `column >= value`.
    MinBound,
    /// `column <= value`.
    MaxBound,
    /// `column > 0` when the value is truthy, nothing otherwise.
    PresenceGate,
}

/// One recognised search key for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    pub key: &'static str,
    pub kind: FilterKind,
    pub column: &'static str,
}

impl FilterDef {
    pub const fn new(key: &'static str, kind: FilterKind, column: &'static str) -> Self {
        Self { key, kind, column }
    }
}

/// Build the predicate list of a filtered search.
///
/// Predicates are joined with `AND` in payload order. Only keys that bind a
/// value consume a placeholder, so a presence gate never shifts the
/// numbering. An empty payload yields an empty fragment and the caller must
/// leave out `WHERE` entirely.
///
/// Fails with [`CoreError::InvalidInput`] for a key missing from `filters`
/// or a value that does not fit the key's [`FilterKind`].
pub fn build_filter_clause(
    payload: &FilterPayload,
    filters: &[FilterDef],
) -> Result<SqlFragment, CoreError> {
    let mut clauses: Vec<String> = Vec::with_capacity(payload.len());
    let mut values: Vec<SqlValue> = Vec::new();

    for (key, value) in payload {
        let def = filters
            .iter()
            .find(|def| def.key == key.as_str())
            .ok_or_else(|| CoreError::InvalidInput(format!("Unknown filter: {key}")))?;

        let bound = match def.kind {
            FilterKind::SubstringMatch => Some(("ILIKE", substring_pattern(key, value)?)),
            FilterKind::MinBound => Some((">=", numeric_bound(key, value)?)),
            FilterKind::MaxBound => Some(("<=", numeric_bound(key, value)?)),
            FilterKind::PresenceGate => {
                if is_truthy(key, value)? {
                    clauses.push(format!("{} > 0", def.column));
                }
                None
            }
        };

        if let Some((op, value)) = bound {
            values.push(value);
            clauses.push(format!("{} {op} ${}", def.column, values.len()));
        }
    }

    Ok(SqlFragment {
        clause: clauses.join(" AND "),
        values,
    })
}

fn substring_pattern(key: &str, value: &SqlValue) -> Result<SqlValue, CoreError> {
    let needle = match value {
        SqlValue::Text(s) => s.clone(),
        SqlValue::Int(n) => n.to_string(),
        SqlValue::Decimal(d) => d.to_string(),
        SqlValue::Null | SqlValue::Bool(_) => {
            return Err(CoreError::InvalidInput(format!("{key} must be a string")));
        }
    };
    Ok(SqlValue::Text(format!("%{needle}%")))
}

fn numeric_bound(key: &str, value: &SqlValue) -> Result<SqlValue, CoreError> {
    match value {
        SqlValue::Int(_) | SqlValue::Decimal(_) => Ok(value.clone()),
        _ => Err(CoreError::InvalidInput(format!("{key} must be a number"))),
    }
}

fn is_truthy(key: &str, value: &SqlValue) -> Result<bool, CoreError> {
    match value {
        SqlValue::Bool(b) => Ok(*b),
        SqlValue::Null => Ok(false),
        SqlValue::Int(n) => Ok(*n != 0),
        SqlValue::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        SqlValue::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(CoreError::InvalidInput(format!("{key} must be a boolean"))),
    }
}
