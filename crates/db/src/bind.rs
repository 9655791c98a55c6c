//! Binding [`SqlValue`]s to sqlx queries in placeholder order.

use jobly_core::sql::SqlValue;
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

/// Bind a sequence of fragment values, `$1` first.
pub trait BindSqlValues: Sized {
    fn bind_value(self, value: &SqlValue) -> Self;

    fn bind_values(self, values: &[SqlValue]) -> Self {
        values.iter().fold(self, Self::bind_value)
    }
}

// NULL goes out typed as NUMERIC: Postgres has assignment casts from numeric
// to every column type used here (integer, numeric, text).
macro_rules! bind_sql_value {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::Null => $query.bind(None::<Decimal>),
            SqlValue::Bool(b) => $query.bind(*b),
            SqlValue::Int(n) => $query.bind(*n),
            SqlValue::Decimal(d) => $query.bind(*d),
            SqlValue::Text(s) => $query.bind(s.clone()),
        }
    };
}

impl<'q> BindSqlValues for Query<'q, Postgres, PgArguments> {
    fn bind_value(self, value: &SqlValue) -> Self {
        bind_sql_value!(self, value)
    }
}

impl<'q, O> BindSqlValues for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_value(self, value: &SqlValue) -> Self {
        bind_sql_value!(self, value)
    }
}
