//! Schema-driven CRUD shared by every entity.
//!
//! Each function composes its statement from an [`EntitySchema`] and the
//! fragment builders in `jobly_core::sql`, then runs it as a single round
//! trip. Missing rows surface as [`CoreError::NotFound`].

use std::fmt::Display;

use jobly_core::error::CoreError;
use jobly_core::schema::EntitySchema;
use jobly_core::sql::{build_filter_clause, build_set_clause, FilterPayload, SqlValue, UpdatePayload};
use sqlx::postgres::PgRow;
use sqlx::{Encode, FromRow, PgPool, Postgres, Type};

use crate::bind::BindSqlValues;
use crate::error::RepoResult;

/// A row type decodable from the entity's select list.
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin {}

impl<T> Record for T where T: for<'r> FromRow<'r, PgRow> + Send + Unpin {}

/// A value identifying one row by the schema's key column.
pub trait RowKey:
    for<'q> Encode<'q, Postgres> + Type<Postgres> + Display + Clone + Send + Sync + 'static
{
}

impl<T> RowKey for T where
    T: for<'q> Encode<'q, Postgres> + Type<Postgres> + Display + Clone + Send + Sync + 'static
{
}

/// Create DTOs expose their values in the order of the schema's fields.
pub trait InsertValues {
    fn insert_values(&self) -> Vec<SqlValue>;
}

/// List rows matching `filter`, ordered by the schema's sort column.
pub async fn find_all<T: Record>(
    pool: &PgPool,
    schema: &EntitySchema,
    filter: &FilterPayload,
) -> RepoResult<Vec<T>> {
    let fragment = build_filter_clause(filter, schema.filters)?;
    let query = schema.find_all_sql(&fragment);
    tracing::debug!(entity = schema.entity, sql = %query, "find_all");

    let rows = sqlx::query_as::<_, T>(&query)
        .bind_values(&fragment.values)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a row by key, or `None` when it does not exist.
pub async fn find_optional<T: Record, K: RowKey>(
    pool: &PgPool,
    schema: &EntitySchema,
    key: &K,
) -> RepoResult<Option<T>> {
    let query = schema.find_one_sql();
    let row = sqlx::query_as::<_, T>(&query)
        .bind(key.clone())
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch a row by key.
pub async fn find_one<T: Record, K: RowKey>(
    pool: &PgPool,
    schema: &EntitySchema,
    key: &K,
) -> RepoResult<T> {
    find_optional(pool, schema, key)
        .await?
        .ok_or_else(|| CoreError::not_found(schema.entity, key).into())
}

/// Insert a row after checking that every foreign key resolves.
///
/// The lookup and the insert are separate statements; the table's own
/// foreign-key constraint still rejects a reference deleted in between.
pub async fn insert<T: Record>(
    pool: &PgPool,
    schema: &EntitySchema,
    values: &[SqlValue],
) -> RepoResult<T> {
    verify_foreign_keys(pool, schema, values).await?;

    let query = schema.insert_sql();
    tracing::debug!(entity = schema.entity, sql = %query, "insert");

    let row = sqlx::query_as::<_, T>(&query)
        .bind_values(values)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Apply a partial update and return the updated row.
///
/// An empty payload is rejected before any statement is issued.
pub async fn update<T: Record, K: RowKey>(
    pool: &PgPool,
    schema: &EntitySchema,
    key: &K,
    payload: &UpdatePayload,
) -> RepoResult<T> {
    let set = build_set_clause(payload, &schema.translation())?;
    let query = schema.update_sql(&set);
    tracing::debug!(entity = schema.entity, sql = %query, "update");

    sqlx::query_as::<_, T>(&query)
        .bind_values(&set.values)
        .bind(key.clone())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| CoreError::not_found(schema.entity, key).into())
}

/// Delete a row by key.
pub async fn remove<K: RowKey>(pool: &PgPool, schema: &EntitySchema, key: &K) -> RepoResult<()> {
    let query = schema.delete_sql();
    let deleted = sqlx::query(&query)
        .bind(key.clone())
        .fetch_optional(pool)
        .await?;

    match deleted {
        Some(_) => Ok(()),
        None => Err(CoreError::not_found(schema.entity, key).into()),
    }
}

async fn verify_foreign_keys(
    pool: &PgPool,
    schema: &EntitySchema,
    values: &[SqlValue],
) -> RepoResult<()> {
    for fk in schema.foreign_keys {
        let value = schema
            .fields
            .iter()
            .position(|f| f.name == fk.field)
            .and_then(|idx| values.get(idx))
            .ok_or_else(|| CoreError::InvalidInput(format!("Missing {}", fk.field)))?;

        let found = sqlx::query(&fk.lookup_sql())
            .bind_value(value)
            .fetch_optional(pool)
            .await?;

        if found.is_none() {
            let shown = match value {
                SqlValue::Text(s) => s.clone(),
                other => format!("{other:?}"),
            };
            return Err(CoreError::InvalidInput(format!("{} does not exist: {shown}", fk.entity)).into());
        }
    }
    Ok(())
}
