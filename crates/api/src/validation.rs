//! Request shape checks that run before a repository is called.
//!
//! Partial updates and search queries are untyped on the wire, so they are
//! checked against the entity's [`EntitySchema`] here: only known keys,
//! only mutable fields on update, and values coerced to the declared kind.
//! Payload order is preserved so placeholder numbering follows the request.

use indexmap::IndexMap;
use jobly_core::error::CoreError;
use jobly_core::schema::{EntitySchema, FieldCheck, FieldDef, ValueKind};
use jobly_core::sql::{FilterKind, FilterPayload, SqlValue, UpdatePayload};
use jobly_db::models::job::validate_equity;
use rust_decimal::Decimal;
use serde_json::Value;
use validator::ValidateUrl;

/// Check a PATCH body and coerce it into an [`UpdatePayload`].
pub fn update_payload(
    schema: &EntitySchema,
    body: IndexMap<String, Value>,
) -> Result<UpdatePayload, CoreError> {
    body.into_iter()
        .map(|(name, value)| -> Result<(String, SqlValue), CoreError> {
            let field = schema
                .field(&name)
                .filter(|f| f.mutable)
                .ok_or_else(|| CoreError::InvalidInput(format!("{name} cannot be updated")))?;
            let value = coerce_json(field, value)?;
            check_field(field, &value)?;
            Ok((name, value))
        })
        .collect()
}

fn coerce_json(field: &FieldDef, value: Value) -> Result<SqlValue, CoreError> {
    let name = field.name;
    match (field.kind, value) {
        (_, Value::Null) if field.nullable => Ok(SqlValue::Null),
        (_, Value::Null) => Err(CoreError::InvalidInput(format!("{name} cannot be null"))),
        (ValueKind::Text, Value::String(s)) if !field.nullable && s.is_empty() => {
            Err(CoreError::InvalidInput(format!("{name} cannot be empty")))
        }
        (ValueKind::Text, Value::String(s)) => Ok(SqlValue::Text(s)),
        (ValueKind::Integer, Value::Number(n)) => {
            let n = n
                .as_i64()
                .ok_or_else(|| CoreError::InvalidInput(format!("{name} must be an integer")))?;
            i32::try_from(n)
                .map(|n| SqlValue::Int(n.into()))
                .map_err(|_| CoreError::InvalidInput(format!("{name} is out of range")))
        }
        (ValueKind::Decimal, Value::Number(n)) => parse_decimal(name, &n.to_string()),
        (ValueKind::Decimal, Value::String(s)) => parse_decimal(name, &s),
        (ValueKind::Text, _) => Err(CoreError::InvalidInput(format!("{name} must be a string"))),
        (ValueKind::Integer | ValueKind::Decimal, _) => {
            Err(CoreError::InvalidInput(format!("{name} must be a number")))
        }
    }
}

/// Apply the same domain rules the create DTOs validate.
fn check_field(field: &FieldDef, value: &SqlValue) -> Result<(), CoreError> {
    let name = field.name;
    let ok = match (field.check, value) {
        (_, SqlValue::Null) | (FieldCheck::Any, _) => true,
        (FieldCheck::NonNegative, SqlValue::Int(n)) => *n >= 0,
        (FieldCheck::NonNegative, SqlValue::Decimal(d)) => !d.is_sign_negative(),
        (FieldCheck::Fraction, SqlValue::Decimal(d)) => validate_equity(d).is_ok(),
        (FieldCheck::Url, SqlValue::Text(s)) => s.validate_url(),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        let rule = match field.check {
            FieldCheck::NonNegative => "must not be negative",
            FieldCheck::Fraction => "must be between 0 and 1",
            FieldCheck::Url => "must be a URL",
            FieldCheck::Any => "is invalid",
        };
        Err(CoreError::InvalidInput(format!("{name} {rule}")))
    }
}

fn parse_decimal(name: &str, text: &str) -> Result<SqlValue, CoreError> {
    text.parse::<Decimal>()
        .map(SqlValue::Decimal)
        .map_err(|_| CoreError::InvalidInput(format!("{name} must be a number")))
}

/// Check query-string pairs and coerce them into a [`FilterPayload`].
///
/// Bounds must parse as integers and presence gates as `true`/`false`.
/// A repeated key keeps its first position and its last value.
pub fn filter_payload(
    schema: &EntitySchema,
    params: Vec<(String, String)>,
) -> Result<FilterPayload, CoreError> {
    let mut filter = FilterPayload::with_capacity(params.len());

    for (key, raw) in params {
        let def = schema
            .filters
            .iter()
            .find(|def| def.key == key.as_str())
            .ok_or_else(|| CoreError::InvalidInput(format!("Unknown filter: {key}")))?;

        let value = match def.kind {
            FilterKind::SubstringMatch => SqlValue::Text(raw),
            FilterKind::MinBound | FilterKind::MaxBound => raw
                .trim()
                .parse::<i64>()
                .map(SqlValue::Int)
                .map_err(|_| CoreError::InvalidInput(format!("{key} must be an integer")))?,
            FilterKind::PresenceGate => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => SqlValue::Bool(true),
                "false" => SqlValue::Bool(false),
                _ => return Err(CoreError::InvalidInput(format!("{key} must be true or false"))),
            },
        };
        filter.insert(key, value);
    }

    ensure_bounds_ordered(schema, &filter)?;
    Ok(filter)
}

/// Reject a min bound greater than the max bound on the same column.
fn ensure_bounds_ordered(schema: &EntitySchema, filter: &FilterPayload) -> Result<(), CoreError> {
    let bound = |kind: FilterKind, column: &str| {
        schema
            .filters
            .iter()
            .find(|def| def.kind == kind && def.column == column)
            .and_then(|def| filter.get(def.key).map(|value| (def.key, value)))
    };

    for min_def in schema.filters.iter().filter(|d| d.kind == FilterKind::MinBound) {
        if let (Some((min_key, SqlValue::Int(min))), Some((max_key, SqlValue::Int(max)))) = (
            bound(FilterKind::MinBound, min_def.column),
            bound(FilterKind::MaxBound, min_def.column),
        ) {
            if min > max {
                return Err(CoreError::InvalidInput(format!(
                    "{min_key} cannot be greater than {max_key}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jobly_core::schema::{COMPANY_SCHEMA, JOB_SCHEMA};

    use super::*;

    /// Parsed from text so key order survives (a `json!` object is sorted).
    fn body(text: &str) -> IndexMap<String, Value> {
        serde_json::from_str(text).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    // -- update_payload ------------------------------------------------------

    #[test]
    fn update_coerces_by_field_kind_in_body_order() {
        let payload = update_payload(
            &JOB_SCHEMA,
            body(r#"{"salary": 500, "title": "New", "equity": 0.05}"#),
        )
        .unwrap();

        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, ["salary", "title", "equity"]);
        assert_eq!(payload["salary"], SqlValue::Int(500));
        assert_eq!(payload["title"], SqlValue::Text("New".into()));
        assert_eq!(payload["equity"], SqlValue::Decimal(Decimal::new(5, 2)));
    }

    #[test]
    fn update_rejects_immutable_and_unknown_fields() {
        assert_matches!(
            update_payload(&JOB_SCHEMA, body(r#"{"companyHandle": "c2"}"#)),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            update_payload(&JOB_SCHEMA, body(r#"{"id": 5}"#)),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            update_payload(&COMPANY_SCHEMA, body(r#"{"handle": "new"}"#)),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn update_null_only_for_nullable_fields() {
        let payload = update_payload(&JOB_SCHEMA, body(r#"{"salary": null}"#)).unwrap();
        assert_eq!(payload["salary"], SqlValue::Null);

        assert_matches!(
            update_payload(&JOB_SCHEMA, body(r#"{"title": null}"#)),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn update_rejects_wrong_types() {
        assert_matches!(
            update_payload(&JOB_SCHEMA, body(r#"{"salary": "lots"}"#)),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            update_payload(&JOB_SCHEMA, body(r#"{"salary": 1.5}"#)),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            update_payload(&COMPANY_SCHEMA, body(r#"{"name": 3}"#)),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn update_rejects_integers_wider_than_the_column() {
        assert_matches!(
            update_payload(&JOB_SCHEMA, body(r#"{"salary": 3000000000}"#)),
            Err(CoreError::InvalidInput(msg)) if msg.contains("salary")
        );
        assert_matches!(
            update_payload(&COMPANY_SCHEMA, body(r#"{"numEmployees": 3000000000}"#)),
            Err(CoreError::InvalidInput(msg)) if msg.contains("numEmployees")
        );
        let payload =
            update_payload(&JOB_SCHEMA, body(r#"{"salary": 2147483647}"#)).unwrap();
        assert_eq!(payload["salary"], SqlValue::Int(i64::from(i32::MAX)));
    }

    #[test]
    fn update_applies_create_domain_rules() {
        for (schema, text) in [
            (&JOB_SCHEMA, r#"{"equity": -0.5}"#),
            (&JOB_SCHEMA, r#"{"equity": "1.5"}"#),
            (&JOB_SCHEMA, r#"{"salary": -1}"#),
            (&COMPANY_SCHEMA, r#"{"numEmployees": -3}"#),
            (&COMPANY_SCHEMA, r#"{"logoUrl": "not a url"}"#),
        ] {
            assert_matches!(
                update_payload(schema, body(text)),
                Err(CoreError::InvalidInput(_)),
                "{text}"
            );
        }

        let payload = update_payload(
            &COMPANY_SCHEMA,
            body(r#"{"logoUrl": "http://new.img", "numEmployees": 0}"#),
        )
        .unwrap();
        assert_eq!(payload["logoUrl"], SqlValue::Text("http://new.img".into()));
        assert_eq!(payload["numEmployees"], SqlValue::Int(0));

        let payload = update_payload(&JOB_SCHEMA, body(r#"{"equity": 1}"#)).unwrap();
        assert_eq!(payload["equity"], SqlValue::Decimal(Decimal::ONE));
    }

    #[test]
    fn empty_update_body_passes_through() {
        // The repository rejects it before issuing a statement.
        assert!(update_payload(&JOB_SCHEMA, IndexMap::new()).unwrap().is_empty());
    }

    // -- filter_payload ------------------------------------------------------

    #[test]
    fn filter_coerces_query_strings() {
        let filter = filter_payload(
            &JOB_SCHEMA,
            params(&[("hasEquity", "true"), ("minSalary", "40000"), ("title", "eng")]),
        )
        .unwrap();

        assert_eq!(filter["hasEquity"], SqlValue::Bool(true));
        assert_eq!(filter["minSalary"], SqlValue::Int(40000));
        assert_eq!(filter["title"], SqlValue::Text("eng".into()));
    }

    #[test]
    fn filter_rejects_keys_of_other_entities() {
        assert_matches!(
            filter_payload(&COMPANY_SCHEMA, params(&[("title", "x")])),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            filter_payload(&JOB_SCHEMA, params(&[("minEmployees", "1")])),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn filter_rejects_malformed_values() {
        assert_matches!(
            filter_payload(&JOB_SCHEMA, params(&[("minSalary", "many")])),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            filter_payload(&JOB_SCHEMA, params(&[("hasEquity", "yes")])),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn filter_rejects_inverted_employee_range() {
        assert_matches!(
            filter_payload(
                &COMPANY_SCHEMA,
                params(&[("minEmployees", "10"), ("maxEmployees", "2")]),
            ),
            Err(CoreError::InvalidInput(msg)) if msg.contains("minEmployees")
        );
        assert!(filter_payload(
            &COMPANY_SCHEMA,
            params(&[("minEmployees", "2"), ("maxEmployees", "10")]),
        )
        .is_ok());
    }
}
