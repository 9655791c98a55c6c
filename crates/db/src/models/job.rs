//! Job entity model and DTOs.

use jobly_core::sql::SqlValue;
use jobly_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::crud::InsertValues;

/// A row from the `jobs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: DbId,
    pub title: String,
    pub salary: Option<i32>,
    /// Serialized as a decimal string, e.g. `"0.05"`.
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// DTO for creating a new job.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
    #[validate(length(min = 1, max = 25))]
    pub company_handle: String,
}

impl InsertValues for NewJob {
    fn insert_values(&self) -> Vec<SqlValue> {
        vec![
            self.title.as_str().into(),
            self.salary.into(),
            self.equity.into(),
            self.company_handle.as_str().into(),
        ]
    }
}

/// Equity is a fraction of the company: 0 through 1 inclusive.
pub fn validate_equity(equity: &Decimal) -> Result<(), ValidationError> {
    if *equity < Decimal::ZERO || *equity > Decimal::ONE {
        return Err(ValidationError::new("equity_range"));
    }
    Ok(())
}
