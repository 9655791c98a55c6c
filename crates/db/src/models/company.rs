//! Company entity model and DTOs.

use jobly_core::sql::SqlValue;
use jobly_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::crud::InsertValues;

/// A row from the `companies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company (the handle is implied).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CompanyJob {
    pub id: DbId,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// A company together with the jobs it posts.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// DTO for creating a new company.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    #[validate(length(min = 1, max = 25))]
    pub handle: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

impl InsertValues for NewCompany {
    fn insert_values(&self) -> Vec<SqlValue> {
        vec![
            self.handle.as_str().into(),
            self.name.as_str().into(),
            self.description.as_str().into(),
            self.num_employees.into(),
            self.logo_url.clone().into(),
        ]
    }
}
