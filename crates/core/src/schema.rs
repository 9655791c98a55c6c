//! Declarative per-entity schema descriptors.
//!
//! An [`EntitySchema`] names everything the generic CRUD layer needs to
//! compose statements for one table: the key column, the select list, the
//! writable fields with their logical names, the search filters and any
//! foreign keys to verify before an insert.

use crate::sql::{FilterDef, FilterKind, SqlFragment};

/// Scalar type a field's values must have after request coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// Stored in a 32-bit `INTEGER` column.
    Integer,
    Decimal,
}

/// Domain rule a field's value must satisfy beyond its [`ValueKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    Any,
    NonNegative,
    /// A decimal in `0..=1`.
    Fraction,
    Url,
}

/// A writable column, addressed by its logical (API) name.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: ValueKind,
    pub nullable: bool,
    pub check: FieldCheck,
    /// Whether a partial update may change this field after creation.
    pub mutable: bool,
}

/// A field whose value must match an existing row of another entity.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKey {
    pub field: &'static str,
    pub entity: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

impl ForeignKey {
    /// `SELECT` returning the referenced row's key, if it exists.
    pub fn lookup_sql(&self) -> String {
        format!(
            "SELECT {col} FROM {table} WHERE {col} = $1",
            col = self.column,
            table = self.table,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Human-readable entity name used in error messages.
    pub entity: &'static str,
    pub table: &'static str,
    pub key_column: &'static str,
    /// Columns returned by every `SELECT` / `RETURNING`.
    pub columns: &'static [&'static str],
    /// Columns written on insert, in bind order.
    pub fields: &'static [FieldDef],
    pub order_by: &'static str,
    pub filters: &'static [FilterDef],
    pub foreign_keys: &'static [ForeignKey],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Logical -> physical names for every field whose column differs.
    pub fn translation(&self) -> Vec<(&'static str, &'static str)> {
        self.fields
            .iter()
            .filter(|f| f.name != f.column)
            .map(|f| (f.name, f.column))
            .collect()
    }

    fn select_list(&self) -> String {
        self.columns.join(", ")
    }

    /// List rows, narrowed by `filter` when it is non-empty.
    pub fn find_all_sql(&self, filter: &SqlFragment) -> String {
        let where_clause = if filter.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", filter.clause)
        };
        format!(
            "SELECT {} FROM {}{where_clause} ORDER BY {}",
            self.select_list(),
            self.table,
            self.order_by,
        )
    }

    pub fn find_one_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            self.select_list(),
            self.table,
            self.key_column,
        )
    }

    pub fn insert_sql(&self) -> String {
        let columns: Vec<&str> = self.fields.iter().map(|f| f.column).collect();
        let placeholders: Vec<String> = (1..=self.fields.len()).map(|i| format!("${i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.table,
            columns.join(", "),
            placeholders.join(", "),
            self.select_list(),
        )
    }

    /// Apply `set`; the row key binds to the placeholder after the last value.
    pub fn update_sql(&self, set: &SqlFragment) -> String {
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.table,
            set.clause,
            self.key_column,
            set.next_placeholder(),
            self.select_list(),
        )
    }

    pub fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM {table} WHERE {key} = $1 RETURNING {key}",
            table = self.table,
            key = self.key_column,
        )
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

pub const COMPANY_SCHEMA: EntitySchema = EntitySchema {
    entity: "Company",
    table: "companies",
    key_column: "handle",
    columns: &["handle", "name", "description", "num_employees", "logo_url"],
    fields: &[
        FieldDef {
            name: "handle",
            column: "handle",
            kind: ValueKind::Text,
            nullable: false,
            check: FieldCheck::Any,
            mutable: false,
        },
        FieldDef {
            name: "name",
            column: "name",
            kind: ValueKind::Text,
            nullable: false,
            check: FieldCheck::Any,
            mutable: true,
        },
        FieldDef {
            name: "description",
            column: "description",
            kind: ValueKind::Text,
            nullable: false,
            check: FieldCheck::Any,
            mutable: true,
        },
        FieldDef {
            name: "numEmployees",
            column: "num_employees",
            kind: ValueKind::Integer,
            nullable: true,
            check: FieldCheck::NonNegative,
            mutable: true,
        },
        FieldDef {
            name: "logoUrl",
            column: "logo_url",
            kind: ValueKind::Text,
            nullable: true,
            check: FieldCheck::Url,
            mutable: true,
        },
    ],
    order_by: "name",
    filters: &[
        FilterDef::new("name", FilterKind::SubstringMatch, "name"),
        FilterDef::new("minEmployees", FilterKind::MinBound, "num_employees"),
        FilterDef::new("maxEmployees", FilterKind::MaxBound, "num_employees"),
    ],
    foreign_keys: &[],
};

pub const JOB_SCHEMA: EntitySchema = EntitySchema {
    entity: "Job",
    table: "jobs",
    key_column: "id",
    columns: &["id", "title", "salary", "equity", "company_handle"],
    fields: &[
        FieldDef {
            name: "title",
            column: "title",
            kind: ValueKind::Text,
            nullable: false,
            check: FieldCheck::Any,
            mutable: true,
        },
        FieldDef {
            name: "salary",
            column: "salary",
            kind: ValueKind::Integer,
            nullable: true,
            check: FieldCheck::NonNegative,
            mutable: true,
        },
        FieldDef {
            name: "equity",
            column: "equity",
            kind: ValueKind::Decimal,
            nullable: true,
            check: FieldCheck::Fraction,
            mutable: true,
        },
        FieldDef {
            name: "companyHandle",
            column: "company_handle",
            kind: ValueKind::Text,
            nullable: false,
            check: FieldCheck::Any,
            mutable: false,
        },
    ],
    order_by: "title",
    filters: &[
        FilterDef::new("title", FilterKind::SubstringMatch, "title"),
        FilterDef::new("minSalary", FilterKind::MinBound, "salary"),
        FilterDef::new("hasEquity", FilterKind::PresenceGate, "equity"),
    ],
    foreign_keys: &[ForeignKey {
        field: "companyHandle",
        entity: "Company",
        table: "companies",
        column: "handle",
    }],
};
