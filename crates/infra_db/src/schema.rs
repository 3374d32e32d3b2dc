//! Schema management
//!
//! [`SchemaManager::create_tables`] (re)creates the native enum types and
//! synchronizes the four entity tables:
//!
//! 1. `DROP TYPE IF EXISTS granularity CASCADE` and `CREATE TYPE granularity AS ENUM (...)`
//! 2. the same for `record_type`
//! 3. for `accounts`, `assets`, `asset_values`, `records` in that order:
//!    `CREATE TABLE IF NOT EXISTS`, `ADD COLUMN IF NOT EXISTS` for every
//!    non-key column, then one `CREATE UNIQUE INDEX IF NOT EXISTS` per unique
//!    column
//!
//! Missing tables and columns are created; existing columns are never altered
//! or dropped. Enum labels come from the `core_kernel` enumerations and
//! table layouts from each entity's [`TableDefinition`].
//!
//! # Destructive
//!
//! Dropping a type cascades to every column and object that uses it. When
//! `asset_values` or `records` hold rows, re-adding their `NOT NULL` enum
//! column fails and the run rolls back; views or functions built on the enum
//! types are dropped and not restored. Do not run this against a populated
//! store.
//!
//! All steps run in one transaction; the first failing step aborts the run
//! and nothing is applied. Repositories bind and read the enum columns as
//! text with explicit casts, so pooled connections keep working after the
//! types are recreated.

use core_kernel::{Account, Asset, AssetValue, Granularity, Record, RecordType};
use sqlx::{Executor, PgConnection, PgPool};
use tracing::{debug, info};

use crate::error::DatabaseError;

/// One column of an entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Everything after the type: nullability, defaults, references
    pub constraints: &'static str,
    pub primary_key: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: &'static str, constraints: &'static str) -> Self {
        Self {
            name,
            sql_type,
            constraints,
            primary_key: false,
        }
    }

    /// `BIGSERIAL PRIMARY KEY` surrogate key
    pub const fn id() -> Self {
        Self {
            name: "id",
            sql_type: "BIGSERIAL",
            constraints: "PRIMARY KEY",
            primary_key: true,
        }
    }

    fn render(&self) -> String {
        let mut sql = format!("{} {}", quote_ident(self.name), self.sql_type);
        if !self.constraints.is_empty() {
            sql.push(' ');
            sql.push_str(self.constraints);
        }
        sql
    }
}

/// Relational layout of an entity
pub trait TableDefinition {
    /// Table name
    const TABLE: &'static str;

    /// Columns in creation order
    const COLUMNS: &'static [ColumnDef];

    /// Columns backed by a unique index
    const UNIQUE: &'static [&'static str] = &[];
}

impl TableDefinition for Account {
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::new("name", "VARCHAR(255)", "NOT NULL"),
    ];
    const UNIQUE: &'static [&'static str] = &["name"];
}

impl TableDefinition for Asset {
    const TABLE: &'static str = "assets";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::new("name", "VARCHAR(255)", "NOT NULL"),
        ColumnDef::new("symbol", "VARCHAR(255)", "NULL"),
        ColumnDef::new("isin", "VARCHAR(255)", "NULL"),
        ColumnDef::new("description", "TEXT", "NOT NULL DEFAULT ''"),
    ];
    const UNIQUE: &'static [&'static str] = &["name", "symbol", "isin"];
}

impl TableDefinition for AssetValue {
    const TABLE: &'static str = "asset_values";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::new("asset_id", "BIGINT", "NOT NULL REFERENCES \"assets\" (\"id\")"),
        ColumnDef::new("base_asset_id", "BIGINT", "NOT NULL REFERENCES \"assets\" (\"id\")"),
        ColumnDef::new("evaluated_at", "TIMESTAMPTZ", "NOT NULL DEFAULT CURRENT_TIMESTAMP"),
        ColumnDef::new("granularity", "\"granularity\"", "NOT NULL"),
        ColumnDef::new("open", "NUMERIC(10,4)", "NOT NULL"),
        ColumnDef::new("high", "NUMERIC(10,4)", "NOT NULL"),
        ColumnDef::new("low", "NUMERIC(10,4)", "NOT NULL"),
        ColumnDef::new("close", "NUMERIC(10,4)", "NOT NULL"),
        ColumnDef::new("volume", "BIGINT", "NOT NULL"),
    ];
}

impl TableDefinition for Record {
    const TABLE: &'static str = "records";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::new("account_id", "BIGINT", "NOT NULL REFERENCES \"accounts\" (\"id\")"),
        ColumnDef::new("asset_id", "BIGINT", "NOT NULL REFERENCES \"assets\" (\"id\")"),
        ColumnDef::new("type", "\"record_type\"", "NOT NULL"),
        ColumnDef::new("created_at", "TIMESTAMPTZ", "NOT NULL DEFAULT CURRENT_TIMESTAMP"),
        ColumnDef::new("quantity", "BIGINT", "NOT NULL"),
    ];
}

/// A closed enumeration stored as a native Postgres enum type
pub trait PgEnumType {
    const TYPE_NAME: &'static str;

    fn labels() -> Vec<&'static str>;
}

impl PgEnumType for Granularity {
    const TYPE_NAME: &'static str = Granularity::SQL_TYPE;

    fn labels() -> Vec<&'static str> {
        Granularity::ALL.iter().map(|g| g.as_str()).collect()
    }
}

impl PgEnumType for RecordType {
    const TYPE_NAME: &'static str = RecordType::SQL_TYPE;

    fn labels() -> Vec<&'static str> {
        RecordType::ALL.iter().map(|r| r.as_str()).collect()
    }
}

/// A named DDL statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStep {
    pub name: String,
    pub sql: String,
}

impl SchemaStep {
    fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }
}

/// Creates and inspects the finance schema
#[derive(Debug, Clone)]
pub struct SchemaManager {
    pool: PgPool,
}

impl SchemaManager {
    /// Creates a new SchemaManager with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ordered DDL executed by [`create_tables`](Self::create_tables)
    pub fn plan() -> Vec<SchemaStep> {
        let mut steps = Vec::new();
        steps.extend(enum_steps::<Granularity>());
        steps.extend(enum_steps::<RecordType>());
        steps.extend(table_steps::<Account>());
        steps.extend(table_steps::<Asset>());
        steps.extend(table_steps::<AssetValue>());
        steps.extend(table_steps::<Record>());
        steps
    }

    /// Recreates the enum types and auto-migrates every entity table
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MigrationFailed` naming the first step that
    /// failed; the transaction is rolled back and the schema is untouched.
    pub async fn create_tables(&self) -> Result<(), DatabaseError> {
        self.apply(&Self::plan()).await
    }

    /// Runs the given steps in one transaction, stopping at the first failure
    pub async fn apply(&self, steps: &[SchemaStep]) -> Result<(), DatabaseError> {
        info!(steps = steps.len(), "Creating schema");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::migration_failed("begin transaction", e))?;

        let conn: &mut PgConnection = &mut tx;
        for step in steps {
            debug!(step = %step.name, sql = %step.sql, "Applying schema step");
            Executor::execute(&mut *conn, step.sql.as_str())
                .await
                .map_err(|e| DatabaseError::migration_failed(&step.name, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::migration_failed("commit", e))?;

        info!("Schema created successfully");
        Ok(())
    }

    /// Checks whether a table exists in the current schema
    pub async fn table_exists(&self, table: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Labels of a native enum type in declaration order
    ///
    /// Empty when the type does not exist.
    pub async fn enum_labels(&self, type_name: &str) -> Result<Vec<String>, DatabaseError> {
        let labels = sqlx::query_scalar::<_, String>(
            r#"
            SELECT e.enumlabel::text
            FROM pg_enum e
            JOIN pg_type t ON t.oid = e.enumtypid
            WHERE t.typname = $1
            ORDER BY e.enumsortorder
            "#,
        )
        .bind(type_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(labels)
    }

    /// Column names of a table in ordinal order
    pub async fn table_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError> {
        let columns = sqlx::query_scalar::<_, String>(
            r#"
            SELECT column_name::text
            FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = $1
            ORDER BY ordinal_position
            "#,
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(columns)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn enum_steps<E: PgEnumType>() -> Vec<SchemaStep> {
    let labels = E::labels()
        .into_iter()
        .map(quote_literal)
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        SchemaStep::new(
            format!("drop type {}", E::TYPE_NAME),
            format!("DROP TYPE IF EXISTS {} CASCADE", quote_ident(E::TYPE_NAME)),
        ),
        SchemaStep::new(
            format!("create type {}", E::TYPE_NAME),
            format!("CREATE TYPE {} AS ENUM ({})", quote_ident(E::TYPE_NAME), labels),
        ),
    ]
}

fn table_steps<T: TableDefinition>() -> Vec<SchemaStep> {
    let table = quote_ident(T::TABLE);
    let mut steps = Vec::new();

    let columns = T::COLUMNS
        .iter()
        .map(ColumnDef::render)
        .collect::<Vec<_>>()
        .join(", ");
    steps.push(SchemaStep::new(
        format!("create table {}", T::TABLE),
        format!("CREATE TABLE IF NOT EXISTS {} ({})", table, columns),
    ));

    let additions = T::COLUMNS
        .iter()
        .filter(|c| !c.primary_key)
        .map(|c| format!("ADD COLUMN IF NOT EXISTS {}", c.render()))
        .collect::<Vec<_>>();
    if !additions.is_empty() {
        steps.push(SchemaStep::new(
            format!("migrate columns {}", T::TABLE),
            format!("ALTER TABLE {} {}", table, additions.join(", ")),
        ));
    }

    for column in T::UNIQUE {
        let index = format!("uix_{}_{}", T::TABLE, column);
        steps.push(SchemaStep::new(
            format!("create index {}", index),
            format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({})",
                quote_ident(&index),
                table,
                quote_ident(column)
            ),
        ));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step<'a>(plan: &'a [SchemaStep], name: &str) -> &'a SchemaStep {
        plan.iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("missing step '{}'", name))
    }

    #[test]
    fn test_plan_order() {
        let names: Vec<String> = SchemaManager::plan().into_iter().map(|s| s.name).collect();
        let position = |name: &str| names.iter().position(|n| n == name).unwrap();

        assert_eq!(names[0], "drop type granularity");
        assert_eq!(names[1], "create type granularity");
        assert_eq!(names[2], "drop type record_type");
        assert_eq!(names[3], "create type record_type");
        assert!(position("create table accounts") < position("create table assets"));
        assert!(position("create table assets") < position("create table asset_values"));
        assert!(position("create table asset_values") < position("create table records"));
    }

    #[test]
    fn test_enum_types_list_every_label() {
        let plan = SchemaManager::plan();
        assert_eq!(
            step(&plan, "create type granularity").sql,
            "CREATE TYPE \"granularity\" AS ENUM ('1sec', '1min', '5min', '1hour', '1day', '1week', '1month', '1year')"
        );
        assert_eq!(
            step(&plan, "create type record_type").sql,
            "CREATE TYPE \"record_type\" AS ENUM ('deposit', 'withdraw', 'balance_adjustment')"
        );
        assert_eq!(
            step(&plan, "drop type record_type").sql,
            "DROP TYPE IF EXISTS \"record_type\" CASCADE"
        );
    }

    #[test]
    fn test_create_table_is_conditional() {
        let plan = SchemaManager::plan();
        assert_eq!(
            step(&plan, "create table accounts").sql,
            "CREATE TABLE IF NOT EXISTS \"accounts\" (\"id\" BIGSERIAL PRIMARY KEY, \"name\" VARCHAR(255) NOT NULL)"
        );
    }

    #[test]
    fn test_migrate_skips_primary_key() {
        let plan = SchemaManager::plan();
        let sql = &step(&plan, "migrate columns records").sql;
        assert!(sql.starts_with("ALTER TABLE \"records\" ADD COLUMN IF NOT EXISTS \"account_id\""));
        assert!(sql.contains("ADD COLUMN IF NOT EXISTS \"type\" \"record_type\" NOT NULL"));
        assert!(!sql.contains("BIGSERIAL"));
    }

    #[test]
    fn test_prices_use_four_decimal_digits() {
        let plan = SchemaManager::plan();
        let sql = &step(&plan, "create table asset_values").sql;
        for column in ["open", "high", "low", "close"] {
            assert!(sql.contains(&format!("\"{}\" NUMERIC(10,4) NOT NULL", column)));
        }
    }

    #[test]
    fn test_unique_indexes() {
        let plan = SchemaManager::plan();
        assert_eq!(
            step(&plan, "create index uix_assets_isin").sql,
            "CREATE UNIQUE INDEX IF NOT EXISTS \"uix_assets_isin\" ON \"assets\" (\"isin\")"
        );
        assert!(plan.iter().any(|s| s.name == "create index uix_accounts_name"));
        assert!(!plan.iter().any(|s| s.name.starts_with("create index uix_records")));
    }

    #[test]
    fn test_quoting_escapes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
