/// Catalog identifier of a table. A snapshot holds each name at most once,
/// even when it spans several schemas.
pub type TableName = String;

/// Schema whose tables are referenced without a schema prefix.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// A catalog snapshot: every loaded base table plus every foreign-key edge between them.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub tables: Vec<TableInfo>,
    pub foreign_keys: Vec<ForeignKeyEdge>,
}

/// Metadata for a single base table.
#[derive(Debug, Clone)]
pub struct TableInfo {
    pub schema: String,
    pub name: TableName,
    /// Columns in declaration order.
    pub columns: Vec<ColumnInfo>,
    /// First column of the primary-key constraint, if the table has one.
    pub primary_key: Option<String>,
}

/// Metadata for a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// `DATA_TYPE` exactly as the catalog reports it (e.g. `nvarchar`, `int`).
    pub data_type: String,
    /// `-1` from the catalog (the `max` length) is kept as `Some(-1)`.
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub is_identity: bool,
}

/// The primary-key column of a table and whether the database generates its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyInfo {
    pub column: String,
    pub is_auto_increment: bool,
}

/// A directed foreign-key edge: `foreign_table.foreign_column` references
/// `primary_table.primary_column`.
///
/// Composite constraints produce one edge per column pair, all sharing `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyEdge {
    pub name: String,
    pub primary_table: TableName,
    pub primary_column: String,
    pub foreign_table: TableName,
    pub foreign_column: String,
}

impl CatalogSnapshot {
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name == name)
    }
}
