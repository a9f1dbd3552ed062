use crate::error::SqlGenError;
use crate::metadata::MetadataProvider;
use crate::schema::{
    CatalogSnapshot, ColumnInfo, ForeignKeyEdge, PrimaryKeyInfo, TableInfo, TableName,
};

/// Create a ColumnInfo with sensible defaults for testing.
/// Returns a plain `int` column with no length, precision, or identity.
pub fn test_column(name: &str) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        data_type: "int".to_string(),
        character_maximum_length: None,
        numeric_precision: None,
        numeric_scale: None,
        is_identity: false,
    }
}

pub fn identity_column(name: &str) -> ColumnInfo {
    ColumnInfo {
        is_identity: true,
        ..test_column(name)
    }
}

pub fn table(name: &str, primary_key: Option<&str>, columns: Vec<ColumnInfo>) -> TableInfo {
    table_in("dbo", name, primary_key, columns)
}

pub fn table_in(
    schema: &str,
    name: &str,
    primary_key: Option<&str>,
    columns: Vec<ColumnInfo>,
) -> TableInfo {
    TableInfo {
        schema: schema.to_string(),
        name: name.to_string(),
        columns,
        primary_key: primary_key.map(str::to_string),
    }
}

pub fn fk(
    name: &str,
    primary_table: &str,
    primary_column: &str,
    foreign_table: &str,
    foreign_column: &str,
) -> ForeignKeyEdge {
    ForeignKeyEdge {
        name: name.to_string(),
        primary_table: primary_table.to_string(),
        primary_column: primary_column.to_string(),
        foreign_table: foreign_table.to_string(),
        foreign_column: foreign_column.to_string(),
    }
}

/// `Customers(CustomerID identity PK, Name)` and
/// `Orders(OrderID identity PK, CustomerID -> Customers, Amount)`.
pub fn customers_orders() -> CatalogSnapshot {
    CatalogSnapshot {
        tables: vec![
            table(
                "Customers",
                Some("CustomerID"),
                vec![
                    identity_column("CustomerID"),
                    ColumnInfo {
                        data_type: "nvarchar".to_string(),
                        character_maximum_length: Some(100),
                        ..test_column("Name")
                    },
                ],
            ),
            table(
                "Orders",
                Some("OrderID"),
                vec![
                    identity_column("OrderID"),
                    test_column("CustomerID"),
                    ColumnInfo {
                        data_type: "decimal".to_string(),
                        numeric_precision: Some(10),
                        numeric_scale: Some(2),
                        ..test_column("Amount")
                    },
                ],
            ),
        ],
        foreign_keys: vec![fk(
            "FK_Orders_Customers",
            "Customers",
            "CustomerID",
            "Orders",
            "CustomerID",
        )],
    }
}

/// `A <- B <- C`: B references A, C references B.
pub fn chain_abc() -> CatalogSnapshot {
    CatalogSnapshot {
        tables: vec![
            table("A", Some("AId"), vec![identity_column("AId")]),
            table(
                "B",
                Some("BId"),
                vec![identity_column("BId"), test_column("AId")],
            ),
            table(
                "C",
                Some("CId"),
                vec![identity_column("CId"), test_column("BId")],
            ),
        ],
        foreign_keys: vec![
            fk("FK_B_A", "A", "AId", "B", "AId"),
            fk("FK_C_B", "B", "BId", "C", "BId"),
        ],
    }
}

/// Provider whose column lookup fails for one table.
pub struct FailingColumns {
    pub inner: CatalogSnapshot,
    pub failing_table: &'static str,
}

impl MetadataProvider for FailingColumns {
    fn list_base_tables(&self) -> Result<Vec<TableName>, SqlGenError> {
        self.inner.list_base_tables()
    }

    fn schema_of(&self, table: &str) -> Result<Option<String>, SqlGenError> {
        self.inner.schema_of(table)
    }

    fn primary_key_of(&self, table: &str) -> Result<Option<PrimaryKeyInfo>, SqlGenError> {
        self.inner.primary_key_of(table)
    }

    fn is_identity(&self, table: &str, column: &str) -> Result<bool, SqlGenError> {
        self.inner.is_identity(table, column)
    }

    fn columns_of(&self, table: &str) -> Result<Vec<ColumnInfo>, SqlGenError> {
        if table == self.failing_table {
            return Err(SqlGenError::Metadata(format!("columns of {table}")));
        }
        self.inner.columns_of(table)
    }

    fn foreign_keys_of_schema(&self) -> Result<Vec<ForeignKeyEdge>, SqlGenError> {
        self.inner.foreign_keys_of_schema()
    }

    fn foreign_keys_referencing(&self, table: &str) -> Result<Vec<ForeignKeyEdge>, SqlGenError> {
        self.inner.foreign_keys_referencing(table)
    }

    fn foreign_keys_originating_from(
        &self,
        table: &str,
    ) -> Result<Vec<ForeignKeyEdge>, SqlGenError> {
        self.inner.foreign_keys_originating_from(table)
    }
}
