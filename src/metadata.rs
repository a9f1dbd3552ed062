use crate::error::SqlGenError;
use crate::schema::{CatalogSnapshot, ColumnInfo, ForeignKeyEdge, PrimaryKeyInfo, TableName};

/// Read-only access to the catalog facts both generators consume.
///
/// Every operation may fail; generators propagate the first failure and
/// discard any partial output.
pub trait MetadataProvider {
    /// All user base tables, excluding diagram/system tables.
    fn list_base_tables(&self) -> Result<Vec<TableName>, SqlGenError>;

    /// Schema the table was loaded from, or `None` for an unknown table.
    fn schema_of(&self, table: &str) -> Result<Option<String>, SqlGenError>;

    /// The constrained column of the table's primary key, or `None`.
    fn primary_key_of(&self, table: &str) -> Result<Option<PrimaryKeyInfo>, SqlGenError>;

    /// Whether the column auto-generates its value on insert.
    fn is_identity(&self, table: &str, column: &str) -> Result<bool, SqlGenError>;

    /// Columns in catalog declaration order.
    fn columns_of(&self, table: &str) -> Result<Vec<ColumnInfo>, SqlGenError>;

    /// Every foreign-key edge in the schema.
    fn foreign_keys_of_schema(&self) -> Result<Vec<ForeignKeyEdge>, SqlGenError>;

    /// Edges in which `table` is the referenced (primary) side.
    fn foreign_keys_referencing(&self, table: &str) -> Result<Vec<ForeignKeyEdge>, SqlGenError>;

    /// Edges owned by `table`, i.e. where it is the referencing (foreign) side.
    fn foreign_keys_originating_from(
        &self,
        table: &str,
    ) -> Result<Vec<ForeignKeyEdge>, SqlGenError>;
}

/// Lookups against a loaded snapshot never fail. Unknown tables answer the
/// way the catalog does for a name it has never seen: no columns, no key.
impl MetadataProvider for CatalogSnapshot {
    fn list_base_tables(&self) -> Result<Vec<TableName>, SqlGenError> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn schema_of(&self, table: &str) -> Result<Option<String>, SqlGenError> {
        Ok(self.table(table).map(|t| t.schema.clone()))
    }

    fn primary_key_of(&self, table: &str) -> Result<Option<PrimaryKeyInfo>, SqlGenError> {
        let Some(column) = self.table(table).and_then(|t| t.primary_key.clone()) else {
            return Ok(None);
        };
        let is_auto_increment = self.is_identity(table, &column)?;
        Ok(Some(PrimaryKeyInfo {
            column,
            is_auto_increment,
        }))
    }

    fn is_identity(&self, table: &str, column: &str) -> Result<bool, SqlGenError> {
        Ok(self
            .table(table)
            .and_then(|t| t.columns.iter().find(|c| c.name == column))
            .is_some_and(|c| c.is_identity))
    }

    fn columns_of(&self, table: &str) -> Result<Vec<ColumnInfo>, SqlGenError> {
        Ok(self
            .table(table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    fn foreign_keys_of_schema(&self) -> Result<Vec<ForeignKeyEdge>, SqlGenError> {
        Ok(self.foreign_keys.clone())
    }

    fn foreign_keys_referencing(&self, table: &str) -> Result<Vec<ForeignKeyEdge>, SqlGenError> {
        Ok(self
            .foreign_keys
            .iter()
            .filter(|fk| fk.primary_table == table)
            .cloned()
            .collect())
    }

    fn foreign_keys_originating_from(
        &self,
        table: &str,
    ) -> Result<Vec<ForeignKeyEdge>, SqlGenError> {
        Ok(self
            .foreign_keys
            .iter()
            .filter(|fk| fk.foreign_table == table)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{customers_orders, fk, identity_column, table, table_in, test_column};

    #[test]
    fn test_primary_key_resolves_identity() {
        let catalog = customers_orders();
        let pk = catalog.primary_key_of("Customers").unwrap().unwrap();
        assert_eq!(pk.column, "CustomerID");
        assert!(pk.is_auto_increment);
    }

    #[test]
    fn test_primary_key_absent() {
        let catalog = CatalogSnapshot {
            tables: vec![table("Log", None, vec![test_column("Message")])],
            foreign_keys: vec![],
        };
        assert_eq!(catalog.primary_key_of("Log").unwrap(), None);
        assert_eq!(catalog.primary_key_of("Missing").unwrap(), None);
    }

    #[test]
    fn test_non_identity_primary_key() {
        let catalog = CatalogSnapshot {
            tables: vec![table("Codes", Some("Code"), vec![test_column("Code")])],
            foreign_keys: vec![],
        };
        let pk = catalog.primary_key_of("Codes").unwrap().unwrap();
        assert!(!pk.is_auto_increment);
        assert!(!catalog.is_identity("Codes", "Code").unwrap());
    }

    #[test]
    fn test_columns_keep_declaration_order() {
        let catalog = customers_orders();
        let names: Vec<String> = catalog
            .columns_of("Orders")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["OrderID", "CustomerID", "Amount"]);
        assert!(catalog.columns_of("Nope").unwrap().is_empty());
    }

    #[test]
    fn test_foreign_key_direction() {
        let catalog = CatalogSnapshot {
            tables: vec![
                table("A", Some("Id"), vec![identity_column("Id")]),
                table("B", Some("Id"), vec![identity_column("Id"), test_column("AId")]),
            ],
            foreign_keys: vec![fk("FK_B_A", "A", "Id", "B", "AId")],
        };
        assert_eq!(catalog.foreign_keys_referencing("A").unwrap().len(), 1);
        assert!(catalog.foreign_keys_referencing("B").unwrap().is_empty());
        assert_eq!(catalog.foreign_keys_originating_from("B").unwrap().len(), 1);
        assert!(catalog.foreign_keys_originating_from("A").unwrap().is_empty());
        assert_eq!(catalog.foreign_keys_of_schema().unwrap().len(), 1);
    }

    #[test]
    fn test_schema_of() {
        let catalog = CatalogSnapshot {
            tables: vec![
                table("Customers", Some("Id"), vec![test_column("Id")]),
                table_in("sales", "Orders", Some("Id"), vec![test_column("Id")]),
            ],
            foreign_keys: vec![],
        };
        assert_eq!(catalog.schema_of("Customers").unwrap().as_deref(), Some("dbo"));
        assert_eq!(catalog.schema_of("Orders").unwrap().as_deref(), Some("sales"));
        assert_eq!(catalog.schema_of("Missing").unwrap(), None);
    }
}
