use tokio::net::TcpStream;
use tokio_util::compat::Compat;
use tiberius::Client;

use crate::error::SqlGenError;
use crate::schema::ForeignKeyEdge;

/// First column of the table's primary-key constraint, in key order.
pub async fn query_primary_key(
    client: &mut Client<Compat<TcpStream>>,
    schema: &str,
    table_name: &str,
) -> Result<Option<String>, SqlGenError> {
    let query = r#"
        SELECT
            kcu.COLUMN_NAME
        FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc
        JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
            ON kcu.CONSTRAINT_NAME = tc.CONSTRAINT_NAME
            AND kcu.TABLE_SCHEMA = tc.TABLE_SCHEMA
            AND kcu.TABLE_NAME = tc.TABLE_NAME
        WHERE tc.TABLE_SCHEMA = @P1
          AND tc.TABLE_NAME = @P2
          AND tc.CONSTRAINT_TYPE = 'PRIMARY KEY'
        ORDER BY kcu.ORDINAL_POSITION
    "#;

    let context = format!("primary key of {schema}.{table_name}");
    let stream = client
        .query(query, &[&schema, &table_name])
        .await
        .map_err(SqlGenError::query(context.clone()))?;
    let rows = stream
        .into_first_result()
        .await
        .map_err(SqlGenError::query(context))?;

    Ok(rows
        .first()
        .and_then(|row| row.get::<&str, _>("COLUMN_NAME"))
        .map(str::to_string))
}

/// A foreign-key column pair together with the schemas of both tables.
#[derive(Debug, Clone)]
pub struct ForeignKeyRow {
    pub primary_schema: String,
    pub foreign_schema: String,
    pub edge: ForeignKeyEdge,
}

/// Every foreign-key column pair in the database, one row per pair.
pub async fn query_foreign_keys(
    client: &mut Client<Compat<TcpStream>>,
) -> Result<Vec<ForeignKeyRow>, SqlGenError> {
    let query = r#"
        SELECT
            fk.name AS constraint_name,
            SCHEMA_NAME(pk_t.schema_id) AS primary_schema,
            pk_t.name AS primary_table,
            COL_NAME(fkc.referenced_object_id, fkc.referenced_column_id) AS primary_column,
            SCHEMA_NAME(fk_t.schema_id) AS foreign_schema,
            fk_t.name AS foreign_table,
            COL_NAME(fkc.parent_object_id, fkc.parent_column_id) AS foreign_column
        FROM sys.foreign_keys fk
        JOIN sys.foreign_key_columns fkc ON fkc.constraint_object_id = fk.object_id
        JOIN sys.tables pk_t ON pk_t.object_id = fkc.referenced_object_id
        JOIN sys.tables fk_t ON fk_t.object_id = fkc.parent_object_id
        ORDER BY fk.name, fkc.constraint_column_id
    "#;

    let stream = client
        .query(query, &[])
        .await
        .map_err(SqlGenError::query("foreign keys"))?;
    let rows = stream
        .into_first_result()
        .await
        .map_err(SqlGenError::query("foreign keys"))?;

    let text = |row: &tiberius::Row, col: &str| row.get::<&str, _>(col).unwrap_or("").to_string();

    let foreign_keys = rows
        .iter()
        .map(|row| ForeignKeyRow {
            primary_schema: text(row, "primary_schema"),
            foreign_schema: text(row, "foreign_schema"),
            edge: ForeignKeyEdge {
                name: text(row, "constraint_name"),
                primary_table: text(row, "primary_table"),
                primary_column: text(row, "primary_column"),
                foreign_table: text(row, "foreign_table"),
                foreign_column: text(row, "foreign_column"),
            },
        })
        .collect();

    Ok(foreign_keys)
}
