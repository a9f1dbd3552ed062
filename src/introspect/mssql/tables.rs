use tokio::net::TcpStream;
use tokio_util::compat::Compat;
use tiberius::Client;

use crate::error::SqlGenError;
use crate::schema::TableInfo;

/// Base tables of one schema, excluding the SSMS diagram table.
pub async fn query_tables(
    client: &mut Client<Compat<TcpStream>>,
    schema: &str,
) -> Result<Vec<TableInfo>, SqlGenError> {
    let query = r#"
        SELECT
            t.TABLE_SCHEMA,
            t.TABLE_NAME
        FROM INFORMATION_SCHEMA.TABLES t
        WHERE t.TABLE_SCHEMA = @P1
          AND t.TABLE_TYPE = 'BASE TABLE'
          AND t.TABLE_NAME <> 'sysdiagrams'
        ORDER BY t.TABLE_NAME
    "#;

    let stream = client
        .query(query, &[&schema])
        .await
        .map_err(SqlGenError::query(format!("tables of schema {schema}")))?;
    let rows = stream
        .into_first_result()
        .await
        .map_err(SqlGenError::query(format!("tables of schema {schema}")))?;

    let tables = rows
        .iter()
        .map(|row| TableInfo {
            schema: row.get::<&str, _>("TABLE_SCHEMA").unwrap_or("").to_string(),
            name: row.get::<&str, _>("TABLE_NAME").unwrap_or("").to_string(),
            columns: Vec::new(),
            primary_key: None,
        })
        .collect();

    Ok(tables)
}
