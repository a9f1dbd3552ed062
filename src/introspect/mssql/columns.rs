use tokio::net::TcpStream;
use tokio_util::compat::Compat;
use tiberius::Client;

use crate::error::SqlGenError;
use crate::schema::ColumnInfo;

pub async fn query_columns(
    client: &mut Client<Compat<TcpStream>>,
    schema: &str,
    table_name: &str,
) -> Result<Vec<ColumnInfo>, SqlGenError> {
    let query = r#"
        SELECT
            c.COLUMN_NAME,
            c.DATA_TYPE,
            c.CHARACTER_MAXIMUM_LENGTH,
            c.NUMERIC_PRECISION,
            c.NUMERIC_SCALE,
            COLUMNPROPERTY(OBJECT_ID(QUOTENAME(c.TABLE_SCHEMA) + '.' + QUOTENAME(c.TABLE_NAME)), c.COLUMN_NAME, 'IsIdentity') AS is_identity
        FROM INFORMATION_SCHEMA.COLUMNS c
        WHERE c.TABLE_SCHEMA = @P1 AND c.TABLE_NAME = @P2
        ORDER BY c.ORDINAL_POSITION
    "#;

    let context = format!("columns of {schema}.{table_name}");
    let stream = client
        .query(query, &[&schema, &table_name])
        .await
        .map_err(SqlGenError::query(context.clone()))?;
    let rows = stream
        .into_first_result()
        .await
        .map_err(SqlGenError::query(context))?;

    let mut columns = Vec::new();
    for row in rows {
        let numeric_precision: Option<i32> = row
            .get::<u8, _>("NUMERIC_PRECISION")
            .map(|v| v as i32);
        let numeric_scale: Option<i32> = row.get::<i32, _>("NUMERIC_SCALE");

        columns.push(ColumnInfo {
            name: row
                .get::<&str, _>("COLUMN_NAME")
                .unwrap_or("")
                .to_string(),
            data_type: row.get::<&str, _>("DATA_TYPE").unwrap_or("").to_string(),
            character_maximum_length: row.get::<i32, _>("CHARACTER_MAXIMUM_LENGTH"),
            numeric_precision,
            numeric_scale,
            is_identity: row.get::<i32, _>("is_identity").unwrap_or(0) == 1,
        });
    }

    Ok(columns)
}
