mod columns;
mod constraints;
mod tables;

use std::collections::BTreeSet;

use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tiberius::{Client, Config};

use crate::error::SqlGenError;
use crate::schema::{CatalogSnapshot, TableInfo};

use self::constraints::ForeignKeyRow;

/// Establish a connection to a MSSQL server.
pub async fn connect(config: Config) -> Result<Client<Compat<TcpStream>>, SqlGenError> {
    let addr = config.get_addr();

    let tcp = TcpStream::connect(addr.as_str())
        .await
        .map_err(|e| SqlGenError::Connection(format!("TCP connection to {addr} failed: {e}")))?;
    tcp.set_nodelay(true)
        .map_err(|e| SqlGenError::Connection(format!("Failed to set TCP_NODELAY: {e}")))?;

    let client = Client::connect(config, tcp.compat_write())
        .await
        .map_err(|e| SqlGenError::Connection(format!("Login to {addr} failed: {e}")))?;
    Ok(client)
}

/// Open one catalog session, load a snapshot, and close the session again
/// whether or not loading succeeded.
pub async fn load_catalog(
    config: Config,
    schemas: &[String],
    table_filter: &[String],
) -> Result<CatalogSnapshot, SqlGenError> {
    let mut client = connect(config).await?;
    tracing::debug!("Introspecting schema...");
    let snapshot = introspect(&mut client, schemas, table_filter).await;
    if let Err(e) = client.close().await {
        tracing::debug!("Closing catalog session failed: {e}");
    }
    snapshot
}

/// Introspect a MSSQL database and return the catalog facts the generators need.
pub async fn introspect(
    client: &mut Client<Compat<TcpStream>>,
    schemas: &[String],
    table_filter: &[String],
) -> Result<CatalogSnapshot, SqlGenError> {
    let mut all_tables = Vec::new();

    for schema in schemas {
        let mut schema_tables = tables::query_tables(client, schema).await?;

        if !table_filter.is_empty() {
            schema_tables.retain(|t| table_filter.contains(&t.name));
        }

        for table in &mut schema_tables {
            table.columns = columns::query_columns(client, &table.schema, &table.name).await?;
            table.primary_key =
                constraints::query_primary_key(client, &table.schema, &table.name).await?;
        }

        all_tables.extend(schema_tables);
    }

    let foreign_keys = constraints::query_foreign_keys(client).await?;

    assemble_snapshot(all_tables, foreign_keys)
}

/// Sort tables by name and keep only the edges whose both ends were loaded.
///
/// Generated object names and foreign-key edges identify tables by name alone,
/// so a name loaded from two schemas is rejected.
fn assemble_snapshot(
    mut tables: Vec<TableInfo>,
    foreign_keys: Vec<ForeignKeyRow>,
) -> Result<CatalogSnapshot, SqlGenError> {
    tables.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(pair) = tables.windows(2).find(|pair| pair[0].name == pair[1].name) {
        return Err(SqlGenError::Metadata(format!(
            "table {} exists in schemas {} and {}; narrow --schemas or --tables",
            pair[0].name, pair[0].schema, pair[1].schema
        )));
    }

    let loaded: BTreeSet<(&str, &str)> = tables
        .iter()
        .map(|t| (t.schema.as_str(), t.name.as_str()))
        .collect();
    let foreign_keys = foreign_keys
        .into_iter()
        .filter(|row| {
            loaded.contains(&(row.primary_schema.as_str(), row.edge.primary_table.as_str()))
                && loaded.contains(&(row.foreign_schema.as_str(), row.edge.foreign_table.as_str()))
        })
        .map(|row| row.edge)
        .collect();

    Ok(CatalogSnapshot {
        tables,
        foreign_keys,
    })
}
