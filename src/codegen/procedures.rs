use crate::codegen::{assemble, column_list, table_ref, Generator, NameRegistry, BATCH_SEPARATOR};
use crate::error::SqlGenError;
use crate::metadata::MetadataProvider;
use crate::naming::{self, quote_ident};
use crate::schema::{ColumnInfo, PrimaryKeyInfo};
use crate::typemap::{parameter_type, KEY_PARAMETER_TYPE};

/// Emits CRUD stored procedures for every table with a primary key, plus
/// `Get`/`Delete` procedures filtered by each foreign-key column a table owns.
pub struct ProcedureGenerator;

impl Generator for ProcedureGenerator {
    fn generate_with<M: MetadataProvider + ?Sized>(
        &self,
        metadata: &M,
        registry: &mut NameRegistry,
    ) -> Result<String, SqlGenError> {
        let mut table_blocks: Vec<String> = Vec::new();

        for table in metadata.list_base_tables()? {
            let target = table_ref(metadata, &table)?;
            let procedures = generate_table(metadata, &table, &target, registry)?;
            if procedures.is_empty() {
                continue;
            }
            let mut block = format!("-- Stored Procedures for Table: {target}\n");
            block.push_str(&procedures.join("\n"));
            table_blocks.push(block);
        }

        tracing::debug!(
            tables = table_blocks.len(),
            procedures = registry.len(),
            "Procedure generation finished"
        );
        Ok(assemble(&table_blocks, "\n\n"))
    }
}

/// Everything one table contributes, in emission order. Tables without a
/// primary key contribute nothing. `target` is the quoted reference the
/// statements run against.
fn generate_table<M: MetadataProvider + ?Sized>(
    metadata: &M,
    table: &str,
    target: &str,
    registry: &mut NameRegistry,
) -> Result<Vec<String>, SqlGenError> {
    let Some(pk) = metadata.primary_key_of(table)? else {
        tracing::debug!(table, "Skipping table without a primary key");
        return Ok(Vec::new());
    };
    let foreign_keys = metadata.foreign_keys_originating_from(table)?;
    let columns = metadata.columns_of(table)?;

    let mut procedures: Vec<String> = Vec::new();
    let mut emit = |name: String, build: &dyn Fn(&str) -> Option<String>| {
        let Some(sql) = build(&name) else {
            return;
        };
        if registry.register(&name) {
            procedures.push(sql);
        } else {
            tracing::debug!(procedure = %name, "Suppressing duplicate procedure name");
        }
    };

    emit(naming::get_all_procedure(table), &|name: &str| {
        Some(get_all(name, target, &columns))
    });
    emit(naming::get_by_procedure(table, &pk.column), &|name: &str| {
        Some(get_by_key(name, target, &pk.column, &columns))
    });
    emit(naming::insert_procedure(table), &|name: &str| {
        Some(insert(name, target, &columns, &pk))
    });
    emit(naming::update_by_procedure(table, &pk.column), &|name: &str| {
        update_by_key(name, target, &pk.column, &columns)
    });
    emit(naming::delete_by_procedure(table, &pk.column), &|name: &str| {
        Some(delete_by_key(name, target, &pk.column))
    });

    for fk in &foreign_keys {
        emit(naming::get_by_procedure(table, &fk.foreign_column), &|name: &str| {
            Some(get_by_key(name, target, &fk.foreign_column, &columns))
        });
        emit(naming::delete_by_procedure(table, &fk.foreign_column), &|name: &str| {
            Some(delete_by_key(name, target, &fk.foreign_column))
        });
    }

    Ok(procedures)
}

/// Wrap a procedure header and body in batch separators.
fn procedure(name: &str, parameters: &[String], body: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(BATCH_SEPARATOR.to_string());
    lines.push(format!("CREATE PROCEDURE {name}"));
    if !parameters.is_empty() {
        lines.push(format!("    {}", parameters.join(",\n    ")));
    }
    lines.push("AS".to_string());
    lines.push("BEGIN".to_string());
    for line in body {
        lines.push(format!("    {line}"));
    }
    lines.push("END".to_string());
    lines.push(BATCH_SEPARATOR.to_string());
    lines.join("\n")
}

fn key_parameter(column: &str) -> String {
    format!("@{column} {KEY_PARAMETER_TYPE}")
}

fn column_parameter(col: &ColumnInfo) -> String {
    format!("@{} {}", col.name, parameter_type(col))
}

fn key_filter(column: &str) -> String {
    format!("WHERE {} = @{column}", quote_ident(column))
}

fn get_all(name: &str, target: &str, columns: &[ColumnInfo]) -> String {
    procedure(
        name,
        &[],
        &[format!("SELECT {} FROM {target};", column_list(columns))],
    )
}

/// Select every row whose `key` column matches the parameter. Serves both
/// the primary-key lookup and the per-foreign-key lookups.
fn get_by_key(name: &str, target: &str, key: &str, columns: &[ColumnInfo]) -> String {
    procedure(
        name,
        &[key_parameter(key)],
        &[
            format!("SELECT {} FROM {target}", column_list(columns)),
            format!("{};", key_filter(key)),
        ],
    )
}

/// Identity columns are left to the database; when any was skipped the new
/// identity value is returned as `NewID`.
fn insert(name: &str, target: &str, columns: &[ColumnInfo], pk: &PrimaryKeyInfo) -> String {
    let insertable: Vec<&ColumnInfo> = columns
        .iter()
        .filter(|c| !c.is_identity && !(pk.is_auto_increment && c.name == pk.column))
        .collect();
    let generates_identity = pk.is_auto_increment || columns.iter().any(|c| c.is_identity);

    let parameters: Vec<String> = insertable.iter().map(|c| column_parameter(c)).collect();
    let mut body: Vec<String> = Vec::new();
    if insertable.is_empty() {
        body.push(format!("INSERT INTO {target} DEFAULT VALUES;"));
    } else {
        body.push(format!(
            "INSERT INTO {target} ({})",
            column_list(insertable.iter().copied())
        ));
        let values: Vec<String> = insertable.iter().map(|c| format!("@{}", c.name)).collect();
        body.push(format!("VALUES ({});", values.join(", ")));
    }
    if generates_identity {
        body.push("SELECT SCOPE_IDENTITY() AS NewID;".to_string());
    }

    procedure(name, &parameters, &body)
}

/// Every non-key column is set unconditionally. A table whose only column is
/// its key has nothing to update and gets no procedure.
fn update_by_key(name: &str, target: &str, key: &str, columns: &[ColumnInfo]) -> Option<String> {
    let non_key: Vec<&ColumnInfo> = columns.iter().filter(|c| c.name != key).collect();
    if non_key.is_empty() {
        tracing::debug!(table = target, "No non-key columns; skipping update procedure");
        return None;
    }

    let mut parameters = vec![key_parameter(key)];
    parameters.extend(non_key.iter().map(|c| column_parameter(c)));
    let assignments: Vec<String> = non_key
        .iter()
        .map(|c| format!("{} = @{}", quote_ident(&c.name), c.name))
        .collect();

    Some(procedure(
        name,
        &parameters,
        &[
            format!("UPDATE {target}"),
            format!("SET {}", assignments.join(", ")),
            format!("{};", key_filter(key)),
        ],
    ))
}

fn delete_by_key(name: &str, target: &str, key: &str) -> String {
    procedure(
        name,
        &[key_parameter(key)],
        &[format!("DELETE FROM {target} {};", key_filter(key))],
    )
}
