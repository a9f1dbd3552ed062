//! Names of generated objects. Procedure names concatenate table and column
//! names verbatim; view names join the traversal path with underscores.

use crate::schema::DEFAULT_SCHEMA;

pub fn get_all_procedure(table: &str) -> String {
    format!("GetAll{table}")
}

pub fn get_by_procedure(table: &str, column: &str) -> String {
    format!("Get{table}By{column}")
}

pub fn insert_procedure(table: &str) -> String {
    format!("Insert{table}")
}

pub fn update_by_procedure(table: &str, column: &str) -> String {
    format!("Update{table}By{column}")
}

pub fn delete_by_procedure(table: &str, column: &str) -> String {
    format!("Delete{table}By{column}")
}

/// `["A", "B", "C"]` -> `A_B_C_View`.
pub fn view_name<S: AsRef<str>>(path: &[S]) -> String {
    let mut name = path
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("_");
    name.push_str("_View");
    name
}

/// Alias for a column selected into a join view: table name then column name.
pub fn view_column_alias(table: &str, column: &str) -> String {
    format!("{table}{column}")
}

/// Bracket-quote a T-SQL identifier, doubling any closing bracket.
pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Bracket-quoted table reference. Tables outside the default schema carry
/// their schema prefix.
pub fn qualified_ident(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(schema) if schema != DEFAULT_SCHEMA => {
            format!("{}.{}", quote_ident(schema), quote_ident(table))
        }
        _ => quote_ident(table),
    }
}
