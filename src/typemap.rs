use crate::schema::ColumnInfo;

/// Parameter type for primary-key and foreign-key filter parameters.
///
/// Key filters are always declared `INT`, whatever the key column's own type.
/// Schemas with non-integer surrogate keys get a mismatched parameter type;
/// this is a known limitation of the generated procedures.
pub const KEY_PARAMETER_TYPE: &str = "INT";

/// Render the T-SQL type a procedure parameter for this column is declared with.
///
/// The catalog's `DATA_TYPE` is used verbatim, extended with the length or
/// precision/scale the catalog reports so that `nvarchar` parameters do not
/// silently shrink to `nvarchar(1)`.
pub fn parameter_type(col: &ColumnInfo) -> String {
    let dt = col.data_type.as_str();

    match dt.to_ascii_lowercase().as_str() {
        "char" | "varchar" | "nchar" | "nvarchar" | "binary" | "varbinary" => {
            match col.character_maximum_length {
                // CHARACTER_MAXIMUM_LENGTH is -1 for the (max) variants
                Some(-1) => format!("{dt}(max)"),
                Some(n) if n > 0 => format!("{dt}({n})"),
                _ => dt.to_string(),
            }
        }
        "decimal" | "numeric" => match (col.numeric_precision, col.numeric_scale) {
            (Some(p), Some(s)) => format!("{dt}({p}, {s})"),
            (Some(p), None) => format!("{dt}({p})"),
            _ => dt.to_string(),
        },
        _ => dt.to_string(),
    }
}
