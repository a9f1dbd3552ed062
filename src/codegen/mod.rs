pub mod procedures;
pub mod registry;
pub mod views;

use crate::error::SqlGenError;
use crate::metadata::MetadataProvider;
use crate::naming::{qualified_ident, quote_ident};
use crate::schema::ColumnInfo;

pub use registry::NameRegistry;

/// Batch separator placed around every generated statement.
pub const BATCH_SEPARATOR: &str = "GO";

/// Trait for script generators.
///
/// A generator reads the catalog through a [`MetadataProvider`] and returns
/// one assembled script. Any metadata failure aborts the run; no partial
/// script is returned.
pub trait Generator {
    /// Generate the script, deduplicating emitted names against `registry`.
    fn generate_with<M: MetadataProvider + ?Sized>(
        &self,
        metadata: &M,
        registry: &mut NameRegistry,
    ) -> Result<String, SqlGenError>;

    /// Generate the script with a fresh registry scoped to this call.
    fn generate_all<M: MetadataProvider + ?Sized>(
        &self,
        metadata: &M,
    ) -> Result<String, SqlGenError> {
        let mut registry = NameRegistry::new();
        self.generate_with(metadata, &mut registry)
    }
}

/// `[a], [b], [c]`
pub fn column_list<'a, I>(columns: I) -> String
where
    I: IntoIterator<Item = &'a ColumnInfo>,
{
    columns
        .into_iter()
        .map(|c| quote_ident(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `[T]`, or `[schema].[T]` for a table outside the default schema.
pub fn table_ref<M: MetadataProvider + ?Sized>(
    metadata: &M,
    table: &str,
) -> Result<String, SqlGenError> {
    Ok(qualified_ident(metadata.schema_of(table)?.as_deref(), table))
}

/// Join fragments into a script: `separator` between them and a single
/// trailing newline when anything was emitted.
pub fn assemble(fragments: &[String], separator: &str) -> String {
    let mut output = fragments.join(separator);
    if !output.is_empty() {
        output.push('\n');
    }
    output
}
