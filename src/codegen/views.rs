use std::collections::BTreeSet;

use crate::codegen::{assemble, table_ref, Generator, NameRegistry, BATCH_SEPARATOR};
use crate::error::SqlGenError;
use crate::metadata::MetadataProvider;
use crate::naming::{self, quote_ident};
use crate::schema::{ForeignKeyEdge, TableName};

/// Deepest join chain a traversal follows, counted in edges from the seed.
pub const MAX_DEPTH: usize = 5;

const RULE: &str = "--------------------------";

/// Emits one join view per distinct foreign-key path.
///
/// Every edge in the schema seeds an independent traversal that follows the
/// chain of tables referencing the table just joined. Traversals share only
/// the registry of emitted view names: a path whose name is already taken is
/// pruned together with everything below it.
pub struct ViewGenerator;

impl Generator for ViewGenerator {
    fn generate_with<M: MetadataProvider + ?Sized>(
        &self,
        metadata: &M,
        registry: &mut NameRegistry,
    ) -> Result<String, SqlGenError> {
        let mut views: Vec<String> = Vec::new();

        for edge in metadata.foreign_keys_of_schema()? {
            let from = table_ref(metadata, &edge.primary_table)?;
            let seed = Branch::seed(&edge.primary_table, from);
            views.extend(visit(metadata, registry, &edge, &seed, 1)?);
        }

        tracing::debug!(views = views.len(), "View generation finished");
        Ok(assemble(&views, "\n\n"))
    }
}

/// Traversal state of one branch. Extending a branch produces a new value, so
/// sibling branches never observe each other's joins.
#[derive(Debug, Clone, Default)]
struct Branch {
    /// Tables joined so far. The seed's primary table is not included.
    visited: BTreeSet<TableName>,
    /// Seed primary table first, then each joined table.
    path: Vec<TableName>,
    /// Quoted reference to the seed's primary table.
    from: String,
    joins: Vec<String>,
    columns: Vec<String>,
}

impl Branch {
    fn seed(table: &str, from: String) -> Self {
        Branch {
            path: vec![table.to_string()],
            from,
            ..Branch::default()
        }
    }

    /// A copy of this branch with `edge.foreign_table`, referenced as
    /// `target`, joined in.
    fn join(&self, edge: &ForeignKeyEdge, target: &str, columns: Vec<String>) -> Branch {
        let mut next = self.clone();
        next.visited.insert(edge.foreign_table.clone());
        next.path.push(edge.foreign_table.clone());
        next.columns.extend(columns);
        next.joins.push(format!(
            "INNER JOIN {target} ON {}.{} = {}.{}",
            quote_ident(&edge.primary_table),
            quote_ident(&edge.primary_column),
            quote_ident(&edge.foreign_table),
            quote_ident(&edge.foreign_column),
        ));
        next
    }
}

fn visit<M: MetadataProvider + ?Sized>(
    metadata: &M,
    registry: &mut NameRegistry,
    edge: &ForeignKeyEdge,
    branch: &Branch,
    level: usize,
) -> Result<Vec<String>, SqlGenError> {
    if branch.visited.contains(&edge.foreign_table) || level > MAX_DEPTH {
        return Ok(Vec::new());
    }

    let mut columns = Vec::new();
    if level == 1 {
        columns.extend(aliased_columns(metadata, &edge.primary_table)?);
    }
    columns.extend(aliased_columns(metadata, &edge.foreign_table)?);
    let target = table_ref(metadata, &edge.foreign_table)?;
    let branch = branch.join(edge, &target, columns);

    let view_name = naming::view_name(&branch.path);
    if !registry.register(&view_name) {
        tracing::debug!(view = %view_name, "Path already emitted; pruning branch");
        return Ok(Vec::new());
    }

    let mut views = vec![render_view(&view_name, &branch)];
    for next in metadata.foreign_keys_referencing(&edge.foreign_table)? {
        if branch.visited.contains(&next.foreign_table) {
            continue;
        }
        views.extend(visit(metadata, registry, &next, &branch, level + 1)?);
    }

    Ok(views)
}

/// `[T].[C] AS [TC]` for every column of `table`.
fn aliased_columns<M: MetadataProvider + ?Sized>(
    metadata: &M,
    table: &str,
) -> Result<Vec<String>, SqlGenError> {
    Ok(metadata
        .columns_of(table)?
        .iter()
        .map(|c| {
            format!(
                "{}.{} AS {}",
                quote_ident(table),
                quote_ident(&c.name),
                quote_ident(&naming::view_column_alias(table, &c.name))
            )
        })
        .collect())
}

fn render_view(view_name: &str, branch: &Branch) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(RULE.to_string());
    lines.push(format!("-- View for path: {}", branch.path.join(" -> ")));
    lines.push(BATCH_SEPARATOR.to_string());
    lines.push(format!("CREATE VIEW {} AS", quote_ident(view_name)));
    lines.push("SELECT".to_string());
    lines.push(format!("    {}", branch.columns.join(",\n    ")));
    lines.push(format!("FROM {}", branch.from));
    lines.extend(branch.joins.iter().cloned());
    lines.push(BATCH_SEPARATOR.to_string());
    lines.push(RULE.to_string());
    lines.join("\n")
}
