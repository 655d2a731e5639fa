use crate::error::{DbError, DbResult};
use crate::sql::ast::{COLUMNS, DISTINCT, FROM};
use crate::sql::tree::StatementNode;

pub const WILDCARD: &str = "*";

/// Resolved SELECT list. `headers` hold the column references exactly as
/// written; `columns` hold the keys used to fetch values from result rows.
/// Both lists have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDescriptor {
    pub headers: Vec<String>,
    pub columns: Vec<String>,
}

impl ProjectionDescriptor {
    pub fn is_wildcard(&self) -> bool {
        self.headers.first().is_some_and(|h| h == WILDCARD)
    }
}

/// Derive the projection of a SELECT tree without touching the tree.
///
/// A `DISTINCT` node heading the `COLUMNS` branch is unwrapped. With a
/// single source table, `table.column` references fetch by `column`, since
/// single-table rows store unqualified names. With several sources the
/// reference is kept whole. A reference with more than one `.` is
/// malformed.
pub fn resolve_projection(tree: &StatementNode) -> DbResult<ProjectionDescriptor> {
    let mut columns_node = tree
        .branch(COLUMNS)
        .ok_or_else(|| DbError::MalformedStatement("SELECT without COLUMNS".into()))?;
    let from_node = tree
        .branch(FROM)
        .ok_or_else(|| DbError::MalformedStatement("SELECT without FROM".into()))?;

    if let Some(first) = columns_node.first_child() {
        if first.is(DISTINCT) {
            columns_node = first;
        }
    }
    if columns_node.branches.is_empty() {
        return Err(DbError::MalformedStatement("SELECT lists no columns".into()));
    }

    let single_source = from_node.branches.len() == 1;
    let mut headers = Vec::with_capacity(columns_node.branches.len());
    let mut columns = Vec::with_capacity(columns_node.branches.len());
    for field in &columns_node.branches {
        let text = field
            .first_child()
            .map(|leaf| leaf.kind.as_str())
            .ok_or_else(|| DbError::MalformedStatement(format!("column '{}' has no name", field.kind)))?;
        if text.matches('.').count() > 1 {
            return Err(DbError::MalformedStatement(format!("column reference '{}' has too many parts", text)));
        }
        let key = match text.split_once('.') {
            Some((_, column)) if single_source => column,
            _ => text,
        };
        headers.push(text.to_string());
        columns.push(key.to_string());
    }
    Ok(ProjectionDescriptor { headers, columns })
}
