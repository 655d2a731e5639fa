use log::debug;

use crate::error::{DbError, DbResult};
use crate::execution::projection::{resolve_projection, ProjectionDescriptor};
use crate::sql::tree::StatementNode;
use crate::storage::row::{ColumnType, Row};

// Node kinds, matched case-insensitively.
pub const CREATE: &str = "CREATE";
pub const INSERT: &str = "INSERT";
pub const SELECT: &str = "SELECT";
pub const DELETE: &str = "DELETE";
pub const DROP: &str = "DROP";
pub const TABLE: &str = "TABLE";
pub const ATTRIBUTES: &str = "ATTRIBUTES";
pub const ATTRIBUTE: &str = "ATTRIBUTE";
pub const VALUES: &str = "VALUES";
pub const COLUMNS: &str = "COLUMNS";
pub const COLUMN: &str = "COLUMN";
pub const DISTINCT: &str = "DISTINCT";
pub const FROM: &str = "FROM";
pub const WHERE: &str = "WHERE";
pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const EQUALS: &str = "=";

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals { left: String, right: String },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn from_node(node: &StatementNode) -> DbResult<Self> {
        let pair = match node.branches.as_slice() {
            [l, r] => (l, r),
            _ => {
                return Err(DbError::MalformedStatement(format!(
                    "'{}' needs two operands",
                    node.kind
                )))
            }
        };
        if node.is(EQUALS) {
            Ok(Predicate::Equals { left: leaf_text(pair.0)?, right: leaf_text(pair.1)? })
        } else if node.is(AND) {
            Ok(Predicate::And(
                Box::new(Predicate::from_node(pair.0)?),
                Box::new(Predicate::from_node(pair.1)?),
            ))
        } else if node.is(OR) {
            Ok(Predicate::Or(
                Box::new(Predicate::from_node(pair.0)?),
                Box::new(Predicate::from_node(pair.1)?),
            ))
        } else {
            Err(DbError::MalformedStatement(format!("unknown condition '{}'", node.kind)))
        }
    }

    /// Rewrite `table.column` operands naming `table` to plain `column`,
    /// the form single-table rows store.
    pub fn unqualified(self, table: &str) -> Predicate {
        let prefix = format!("{}.", table);
        let strip = |operand: String| match operand.strip_prefix(prefix.as_str()) {
            Some(column) => column.to_string(),
            None => operand,
        };
        match self {
            Predicate::Equals { left, right } => Predicate::Equals { left: strip(left), right: strip(right) },
            Predicate::And(a, b) => Predicate::And(Box::new(a.unqualified(table)), Box::new(b.unqualified(table))),
            Predicate::Or(a, b) => Predicate::Or(Box::new(a.unqualified(table)), Box::new(b.unqualified(table))),
        }
    }

    /// Evaluate against a row. An operand naming a field of the row takes
    /// that field's value; anything else is compared as a literal.
    pub fn evaluate(&self, row: &Row) -> DbResult<bool> {
        fn get_value(token: &str, row: &Row) -> DbResult<String> {
            match row.get(token) {
                Ok(v) => Ok(v.to_string()),
                Err(DbError::ColumnNotFound(_)) => Ok(token.to_string()),
                Err(e) => Err(e),
            }
        }

        match self {
            Predicate::Equals { left, right } => Ok(get_value(left, row)? == get_value(right, row)?),
            Predicate::And(a, b) => Ok(a.evaluate(row)? && b.evaluate(row)?),
            Predicate::Or(a, b) => Ok(a.evaluate(row)? || b.evaluate(row)?),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table_name: String,
    pub attributes: Vec<(String, ColumnType)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table_name: String,
    /// Empty when the values follow schema order.
    pub attributes: Vec<String>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub projection: ProjectionDescriptor,
    pub distinct: bool,
    pub tables: Vec<String>,
    pub selection: Option<Predicate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table_name: String,
    pub selection: Option<Predicate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub table_name: String,
}

/// A statement lowered from its tree, one variant per executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    Insert(Insert),
    Select(SelectStatement),
    Delete(Delete),
    DropTable(DropTable),
}

/// Text of a leaf node.
fn leaf_text(node: &StatementNode) -> DbResult<String> {
    if node.is_leaf() {
        Ok(node.kind.clone())
    } else {
        Err(DbError::MalformedStatement(format!("expected a value, found '{}'", node)))
    }
}

/// Text of the single leaf under a wrapper node such as `(TABLE t)`.
fn wrapped_text(node: &StatementNode) -> DbResult<String> {
    match node.first_child() {
        Some(child) => leaf_text(child),
        None => Err(DbError::MalformedStatement(format!("'{}' has no value", node.kind))),
    }
}

fn required<'a>(tree: &'a StatementNode, kind: &str) -> DbResult<&'a StatementNode> {
    tree.branch(kind).ok_or_else(|| {
        DbError::MalformedStatement(format!("{} statement without {}", tree.kind.to_uppercase(), kind))
    })
}

fn selection(tree: &StatementNode) -> DbResult<Option<Predicate>> {
    match tree.branch(WHERE) {
        Some(node) => match node.first_child() {
            Some(cond) => Predicate::from_node(cond).map(Some),
            None => Err(DbError::MalformedStatement("empty WHERE".into())),
        },
        None => Ok(None),
    }
}

impl Statement {
    pub fn from_tree(tree: &StatementNode) -> DbResult<Self> {
        debug!("lowering {}", tree);
        if tree.is(CREATE) {
            let table_name = wrapped_text(required(tree, TABLE)?)?;
            let attributes = required(tree, ATTRIBUTES)?
                .branches
                .iter()
                .map(|attr| -> DbResult<(String, ColumnType)> {
                    match attr.branches.as_slice() {
                        [name, ty] if attr.is(ATTRIBUTE) => {
                            let name = leaf_text(name)?;
                            let ty_text = leaf_text(ty)?;
                            let ty = ColumnType::from_str(&ty_text).ok_or_else(|| {
                                DbError::InvalidValue(format!("unknown type '{}' for '{}'", ty_text, name))
                            })?;
                            Ok((name, ty))
                        }
                        _ => Err(DbError::MalformedStatement(format!("bad attribute '{}'", attr))),
                    }
                })
                .collect::<DbResult<Vec<_>>>()?;
            Ok(Statement::CreateTable(CreateTable { table_name, attributes }))
        } else if tree.is(INSERT) {
            let table_name = wrapped_text(required(tree, TABLE)?)?;
            let attributes = match tree.branch(ATTRIBUTES) {
                Some(node) => node.branches.iter().map(leaf_text).collect::<DbResult<Vec<_>>>()?,
                None => Vec::new(),
            };
            let values = required(tree, VALUES)?
                .branches
                .iter()
                .map(leaf_text)
                .collect::<DbResult<Vec<_>>>()?;
            Ok(Statement::Insert(Insert { table_name, attributes, values }))
        } else if tree.is(SELECT) {
            let projection = resolve_projection(tree)?;
            let distinct = required(tree, COLUMNS)?
                .first_child()
                .is_some_and(|c| c.is(DISTINCT));
            let tables = required(tree, FROM)?
                .branches
                .iter()
                .map(wrapped_text)
                .collect::<DbResult<Vec<_>>>()?;
            let selection = match tables.as_slice() {
                [] => return Err(DbError::MalformedStatement("FROM lists no tables".into())),
                [only] => selection(tree)?.map(|p| p.unqualified(only)),
                _ => selection(tree)?,
            };
            Ok(Statement::Select(SelectStatement { projection, distinct, tables, selection }))
        } else if tree.is(DELETE) {
            let table_name = wrapped_text(required(tree, TABLE)?)?;
            let selection = selection(tree)?.map(|p| p.unqualified(&table_name));
            Ok(Statement::Delete(Delete { table_name, selection }))
        } else if tree.is(DROP) {
            Ok(Statement::DropTable(DropTable {
                table_name: wrapped_text(required(tree, TABLE)?)?,
            }))
        } else {
            Err(DbError::UnrecognizedStatementKind(tree.kind.clone()))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Statement::CreateTable(_) => CREATE,
            Statement::Insert(_) => INSERT,
            Statement::Select(_) => SELECT,
            Statement::Delete(_) => DELETE,
            Statement::DropTable(_) => DROP,
        }
    }
}
