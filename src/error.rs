use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("table '{0}' not found")]
    TableNotFound(String),
    #[error("table '{0}' already exists")]
    TableExists(String),
    #[error("column '{0}' not found")]
    ColumnNotFound(String),
    #[error("column reference '{0}' is ambiguous")]
    AmbiguousColumn(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("malformed statement: {0}")]
    MalformedStatement(String),
    #[error("unrecognized statement kind '{0}'")]
    UnrecognizedStatementKind(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type DbResult<T> = Result<T, DbError>;
