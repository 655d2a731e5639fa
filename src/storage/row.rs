use std::fmt;
use std::rc::Rc;

use crate::error::{DbError, DbResult};

/// Joins a table name to a column name inside multi-source row schemas.
pub const QUALIFIER_SEPARATOR: char = '#';
/// Longest value a `STR20` field accepts, in bytes.
pub const MAX_STR_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Str20,
}

impl ColumnType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INT" | "INTEGER" => Some(ColumnType::Int),
            "STR20" => Some(ColumnType::Str20),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "INT",
            ColumnType::Str20 => "STR20",
        }
    }

    /// Convert a literal into a value of this type.
    pub fn parse_value(&self, column: &str, literal: &str) -> DbResult<ColumnValue> {
        match self {
            ColumnType::Int => literal.parse::<i32>().map(ColumnValue::Integer).map_err(|_| {
                DbError::InvalidValue(format!(
                    "value '{}' for column '{}' is not a valid INT",
                    literal, column
                ))
            }),
            ColumnType::Str20 => {
                if literal.len() > MAX_STR_LEN {
                    return Err(DbError::InvalidValue(format!(
                        "value '{}' for column '{}' exceeds {} characters",
                        literal, column, MAX_STR_LEN
                    )));
                }
                Ok(ColumnValue::Text(literal.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnValue {
    Integer(i32),
    Text(String),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Integer(i) => write!(f, "{}", i),
            ColumnValue::Text(s) => f.write_str(s),
        }
    }
}

/// Strip the `table#` prefix from an internally qualified field name.
pub fn display_name(field: &str) -> &str {
    match field.split_once(QUALIFIER_SEPARATOR) {
        Some((_, column)) => column,
        None => field,
    }
}

/// Ordered field names and types of a row. Names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSchema {
    fields: Vec<(String, ColumnType)>,
}

impl RowSchema {
    pub fn new(fields: Vec<(String, ColumnType)>) -> DbResult<Self> {
        if fields.is_empty() {
            return Err(DbError::InvalidValue("a schema needs at least one field".into()));
        }
        for (i, (name, _)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(other, _)| other == name) {
                return Err(DbError::InvalidValue(format!("duplicate field '{}'", name)));
            }
        }
        Ok(RowSchema { fields })
    }

    /// Schema of a cross product: every field renamed to `table#column`.
    pub fn qualified(sources: &[(&str, &RowSchema)]) -> DbResult<Self> {
        let fields = sources
            .iter()
            .flat_map(|&(table, schema)| {
                schema.fields.iter().map(move |(name, ty)| {
                    (format!("{}{}{}", table, QUALIFIER_SEPARATOR, display_name(name)), *ty)
                })
            })
            .collect();
        RowSchema::new(fields)
    }

    pub fn fields(&self) -> &[(String, ColumnType)] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a field. Accepts the stored name, `table.column` for a
    /// stored `table#column`, or a bare column name when exactly one
    /// qualified field carries it.
    pub fn position(&self, name: &str) -> DbResult<usize> {
        if let Some(i) = self.fields.iter().position(|(f, _)| f == name) {
            return Ok(i);
        }
        if let Some((table, column)) = name.split_once('.') {
            let stored = format!("{}{}{}", table, QUALIFIER_SEPARATOR, column);
            return self
                .fields
                .iter()
                .position(|(f, _)| *f == stored)
                .ok_or_else(|| DbError::ColumnNotFound(name.to_string()));
        }
        let mut matches = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, (f, _))| f.contains(QUALIFIER_SEPARATOR) && display_name(f) == name)
            .map(|(i, _)| i);
        match (matches.next(), matches.next()) {
            (Some(i), None) => Ok(i),
            (Some(_), Some(_)) => Err(DbError::AmbiguousColumn(name.to_string())),
            _ => Err(DbError::ColumnNotFound(name.to_string())),
        }
    }

    pub fn field_type(&self, name: &str) -> DbResult<ColumnType> {
        self.position(name).map(|i| self.fields[i].1)
    }
}

/// One result or stored tuple, sharing its schema with its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Rc<RowSchema>,
    values: Vec<ColumnValue>,
}

impl Row {
    pub fn new(schema: Rc<RowSchema>, values: Vec<ColumnValue>) -> DbResult<Self> {
        if values.len() != schema.len() {
            return Err(DbError::InvalidValue(format!(
                "expected {} values, got {}",
                schema.len(),
                values.len()
            )));
        }
        Ok(Row { schema, values })
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    pub fn values(&self) -> &[ColumnValue] {
        &self.values
    }

    pub fn get(&self, name: &str) -> DbResult<&ColumnValue> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Concatenate two rows under a schema covering both.
    pub fn join(&self, other: &Row, schema: Rc<RowSchema>) -> DbResult<Row> {
        let values = self.values.iter().chain(other.values.iter()).cloned().collect();
        Row::new(schema, values)
    }

    /// Re-home the values under another schema of the same shape.
    pub fn with_schema(&self, schema: Rc<RowSchema>) -> DbResult<Row> {
        Row::new(schema, self.values.clone())
    }
}

/// Build a row from raw literals. `attributes` names the field each literal
/// belongs to; an empty list means the literals follow schema order. Every
/// schema field must be given exactly once.
pub fn build_row(schema: &Rc<RowSchema>, attributes: &[String], values: &[String]) -> DbResult<Row> {
    if !attributes.is_empty() && attributes.len() != values.len() {
        return Err(DbError::InvalidValue(format!(
            "{} attributes but {} values",
            attributes.len(),
            values.len()
        )));
    }
    if values.len() != schema.len() {
        return Err(DbError::InvalidValue(format!(
            "expected {} values, got {}",
            schema.len(),
            values.len()
        )));
    }
    let mut slots: Vec<Option<ColumnValue>> = vec![None; schema.len()];
    for (i, literal) in values.iter().enumerate() {
        let pos = match attributes.get(i) {
            Some(attr) => schema.position(attr)?,
            None => i,
        };
        let (name, ty) = &schema.fields()[pos];
        if slots[pos].is_some() {
            return Err(DbError::InvalidValue(format!("column '{}' given twice", name)));
        }
        slots[pos] = Some(ty.parse_value(name, literal)?);
    }
    let values = slots
        .into_iter()
        .zip(schema.field_names())
        .map(|(v, name)| v.ok_or_else(|| DbError::InvalidValue(format!("missing value for '{}'", name))))
        .collect::<DbResult<Vec<_>>>()?;
    Row::new(Rc::clone(schema), values)
}
