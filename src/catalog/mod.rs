use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{DbError, DbResult};
use crate::storage::row::{ColumnType, Row, RowSchema};

/// Field slots in one simulated block.
pub const FIELDS_PER_BLOCK: usize = 8;

/// A stored table: its schema and rows, in insertion order.
#[derive(Debug, Clone)]
pub struct Relation {
    pub name: String,
    schema: Rc<RowSchema>,
    rows: Vec<Row>,
}

impl Relation {
    pub fn schema(&self) -> &Rc<RowSchema> {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn tuples_per_block(&self) -> usize {
        (FIELDS_PER_BLOCK / self.schema.len()).max(1)
    }

    pub fn block_count(&self) -> usize {
        self.rows.len().div_ceil(self.tuples_per_block())
    }

    /// True when the last block has room for another tuple.
    pub fn last_block_partial(&self) -> bool {
        self.rows.len() % self.tuples_per_block() != 0
    }

    pub fn append(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Remove every row for which `matches` returns true; returns how many
    /// were removed. Nothing is removed if the predicate fails on any row.
    pub fn remove_where<F>(&mut self, mut matches: F) -> DbResult<usize>
    where
        F: FnMut(&Row) -> DbResult<bool>,
    {
        let doomed = self.rows.iter().map(&mut matches).collect::<DbResult<Vec<_>>>()?;
        let before = self.rows.len();
        let mut flags = doomed.into_iter();
        self.rows.retain(|_| !flags.next().unwrap_or(false));
        Ok(before - self.rows.len())
    }
}

/// The Catalog holds all relations by name.
#[derive(Debug, Default)]
pub struct Catalog {
    relations: HashMap<String, Relation>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn create_relation(&mut self, name: &str, fields: Vec<(String, ColumnType)>) -> DbResult<&Relation> {
        if self.relations.contains_key(name) {
            return Err(DbError::TableExists(name.to_string()));
        }
        let schema = Rc::new(RowSchema::new(fields)?);
        debug!("catalog: register '{}' with {} field(s)", name, schema.len());
        let relation = Relation { name: name.to_string(), schema, rows: Vec::new() };
        Ok(self.relations.entry(name.to_string()).or_insert(relation))
    }

    pub fn get_relation(&self, name: &str) -> DbResult<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    pub fn get_relation_mut(&mut self, name: &str) -> DbResult<&mut Relation> {
        self.relations
            .get_mut(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    pub fn drop_relation(&mut self, name: &str) -> DbResult<Relation> {
        debug!("catalog: drop '{}'", name);
        self.relations
            .remove(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }
}
