use std::collections::HashSet;
use std::rc::Rc;

use log::debug;

use crate::error::DbResult;
use crate::execution::executor::{ExecutionContext, Executor};
use crate::sql::ast::SelectStatement;
use crate::storage::row::{ColumnValue, Row, RowSchema};

impl SelectStatement {
    /// Values DISTINCT compares: the projected columns, or the whole row
    /// for a wildcard.
    fn distinct_key(&self, row: &Row) -> DbResult<Vec<ColumnValue>> {
        if self.projection.is_wildcard() {
            return Ok(row.values().to_vec());
        }
        self.projection
            .columns
            .iter()
            .map(|c| row.get(c).cloned())
            .collect()
    }
}

impl Executor for SelectStatement {
    type Output = Vec<Row>;

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> DbResult<Vec<Row>> {
        let relations = self
            .tables
            .iter()
            .map(|t| ctx.catalog.get_relation(t))
            .collect::<DbResult<Vec<_>>>()?;

        let mut rows: Vec<Row> = match relations.as_slice() {
            [only] => {
                ctx.disk.read_blocks(only.block_count());
                only.rows().to_vec()
            }
            [outer, inners @ ..] => {
                // Nested loop: the outer relation is read once, each inner
                // relation once per memory load of the outer one.
                let passes = ctx.memory.passes(outer.block_count());
                ctx.disk.read_blocks(outer.block_count());
                for inner in inners {
                    ctx.disk.read_blocks(inner.block_count() * passes);
                }
                let sources: Vec<(&str, &RowSchema)> = relations
                    .iter()
                    .map(|r| (r.name.as_str(), &**r.schema()))
                    .collect();
                let schema = Rc::new(RowSchema::qualified(&sources)?);
                // Intermediate rows carry the qualified prefix of the final schema.
                let prefix = |width: usize| -> DbResult<Rc<RowSchema>> {
                    if width == schema.len() {
                        Ok(Rc::clone(&schema))
                    } else {
                        Ok(Rc::new(RowSchema::new(schema.fields()[..width].to_vec())?))
                    }
                };
                let mut width = outer.schema().len();
                let head = prefix(width)?;
                let mut product: Vec<Row> = outer
                    .rows()
                    .iter()
                    .map(|r| r.with_schema(Rc::clone(&head)))
                    .collect::<DbResult<_>>()?;
                for inner in inners {
                    width += inner.schema().len();
                    let partial = prefix(width)?;
                    let mut next = Vec::with_capacity(product.len() * inner.rows().len());
                    for left in &product {
                        for right in inner.rows() {
                            next.push(left.join(right, Rc::clone(&partial))?);
                        }
                    }
                    product = next;
                }
                product
            }
            [] => Vec::new(),
        };

        if let Some(pred) = &self.selection {
            let mut kept = Vec::with_capacity(rows.len());
            for row in rows {
                if pred.evaluate(&row)? {
                    kept.push(row);
                }
            }
            rows = kept;
        }

        if self.distinct {
            let mut seen = HashSet::new();
            let mut kept = Vec::with_capacity(rows.len());
            for row in rows {
                if seen.insert(self.distinct_key(&row)?) {
                    kept.push(row);
                }
            }
            rows = kept;
        }

        debug!("SELECT over {:?} produced {} row(s)", self.tables, rows.len());
        Ok(rows)
    }
}
