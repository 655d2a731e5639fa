use std::rc::Rc;

use log::debug;

use crate::error::DbResult;
use crate::execution::executor::{ExecutionContext, Executor};
use crate::sql::ast::{Delete, Insert};
use crate::storage::row::build_row;

impl Executor for Insert {
    type Output = ();

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> DbResult<()> {
        let relation = ctx.catalog.get_relation_mut(&self.table_name)?;
        let schema = Rc::clone(relation.schema());
        let row = build_row(&schema, &self.attributes, &self.values)?;
        // A partially filled last block is read before being rewritten.
        if relation.last_block_partial() {
            ctx.disk.read_blocks(1);
        }
        relation.append(row);
        ctx.disk.write_blocks(1);
        debug!("Row inserted into '{}'", self.table_name);
        Ok(())
    }
}

impl Executor for Delete {
    /// Number of rows removed.
    type Output = usize;

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> DbResult<usize> {
        let relation = ctx.catalog.get_relation_mut(&self.table_name)?;
        ctx.disk.read_blocks(relation.block_count());
        let removed = match &self.selection {
            Some(pred) => relation.remove_where(|row| pred.evaluate(row))?,
            None => relation.remove_where(|_| Ok(true))?,
        };
        ctx.disk.write_blocks(relation.block_count());
        debug!("{} row(s) deleted from '{}'", removed, self.table_name);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::sql::ast::Predicate;
    use crate::sql::tree::StatementNode;
    use crate::storage::{ColumnType, Disk, DiskCounters, MainMemory};

    fn insert(table: &str, id: &str, name: &str) -> Insert {
        Insert {
            table_name: table.into(),
            attributes: Vec::new(),
            values: vec![id.into(), name.into()],
        }
    }

    #[test]
    fn insert_and_delete_charge_blocks() {
        let tree = StatementNode::leaf("test");
        let mut catalog = Catalog::new();
        let mut memory = MainMemory::new(10);
        let mut disk = Disk::new(1.0);
        catalog
            .create_relation("t", vec![("id".into(), ColumnType::Int), ("name".into(), ColumnType::Str20)])
            .unwrap();
        let mut ctx = ExecutionContext::new(&tree, &mut catalog, &mut memory, &mut disk);
        // Four tuples per block: first insert writes, the next three read and write.
        for i in 0..4 {
            insert("t", &i.to_string(), "x").execute(&mut ctx).unwrap();
        }
        assert_eq!(ctx.disk.disk_ios(), 7);

        let delete = Delete {
            table_name: "t".into(),
            selection: Some(Predicate::Equals { left: "id".into(), right: "2".into() }),
        };
        assert_eq!(delete.execute(&mut ctx).unwrap(), 1);
        // One block read, one block written back.
        assert_eq!(ctx.disk.disk_ios(), 9);
        assert_eq!(ctx.catalog.get_relation("t").unwrap().rows().len(), 3);

        let delete_all = Delete { table_name: "t".into(), selection: None };
        assert_eq!(delete_all.execute(&mut ctx).unwrap(), 3);
        assert_eq!(ctx.catalog.get_relation("t").unwrap().block_count(), 0);
    }

    #[test]
    fn insert_into_missing_table_fails() {
        let tree = StatementNode::leaf("test");
        let mut catalog = Catalog::new();
        let mut memory = MainMemory::new(10);
        let mut disk = Disk::new(1.0);
        let mut ctx = ExecutionContext::new(&tree, &mut catalog, &mut memory, &mut disk);
        assert!(insert("nope", "1", "x").execute(&mut ctx).is_err());
        assert_eq!(ctx.disk.disk_ios(), 0);
    }
}
