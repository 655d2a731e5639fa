use log::info;

use crate::error::DbResult;
use crate::execution::executor::{ExecutionContext, Executor};
use crate::sql::ast::{CreateTable, DropTable};

impl Executor for CreateTable {
    type Output = ();

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> DbResult<()> {
        ctx.catalog.create_relation(&self.table_name, self.attributes.clone())?;
        info!("Table '{}' created", self.table_name);
        Ok(())
    }
}

impl Executor for DropTable {
    type Output = ();

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> DbResult<()> {
        let relation = ctx.catalog.drop_relation(&self.table_name)?;
        info!("Table '{}' dropped ({} row(s))", self.table_name, relation.rows().len());
        Ok(())
    }
}
