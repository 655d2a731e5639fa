use std::io::Write;

use log::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::DbResult;
use crate::execution::executor::{ExecutionContext, Executor};
use crate::execution::instrument::Stopwatch;
use crate::execution::render::Renderer;
use crate::sql::ast::Statement;
use crate::sql::tree::StatementNode;
use crate::storage::{Disk, MainMemory};

/// Route a lowered statement to its executor. SELECT results are rendered
/// to `out`; the other kinds print nothing here.
pub fn handle_statement<W: Write>(
    stmt: &Statement,
    ctx: &mut ExecutionContext<'_>,
    renderer: &Renderer,
    out: &mut W,
) -> DbResult<()> {
    debug!("executing {} from {}", stmt.kind(), ctx.tree);
    match stmt {
        Statement::CreateTable(create) => create.execute(ctx),
        Statement::Insert(insert) => insert.execute(ctx),
        Statement::Select(select) => {
            let rows = select.execute(ctx)?;
            renderer.print_result(&rows, &select.projection, out)
        }
        Statement::Delete(delete) => {
            let count = delete.execute(ctx)?;
            info!("{} row(s) deleted", count);
            Ok(())
        }
        Statement::DropTable(drop) => drop.execute(ctx),
    }
}

/// Run one statement tree and report its cost. The timing lines are
/// written whether or not the statement succeeds; the statement's error,
/// if any, is returned afterwards and takes precedence over a failure to
/// write the report.
pub fn execute<W: Write>(
    tree: &StatementNode,
    catalog: &mut Catalog,
    disk: &mut Disk,
    memory: &mut MainMemory,
    renderer: &Renderer,
    out: &mut W,
) -> DbResult<()> {
    let watch = Stopwatch::start(&*disk);
    let result = match Statement::from_tree(tree) {
        Ok(stmt) => {
            let mut ctx = ExecutionContext::new(tree, catalog, memory, disk);
            handle_statement(&stmt, &mut ctx, renderer, out)
        }
        Err(e) => Err(e),
    };
    match (watch.finish(&*disk).report(out), result) {
        (Ok(()), result) => result,
        (Err(e), Ok(())) => Err(e.into()),
        (Err(e), Err(stmt_err)) => {
            warn!("timing report not written: {}", e);
            Err(stmt_err)
        }
    }
}
