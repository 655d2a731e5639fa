use crate::catalog::Catalog;
use crate::error::DbResult;
use crate::sql::tree::StatementNode;
use crate::storage::{Disk, MainMemory};

/// Collaborator handles for one statement. Lives for a single dispatch.
pub struct ExecutionContext<'a> {
    pub tree: &'a StatementNode,
    pub catalog: &'a mut Catalog,
    pub memory: &'a mut MainMemory,
    pub disk: &'a mut Disk,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        tree: &'a StatementNode,
        catalog: &'a mut Catalog,
        memory: &'a mut MainMemory,
        disk: &'a mut Disk,
    ) -> Self {
        ExecutionContext { tree, catalog, memory, disk }
    }
}

pub trait Executor {
    type Output;

    /// Carry out the statement against the context's collaborators.
    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> DbResult<Self::Output>;
}
