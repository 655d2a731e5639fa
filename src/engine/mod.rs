use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::DbResult;
use crate::execution::{runtime, Renderer};
use crate::sql::parser::parse_tree;
use crate::sql::tree::StatementNode;
use crate::storage::{Disk, MainMemory};

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub executed: usize,
    pub failed: usize,
}

pub struct Engine {
    pub catalog: Catalog,
    pub disk: Disk,
    pub memory: MainMemory,
    renderer: Renderer,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        Engine {
            catalog: Catalog::new(),
            disk: Disk::new(config.disk_latency_ms),
            memory: MainMemory::new(config.memory_blocks),
            renderer: Renderer::from_config(config),
        }
    }

    /// Execute one statement tree, writing results and timing lines to `out`.
    pub fn execute<W: Write>(&mut self, tree: &StatementNode, out: &mut W) -> DbResult<()> {
        runtime::execute(
            tree,
            &mut self.catalog,
            &mut self.disk,
            &mut self.memory,
            &self.renderer,
            out,
        )
    }

    /// Read one statement tree from `input` and execute it.
    pub fn execute_text<W: Write>(&mut self, input: &str, out: &mut W) -> DbResult<()> {
        let tree = parse_tree(input)?;
        self.execute(&tree, out)
    }

    /// Execute one statement tree per line. Blank lines and `--` comments
    /// are skipped; a failing statement is logged and the run continues.
    pub fn run_batch<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> DbResult<BatchSummary> {
        let mut summary = BatchSummary::default();
        for (lineno, line) in input.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }
            debug!("batch line {}: {}", lineno + 1, trimmed);
            summary.executed += 1;
            if let Err(e) = self.execute_text(trimmed, out) {
                warn!("line {}: {}", lineno + 1, e);
                summary.failed += 1;
            }
        }
        Ok(summary)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(&EngineConfig::default())
    }
}
