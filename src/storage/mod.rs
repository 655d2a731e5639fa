pub mod disk;
pub mod memory;
pub mod row;

pub use disk::{Disk, DiskCounters};
pub use memory::MainMemory;
pub use row::{ColumnType, ColumnValue, Row, RowSchema};
