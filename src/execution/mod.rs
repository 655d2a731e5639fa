pub mod ddl;
pub mod dml;
pub mod executor;
pub mod instrument;
pub mod projection;
pub mod render;
pub mod runtime;
pub mod select;

pub use executor::{ExecutionContext, Executor};
pub use instrument::{Measurement, Stopwatch};
pub use projection::{resolve_projection, ProjectionDescriptor};
pub use render::Renderer;
pub use runtime::{execute, handle_statement};
