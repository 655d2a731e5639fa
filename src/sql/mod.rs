pub mod ast;
pub mod parser;
pub mod tree;

pub use ast::Statement;
pub use parser::parse_tree;
pub use tree::StatementNode;
