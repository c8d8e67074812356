//! DDL text to schema extraction.

mod parser;
mod scanner;

pub use parser::parse_schema;
