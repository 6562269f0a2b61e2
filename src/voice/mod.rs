pub mod parser;
pub mod speech;
