pub mod robots;
pub mod table_parser;

pub use robots::is_allowed;
pub use table_parser::TableParser;
