pub mod generate;
pub mod query;
pub mod shell;
pub mod show;
