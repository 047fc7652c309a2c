pub mod args;
pub mod cli;
pub mod export;
pub mod import;
pub mod records;
pub mod sheet;
