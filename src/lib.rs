pub mod cli;
pub mod merge;
