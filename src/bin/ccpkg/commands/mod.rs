//! Command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod tree;
