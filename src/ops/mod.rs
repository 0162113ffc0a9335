//! High-level operations.
//!
//! This module contains the implementation of ccpkg commands.

pub mod generate;
pub mod resolve;
pub mod tree;

pub use generate::{generate, GenerateOptions};
pub use resolve::{load_index, resolve_root, ResolveOptions, Resolved};
pub use tree::{format_tree, TreeOptions};
