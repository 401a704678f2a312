//! The syntax tree for the Python dialect the analyzer understands.
//!
//! This crate only defines the tree; producing one is the parser's job.
//! Downstream passes walk the tree through [`visitor::Visitor`].

pub mod name;
mod nodes;
pub mod visitor;

pub use name::Name;
pub use nodes::*;
