//! Name binding for Python source files.
//!
//! Given a parsed module and a [`context::FileInfo`] describing the file,
//! [`bind_module`] produces a [`ModuleBinding`]: a scope tree in which
//! every scope owns a symbol table, every symbol carries its declarations
//! in discovery order, and class/function nodes are annotated with the
//! types later inference passes start from.

use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

mod binder;
mod binding;
mod builtins;
pub mod context;
pub mod declaration;
pub mod diagnostic;
pub mod line_index;
pub mod module_name;
mod node_key;
pub mod python_platform;
pub mod python_version;
pub mod scope;
pub mod semantic_model;
pub mod static_truthiness;
pub mod symbol;
pub mod types;

pub use binder::{bind_module, BindError};
pub use binding::{AncestorsIter, ModuleBinding};
pub use node_key::{NodeKey, TypeSourceId};

/// An insertion-ordered map with the fast hasher used throughout the crate.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// An insertion-ordered set with the fast hasher used throughout the crate.
pub type FxIndexSet<T> = indexmap::IndexSet<T, BuildHasherDefault<FxHasher>>;
