//! The result of binding one file: the scope tree, the types constructed
//! for class and function nodes, and the diagnostics the walk produced.

use rustc_hash::FxHashMap;

use tern_index::IndexVec;

use crate::context::SourcePath;
use crate::diagnostic::Diagnostic;
use crate::node_key::NodeKey;
use crate::scope::{FileScopeId, Scope};
use crate::symbol::Symbol;
use crate::types::{ClassId, ClassType, FunctionId, FunctionType, Type};

#[derive(Debug)]
pub struct ModuleBinding<'ast> {
    pub(crate) path: SourcePath,
    pub(crate) scopes: IndexVec<FileScopeId, Scope<'ast>>,
    pub(crate) scopes_by_node: FxHashMap<NodeKey, FileScopeId>,
    pub(crate) class_types: IndexVec<ClassId, ClassType<'ast>>,
    pub(crate) function_types: IndexVec<FunctionId, FunctionType>,
    pub(crate) types_by_node: FxHashMap<NodeKey, Type>,
    pub(crate) docstring: Option<Box<str>>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'ast> ModuleBinding<'ast> {
    pub fn path(&self) -> &SourcePath {
        &self.path
    }

    /// The module scope (the builtin scope when the builtins stub was bound).
    pub fn root_scope_id(&self) -> FileScopeId {
        FileScopeId::root()
    }

    pub fn root_scope(&self) -> &Scope<'ast> {
        &self.scopes[FileScopeId::root()]
    }

    pub fn scope(&self, id: FileScopeId) -> &Scope<'ast> {
        &self.scopes[id]
    }

    /// All scopes in creation order (source order of their owning nodes).
    pub fn scopes(&self) -> impl Iterator<Item = (FileScopeId, &Scope<'ast>)> {
        self.scopes.iter_enumerated()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// The scope a scope-owning node created.
    pub fn scope_for_node<T>(&self, node: &T) -> Option<FileScopeId> {
        self.scopes_by_node.get(&NodeKey::from_node(node)).copied()
    }

    /// The type constructed for a class or function node.
    pub fn type_for_node<T>(&self, node: &T) -> Option<Type> {
        self.types_by_node.get(&NodeKey::from_node(node)).copied()
    }

    pub fn class_type(&self, id: ClassId) -> &ClassType<'ast> {
        &self.class_types[id]
    }

    pub fn function_type(&self, id: FunctionId) -> &FunctionType {
        &self.function_types[id]
    }

    /// The module docstring, when the first statement is a plain string.
    pub fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }

    /// Diagnostics in traversal order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// All ancestors of `scope`, starting with `scope` itself.
    pub fn ancestor_scopes(&self, scope: FileScopeId) -> AncestorsIter<'_, 'ast> {
        AncestorsIter {
            scopes: &self.scopes,
            next_id: Some(scope),
        }
    }

    /// Resolves `name` from `scope` outward. The starting scope is searched
    /// unfiltered; enclosing scopes only expose their exported names.
    pub fn resolve_name(
        &self,
        scope: FileScopeId,
        name: &str,
    ) -> Option<(FileScopeId, &Symbol<'ast>)> {
        for (index, (scope_id, scope)) in self.ancestor_scopes(scope).enumerate() {
            let symbol = if index == 0 {
                scope.symbol_table().symbol_by_name(name)
            } else {
                scope.lookup_exported(name)
            };
            if let Some(symbol) = symbol {
                return Some((scope_id, symbol));
            }
        }
        None
    }
}

pub struct AncestorsIter<'b, 'ast> {
    scopes: &'b IndexVec<FileScopeId, Scope<'ast>>,
    next_id: Option<FileScopeId>,
}

impl<'b, 'ast> Iterator for AncestorsIter<'b, 'ast> {
    type Item = (FileScopeId, &'b Scope<'ast>);

    fn next(&mut self) -> Option<Self::Item> {
        let current_id = self.next_id?;
        let current = &self.scopes[current_id];
        self.next_id = current.parent();
        Some((current_id, current))
    }
}

impl std::iter::FusedIterator for AncestorsIter<'_, '_> {}
