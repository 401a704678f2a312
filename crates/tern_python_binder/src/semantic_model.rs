//! Name resolution over a finished binding, chaining into the builtins
//! module the way unqualified lookup does at runtime.

use crate::binding::ModuleBinding;
use crate::scope::FileScopeId;
use crate::symbol::Symbol;

/// A binding paired with the (optionally pre-built) builtins binding its
/// unqualified lookups fall back to.
pub struct SemanticModel<'m, 'ast> {
    binding: &'m ModuleBinding<'ast>,
    builtins: Option<&'m ModuleBinding<'ast>>,
}

/// Where a name resolved.
#[derive(Debug)]
pub enum ResolvedName<'m, 'ast> {
    Scope {
        scope: FileScopeId,
        symbol: &'m Symbol<'ast>,
    },
    Builtin(&'m Symbol<'ast>),
}

impl<'m, 'ast> SemanticModel<'m, 'ast> {
    pub fn new(
        binding: &'m ModuleBinding<'ast>,
        builtins: Option<&'m ModuleBinding<'ast>>,
    ) -> Self {
        Self { binding, builtins }
    }

    pub fn binding(&self) -> &'m ModuleBinding<'ast> {
        self.binding
    }

    /// Resolves `name` from `scope` outward through the file's scopes, then
    /// through the builtins export filter.
    pub fn resolve_name(
        &self,
        scope: FileScopeId,
        name: &str,
    ) -> Option<ResolvedName<'m, 'ast>> {
        if let Some((scope, symbol)) = self.binding.resolve_name(scope, name) {
            return Some(ResolvedName::Scope { scope, symbol });
        }
        let builtins = self.builtins?;
        builtins
            .root_scope()
            .lookup_exported(name)
            .map(ResolvedName::Builtin)
    }
}
