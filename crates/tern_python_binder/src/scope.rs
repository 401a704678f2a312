use bitflags::bitflags;

use tern_index::newtype_index;
use tern_python_ast as ast;
use tern_python_ast::Name;

use crate::symbol::{Symbol, SymbolTable};
use crate::FxIndexSet;

/// Id of a scope within one file's scope tree.
newtype_index! {
    pub struct FileScopeId;
}

impl FileScopeId {
    /// The root scope: the module scope, or the builtin scope when the
    /// builtins stub itself is being bound.
    pub fn root() -> Self {
        FileScopeId::from_u32(0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Builtin,
    Module,
    Class,
    /// Covers both `def` bodies and lambdas.
    Function,
    Comprehension,
}

impl ScopeKind {
    /// Whether names declared `global` resolve into this scope.
    pub const fn is_global(self) -> bool {
        matches!(self, ScopeKind::Module | ScopeKind::Builtin)
    }

    pub const fn is_class(self) -> bool {
        matches!(self, ScopeKind::Class)
    }
}

/// The syntactic owner of a scope.
#[derive(Copy, Clone, Debug)]
pub enum ScopeNode<'ast> {
    Module(&'ast ast::ModModule),
    Class(&'ast ast::StmtClassDef),
    Function(&'ast ast::StmtFunctionDef),
    Lambda(&'ast ast::ExprLambda),
    /// One of the four comprehension expression forms.
    Comprehension(&'ast ast::Expr),
}

impl ScopeNode<'_> {
    /// A display name for logs and tests.
    pub fn name(&self) -> &str {
        match self {
            ScopeNode::Module(_) => "<module>",
            ScopeNode::Class(class) => class.name.as_str(),
            ScopeNode::Function(function) => function.name.as_str(),
            ScopeNode::Lambda(_) => "<lambda>",
            ScopeNode::Comprehension(_) => "<comprehension>",
        }
    }

    /// Whether the owner is a function or module node (the anchor `nonlocal`
    /// and closure lookups care about).
    pub const fn is_function_or_module(&self) -> bool {
        matches!(
            self,
            ScopeNode::Module(_) | ScopeNode::Function(_) | ScopeNode::Lambda(_)
        )
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct ScopeFlags: u8 {
        /// Every path through this scope ends in a `raise`; downstream flow
        /// analysis treats calls into it as non-returning.
        const ALWAYS_RAISES = 1 << 0;
    }
}

/// One lexical scope: its place in the tree, its symbol table, and the
/// export filter constraining lookups from outside.
#[derive(Debug)]
pub struct Scope<'ast> {
    parent: Option<FileScopeId>,
    kind: ScopeKind,
    node: ScopeNode<'ast>,
    table: SymbolTable<'ast>,
    export_filter: Option<FxIndexSet<Name>>,
    flags: ScopeFlags,
}

impl<'ast> Scope<'ast> {
    pub(crate) fn new(parent: Option<FileScopeId>, kind: ScopeKind, node: ScopeNode<'ast>) -> Self {
        Self {
            parent,
            kind,
            node,
            table: SymbolTable::default(),
            export_filter: None,
            flags: ScopeFlags::empty(),
        }
    }

    pub fn parent(&self) -> Option<FileScopeId> {
        self.parent
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn node(&self) -> ScopeNode<'ast> {
        self.node
    }

    pub fn symbol_table(&self) -> &SymbolTable<'ast> {
        &self.table
    }

    pub fn always_raises(&self) -> bool {
        self.flags.contains(ScopeFlags::ALWAYS_RAISES)
    }

    pub fn export_filter(&self) -> Option<&FxIndexSet<Name>> {
        self.export_filter.as_ref()
    }

    /// Whether `name` is visible to unqualified lookup from outside this
    /// scope. Symbols filtered out remain present in the table.
    pub fn exports_name(&self, name: &str) -> bool {
        self.export_filter
            .as_ref()
            .map_or(true, |filter| filter.contains(name))
    }

    /// Looks up `name` the way an *enclosed* scope would: the export filter
    /// applies.
    pub fn lookup_exported(&self, name: &str) -> Option<&Symbol<'ast>> {
        if !self.exports_name(name) {
            return None;
        }
        self.table.symbol_by_name(name)
    }

    pub(crate) fn table_mut(&mut self) -> &mut SymbolTable<'ast> {
        &mut self.table
    }

    pub(crate) fn set_export_filter(&mut self, filter: FxIndexSet<Name>) {
        self.export_filter = Some(filter);
    }

    pub(crate) fn set_always_raises(&mut self) {
        self.flags.insert(ScopeFlags::ALWAYS_RAISES);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }
}
