//! The shallow type values the binder constructs while walking. Real
//! inference happens downstream; these records carry what it needs: the
//! declared shape of classes and functions, and primitive markers for the
//! implicit names every scope seeds.

use bitflags::bitflags;

use tern_index::newtype_index;
use tern_python_ast as ast;
use tern_python_ast::Name;

use crate::scope::FileScopeId;

newtype_index! {
    pub struct ClassId;
}

newtype_index! {
    pub struct FunctionId;
}

/// A type as far as the binder knows it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Unknown,
    Any,
    Str,
    Class(ClassId),
    Function(FunctionId),
    Module,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct ClassTypeFlags: u8 {
        /// Declared in the builtins scope or one of the special stub files.
        const BUILT_IN = 1 << 0;
    }
}

/// The type constructed for a `class` statement (or fabricated for a typing
/// special form). The class's *fields* are the symbol table of `scope`.
#[derive(Debug)]
pub struct ClassType<'ast> {
    name: Name,
    docstring: Option<Box<str>>,
    flags: ClassTypeFlags,
    scope: Option<FileScopeId>,
    bases: Vec<&'ast ast::Expr>,
    metaclass: Option<&'ast ast::Expr>,
    has_implicit_object_base: bool,
}

impl<'ast> ClassType<'ast> {
    pub(crate) fn new(name: Name, docstring: Option<Box<str>>, flags: ClassTypeFlags) -> Self {
        Self {
            name,
            docstring,
            flags,
            scope: None,
            bases: Vec::new(),
            metaclass: None,
            has_implicit_object_base: false,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }

    pub fn is_built_in(&self) -> bool {
        self.flags.contains(ClassTypeFlags::BUILT_IN)
    }

    /// The scope holding the class's field table. `None` only for fabricated
    /// built-in classes that have no body.
    pub fn scope(&self) -> Option<FileScopeId> {
        self.scope
    }

    pub fn bases(&self) -> &[&'ast ast::Expr] {
        &self.bases
    }

    pub fn metaclass(&self) -> Option<&'ast ast::Expr> {
        self.metaclass
    }

    /// Whether `object` was added as a base because none was written.
    pub fn has_implicit_object_base(&self) -> bool {
        self.has_implicit_object_base
    }

    pub(crate) fn set_scope(&mut self, scope: FileScopeId) {
        self.scope = Some(scope);
    }

    pub(crate) fn push_base(&mut self, base: &'ast ast::Expr) {
        self.bases.push(base);
    }

    pub(crate) fn set_metaclass(&mut self, metaclass: &'ast ast::Expr) {
        self.metaclass = Some(metaclass);
    }

    pub(crate) fn set_implicit_object_base(&mut self) {
        self.has_implicit_object_base = true;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct FunctionTypeFlags: u8 {
        const ASYNC = 1 << 0;
        /// Declared directly inside a class body.
        const METHOD = 1 << 1;
        const STATIC_METHOD = 1 << 2;
        const CLASS_METHOD = 1 << 3;
        /// `__new__`, which binds like a static method without a decorator.
        const CONSTRUCTOR = 1 << 4;
    }
}

/// The type constructed for a `def` statement or a lambda.
#[derive(Debug)]
pub struct FunctionType {
    name: Name,
    docstring: Option<Box<str>>,
    flags: FunctionTypeFlags,
    scope: FileScopeId,
}

impl FunctionType {
    pub(crate) fn new(
        name: Name,
        docstring: Option<Box<str>>,
        flags: FunctionTypeFlags,
        scope: FileScopeId,
    ) -> Self {
        Self {
            name,
            docstring,
            flags,
            scope,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }

    pub fn flags(&self) -> FunctionTypeFlags {
        self.flags
    }

    pub fn is_async(&self) -> bool {
        self.flags.contains(FunctionTypeFlags::ASYNC)
    }

    pub fn is_method(&self) -> bool {
        self.flags.contains(FunctionTypeFlags::METHOD)
    }

    pub fn scope(&self) -> FileScopeId {
        self.scope
    }
}
