//! One record per site at which a name is introduced. A symbol keeps its
//! declarations in discovery order; reconciling duplicates is the type
//! inference pass's job, not ours.

use camino::Utf8PathBuf;
use text_size::TextRange;

use tern_python_ast as ast;
use tern_python_ast::Name;

use crate::context::SourcePath;
use crate::node_key::TypeSourceId;
use crate::types::{ClassId, FunctionId, Type};
use crate::FxIndexMap;

#[derive(Debug)]
pub enum Declaration<'ast> {
    Class(ClassDeclaration<'ast>),
    Function(FunctionDeclaration<'ast>),
    /// A function declared directly inside a class body.
    Method(FunctionDeclaration<'ast>),
    Parameter(ParameterDeclaration<'ast>),
    Variable(VariableDeclaration<'ast>),
    Alias(AliasDeclaration),
    BuiltIn(BuiltInDeclaration<'ast>),
}

impl<'ast> Declaration<'ast> {
    pub fn range(&self) -> TextRange {
        match self {
            Declaration::Class(decl) => decl.range,
            Declaration::Function(decl) | Declaration::Method(decl) => decl.range,
            Declaration::Parameter(decl) => decl.range,
            Declaration::Variable(decl) => decl.range,
            Declaration::Alias(decl) => decl.range,
            Declaration::BuiltIn(decl) => decl.range,
        }
    }

    pub const fn as_variable(&self) -> Option<&VariableDeclaration<'ast>> {
        match self {
            Declaration::Variable(decl) => Some(decl),
            _ => None,
        }
    }

    pub const fn as_alias(&self) -> Option<&AliasDeclaration> {
        match self {
            Declaration::Alias(decl) => Some(decl),
            _ => None,
        }
    }

    pub(crate) fn as_alias_mut(&mut self) -> Option<&mut AliasDeclaration> {
        match self {
            Declaration::Alias(decl) => Some(decl),
            _ => None,
        }
    }

    /// Whether this declaration gives the name a value binding (as opposed
    /// to only introducing it).
    pub const fn is_value_binding(&self) -> bool {
        !matches!(self, Declaration::BuiltIn(_))
    }
}

#[derive(Debug)]
pub struct ClassDeclaration<'ast> {
    pub node: &'ast ast::StmtClassDef,
    pub class: ClassId,
    pub path: SourcePath,
    pub range: TextRange,
}

#[derive(Debug)]
pub struct FunctionDeclaration<'ast> {
    pub node: &'ast ast::StmtFunctionDef,
    pub function: FunctionId,
    pub path: SourcePath,
    pub range: TextRange,
}

#[derive(Debug)]
pub struct ParameterDeclaration<'ast> {
    pub node: &'ast ast::Parameter,
    pub path: SourcePath,
    pub range: TextRange,
}

/// The syntax that introduced a variable declaration.
#[derive(Copy, Clone, Debug)]
pub enum VariableNode<'ast> {
    Name(&'ast ast::ExprName),
    /// A `base.member` assignment target inside a method.
    MemberAccess(&'ast ast::ExprAttribute),
    /// The binder of an `except ... as name:` clause.
    ExceptName(&'ast ast::Identifier),
}

#[derive(Debug)]
pub struct VariableDeclaration<'ast> {
    pub node: VariableNode<'ast>,
    pub path: SourcePath,
    pub range: TextRange,
    pub is_constant: bool,
    pub type_annotation: Option<&'ast ast::Expr>,
    pub inferred_type_source: Option<TypeSourceId>,
}

/// A name bound by an import statement, plus the loader steps behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDeclaration {
    /// Resolved path of the module the name refers to.
    pub path: Utf8PathBuf,
    pub range: TextRange,
    /// For `import a.b.c`, the `a` this declaration was keyed on; used to
    /// merge later imports sharing the root.
    pub first_name_part: Option<Name>,
    /// For `from m import x`, the name looked up inside `m`. Absent when
    /// the alias binds a module itself.
    pub symbol_name: Option<Name>,
    pub implicit_imports: FxIndexMap<Name, LoaderActions>,
}

/// The module-loader steps the importing scope performs to make a name
/// usable: load `path`, then recursively bind each implicit submodule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderActions {
    pub path: Option<Utf8PathBuf>,
    pub implicit_imports: FxIndexMap<Name, LoaderActions>,
}

#[derive(Debug)]
pub struct BuiltInDeclaration<'ast> {
    /// The intercepted assignment target, for typing-stub special forms.
    /// Seeded implicit names have no node.
    pub node: Option<&'ast ast::ExprName>,
    pub declared_type: Type,
    pub path: SourcePath,
    pub range: TextRange,
}
