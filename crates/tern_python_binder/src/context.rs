//! What the host analyzer hands the binder for one file: the file's own
//! metadata plus the collaborators (import resolver, wildcard lookup,
//! static-expression evaluator) the binder consults but does not own.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use tern_python_ast::Name;

use crate::diagnostic::DiagnosticSettings;
use crate::line_index::LineIndex;
use crate::module_name::ModuleName;
use crate::python_platform::PythonPlatform;
use crate::python_version::PythonVersion;
use crate::static_truthiness::{LiteralEvaluator, StaticExpressionEvaluator};

/// Path of the file a declaration lives in. Shared across the many
/// declarations one file produces.
pub type SourcePath = Arc<Utf8PathBuf>;

/// An import statement, decomposed the way the module loader sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDescriptor {
    /// Leading dots of a relative import; zero for absolute imports.
    pub leading_dots: u32,
    pub name_parts: Vec<Name>,
}

impl ImportDescriptor {
    /// The dotted name, ignoring leading dots.
    pub fn module_name(&self) -> Option<ModuleName> {
        ModuleName::from_components(self.name_parts.iter().map(Name::as_str))
    }
}

impl std::fmt::Display for ImportDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.leading_dots {
            f.write_str(".")?;
        }
        for (index, part) in self.name_parts.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportType {
    Local,
    ThirdParty,
    BuiltIn,
}

/// A submodule the loader binds as a side effect of importing its package,
/// e.g. `os.path` when importing `os`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplicitImport {
    pub name: Name,
    pub path: Utf8PathBuf,
}

/// What the import resolver knows about one import statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportInfo {
    /// The fully resolved dotted name.
    pub import_name: String,
    pub is_import_found: bool,
    pub import_type: ImportType,
    /// Whether the resolved file is a type stub.
    pub is_stub_file: bool,
    /// One entry per name part; `None` where resolution failed partway.
    pub resolved_paths: Vec<Option<Utf8PathBuf>>,
    pub implicit_imports: Vec<ImplicitImport>,
}

impl ImportInfo {
    /// The result for an import the resolver could not locate.
    pub fn not_found(descriptor: &ImportDescriptor) -> Self {
        Self {
            import_name: descriptor.to_string(),
            is_import_found: false,
            import_type: ImportType::Local,
            is_stub_file: false,
            resolved_paths: vec![None; descriptor.name_parts.len()],
            implicit_imports: Vec::new(),
        }
    }
}

/// Maps import statements to modules. Implemented by the host's
/// import-resolution machinery; the binder never touches the filesystem.
pub trait ImportResolver {
    fn resolve(&self, descriptor: &ImportDescriptor) -> ImportInfo;
}

/// A resolver that finds nothing. Useful for hosts that bind a single file
/// in isolation, and for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnresolvedImports;

impl ImportResolver for UnresolvedImports {
    fn resolve(&self, descriptor: &ImportDescriptor) -> ImportInfo {
        ImportInfo::not_found(descriptor)
    }
}

/// The names another module exports, as needed by `from m import *`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleExports {
    pub names: Vec<Name>,
}

/// Resolves a module path to that module's exported symbol table.
pub trait ImportLookup {
    fn lookup(&self, path: &Utf8Path) -> Option<ModuleExports>;
}

/// A lookup that knows no modules.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoModuleExports;

impl ImportLookup for NoModuleExports {
    fn lookup(&self, _path: &Utf8Path) -> Option<ModuleExports> {
        None
    }
}

/// Everything the binder needs to know about the file being bound.
pub struct FileInfo<'a> {
    pub path: SourcePath,
    pub line_index: LineIndex,
    pub python_version: PythonVersion,
    pub python_platform: PythonPlatform,
    pub settings: DiagnosticSettings,
    /// The file is the typing stub; a handful of assignments in it are
    /// intercepted as special forms.
    pub is_typing_stub_file: bool,
    /// The file is the builtins stub; its root scope gets kind Builtin and
    /// the documented export filter.
    pub is_builtin_stub_file: bool,
    pub resolver: &'a dyn ImportResolver,
    pub import_lookup: &'a dyn ImportLookup,
    pub evaluator: &'a dyn StaticExpressionEvaluator,
}

impl<'a> FileInfo<'a> {
    /// A context with default settings and collaborators. Fields are public;
    /// hosts override what they have better answers for.
    pub fn new(path: impl Into<Utf8PathBuf>, source: &str) -> Self {
        static RESOLVER: UnresolvedImports = UnresolvedImports;
        static LOOKUP: NoModuleExports = NoModuleExports;
        static EVALUATOR: LiteralEvaluator = LiteralEvaluator;

        Self {
            path: Arc::new(path.into()),
            line_index: LineIndex::from_source_text(source),
            python_version: PythonVersion::default(),
            python_platform: PythonPlatform::default(),
            settings: DiagnosticSettings::default(),
            is_typing_stub_file: false,
            is_builtin_stub_file: false,
            resolver: &RESOLVER,
            import_lookup: &LOOKUP,
            evaluator: &EVALUATOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use tern_python_ast::Name;

    use super::ImportDescriptor;

    #[test]
    fn descriptor_displays_like_source() {
        let descriptor = ImportDescriptor {
            leading_dots: 2,
            name_parts: vec![Name::new("pkg"), Name::new("mod")],
        };
        assert_eq!(descriptor.to_string(), "..pkg.mod");
        assert_eq!(descriptor.module_name().unwrap().as_str(), "pkg.mod");
    }
}
