//! Binding of `import` and `from ... import` statements. Each bound name
//! carries an alias declaration describing the module-loader steps behind
//! it; repeated imports sharing a root name merge into one declaration.

use camino::Utf8PathBuf;
use text_size::TextRange;

use tern_python_ast as ast;
use tern_python_ast::Name;

use crate::context::{ImportDescriptor, ImportInfo, ImportType};
use crate::declaration::{AliasDeclaration, Declaration, LoaderActions};
use crate::diagnostic::{DiagnosticAction, Rule};
use crate::module_name::ModuleName;
use crate::FxIndexMap;

use super::Binder;

impl<'a, 'ast> Binder<'a, 'ast> {
    /// Binds one `import a.b.c [as z]` clause.
    ///
    /// Without an alias the bound name is the first part, and every
    /// subsequent part becomes a nested loader action on it. With an alias
    /// (or for a single-part name) the declaration points directly at the
    /// fully resolved module.
    pub(super) fn bind_import(&mut self, alias: &'ast ast::Alias) {
        let descriptor = ImportDescriptor {
            leading_dots: 0,
            name_parts: alias.name.id.split('.').map(Name::new).collect(),
        };
        let info = self.file.resolver.resolve(&descriptor);
        self.report_import_diagnostics(&info, alias.name.range);

        let parts = &descriptor.name_parts;
        if info.is_import_found && info.resolved_paths.len() != parts.len() {
            self.internal_fault(format!(
                "import resolver returned {} resolved paths for the {}-part name \"{}\"",
                info.resolved_paths.len(),
                parts.len(),
                info.import_name,
            ));
            return;
        }

        let first = &parts[0];
        let bound_name = alias.asname.as_ref().map_or(first, |asname| &asname.id);
        let Some(symbol_id) = self.bind_name(bound_name) else {
            return;
        };

        let scope = self.current_scope_id();
        let symbol = self.scopes[scope].table_mut().symbol_mut(symbol_id);

        // Merge into an existing alias declaration rooted at the same first
        // part, so `import a.b` and `import a.c` share one declaration.
        let matches_root = |declaration: &AliasDeclaration| {
            declaration.first_name_part.as_ref() == Some(first)
        };
        if !symbol
            .declarations()
            .iter()
            .filter_map(Declaration::as_alias)
            .any(matches_root)
        {
            symbol.push_declaration(Declaration::Alias(AliasDeclaration {
                path: Utf8PathBuf::new(),
                range: alias.range,
                first_name_part: Some(first.clone()),
                symbol_name: None,
                implicit_imports: FxIndexMap::default(),
            }));
        }
        let declaration = symbol
            .declarations_mut()
            .iter_mut()
            .filter_map(Declaration::as_alias_mut)
            .find(|declaration| declaration.first_name_part.as_ref() == Some(first))
            .expect("alias declaration to exist after insertion");

        if alias.asname.is_some() || parts.len() == 1 {
            if let Some(resolved) = info.resolved_paths.last().and_then(Option::as_ref) {
                declaration.path = resolved.clone();
            }
            for implicit in &info.implicit_imports {
                let actions = declaration
                    .implicit_imports
                    .entry(implicit.name.clone())
                    .or_default();
                actions.path = Some(implicit.path.clone());
            }
        } else {
            if let Some(resolved) = info.resolved_paths.first().and_then(Option::as_ref) {
                declaration.path = resolved.clone();
            }
            let mut actions: &mut FxIndexMap<Name, LoaderActions> =
                &mut declaration.implicit_imports;
            for (depth, part) in parts.iter().enumerate().skip(1) {
                let entry = actions.entry(part.clone()).or_default();
                if let Some(resolved) = info.resolved_paths.get(depth).and_then(Option::as_ref) {
                    entry.path = Some(resolved.clone());
                }
                actions = &mut entry.implicit_imports;
            }
        }
    }

    /// Binds `from m import x, y as z` and `from m import *`.
    pub(super) fn bind_import_from(&mut self, node: &'ast ast::StmtImportFrom) {
        let descriptor = ImportDescriptor {
            leading_dots: node.level,
            name_parts: node
                .module
                .as_ref()
                .map(|module| module.id.split('.').map(Name::new).collect())
                .unwrap_or_default(),
        };
        let info = self.file.resolver.resolve(&descriptor);
        let module_range = node
            .module
            .as_ref()
            .map_or(node.range, |module| module.range);
        self.report_import_diagnostics(&info, module_range);

        let module_path = info.resolved_paths.last().and_then(Clone::clone);

        if node.names.len() == 1 && node.names[0].name.as_str() == "*" {
            self.bind_wildcard_import(node, &info, module_path.as_ref());
            return;
        }

        for alias in &node.names {
            let bound_name = alias.asname.as_ref().unwrap_or(&alias.name);
            let Some(symbol) = self.bind_name(&bound_name.id) else {
                continue;
            };
            let scope = self.current_scope_id();

            // An imported name that matches an implicit submodule of `m`
            // binds the submodule itself, not a symbol inside `m`.
            let declaration = if let Some(implicit) = info
                .implicit_imports
                .iter()
                .find(|implicit| implicit.name == alias.name.id)
            {
                AliasDeclaration {
                    path: implicit.path.clone(),
                    range: alias.range,
                    first_name_part: None,
                    symbol_name: None,
                    implicit_imports: FxIndexMap::default(),
                }
            } else {
                AliasDeclaration {
                    path: module_path.clone().unwrap_or_default(),
                    range: alias.range,
                    first_name_part: None,
                    symbol_name: Some(alias.name.id.clone()),
                    implicit_imports: FxIndexMap::default(),
                }
            };
            self.add_declaration(scope, symbol, Declaration::Alias(declaration));
        }
    }

    fn bind_wildcard_import(
        &mut self,
        node: &'ast ast::StmtImportFrom,
        info: &ImportInfo,
        module_path: Option<&Utf8PathBuf>,
    ) {
        let Some(module_path) = module_path else {
            return;
        };

        if let Some(exports) = self.file.import_lookup.lookup(module_path) {
            for export in &exports.names {
                let Some(symbol) = self.bind_name(export) else {
                    continue;
                };
                let scope = self.current_scope_id();
                self.add_declaration(
                    scope,
                    symbol,
                    Declaration::Alias(AliasDeclaration {
                        path: module_path.clone(),
                        range: node.range,
                        first_name_part: None,
                        symbol_name: Some(export.clone()),
                        implicit_imports: FxIndexMap::default(),
                    }),
                );
            }
        }

        for implicit in &info.implicit_imports {
            let Some(symbol) = self.bind_name(&implicit.name) else {
                continue;
            };
            let scope = self.current_scope_id();
            self.add_declaration(
                scope,
                symbol,
                Declaration::Alias(AliasDeclaration {
                    path: implicit.path.clone(),
                    range: node.range,
                    first_name_part: None,
                    symbol_name: None,
                    implicit_imports: FxIndexMap::default(),
                }),
            );
        }
    }

    fn report_import_diagnostics(&mut self, info: &ImportInfo, range: TextRange) {
        if !info.is_import_found {
            self.sink.report(
                &self.file.settings,
                Rule::MissingImports,
                range,
                format!("Import \"{}\" could not be resolved", info.import_name),
                None,
            );
        } else if info.import_type == ImportType::ThirdParty && !info.is_stub_file {
            let action = ModuleName::new(&info.import_name)
                .map(|module_name| DiagnosticAction::CreateTypeStub { module_name });
            self.sink.report(
                &self.file.settings,
                Rule::MissingTypeStubs,
                range,
                format!("Stub file not found for \"{}\"", info.import_name),
                action,
            );
        }
    }
}
