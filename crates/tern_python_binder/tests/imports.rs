//! Import binding: loader-action trees, merging, wildcard expansion, and
//! the import diagnostics.

mod common;

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};

use common::*;
use tern_python_ast::Name;
use tern_python_binder::bind_module;
use tern_python_binder::context::{
    FileInfo, ImplicitImport, ImportDescriptor, ImportInfo, ImportLookup, ImportResolver,
    ImportType, ModuleExports,
};
use tern_python_binder::declaration::Declaration;
use tern_python_binder::diagnostic::{DiagnosticAction, Level, Rule, Severity};
use tern_python_binder::module_name::ModuleName;

#[derive(Default)]
struct FakeResolver {
    modules: HashMap<String, ImportInfo>,
}

impl FakeResolver {
    fn with(mut self, name: &str, info: ImportInfo) -> Self {
        self.modules.insert(name.to_string(), info);
        self
    }
}

impl ImportResolver for FakeResolver {
    fn resolve(&self, descriptor: &ImportDescriptor) -> ImportInfo {
        self.modules
            .get(&descriptor.to_string())
            .cloned()
            .unwrap_or_else(|| ImportInfo::not_found(descriptor))
    }
}

#[derive(Default)]
struct FakeLookup {
    exports: HashMap<Utf8PathBuf, ModuleExports>,
}

impl FakeLookup {
    fn with(mut self, path: &str, names: &[&str]) -> Self {
        self.exports.insert(
            Utf8PathBuf::from(path),
            ModuleExports {
                names: names.iter().map(|name| Name::new(*name)).collect(),
            },
        );
        self
    }
}

impl ImportLookup for FakeLookup {
    fn lookup(&self, path: &Utf8Path) -> Option<ModuleExports> {
        self.exports.get(path).cloned()
    }
}

fn local_module(name: &str, paths: &[&str]) -> ImportInfo {
    ImportInfo {
        import_name: name.to_string(),
        is_import_found: true,
        import_type: ImportType::Local,
        is_stub_file: true,
        resolved_paths: paths.iter().map(|path| Some(Utf8PathBuf::from(*path))).collect(),
        implicit_imports: Vec::new(),
    }
}

#[test]
fn simple_import_binds_the_module_name() {
    let resolver = FakeResolver::default().with("a", local_module("a", &["/lib/a.py"]));
    let module = module(vec![import_stmt(&[("a", None)])]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    let a = root_symbol(&binding, "a");
    assert_eq!(a.declarations().len(), 1);
    let alias = a.declarations()[0].as_alias().expect("alias declaration");
    assert_eq!(alias.path, Utf8PathBuf::from("/lib/a.py"));
    assert_eq!(alias.first_name_part.as_deref(), Some("a"));
    assert!(alias.symbol_name.is_none());
    assert!(binding.diagnostics().is_empty());
}

#[test]
fn dotted_imports_sharing_a_root_merge_into_one_declaration() {
    let resolver = FakeResolver::default()
        .with(
            "a.b.c",
            local_module(
                "a.b.c",
                &["/lib/a/__init__.py", "/lib/a/b/__init__.py", "/lib/a/b/c.py"],
            ),
        )
        .with("a.d", local_module("a.d", &["/lib/a/__init__.py", "/lib/a/d.py"]));
    let module = module(vec![
        import_stmt(&[("a.b.c", None)]),
        import_stmt(&[("a.d", None)]),
    ]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    let a = root_symbol(&binding, "a");
    assert_eq!(a.declarations().len(), 1, "imports must merge, not append");
    let alias = a.declarations()[0].as_alias().expect("alias declaration");
    assert_eq!(alias.path, Utf8PathBuf::from("/lib/a/__init__.py"));

    let b = alias.implicit_imports.get("b").expect("loader action for b");
    assert_eq!(b.path.as_deref(), Some(Utf8Path::new("/lib/a/b/__init__.py")));
    let c = b.implicit_imports.get("c").expect("nested loader action for c");
    assert_eq!(c.path.as_deref(), Some(Utf8Path::new("/lib/a/b/c.py")));

    let d = alias.implicit_imports.get("d").expect("loader action for d");
    assert_eq!(d.path.as_deref(), Some(Utf8Path::new("/lib/a/d.py")));

    assert!(binding.root_scope().symbol_table().symbol_by_name("b").is_none());
}

#[test]
fn aliased_imports_bind_the_alias_to_the_full_path() {
    let resolver = FakeResolver::default().with(
        "a.b",
        local_module("a.b", &["/lib/a/__init__.py", "/lib/a/b.py"]),
    );
    let module = module(vec![import_stmt(&[("a.b", Some("z"))])]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    assert!(binding.root_scope().symbol_table().symbol_by_name("a").is_none());
    let z = root_symbol(&binding, "z");
    let alias = z.declarations()[0].as_alias().expect("alias declaration");
    assert_eq!(alias.path, Utf8PathBuf::from("/lib/a/b.py"));
    assert!(alias.implicit_imports.is_empty());
}

#[test]
fn from_imports_record_the_looked_up_symbol() {
    let resolver = FakeResolver::default().with("m", local_module("m", &["/lib/m.py"]));
    let module = module(vec![from_import(
        Some("m"),
        0,
        &[("x", None), ("y", Some("z"))],
    )]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    let x = root_symbol(&binding, "x");
    let alias = x.declarations()[0].as_alias().expect("alias declaration");
    assert_eq!(alias.symbol_name.as_deref(), Some("x"));
    assert_eq!(alias.path, Utf8PathBuf::from("/lib/m.py"));

    let z = root_symbol(&binding, "z");
    let alias = z.declarations()[0].as_alias().expect("alias declaration");
    assert_eq!(alias.symbol_name.as_deref(), Some("y"));
    assert!(binding.root_scope().symbol_table().symbol_by_name("y").is_none());
}

#[test]
fn from_imports_of_implicit_submodules_bind_the_submodule() {
    let mut info = local_module("pkg", &["/lib/pkg/__init__.py"]);
    info.implicit_imports = vec![ImplicitImport {
        name: Name::new("sub"),
        path: Utf8PathBuf::from("/lib/pkg/sub.py"),
    }];
    let resolver = FakeResolver::default().with("pkg", info);
    let module = module(vec![from_import(Some("pkg"), 0, &[("sub", None)])]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    let sub = root_symbol(&binding, "sub");
    let alias = sub.declarations()[0].as_alias().expect("alias declaration");
    assert!(alias.symbol_name.is_none(), "submodule aliases carry no symbol name");
    assert_eq!(alias.path, Utf8PathBuf::from("/lib/pkg/sub.py"));
}

#[test]
fn wildcard_imports_bind_exports_and_implicit_submodules() {
    let mut info = local_module("m", &["/lib/m/__init__.py"]);
    info.implicit_imports = vec![ImplicitImport {
        name: Name::new("sub"),
        path: Utf8PathBuf::from("/lib/m/sub.py"),
    }];
    let resolver = FakeResolver::default().with("m", info);
    let lookup = FakeLookup::default().with("/lib/m/__init__.py", &["A", "B"]);
    let module = module(vec![from_import(Some("m"), 0, &[("*", None)])]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    file.import_lookup = &lookup;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    for name in ["A", "B"] {
        let symbol = root_symbol(&binding, name);
        let alias = symbol.declarations()[0].as_alias().expect("alias declaration");
        assert_eq!(alias.symbol_name.as_deref(), Some(name));
        assert_eq!(alias.path, Utf8PathBuf::from("/lib/m/__init__.py"));
    }
    let sub = root_symbol(&binding, "sub");
    let alias = sub.declarations()[0].as_alias().expect("alias declaration");
    assert!(alias.symbol_name.is_none());
}

#[test]
fn unresolved_imports_report_under_the_configured_rule() {
    let module = module(vec![import_stmt(&[("nope", None)])]);
    let file = FileInfo::new("main.py", "");
    let binding = bind_module(&module, &file).expect("binding succeeds");

    let diagnostics = binding.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].rule, Some(Rule::MissingImports));
    assert_eq!(diagnostics[0].message, "Import \"nope\" could not be resolved");

    // The name still binds; resolution failures are diagnostics, not
    // binding failures.
    assert!(binding.root_scope().symbol_table().symbol_by_name("nope").is_some());
}

#[test]
fn disabled_rules_suppress_import_diagnostics() {
    let module = module(vec![import_stmt(&[("nope", None)])]);
    let mut file = FileInfo::new("main.py", "");
    file.settings.report_missing_imports = Level::Ignore;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    assert!(binding.diagnostics().is_empty());
}

#[test]
fn third_party_imports_without_stubs_offer_a_stub_action() {
    let mut info = local_module("requests", &["/site-packages/requests/__init__.py"]);
    info.import_type = ImportType::ThirdParty;
    info.is_stub_file = false;
    let resolver = FakeResolver::default().with("requests", info);
    let module = module(vec![import_stmt(&[("requests", None)])]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    let diagnostics = binding.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].rule, Some(Rule::MissingTypeStubs));
    assert_eq!(
        diagnostics[0].message,
        "Stub file not found for \"requests\""
    );
    assert_eq!(
        diagnostics[0].action,
        Some(DiagnosticAction::CreateTypeStub {
            module_name: ModuleName::new("requests").unwrap(),
        })
    );
}

#[test]
fn imports_in_unreachable_branches_do_not_bind() {
    let resolver = FakeResolver::default().with("a", local_module("a", &["/lib/a.py"]));
    let module = module(vec![if_stmt(
        boolean(false),
        vec![import_stmt(&[("a", None)])],
        vec![],
    )]);
    let mut file = FileInfo::new("main.py", "");
    file.resolver = &resolver;
    let binding = bind_module(&module, &file).expect("binding succeeds");

    assert!(binding.root_scope().symbol_table().symbol_by_name("a").is_none());
}

#[cfg(feature = "serde")]
#[test]
fn stub_actions_serialize_with_the_documented_shape() {
    let action = DiagnosticAction::CreateTypeStub {
        module_name: ModuleName::new("requests").unwrap(),
    };
    let value = serde_json::to_value(&action).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "action": "tern.createtypestub",
            "moduleName": "requests",
        })
    );
}
