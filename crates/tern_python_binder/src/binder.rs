//! The name-binding walk. One [`Binder`] traverses a parsed module,
//! creating a scope for every scope-owning node, a symbol for every bound
//! name, and a declaration for every binding site.
//!
//! Class bodies are walked inline; function and lambda bodies are queued
//! and drained only after the enclosing scope has finished binding, so
//! nested functions see the enclosing scope's complete symbol set.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use text_size::TextRange;
use thiserror::Error;

use tern_index::IndexVec;
use tern_python_ast as ast;
use tern_python_ast::visitor::{walk_expr, walk_stmt, Visitor};
use tern_python_ast::{Name, Ranged};

use crate::binding::ModuleBinding;
use crate::builtins::{is_typing_special_form, BUILTIN_EXPORTS};
use crate::context::{FileInfo, SourcePath};
use crate::declaration::{
    BuiltInDeclaration, ClassDeclaration, Declaration, FunctionDeclaration, ParameterDeclaration,
    VariableDeclaration, VariableNode,
};
use crate::diagnostic::DiagnosticSink;
use crate::node_key::{NodeKey, TypeSourceId};
use crate::python_version::PythonVersion;
use crate::scope::{FileScopeId, Scope, ScopeKind, ScopeNode};
use crate::symbol::{ScopedSymbolId, SymbolFlags};
use crate::types::{
    ClassId, ClassType, ClassTypeFlags, FunctionId, FunctionType, FunctionTypeFlags, Type,
};
use crate::FxIndexSet;

mod imports;

/// A structural fault inside the binder. These are programmer errors in the
/// binder or its collaborators, not problems with the analyzed source.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("internal binder fault: {0}")]
    Internal(String),
}

/// Binds one parsed module. The returned binding borrows the tree.
pub fn bind_module<'ast>(
    module: &'ast ast::ModModule,
    file: &FileInfo<'_>,
) -> Result<ModuleBinding<'ast>, BindError> {
    let _span = tracing::trace_span!("bind_module", path = %file.path).entered();
    Binder::new(module, file).bind()
}

/// Why a name in the current scope must not be bound locally.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NameBindingKind {
    Global,
    Nonlocal,
}

/// The class whose scope member-access declarations resolve into.
#[derive(Copy, Clone, Debug)]
struct EnclosingClass {
    class: ClassId,
    scope: FileScopeId,
}

/// Walk context of the `def` whose body is currently being bound.
#[derive(Copy, Clone, Debug)]
struct FunctionWalkContext<'ast> {
    node: &'ast ast::StmtFunctionDef,
    enclosing_class: Option<EnclosingClass>,
}

/// A function or lambda whose scope exists but whose body waits for the
/// enclosing scope to finish.
#[derive(Debug)]
enum DeferredBinder<'ast> {
    Function {
        node: &'ast ast::StmtFunctionDef,
        scope: FileScopeId,
        context: FunctionWalkContext<'ast>,
    },
    Lambda {
        node: &'ast ast::ExprLambda,
        scope: FileScopeId,
    },
}

/// Per-scope walk state, pushed while the scope's suite is visited.
#[derive(Debug)]
struct WalkScope<'ast> {
    scope: FileScopeId,
    /// Names declared `global` or `nonlocal` in this scope.
    not_local: FxHashMap<Name, NameBindingKind>,
    /// Names a binding site targeted in this scope, whether or not a local
    /// symbol was created. Consulted by `global`/`nonlocal` ordering checks.
    assigned_names: FxHashSet<Name>,
    deferred: VecDeque<DeferredBinder<'ast>>,
    nested_except_depth: u32,
    /// Set while walking a class body, for method declarations.
    class: Option<ClassId>,
    /// The `def` context; inherited by comprehension scopes, cleared by
    /// class scopes.
    function: Option<FunctionWalkContext<'ast>>,
}

impl<'ast> WalkScope<'ast> {
    fn new(scope: FileScopeId) -> Self {
        Self {
            scope,
            not_local: FxHashMap::default(),
            assigned_names: FxHashSet::default(),
            deferred: VecDeque::new(),
            nested_except_depth: 0,
            class: None,
            function: None,
        }
    }
}

/// The assignment-like construct whose target is currently being visited.
/// Name and member-access targets consult this to decide which declaration
/// to record.
#[derive(Copy, Clone, Debug)]
enum CurrentTarget<'ast> {
    Assign { value: &'ast ast::Expr },
    AnnAssign(&'ast ast::StmtAnnAssign),
    AugAssign(&'ast ast::StmtAugAssign),
    For(&'ast ast::StmtFor),
    Named(&'ast ast::ExprNamed),
    WithItem(&'ast ast::WithItem),
    Comprehension(&'ast ast::Comprehension),
}

pub(crate) struct Binder<'a, 'ast> {
    file: &'a FileInfo<'a>,
    module: &'ast ast::ModModule,

    scopes: IndexVec<FileScopeId, Scope<'ast>>,
    scopes_by_node: FxHashMap<NodeKey, FileScopeId>,
    class_types: IndexVec<ClassId, ClassType<'ast>>,
    function_types: IndexVec<FunctionId, FunctionType>,
    types_by_node: FxHashMap<NodeKey, Type>,
    sink: DiagnosticSink,

    walk_stack: Vec<WalkScope<'ast>>,
    current_targets: Vec<CurrentTarget<'ast>>,
    /// Set while walking a branch the static evaluator proved unreachable.
    /// Suppresses symbol and declaration side effects, not diagnostics.
    unexecuted: bool,
    docstring: Option<Box<str>>,
    fault: Option<BindError>,
}

impl<'a, 'ast> Binder<'a, 'ast> {
    fn new(module: &'ast ast::ModModule, file: &'a FileInfo<'a>) -> Self {
        Self {
            file,
            module,
            scopes: IndexVec::new(),
            scopes_by_node: FxHashMap::default(),
            class_types: IndexVec::new(),
            function_types: IndexVec::new(),
            types_by_node: FxHashMap::default(),
            sink: DiagnosticSink::default(),
            walk_stack: Vec::new(),
            current_targets: Vec::new(),
            unexecuted: false,
            docstring: None,
            fault: None,
        }
    }

    fn bind(mut self) -> Result<ModuleBinding<'ast>, BindError> {
        let kind = if self.file.is_builtin_stub_file {
            ScopeKind::Builtin
        } else {
            ScopeKind::Module
        };
        let root = self.create_scope(
            None,
            kind,
            ScopeNode::Module(self.module),
            NodeKey::from_node(self.module),
        );
        self.walk_stack.push(WalkScope::new(root));

        self.seed_module_names();
        self.docstring = docstring_of(&self.module.body);

        self.visit_body(&self.module.body);
        self.bind_deferred();

        let walk = self.walk_stack.pop().expect("root walk scope to be present");
        debug_assert!(walk.deferred.is_empty());
        debug_assert!(self.walk_stack.is_empty());
        debug_assert!(self.current_targets.is_empty());

        if self.file.is_builtin_stub_file {
            let filter: FxIndexSet<Name> =
                BUILTIN_EXPORTS.iter().copied().map(Name::new_static).collect();
            self.scopes[root].set_export_filter(filter);
        }

        if let Some(fault) = self.fault {
            return Err(fault);
        }

        for scope in self.scopes.iter_mut() {
            scope.shrink_to_fit();
        }

        Ok(ModuleBinding {
            path: self.file.path.clone(),
            scopes: self.scopes,
            scopes_by_node: self.scopes_by_node,
            class_types: self.class_types,
            function_types: self.function_types,
            types_by_node: self.types_by_node,
            docstring: self.docstring,
            diagnostics: self.sink.finish(),
        })
    }

    // ----- scope plumbing -----

    fn create_scope(
        &mut self,
        parent: Option<FileScopeId>,
        kind: ScopeKind,
        node: ScopeNode<'ast>,
        key: NodeKey,
    ) -> FileScopeId {
        let scope = self.scopes.push(Scope::new(parent, kind, node));
        self.scopes_by_node.insert(key, scope);
        scope
    }

    fn current_walk(&mut self) -> &mut WalkScope<'ast> {
        self.walk_stack
            .last_mut()
            .expect("walk stack to be non-empty during traversal")
    }

    fn current_scope_id(&self) -> FileScopeId {
        self.walk_stack
            .last()
            .expect("walk stack to be non-empty during traversal")
            .scope
    }

    fn current_scope_kind(&self) -> ScopeKind {
        self.scopes[self.current_scope_id()].kind()
    }

    fn current_function(&self) -> Option<FunctionWalkContext<'ast>> {
        self.walk_stack.last().and_then(|walk| walk.function)
    }

    fn global_scope_id(&self) -> FileScopeId {
        FileScopeId::root()
    }

    fn in_global_scope(&self) -> bool {
        self.current_scope_id() == self.global_scope_id()
    }

    /// The scope a new function or lambda scope hangs off: the nearest
    /// enclosing non-class scope. Methods do not capture class scope.
    fn non_class_parent_scope(&self) -> FileScopeId {
        self.walk_stack
            .iter()
            .rev()
            .map(|walk| walk.scope)
            .find(|scope| !self.scopes[*scope].kind().is_class())
            .expect("a non-class scope to enclose every scope")
    }

    /// Pops the current walk scope, handing unfinished deferred binders to
    /// the parent so they drain with the enclosing function or module.
    fn pop_walk_scope(&mut self) {
        let walk = self.walk_stack.pop().expect("walk scope to pop");
        if let Some(parent) = self.walk_stack.last_mut() {
            parent.deferred.extend(walk.deferred);
        } else {
            debug_assert!(walk.deferred.is_empty());
        }
    }

    fn with_unexecuted(&mut self, unexecuted: bool, f: impl FnOnce(&mut Self)) {
        let saved = self.unexecuted;
        self.unexecuted |= unexecuted;
        f(self);
        self.unexecuted = saved;
    }

    fn source_path(&self) -> SourcePath {
        self.file.path.clone()
    }

    fn internal_fault(&mut self, message: String) {
        if self.fault.is_none() {
            self.fault = Some(BindError::Internal(message));
        }
    }

    // ----- binding primitives -----

    /// Binds `name` in the current scope, creating the symbol on first
    /// sight. Returns nothing when the name was declared `global` or
    /// `nonlocal` here, or while walking unreachable code.
    fn bind_name(&mut self, name: &Name) -> Option<ScopedSymbolId> {
        if self.unexecuted {
            return None;
        }
        let walk = self.current_walk();
        walk.assigned_names.insert(name.clone());
        if walk.not_local.contains_key(name) {
            return None;
        }
        let scope = walk.scope;
        let (symbol, _) = self.scopes[scope].table_mut().add_or_update_symbol(
            name.clone(),
            SymbolFlags::INITIALLY_UNBOUND | SymbolFlags::CLASS_MEMBER,
        );
        Some(symbol)
    }

    fn add_declaration(
        &mut self,
        scope: FileScopeId,
        symbol: ScopedSymbolId,
        declaration: Declaration<'ast>,
    ) {
        debug_assert!(!self.unexecuted, "declarations must not be added to unexecuted code");
        self.scopes[scope]
            .table_mut()
            .symbol_mut(symbol)
            .push_declaration(declaration);
    }

    /// Seeds an implicit name with a synthesized built-in declaration.
    fn seed_builtin_symbol(&mut self, name: &'static str, declared_type: Type) {
        let name = Name::new_static(name);
        let Some(symbol) = self.bind_name(&name) else {
            return;
        };
        let scope = self.current_scope_id();
        let path = self.source_path();
        self.add_declaration(
            scope,
            symbol,
            Declaration::BuiltIn(BuiltInDeclaration {
                node: None,
                declared_type,
                path,
                range: TextRange::default(),
            }),
        );
    }

    fn seed_module_names(&mut self) {
        self.seed_builtin_symbol("__doc__", Type::Str);
        self.seed_builtin_symbol("__name__", Type::Str);
        self.seed_builtin_symbol("__loader__", Type::Any);
        self.seed_builtin_symbol("__package__", Type::Str);
        self.seed_builtin_symbol("__spec__", Type::Any);
        self.seed_builtin_symbol("__path__", Type::Any);
        self.seed_builtin_symbol("__file__", Type::Str);
        self.seed_builtin_symbol("__cached__", Type::Str);
    }

    fn seed_class_names(&mut self) {
        self.seed_builtin_symbol("__name__", Type::Str);
        if self.file.python_version >= PythonVersion::PY33 {
            self.seed_builtin_symbol("__qualname__", Type::Str);
        }
    }

    fn seed_function_names(&mut self, enclosing_class: Option<EnclosingClass>) {
        self.seed_builtin_symbol("__doc__", Type::Str);
        self.seed_builtin_symbol("__name__", Type::Str);
        if self.file.python_version >= PythonVersion::PY33 {
            self.seed_builtin_symbol("__qualname__", Type::Str);
        }
        self.seed_builtin_symbol("__module__", Type::Str);
        self.seed_builtin_symbol("__defaults__", Type::Any);
        self.seed_builtin_symbol("__code__", Type::Any);
        self.seed_builtin_symbol("__globals__", Type::Any);
        self.seed_builtin_symbol("__dict__", Type::Any);
        self.seed_builtin_symbol("__closure__", Type::Any);
        self.seed_builtin_symbol("__annotations__", Type::Any);
        self.seed_builtin_symbol("__kwdefaults__", Type::Any);
        if let Some(enclosing) = enclosing_class {
            self.seed_builtin_symbol("__class__", Type::Class(enclosing.class));
        }
    }

    // ----- deferred pass -----

    /// Drains this scope's queue of function and lambda binders. Each one
    /// walks its body and then drains its own queue, so an arbitrarily
    /// nested function still sees every enclosing scope completed first.
    fn bind_deferred(&mut self) {
        while let Some(task) = self.current_walk().deferred.pop_front() {
            match task {
                DeferredBinder::Function {
                    node,
                    scope,
                    context,
                } => {
                    let mut walk = WalkScope::new(scope);
                    walk.function = Some(context);
                    self.walk_stack.push(walk);

                    // Parameters are declared before the body's `global`/
                    // `nonlocal` names are collected: a parameter always
                    // gets its declaration, even when the body then
                    // (illegally) redeclares the name.
                    self.declare_parameters(Some(&node.parameters));
                    self.prescan_not_local(&node.body);
                    self.seed_function_names(context.enclosing_class);
                    self.visit_body(&node.body);
                    self.bind_deferred();
                    self.pop_walk_scope();
                }
                DeferredBinder::Lambda { node, scope } => {
                    self.walk_stack.push(WalkScope::new(scope));
                    self.declare_parameters(node.parameters.as_deref());
                    self.visit_expr(&node.body);
                    self.bind_deferred();
                    self.pop_walk_scope();
                }
            }
        }
    }

    fn declare_parameters(&mut self, parameters: Option<&'ast ast::Parameters>) {
        let Some(parameters) = parameters else {
            return;
        };
        for parameter in parameters.iter() {
            let parameter = parameter.as_parameter();
            let Some(symbol) = self.bind_name(&parameter.name.id) else {
                continue;
            };
            let scope = self.current_scope_id();
            let path = self.source_path();
            self.add_declaration(
                scope,
                symbol,
                Declaration::Parameter(ParameterDeclaration {
                    node: parameter,
                    path,
                    range: parameter.name.range,
                }),
            );
        }
    }

    /// Collects the `global`/`nonlocal` names of a suite before binding it.
    /// The declarations apply to the whole scope, not just the statements
    /// after them, so binding sites earlier in the suite must already be
    /// suppressed. Nested scopes declare their own.
    fn prescan_not_local(&mut self, body: &'ast [ast::Stmt]) {
        let in_global_scope = self.in_global_scope();
        for stmt in body {
            match stmt {
                ast::Stmt::Global(node) if !in_global_scope => {
                    for name in &node.names {
                        self.current_walk()
                            .not_local
                            .entry(name.id.clone())
                            .or_insert(NameBindingKind::Global);
                    }
                }
                ast::Stmt::Nonlocal(node) if !in_global_scope => {
                    for name in &node.names {
                        self.current_walk()
                            .not_local
                            .entry(name.id.clone())
                            .or_insert(NameBindingKind::Nonlocal);
                    }
                }
                ast::Stmt::For(node) => {
                    self.prescan_not_local(&node.body);
                    self.prescan_not_local(&node.orelse);
                }
                ast::Stmt::While(node) => {
                    self.prescan_not_local(&node.body);
                    self.prescan_not_local(&node.orelse);
                }
                ast::Stmt::If(node) => {
                    self.prescan_not_local(&node.body);
                    for clause in &node.elif_else_clauses {
                        self.prescan_not_local(&clause.body);
                    }
                }
                ast::Stmt::With(node) => {
                    self.prescan_not_local(&node.body);
                }
                ast::Stmt::Try(node) => {
                    self.prescan_not_local(&node.body);
                    for ast::ExceptHandler::ExceptHandler(handler) in &node.handlers {
                        self.prescan_not_local(&handler.body);
                    }
                    self.prescan_not_local(&node.orelse);
                    self.prescan_not_local(&node.finalbody);
                }
                _ => {}
            }
        }
    }

    // ----- assignment targets -----

    fn push_target(&mut self, target: CurrentTarget<'ast>) {
        self.current_targets.push(target);
    }

    fn pop_target(&mut self) {
        let popped = self.current_targets.pop();
        debug_assert!(popped.is_some());
    }

    fn current_target(&self) -> Option<CurrentTarget<'ast>> {
        self.current_targets.last().copied()
    }

    /// The annotation and inferred-type source a declaration created under
    /// `target` should carry.
    fn target_declaration_info(
        target: CurrentTarget<'ast>,
    ) -> (Option<&'ast ast::Expr>, Option<TypeSourceId>) {
        match target {
            CurrentTarget::Assign { value } => (None, Some(TypeSourceId::from_node(value))),
            CurrentTarget::AnnAssign(node) => (
                Some(&node.annotation),
                node.value
                    .as_deref()
                    .map(TypeSourceId::from_node),
            ),
            CurrentTarget::AugAssign(node) => {
                // Augmented assignment infers from the left-hand side.
                (None, Some(TypeSourceId::from_node(&*node.target)))
            }
            CurrentTarget::For(node) => (None, Some(TypeSourceId::from_node(node))),
            CurrentTarget::Named(node) => (None, Some(TypeSourceId::from_node(&*node.value))),
            CurrentTarget::WithItem(node) => (None, Some(TypeSourceId::from_node(node))),
            CurrentTarget::Comprehension(node) => (None, Some(TypeSourceId::from_node(node))),
        }
    }

    fn bind_name_target(&mut self, name_node: &'ast ast::ExprName, target: CurrentTarget<'ast>) {
        if let CurrentTarget::Assign { .. } = target {
            if self.file.is_typing_stub_file && is_typing_special_form(&name_node.id) {
                self.bind_typing_special_form(name_node);
                return;
            }
        }

        let Some(symbol) = self.bind_name(&name_node.id) else {
            return;
        };
        let (annotation, inferred_type_source) = Self::target_declaration_info(target);
        let is_constant = is_constant_name(&name_node.id)
            || annotation.map_or(false, is_final_annotation);
        let scope = self.current_scope_id();
        let path = self.source_path();
        self.add_declaration(
            scope,
            symbol,
            Declaration::Variable(VariableDeclaration {
                node: VariableNode::Name(name_node),
                path,
                range: name_node.range,
                is_constant,
                type_annotation: annotation,
                inferred_type_source,
            }),
        );
    }

    /// In the typing stub, a handful of module-level assignments define
    /// special forms. The target gets a synthesized built-in declaration
    /// with a fabricated class type instead of a variable declaration.
    fn bind_typing_special_form(&mut self, name_node: &'ast ast::ExprName) {
        let Some(symbol) = self.bind_name(&name_node.id) else {
            return;
        };
        let declared_type = if name_node.id == "Any" {
            Type::Any
        } else {
            let class = self.class_types.push(ClassType::new(
                name_node.id.clone(),
                None,
                ClassTypeFlags::BUILT_IN,
            ));
            Type::Class(class)
        };
        let scope = self.current_scope_id();
        let path = self.source_path();
        self.add_declaration(
            scope,
            symbol,
            Declaration::BuiltIn(BuiltInDeclaration {
                node: Some(name_node),
                declared_type,
                path,
                range: name_node.range,
            }),
        );
    }

    /// Handles `base.member` assignment targets inside a method: decides
    /// which class the member belongs to and whether it is bound on the
    /// class or its instances, then declares it in the class's own table.
    fn bind_member_access_target(
        &mut self,
        attribute: &'ast ast::ExprAttribute,
        target: CurrentTarget<'ast>,
    ) {
        if self.unexecuted {
            return;
        }
        let Some(context) = self.current_function() else {
            return;
        };
        let Some(enclosing_class) = context.enclosing_class else {
            return;
        };
        let Some(base) = attribute.value.as_name_expr() else {
            return;
        };

        let member_flag = if base.id == *self.class_types[enclosing_class.class].name() {
            SymbolFlags::CLASS_MEMBER
        } else {
            let Some(first_parameter) = context.node.parameters.iter().next() else {
                return;
            };
            if base.id != first_parameter.name().id {
                return;
            }
            if has_decorator(context.node, "staticmethod") {
                return;
            }
            if has_decorator(context.node, "classmethod") || context.node.name.as_str() == "__new__"
            {
                SymbolFlags::CLASS_MEMBER
            } else {
                SymbolFlags::INSTANCE_MEMBER
            }
        };

        let (annotation, inferred_type_source) = Self::target_declaration_info(target);
        let (symbol, _) = self.scopes[enclosing_class.scope]
            .table_mut()
            .add_or_update_symbol(
                attribute.attr.id.clone(),
                SymbolFlags::INITIALLY_UNBOUND | member_flag,
            );
        let path = self.source_path();
        self.add_declaration(
            enclosing_class.scope,
            symbol,
            Declaration::Variable(VariableDeclaration {
                node: VariableNode::MemberAccess(attribute),
                path,
                range: attribute.attr.range,
                is_constant: is_constant_name(&attribute.attr.id),
                type_annotation: annotation,
                inferred_type_source,
            }),
        );
    }

    // ----- statement handlers -----

    fn bind_function_def(&mut self, function_def: &'ast ast::StmtFunctionDef) {
        for decorator in &function_def.decorator_list {
            self.visit_decorator(decorator);
        }
        // Annotations, defaults and the return annotation are evaluated in
        // the enclosing scope, matching runtime evaluation order.
        for parameter in function_def.parameters.iter() {
            if let Some(annotation) = parameter.annotation() {
                self.visit_annotation(annotation);
            }
        }
        for default in function_def
            .parameters
            .iter_non_variadic_params()
            .filter_map(|parameter| parameter.default.as_deref())
        {
            self.visit_expr(default);
        }
        if let Some(returns) = &function_def.returns {
            self.visit_annotation(returns);
        }

        let is_method = self.current_scope_kind().is_class();
        let mut flags = FunctionTypeFlags::empty();
        if function_def.is_async {
            flags |= FunctionTypeFlags::ASYNC;
        }
        if is_method {
            flags |= FunctionTypeFlags::METHOD;
        }
        if has_decorator(function_def, "staticmethod") {
            flags |= FunctionTypeFlags::STATIC_METHOD;
        }
        if has_decorator(function_def, "classmethod") {
            flags |= FunctionTypeFlags::CLASS_METHOD;
        }
        // `__new__` binds like a static constructor without any decorator.
        if is_method && function_def.name.as_str() == "__new__" {
            flags |= FunctionTypeFlags::STATIC_METHOD | FunctionTypeFlags::CONSTRUCTOR;
        }

        let parent = self.non_class_parent_scope();
        let scope = self.create_scope(
            Some(parent),
            ScopeKind::Function,
            ScopeNode::Function(function_def),
            NodeKey::from_node(function_def),
        );
        let function = self.function_types.push(FunctionType::new(
            function_def.name.id.clone(),
            docstring_of(&function_def.body),
            flags,
            scope,
        ));
        self.types_by_node
            .insert(NodeKey::from_node(function_def), Type::Function(function));

        if let Some(symbol) = self.bind_name(&function_def.name.id) {
            let declaring_scope = self.current_scope_id();
            let path = self.source_path();
            let declaration = FunctionDeclaration {
                node: function_def,
                function,
                path,
                range: function_def.name.range,
            };
            self.add_declaration(
                declaring_scope,
                symbol,
                if is_method {
                    Declaration::Method(declaration)
                } else {
                    Declaration::Function(declaration)
                },
            );
        }

        let enclosing_class = self
            .walk_stack
            .last()
            .and_then(|walk| walk.class)
            .map(|class| EnclosingClass {
                class,
                scope: self.current_scope_id(),
            });
        self.current_walk().deferred.push_back(DeferredBinder::Function {
            node: function_def,
            scope,
            context: FunctionWalkContext {
                node: function_def,
                enclosing_class,
            },
        });
    }

    fn bind_class_def(&mut self, class_def: &'ast ast::StmtClassDef) {
        for decorator in &class_def.decorator_list {
            self.visit_decorator(decorator);
        }

        let built_in = self.current_scope_kind() == ScopeKind::Builtin
            || self.file.is_typing_stub_file
            || self.file.is_builtin_stub_file;
        let flags = if built_in {
            ClassTypeFlags::BUILT_IN
        } else {
            ClassTypeFlags::empty()
        };
        let class = self.class_types.push(ClassType::new(
            class_def.name.id.clone(),
            docstring_of(&class_def.body),
            flags,
        ));
        self.types_by_node
            .insert(NodeKey::from_node(class_def), Type::Class(class));

        if let Some(symbol) = self.bind_name(&class_def.name.id) {
            let declaring_scope = self.current_scope_id();
            let path = self.source_path();
            self.add_declaration(
                declaring_scope,
                symbol,
                Declaration::Class(ClassDeclaration {
                    node: class_def,
                    class,
                    path,
                    range: class_def.name.range,
                }),
            );
        }

        // The argument list is evaluated in the enclosing scope. Positional
        // arguments are base classes; `metaclass` may appear once; other
        // keyword arguments are consumed by the metaclass at runtime.
        if let Some(arguments) = &class_def.arguments {
            for base in &arguments.args {
                self.visit_expr(base);
                self.class_types[class].push_base(base);
            }
            for keyword in &arguments.keywords {
                self.visit_expr(&keyword.value);
                if keyword
                    .arg
                    .as_ref()
                    .map_or(false, |arg| arg.as_str() == "metaclass")
                {
                    if self.class_types[class].metaclass().is_some() {
                        self.sink
                            .error(keyword.range, "Only one metaclass can be provided");
                    } else {
                        self.class_types[class].set_metaclass(&keyword.value);
                    }
                }
            }
        }
        if self.class_types[class].bases().is_empty() && class_def.name.as_str() != "object" {
            self.class_types[class].set_implicit_object_base();
        }

        let parent = self.current_scope_id();
        let scope = self.create_scope(
            Some(parent),
            ScopeKind::Class,
            ScopeNode::Class(class_def),
            NodeKey::from_node(class_def),
        );
        self.class_types[class].set_scope(scope);

        let mut walk = WalkScope::new(scope);
        walk.class = Some(class);
        self.walk_stack.push(walk);

        self.prescan_not_local(&class_def.body);
        self.seed_class_names();
        self.visit_body(&class_def.body);
        self.pop_walk_scope();
    }

    fn bind_lambda(&mut self, lambda: &'ast ast::ExprLambda) {
        // Defaults are evaluated in the enclosing scope.
        if let Some(parameters) = &lambda.parameters {
            for default in parameters
                .iter_non_variadic_params()
                .filter_map(|parameter| parameter.default.as_deref())
            {
                self.visit_expr(default);
            }
        }

        let parent = self.non_class_parent_scope();
        let scope = self.create_scope(
            Some(parent),
            ScopeKind::Function,
            ScopeNode::Lambda(lambda),
            NodeKey::from_node(lambda),
        );
        let function = self.function_types.push(FunctionType::new(
            Name::new_static("<lambda>"),
            None,
            FunctionTypeFlags::empty(),
            scope,
        ));
        self.types_by_node
            .insert(NodeKey::from_node(lambda), Type::Function(function));

        self.current_walk()
            .deferred
            .push_back(DeferredBinder::Lambda { node: lambda, scope });
    }

    /// Pushes a comprehension scope and binds the generator chain. The
    /// iterator of the outermost `for` is evaluated in the enclosing scope;
    /// every target binds into the comprehension scope.
    fn bind_comprehension_scope(
        &mut self,
        node: &'ast ast::Expr,
        key: NodeKey,
        generators: &'ast [ast::Comprehension],
        visit_outer_elt: impl FnOnce(&mut Self),
    ) {
        let Some((first, rest)) = generators.split_first() else {
            self.internal_fault("comprehension without generators".to_string());
            return;
        };

        self.visit_expr(&first.iter);

        let parent = self.current_scope_id();
        let function = self.current_function();
        let scope = self.create_scope(
            Some(parent),
            ScopeKind::Comprehension,
            ScopeNode::Comprehension(node),
            key,
        );
        let mut walk = WalkScope::new(scope);
        walk.function = function;
        self.walk_stack.push(walk);

        self.push_target(CurrentTarget::Comprehension(first));
        self.visit_expr(&first.target);
        self.pop_target();
        for condition in &first.ifs {
            self.visit_expr(condition);
        }

        for generator in rest {
            self.visit_expr(&generator.iter);
            self.push_target(CurrentTarget::Comprehension(generator));
            self.visit_expr(&generator.target);
            self.pop_target();
            for condition in &generator.ifs {
                self.visit_expr(condition);
            }
        }

        visit_outer_elt(self);
        self.pop_walk_scope();
    }

    fn bind_global_statement(&mut self, node: &'ast ast::StmtGlobal) {
        let in_global_scope = self.in_global_scope();
        for name in &node.names {
            let earlier = self.current_walk().not_local.get(&name.id).copied();
            if earlier == Some(NameBindingKind::Nonlocal) {
                self.sink.error(
                    name.range,
                    format!("\"{}\" was already declared nonlocal", name.id),
                );
                continue;
            }

            let locally_bound = {
                let walk = self.current_walk();
                !in_global_scope && walk.assigned_names.contains(&name.id)
            };
            let has_local_declaration = self.scopes[self.current_scope_id()]
                .symbol_table()
                .symbol_by_name(&name.id)
                .map_or(false, |symbol| {
                    !in_global_scope && symbol.has_value_declaration()
                });
            if locally_bound || has_local_declaration {
                self.sink.error(
                    name.range,
                    format!("\"{}\" is assigned before global declaration", name.id),
                );
            }

            if !self.unexecuted {
                let global_scope = self.global_scope_id();
                self.scopes[global_scope].table_mut().add_or_update_symbol(
                    name.id.clone(),
                    SymbolFlags::INITIALLY_UNBOUND | SymbolFlags::CLASS_MEMBER,
                );
            }
        }
    }

    fn bind_nonlocal_statement(&mut self, node: &'ast ast::StmtNonlocal) {
        if self.in_global_scope() {
            for name in &node.names {
                self.sink.error(
                    name.range,
                    "Nonlocal declaration not allowed at module level",
                );
            }
            return;
        }

        for name in &node.names {
            let earlier = self.current_walk().not_local.get(&name.id).copied();
            if earlier == Some(NameBindingKind::Global) {
                self.sink.error(
                    name.range,
                    format!("\"{}\" was already declared global", name.id),
                );
                continue;
            }

            if self.current_walk().assigned_names.contains(&name.id) {
                self.sink.error(
                    name.range,
                    format!("\"{}\" is assigned before nonlocal declaration", name.id),
                );
            }

            if !self.has_nonlocal_binding(&name.id) {
                self.sink.error(
                    name.range,
                    format!("No binding for nonlocal \"{}\" found", name.id),
                );
            }
        }
    }

    /// Whether an enclosing non-global scope binds `name`. Class scopes are
    /// not consulted; `nonlocal` reaches through functions only.
    fn has_nonlocal_binding(&self, name: &str) -> bool {
        let global = self.global_scope_id();
        let mut current = self.scopes[self.current_scope_id()].parent();
        while let Some(scope_id) = current {
            if scope_id == global {
                return false;
            }
            let scope = &self.scopes[scope_id];
            if !scope.kind().is_class() && scope.symbol_table().symbol_by_name(name).is_some() {
                return true;
            }
            current = scope.parent();
        }
        false
    }

    fn bind_if_statement(&mut self, node: &'ast ast::StmtIf) {
        self.visit_expr(&node.test);
        let truthiness = self.file.evaluator.truthiness(&node.test);
        self.with_unexecuted(truthiness.is_always_false(), |binder| {
            binder.visit_body(&node.body);
        });

        // An `elif`/`else` clause only runs when no earlier branch was
        // statically taken.
        let mut earlier_branch_always_taken = truthiness.is_always_true();
        for clause in &node.elif_else_clauses {
            match &clause.test {
                Some(test) => {
                    self.with_unexecuted(earlier_branch_always_taken, |binder| {
                        binder.visit_expr(test);
                    });
                    let truthiness = self.file.evaluator.truthiness(test);
                    self.with_unexecuted(
                        earlier_branch_always_taken || truthiness.is_always_false(),
                        |binder| binder.visit_body(&clause.body),
                    );
                    earlier_branch_always_taken |= truthiness.is_always_true();
                }
                None => {
                    self.with_unexecuted(earlier_branch_always_taken, |binder| {
                        binder.visit_body(&clause.body);
                    });
                }
            }
        }
    }

    fn bind_while_statement(&mut self, node: &'ast ast::StmtWhile) {
        self.visit_expr(&node.test);
        let truthiness = self.file.evaluator.truthiness(&node.test);
        self.with_unexecuted(truthiness.is_always_false(), |binder| {
            binder.visit_body(&node.body);
        });
        // The `else` suite runs when the loop condition goes false.
        self.with_unexecuted(truthiness.is_always_true(), |binder| {
            binder.visit_body(&node.orelse);
        });
    }

    fn bind_try_statement(&mut self, node: &'ast ast::StmtTry) {
        self.visit_body(&node.body);
        for handler in &node.handlers {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            if let Some(type_) = &handler.type_ {
                self.visit_expr(type_);
            }
            if let Some(name) = &handler.name {
                if let Some(symbol) = self.bind_name(&name.id) {
                    let scope = self.current_scope_id();
                    let path = self.source_path();
                    self.add_declaration(
                        scope,
                        symbol,
                        Declaration::Variable(VariableDeclaration {
                            node: VariableNode::ExceptName(name),
                            path,
                            range: name.range,
                            is_constant: false,
                            type_annotation: None,
                            inferred_type_source: handler
                                .type_
                                .as_deref()
                                .map(TypeSourceId::from_node),
                        }),
                    );
                }
            }
            self.current_walk().nested_except_depth += 1;
            self.visit_body(&handler.body);
            self.current_walk().nested_except_depth -= 1;
        }
        self.visit_body(&node.orelse);
        self.visit_body(&node.finalbody);
    }

    fn bind_raise_statement(&mut self, node: &'ast ast::StmtRaise) {
        if let Some(exc) = &node.exc {
            self.visit_expr(exc);
        }
        if let Some(cause) = &node.cause {
            self.visit_expr(cause);
        }
        if node.exc.is_none() && self.current_walk().nested_except_depth == 0 {
            self.sink.error(
                node.range,
                "Raise requires parameter(s) when used outside of except clause",
            );
        }
        if !self.unexecuted {
            let scope = self.current_scope_id();
            self.scopes[scope].set_always_raises();
        }
    }

    fn report_string_errors(&mut self, errors: &[ast::StringEscapeError]) {
        use ast::StringEscapeErrorKind;

        for error in errors {
            match error.kind {
                StringEscapeErrorKind::InvalidEscapeSequence => {
                    self.sink.report(
                        &self.file.settings,
                        crate::diagnostic::Rule::InvalidStringEscapeSequence,
                        error.range,
                        "Unsupported escape sequence in string literal",
                        None,
                    );
                }
                StringEscapeErrorKind::EscapeWithinFormatExpression => {
                    self.sink.error(
                        error.range,
                        "Escape sequence (backslash) not allowed in expression portion of f-string",
                    );
                }
                StringEscapeErrorKind::SingleCloseBrace => {
                    self.sink.error(
                        error.range,
                        "Single close brace not allowed within f-string literal; use double close brace",
                    );
                }
                StringEscapeErrorKind::UnterminatedFormatExpression => {
                    self.sink.error(
                        error.range,
                        "Unterminated expression in f-string; missing close brace",
                    );
                }
            }
        }
    }
}

impl<'a, 'ast> Visitor<'ast> for Binder<'a, 'ast> {
    fn visit_stmt(&mut self, stmt: &'ast ast::Stmt) {
        match stmt {
            ast::Stmt::FunctionDef(function_def) => self.bind_function_def(function_def),
            ast::Stmt::ClassDef(class_def) => self.bind_class_def(class_def),
            ast::Stmt::Assign(node) => {
                self.visit_expr(&node.value);
                for target in &node.targets {
                    self.push_target(CurrentTarget::Assign {
                        value: &*node.value,
                    });
                    self.visit_expr(target);
                    self.pop_target();
                }
            }
            ast::Stmt::AnnAssign(node) => {
                self.visit_annotation(&node.annotation);
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
                let target_supported = match &*node.target {
                    ast::Expr::Name(_) => true,
                    ast::Expr::Attribute(attribute) => attribute.value.is_name_expr(),
                    _ => false,
                };
                if target_supported {
                    self.push_target(CurrentTarget::AnnAssign(node));
                    self.visit_expr(&node.target);
                    self.pop_target();
                } else {
                    self.sink.error(
                        node.target.range(),
                        "Type annotation not supported for this type of expression",
                    );
                    self.visit_expr(&node.target);
                }
            }
            ast::Stmt::AugAssign(node) => {
                self.visit_expr(&node.value);
                self.push_target(CurrentTarget::AugAssign(node));
                self.visit_expr(&node.target);
                self.pop_target();
            }
            ast::Stmt::For(node) => {
                self.visit_expr(&node.iter);
                self.push_target(CurrentTarget::For(node));
                self.visit_expr(&node.target);
                self.pop_target();
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            ast::Stmt::While(node) => self.bind_while_statement(node),
            ast::Stmt::If(node) => self.bind_if_statement(node),
            ast::Stmt::With(node) => {
                for item in &node.items {
                    self.visit_expr(&item.context_expr);
                    if let Some(optional_vars) = &item.optional_vars {
                        self.push_target(CurrentTarget::WithItem(item));
                        self.visit_expr(optional_vars);
                        self.pop_target();
                    }
                }
                self.visit_body(&node.body);
            }
            ast::Stmt::Try(node) => self.bind_try_statement(node),
            ast::Stmt::Raise(node) => self.bind_raise_statement(node),
            ast::Stmt::Import(node) => {
                for alias in &node.names {
                    self.bind_import(alias);
                }
            }
            ast::Stmt::ImportFrom(node) => self.bind_import_from(node),
            ast::Stmt::Global(node) => self.bind_global_statement(node),
            ast::Stmt::Nonlocal(node) => self.bind_nonlocal_statement(node),
            ast::Stmt::Delete(node) => {
                for target in &node.targets {
                    self.visit_expr(target);
                }
            }
            _ => walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &'ast ast::Expr) {
        match expr {
            ast::Expr::Name(name_node) => match name_node.ctx {
                ast::ExprContext::Store => {
                    if let Some(target) = self.current_target() {
                        self.bind_name_target(name_node, target);
                    } else {
                        self.bind_name(&name_node.id);
                    }
                }
                ast::ExprContext::Del => {
                    // The name becomes known to the scope; no declaration.
                    self.bind_name(&name_node.id);
                }
                ast::ExprContext::Load => {}
            },
            ast::Expr::Attribute(attribute) => {
                if attribute.ctx.is_store() {
                    if let Some(target) = self.current_target() {
                        self.bind_member_access_target(attribute, target);
                    }
                }
                walk_expr(self, expr);
            }
            ast::Expr::Named(node) => {
                self.visit_expr(&node.value);
                self.push_target(CurrentTarget::Named(node));
                self.visit_expr(&node.target);
                self.pop_target();
            }
            ast::Expr::Lambda(lambda) => self.bind_lambda(lambda),
            ast::Expr::ListComp(comprehension) => {
                self.bind_comprehension_scope(
                    expr,
                    NodeKey::from_node(comprehension),
                    &comprehension.generators,
                    |binder| binder.visit_expr(&comprehension.elt),
                );
            }
            ast::Expr::SetComp(comprehension) => {
                self.bind_comprehension_scope(
                    expr,
                    NodeKey::from_node(comprehension),
                    &comprehension.generators,
                    |binder| binder.visit_expr(&comprehension.elt),
                );
            }
            ast::Expr::Generator(comprehension) => {
                self.bind_comprehension_scope(
                    expr,
                    NodeKey::from_node(comprehension),
                    &comprehension.generators,
                    |binder| binder.visit_expr(&comprehension.elt),
                );
            }
            ast::Expr::DictComp(comprehension) => {
                self.bind_comprehension_scope(
                    expr,
                    NodeKey::from_node(comprehension),
                    &comprehension.generators,
                    |binder| {
                        binder.visit_expr(&comprehension.key);
                        binder.visit_expr(&comprehension.value);
                    },
                );
            }
            ast::Expr::Yield(node) => {
                if self.current_function().is_none() {
                    self.sink
                        .error(node.range, "\"yield\" not allowed outside of a function");
                }
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            ast::Expr::YieldFrom(node) => {
                match self.current_function() {
                    None => {
                        self.sink.error(
                            node.range,
                            "\"yield from\" not allowed outside of a function",
                        );
                    }
                    Some(context) if context.node.is_async => {
                        self.sink.error(
                            node.range,
                            "\"yield from\" not allowed in an async function",
                        );
                    }
                    Some(_) => {}
                }
                self.visit_expr(&node.value);
            }
            ast::Expr::Await(node) => {
                if !self
                    .current_function()
                    .map_or(false, |context| context.node.is_async)
                {
                    self.sink.error(
                        node.range,
                        "\"await\" allowed only within async function",
                    );
                }
                self.visit_expr(&node.value);
            }
            ast::Expr::StringLiteral(literal) => self.report_string_errors(&literal.errors),
            ast::Expr::BytesLiteral(literal) => self.report_string_errors(&literal.errors),
            ast::Expr::FString(fstring) => {
                self.report_string_errors(&fstring.errors);
                walk_expr(self, expr);
            }
            _ => walk_expr(self, expr),
        }
    }
}

/// The docstring of a suite: its first statement, when that is a plain
/// (non-f-string) string literal.
fn docstring_of(body: &[ast::Stmt]) -> Option<Box<str>> {
    match body.first()? {
        ast::Stmt::Expr(stmt) => stmt
            .value
            .as_string_literal_expr()
            .map(|literal| literal.value.clone()),
        _ => None,
    }
}

/// Whether assignments to `name` are treated as constant bindings.
fn is_constant_name(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Whether `annotation` spells `Final` or `Final[...]`.
fn is_final_annotation(annotation: &ast::Expr) -> bool {
    match annotation {
        ast::Expr::Name(name) => name.id == "Final",
        ast::Expr::Subscript(subscript) => subscript
            .value
            .as_name_expr()
            .map_or(false, |name| name.id == "Final"),
        _ => false,
    }
}

/// Whether the function carries a decorator spelled `name` or `*.name`.
fn has_decorator(function_def: &ast::StmtFunctionDef, name: &str) -> bool {
    function_def.decorator_list.iter().any(|decorator| {
        match &decorator.expression {
            ast::Expr::Name(decorator_name) => decorator_name.id == *name,
            ast::Expr::Attribute(attribute) => attribute.attr.id == *name,
            _ => false,
        }
    })
}
