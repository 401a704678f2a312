//! Builders producing the tree shapes the parser would hand the binder.
//! Ranges are irrelevant to binding semantics and default to empty.

#![allow(dead_code)]

use text_size::TextRange;

use tern_python_ast::{self as ast, Expr, Name, Stmt};
use tern_python_binder::context::FileInfo;
use tern_python_binder::diagnostic::{Diagnostic, Severity};
use tern_python_binder::symbol::Symbol;
use tern_python_binder::{bind_module, ModuleBinding};

pub fn rng() -> TextRange {
    TextRange::default()
}

pub fn ident(name: &str) -> ast::Identifier {
    ast::Identifier::new(name, rng())
}

pub fn module(body: Vec<Stmt>) -> ast::ModModule {
    ast::ModModule { range: rng(), body }
}

// ----- expressions -----

pub fn load(name: &str) -> Expr {
    Expr::Name(ast::ExprName {
        range: rng(),
        id: Name::new(name),
        ctx: ast::ExprContext::Load,
    })
}

pub fn store(name: &str) -> Expr {
    Expr::Name(ast::ExprName {
        range: rng(),
        id: Name::new(name),
        ctx: ast::ExprContext::Store,
    })
}

pub fn del(name: &str) -> Expr {
    Expr::Name(ast::ExprName {
        range: rng(),
        id: Name::new(name),
        ctx: ast::ExprContext::Del,
    })
}

pub fn int(value: u64) -> Expr {
    Expr::NumberLiteral(ast::ExprNumberLiteral {
        range: rng(),
        value: ast::Number::Int(value),
    })
}

pub fn boolean(value: bool) -> Expr {
    Expr::BooleanLiteral(ast::ExprBooleanLiteral { range: rng(), value })
}

pub fn string(value: &str) -> Expr {
    Expr::StringLiteral(ast::ExprStringLiteral {
        range: rng(),
        value: value.into(),
        errors: Vec::new(),
    })
}

pub fn string_with_errors(value: &str, errors: Vec<ast::StringEscapeError>) -> Expr {
    Expr::StringLiteral(ast::ExprStringLiteral {
        range: rng(),
        value: value.into(),
        errors,
    })
}

pub fn escape_error(kind: ast::StringEscapeErrorKind) -> ast::StringEscapeError {
    ast::StringEscapeError { kind, range: rng() }
}

pub fn fstring(elements: Vec<ast::FStringElement>, errors: Vec<ast::StringEscapeError>) -> Expr {
    Expr::FString(ast::ExprFString {
        range: rng(),
        elements,
        errors,
    })
}

pub fn attr_store(base: &str, member: &str) -> Expr {
    Expr::Attribute(ast::ExprAttribute {
        range: rng(),
        value: Box::new(load(base)),
        attr: ident(member),
        ctx: ast::ExprContext::Store,
    })
}

pub fn subscript_store(base: &str, index: Expr) -> Expr {
    Expr::Subscript(ast::ExprSubscript {
        range: rng(),
        value: Box::new(load(base)),
        slice: Box::new(index),
        ctx: ast::ExprContext::Store,
    })
}

pub fn tuple_store(elts: Vec<Expr>) -> Expr {
    Expr::Tuple(ast::ExprTuple {
        range: rng(),
        elts,
        ctx: ast::ExprContext::Store,
    })
}

pub fn named(target: Expr, value: Expr) -> Expr {
    Expr::Named(ast::ExprNamed {
        range: rng(),
        target: Box::new(target),
        value: Box::new(value),
    })
}

pub fn yield_expr() -> Expr {
    Expr::Yield(ast::ExprYield {
        range: rng(),
        value: None,
    })
}

pub fn yield_from(value: Expr) -> Expr {
    Expr::YieldFrom(ast::ExprYieldFrom {
        range: rng(),
        value: Box::new(value),
    })
}

pub fn await_expr(value: Expr) -> Expr {
    Expr::Await(ast::ExprAwait {
        range: rng(),
        value: Box::new(value),
    })
}

pub fn lambda(parameters: ast::Parameters, body: Expr) -> Expr {
    Expr::Lambda(ast::ExprLambda {
        range: rng(),
        parameters: Some(Box::new(parameters)),
        body: Box::new(body),
    })
}

pub fn list_comp(elt: Expr, target: Expr, iter: Expr) -> Expr {
    Expr::ListComp(ast::ExprListComp {
        range: rng(),
        elt: Box::new(elt),
        generators: vec![ast::Comprehension {
            range: rng(),
            target,
            iter,
            ifs: Vec::new(),
            is_async: false,
        }],
    })
}

// ----- statements -----

pub fn expr_stmt(value: Expr) -> Stmt {
    Stmt::Expr(ast::StmtExpr {
        range: rng(),
        value: Box::new(value),
    })
}

pub fn assign(target: Expr, value: Expr) -> Stmt {
    Stmt::Assign(ast::StmtAssign {
        range: rng(),
        targets: vec![target],
        value: Box::new(value),
    })
}

pub fn aug_assign(target: Expr, value: Expr) -> Stmt {
    Stmt::AugAssign(ast::StmtAugAssign {
        range: rng(),
        target: Box::new(target),
        op: ast::Operator::Add,
        value: Box::new(value),
    })
}

pub fn ann_assign(target: Expr, annotation: Expr, value: Option<Expr>) -> Stmt {
    Stmt::AnnAssign(ast::StmtAnnAssign {
        range: rng(),
        target: Box::new(target),
        annotation: Box::new(annotation),
        value: value.map(Box::new),
        simple: true,
    })
}

pub fn del_stmt(targets: Vec<Expr>) -> Stmt {
    Stmt::Delete(ast::StmtDelete {
        range: rng(),
        targets,
    })
}

pub fn pass() -> Stmt {
    Stmt::Pass(ast::StmtPass { range: rng() })
}

pub fn return_stmt(value: Option<Expr>) -> Stmt {
    Stmt::Return(ast::StmtReturn {
        range: rng(),
        value: value.map(Box::new),
    })
}

pub fn params(names: &[&str]) -> ast::Parameters {
    ast::Parameters {
        args: names
            .iter()
            .copied()
            .map(|name| ast::ParameterWithDefault {
                range: rng(),
                parameter: ast::Parameter {
                    range: rng(),
                    name: ident(name),
                    annotation: None,
                },
                default: None,
            })
            .collect(),
        ..ast::Parameters::default()
    }
}

pub fn def(name: &str, parameters: ast::Parameters, body: Vec<Stmt>) -> Stmt {
    Stmt::FunctionDef(ast::StmtFunctionDef {
        range: rng(),
        is_async: false,
        decorator_list: Vec::new(),
        name: ident(name),
        parameters: Box::new(parameters),
        returns: None,
        body,
    })
}

pub fn async_def(name: &str, parameters: ast::Parameters, body: Vec<Stmt>) -> Stmt {
    Stmt::FunctionDef(ast::StmtFunctionDef {
        range: rng(),
        is_async: true,
        decorator_list: Vec::new(),
        name: ident(name),
        parameters: Box::new(parameters),
        returns: None,
        body,
    })
}

pub fn decorated_def(
    name: &str,
    decorators: &[&str],
    parameters: ast::Parameters,
    body: Vec<Stmt>,
) -> Stmt {
    Stmt::FunctionDef(ast::StmtFunctionDef {
        range: rng(),
        is_async: false,
        decorator_list: decorators
            .iter()
            .copied()
            .map(|decorator| ast::Decorator {
                range: rng(),
                expression: load(decorator),
            })
            .collect(),
        name: ident(name),
        parameters: Box::new(parameters),
        returns: None,
        body,
    })
}

pub fn class(name: &str, body: Vec<Stmt>) -> Stmt {
    Stmt::ClassDef(ast::StmtClassDef {
        range: rng(),
        decorator_list: Vec::new(),
        name: ident(name),
        arguments: None,
        body,
    })
}

pub fn class_with_args(
    name: &str,
    bases: Vec<Expr>,
    keywords: Vec<(Option<&str>, Expr)>,
    body: Vec<Stmt>,
) -> Stmt {
    Stmt::ClassDef(ast::StmtClassDef {
        range: rng(),
        decorator_list: Vec::new(),
        name: ident(name),
        arguments: Some(Box::new(ast::Arguments {
            range: rng(),
            args: bases,
            keywords: keywords
                .into_iter()
                .map(|(arg, value)| ast::Keyword {
                    range: rng(),
                    arg: arg.map(ident),
                    value,
                })
                .collect(),
        })),
        body,
    })
}

pub fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Stmt {
    let elif_else_clauses = if orelse.is_empty() {
        Vec::new()
    } else {
        vec![ast::ElifElseClause {
            range: rng(),
            test: None,
            body: orelse,
        }]
    };
    Stmt::If(ast::StmtIf {
        range: rng(),
        test: Box::new(test),
        body,
        elif_else_clauses,
    })
}

pub fn while_stmt(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Stmt {
    Stmt::While(ast::StmtWhile {
        range: rng(),
        test: Box::new(test),
        body,
        orelse,
    })
}

pub fn for_stmt(target: Expr, iter: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::For(ast::StmtFor {
        range: rng(),
        is_async: false,
        target: Box::new(target),
        iter: Box::new(iter),
        body,
        orelse: Vec::new(),
    })
}

pub fn with_stmt(context_expr: Expr, optional_vars: Option<Expr>, body: Vec<Stmt>) -> Stmt {
    Stmt::With(ast::StmtWith {
        range: rng(),
        is_async: false,
        items: vec![ast::WithItem {
            range: rng(),
            context_expr,
            optional_vars: optional_vars.map(Box::new),
        }],
        body,
    })
}

pub fn raise_bare() -> Stmt {
    Stmt::Raise(ast::StmtRaise {
        range: rng(),
        exc: None,
        cause: None,
    })
}

pub fn raise(exc: Expr) -> Stmt {
    Stmt::Raise(ast::StmtRaise {
        range: rng(),
        exc: Some(Box::new(exc)),
        cause: None,
    })
}

pub fn try_except(
    body: Vec<Stmt>,
    exception: Option<Expr>,
    binder: Option<&str>,
    handler_body: Vec<Stmt>,
) -> Stmt {
    Stmt::Try(ast::StmtTry {
        range: rng(),
        body,
        handlers: vec![ast::ExceptHandler::ExceptHandler(
            ast::ExceptHandlerExceptHandler {
                range: rng(),
                type_: exception.map(Box::new),
                name: binder.map(ident),
                body: handler_body,
            },
        )],
        orelse: Vec::new(),
        finalbody: Vec::new(),
    })
}

pub fn global_stmt(names: &[&str]) -> Stmt {
    Stmt::Global(ast::StmtGlobal {
        range: rng(),
        names: names.iter().copied().map(ident).collect(),
    })
}

pub fn nonlocal_stmt(names: &[&str]) -> Stmt {
    Stmt::Nonlocal(ast::StmtNonlocal {
        range: rng(),
        names: names.iter().copied().map(ident).collect(),
    })
}

pub fn alias(name: &str, asname: Option<&str>) -> ast::Alias {
    ast::Alias {
        range: rng(),
        name: ident(name),
        asname: asname.map(ident),
    }
}

pub fn import_stmt(clauses: &[(&str, Option<&str>)]) -> Stmt {
    Stmt::Import(ast::StmtImport {
        range: rng(),
        names: clauses
            .iter()
            .map(|&(name, asname)| alias(name, asname))
            .collect(),
    })
}

pub fn from_import(module: Option<&str>, level: u32, names: &[(&str, Option<&str>)]) -> Stmt {
    Stmt::ImportFrom(ast::StmtImportFrom {
        range: rng(),
        module: module.map(ident),
        names: names
            .iter()
            .map(|&(name, asname)| alias(name, asname))
            .collect(),
        level,
    })
}

// ----- binding + inspection -----

pub fn bind(module: &ast::ModModule) -> ModuleBinding<'_> {
    let file = FileInfo::new("main.py", "");
    bind_module(module, &file).expect("binding succeeds")
}

pub fn root_symbol<'m, 'ast>(binding: &'m ModuleBinding<'ast>, name: &str) -> &'m Symbol<'ast> {
    binding
        .root_scope()
        .symbol_table()
        .symbol_by_name(name)
        .unwrap_or_else(|| panic!("expected symbol {name} in the module scope"))
}

pub fn error_messages(binding: &ModuleBinding<'_>) -> Vec<String> {
    binding
        .diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.severity == Severity::Error)
        .map(|diagnostic| diagnostic.message.clone())
        .collect()
}

pub fn all_messages(binding: &ModuleBinding<'_>) -> Vec<String> {
    binding
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message.clone())
        .collect()
}

pub fn diagnostics<'m, 'ast>(binding: &'m ModuleBinding<'ast>) -> &'m [Diagnostic] {
    binding.diagnostics()
}
