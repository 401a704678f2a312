//! Source-order traversal over the syntax tree. Implementors override the
//! `visit_*` hooks they care about and delegate the rest to the matching
//! `walk_*` function; a hook that takes over sub-traversal simply does not
//! call `walk_*`.

use crate::nodes::*;

pub trait Visitor<'a> {
    fn visit_body(&mut self, body: &'a [Stmt]) {
        walk_body(self, body);
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_annotation(&mut self, expr: &'a Expr) {
        self.visit_expr(expr);
    }

    fn visit_decorator(&mut self, decorator: &'a Decorator) {
        walk_decorator(self, decorator);
    }

    fn visit_parameters(&mut self, parameters: &'a Parameters) {
        walk_parameters(self, parameters);
    }

    fn visit_parameter(&mut self, parameter: &'a Parameter) {
        walk_parameter(self, parameter);
    }

    fn visit_arguments(&mut self, arguments: &'a Arguments) {
        walk_arguments(self, arguments);
    }

    fn visit_keyword(&mut self, keyword: &'a Keyword) {
        walk_keyword(self, keyword);
    }

    fn visit_comprehension(&mut self, comprehension: &'a Comprehension) {
        walk_comprehension(self, comprehension);
    }

    fn visit_except_handler(&mut self, except_handler: &'a ExceptHandler) {
        walk_except_handler(self, except_handler);
    }

    fn visit_with_item(&mut self, with_item: &'a WithItem) {
        walk_with_item(self, with_item);
    }

    fn visit_alias(&mut self, alias: &'a Alias) {
        walk_alias(self, alias);
    }

    fn visit_elif_else_clause(&mut self, clause: &'a ElifElseClause) {
        walk_elif_else_clause(self, clause);
    }

    fn visit_f_string_element(&mut self, element: &'a FStringElement) {
        walk_f_string_element(self, element);
    }
}

pub fn walk_body<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, body: &'a [Stmt]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Stmt) {
    match stmt {
        Stmt::FunctionDef(StmtFunctionDef {
            decorator_list,
            parameters,
            returns,
            body,
            ..
        }) => {
            for decorator in decorator_list {
                visitor.visit_decorator(decorator);
            }
            visitor.visit_parameters(parameters);
            if let Some(returns) = returns {
                visitor.visit_annotation(returns);
            }
            visitor.visit_body(body);
        }
        Stmt::ClassDef(StmtClassDef {
            decorator_list,
            arguments,
            body,
            ..
        }) => {
            for decorator in decorator_list {
                visitor.visit_decorator(decorator);
            }
            if let Some(arguments) = arguments {
                visitor.visit_arguments(arguments);
            }
            visitor.visit_body(body);
        }
        Stmt::Return(StmtReturn { value, .. }) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Delete(StmtDelete { targets, .. }) => {
            for target in targets {
                visitor.visit_expr(target);
            }
        }
        Stmt::Assign(StmtAssign { targets, value, .. }) => {
            visitor.visit_expr(value);
            for target in targets {
                visitor.visit_expr(target);
            }
        }
        Stmt::AugAssign(StmtAugAssign { target, value, .. }) => {
            visitor.visit_expr(value);
            visitor.visit_expr(target);
        }
        Stmt::AnnAssign(StmtAnnAssign {
            target,
            annotation,
            value,
            ..
        }) => {
            visitor.visit_annotation(annotation);
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
            visitor.visit_expr(target);
        }
        Stmt::For(StmtFor {
            target,
            iter,
            body,
            orelse,
            ..
        }) => {
            visitor.visit_expr(iter);
            visitor.visit_expr(target);
            visitor.visit_body(body);
            visitor.visit_body(orelse);
        }
        Stmt::While(StmtWhile {
            test, body, orelse, ..
        }) => {
            visitor.visit_expr(test);
            visitor.visit_body(body);
            visitor.visit_body(orelse);
        }
        Stmt::If(StmtIf {
            test,
            body,
            elif_else_clauses,
            ..
        }) => {
            visitor.visit_expr(test);
            visitor.visit_body(body);
            for clause in elif_else_clauses {
                visitor.visit_elif_else_clause(clause);
            }
        }
        Stmt::With(StmtWith { items, body, .. }) => {
            for item in items {
                visitor.visit_with_item(item);
            }
            visitor.visit_body(body);
        }
        Stmt::Raise(StmtRaise { exc, cause, .. }) => {
            if let Some(exc) = exc {
                visitor.visit_expr(exc);
            }
            if let Some(cause) = cause {
                visitor.visit_expr(cause);
            }
        }
        Stmt::Try(StmtTry {
            body,
            handlers,
            orelse,
            finalbody,
            ..
        }) => {
            visitor.visit_body(body);
            for handler in handlers {
                visitor.visit_except_handler(handler);
            }
            visitor.visit_body(orelse);
            visitor.visit_body(finalbody);
        }
        Stmt::Assert(StmtAssert { test, msg, .. }) => {
            visitor.visit_expr(test);
            if let Some(msg) = msg {
                visitor.visit_expr(msg);
            }
        }
        Stmt::Import(StmtImport { names, .. }) => {
            for alias in names {
                visitor.visit_alias(alias);
            }
        }
        Stmt::ImportFrom(StmtImportFrom { names, .. }) => {
            for alias in names {
                visitor.visit_alias(alias);
            }
        }
        Stmt::Expr(StmtExpr { value, .. }) => {
            visitor.visit_expr(value);
        }
        Stmt::Global(_)
        | Stmt::Nonlocal(_)
        | Stmt::Pass(_)
        | Stmt::Break(_)
        | Stmt::Continue(_) => {}
    }
}

pub fn walk_expr<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expr) {
    match expr {
        Expr::BoolOp(ExprBoolOp { values, .. }) => {
            for value in values {
                visitor.visit_expr(value);
            }
        }
        Expr::Named(ExprNamed { target, value, .. }) => {
            visitor.visit_expr(value);
            visitor.visit_expr(target);
        }
        Expr::BinOp(ExprBinOp { left, right, .. }) => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::UnaryOp(ExprUnaryOp { operand, .. }) => {
            visitor.visit_expr(operand);
        }
        Expr::Lambda(ExprLambda {
            parameters, body, ..
        }) => {
            if let Some(parameters) = parameters {
                visitor.visit_parameters(parameters);
            }
            visitor.visit_expr(body);
        }
        Expr::If(ExprIf {
            test, body, orelse, ..
        }) => {
            visitor.visit_expr(test);
            visitor.visit_expr(body);
            visitor.visit_expr(orelse);
        }
        Expr::Dict(ExprDict { items, .. }) => {
            for item in items {
                if let Some(key) = &item.key {
                    visitor.visit_expr(key);
                }
                visitor.visit_expr(&item.value);
            }
        }
        Expr::Set(ExprSet { elts, .. }) => {
            for elt in elts {
                visitor.visit_expr(elt);
            }
        }
        Expr::ListComp(ExprListComp {
            elt, generators, ..
        })
        | Expr::SetComp(ExprSetComp {
            elt, generators, ..
        })
        | Expr::Generator(ExprGenerator {
            elt, generators, ..
        }) => {
            for comprehension in generators {
                visitor.visit_comprehension(comprehension);
            }
            visitor.visit_expr(elt);
        }
        Expr::DictComp(ExprDictComp {
            key,
            value,
            generators,
            ..
        }) => {
            for comprehension in generators {
                visitor.visit_comprehension(comprehension);
            }
            visitor.visit_expr(key);
            visitor.visit_expr(value);
        }
        Expr::Await(ExprAwait { value, .. })
        | Expr::YieldFrom(ExprYieldFrom { value, .. }) => {
            visitor.visit_expr(value);
        }
        Expr::Yield(ExprYield { value, .. }) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Expr::Compare(ExprCompare {
            left, comparators, ..
        }) => {
            visitor.visit_expr(left);
            for comparator in comparators {
                visitor.visit_expr(comparator);
            }
        }
        Expr::Call(ExprCall {
            func, arguments, ..
        }) => {
            visitor.visit_expr(func);
            visitor.visit_arguments(arguments);
        }
        Expr::FString(ExprFString { elements, .. }) => {
            for element in elements {
                visitor.visit_f_string_element(element);
            }
        }
        Expr::StringLiteral(_)
        | Expr::BytesLiteral(_)
        | Expr::NumberLiteral(_)
        | Expr::BooleanLiteral(_)
        | Expr::NoneLiteral(_)
        | Expr::EllipsisLiteral(_) => {}
        Expr::Attribute(ExprAttribute { value, .. }) => {
            visitor.visit_expr(value);
        }
        Expr::Subscript(ExprSubscript { value, slice, .. }) => {
            visitor.visit_expr(value);
            visitor.visit_expr(slice);
        }
        Expr::Starred(ExprStarred { value, .. }) => {
            visitor.visit_expr(value);
        }
        Expr::Name(_) => {}
        Expr::List(ExprList { elts, .. }) | Expr::Tuple(ExprTuple { elts, .. }) => {
            for elt in elts {
                visitor.visit_expr(elt);
            }
        }
        Expr::Slice(ExprSlice {
            lower, upper, step, ..
        }) => {
            if let Some(lower) = lower {
                visitor.visit_expr(lower);
            }
            if let Some(upper) = upper {
                visitor.visit_expr(upper);
            }
            if let Some(step) = step {
                visitor.visit_expr(step);
            }
        }
    }
}

pub fn walk_decorator<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, decorator: &'a Decorator) {
    visitor.visit_expr(&decorator.expression);
}

pub fn walk_parameters<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, parameters: &'a Parameters) {
    for parameter in parameters.iter() {
        visitor.visit_parameter(parameter.as_parameter());
        if let Some(default) = parameter.default() {
            visitor.visit_expr(default);
        }
    }
}

pub fn walk_parameter<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, parameter: &'a Parameter) {
    if let Some(annotation) = &parameter.annotation {
        visitor.visit_annotation(annotation);
    }
}

pub fn walk_arguments<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, arguments: &'a Arguments) {
    for arg in &arguments.args {
        visitor.visit_expr(arg);
    }
    for keyword in &arguments.keywords {
        visitor.visit_keyword(keyword);
    }
}

pub fn walk_keyword<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, keyword: &'a Keyword) {
    visitor.visit_expr(&keyword.value);
}

pub fn walk_comprehension<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    comprehension: &'a Comprehension,
) {
    visitor.visit_expr(&comprehension.iter);
    visitor.visit_expr(&comprehension.target);
    for condition in &comprehension.ifs {
        visitor.visit_expr(condition);
    }
}

pub fn walk_except_handler<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    except_handler: &'a ExceptHandler,
) {
    let ExceptHandler::ExceptHandler(handler) = except_handler;
    if let Some(type_) = &handler.type_ {
        visitor.visit_expr(type_);
    }
    visitor.visit_body(&handler.body);
}

pub fn walk_with_item<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, with_item: &'a WithItem) {
    visitor.visit_expr(&with_item.context_expr);
    if let Some(optional_vars) = &with_item.optional_vars {
        visitor.visit_expr(optional_vars);
    }
}

pub fn walk_alias<'a, V: Visitor<'a> + ?Sized>(_visitor: &mut V, _alias: &'a Alias) {}

pub fn walk_elif_else_clause<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    clause: &'a ElifElseClause,
) {
    if let Some(test) = &clause.test {
        visitor.visit_expr(test);
    }
    visitor.visit_body(&clause.body);
}

pub fn walk_f_string_element<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    element: &'a FStringElement,
) {
    if let FStringElement::Expression(FStringExpressionElement {
        expression,
        format_spec,
        ..
    }) = element
    {
        visitor.visit_expr(expression);
        if let Some(format_spec) = format_spec {
            for spec_element in format_spec {
                visitor.visit_f_string_element(spec_element);
            }
        }
    }
}
