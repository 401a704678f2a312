//! Checks that the default walk visits children in source order.

use text_size::TextRange;

use tern_python_ast::visitor::{walk_expr, walk_stmt, Visitor};
use tern_python_ast::{
    Expr, ExprBinOp, ExprContext, ExprName, Identifier, Name, Operator, Parameter,
    ParameterWithDefault, Parameters, Stmt, StmtAssign, StmtFunctionDef, StmtReturn,
};

#[derive(Default)]
struct NameCollector {
    names: Vec<String>,
}

impl<'a> Visitor<'a> for NameCollector {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if let Expr::Name(ExprName { id, .. }) = expr {
            self.names.push(id.to_string());
        }
        walk_expr(self, expr);
    }
}

fn rng() -> TextRange {
    TextRange::default()
}

fn name(id: &str, ctx: ExprContext) -> Expr {
    Expr::Name(ExprName {
        range: rng(),
        id: Name::new(id),
        ctx,
    })
}

#[test]
fn assignments_visit_the_value_before_the_targets() {
    let stmt = Stmt::Assign(StmtAssign {
        range: rng(),
        targets: vec![name("x", ExprContext::Store)],
        value: Box::new(Expr::BinOp(ExprBinOp {
            range: rng(),
            left: Box::new(name("a", ExprContext::Load)),
            op: Operator::Add,
            right: Box::new(name("b", ExprContext::Load)),
        })),
    });

    let mut collector = NameCollector::default();
    walk_stmt(&mut collector, &stmt);

    assert_eq!(collector.names, vec!["a", "b", "x"]);
}

#[test]
fn functions_visit_parameter_annotations_defaults_returns_then_body() {
    let stmt = Stmt::FunctionDef(StmtFunctionDef {
        range: rng(),
        is_async: false,
        decorator_list: Vec::new(),
        name: Identifier::new("f", rng()),
        parameters: Box::new(Parameters {
            args: vec![ParameterWithDefault {
                range: rng(),
                parameter: Parameter {
                    range: rng(),
                    name: Identifier::new("a", rng()),
                    annotation: Some(Box::new(name("int", ExprContext::Load))),
                },
                default: Some(Box::new(name("default", ExprContext::Load))),
            }],
            ..Parameters::default()
        }),
        returns: Some(Box::new(name("ret", ExprContext::Load))),
        body: vec![Stmt::Return(StmtReturn {
            range: rng(),
            value: Some(Box::new(name("a", ExprContext::Load))),
        })],
    });

    let mut collector = NameCollector::default();
    walk_stmt(&mut collector, &stmt);

    assert_eq!(collector.names, vec!["int", "default", "ret", "a"]);
}
