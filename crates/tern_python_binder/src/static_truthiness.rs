//! The hook consulted for `if`/`while` tests so branches that can never run
//! are walked in unexecuted mode.

use tern_python_ast as ast;

/// What is statically known about an expression used as a branch condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Truthiness {
    /// The expression is true in every execution environment.
    AlwaysTrue,
    /// The expression is false in every execution environment.
    AlwaysFalse,
    /// Nothing is known statically.
    Ambiguous,
}

impl Truthiness {
    pub(crate) const fn from_bool(value: bool) -> Self {
        if value {
            Truthiness::AlwaysTrue
        } else {
            Truthiness::AlwaysFalse
        }
    }

    pub const fn is_always_true(self) -> bool {
        matches!(self, Truthiness::AlwaysTrue)
    }

    pub const fn is_always_false(self) -> bool {
        matches!(self, Truthiness::AlwaysFalse)
    }

    pub const fn negate(self) -> Self {
        match self {
            Truthiness::AlwaysTrue => Truthiness::AlwaysFalse,
            Truthiness::AlwaysFalse => Truthiness::AlwaysTrue,
            Truthiness::Ambiguous => Truthiness::Ambiguous,
        }
    }
}

/// Evaluates branch conditions. The host analyzer supplies an implementation
/// backed by whatever constant folding it can do (`sys.version_info`
/// comparisons, `TYPE_CHECKING`, platform checks); the binder only asks for
/// a [`Truthiness`] verdict.
pub trait StaticExpressionEvaluator {
    fn truthiness(&self, expr: &ast::Expr) -> Truthiness;
}

/// A conservative evaluator that only folds literals and `not` over them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralEvaluator;

impl StaticExpressionEvaluator for LiteralEvaluator {
    fn truthiness(&self, expr: &ast::Expr) -> Truthiness {
        match expr {
            ast::Expr::BooleanLiteral(node) => Truthiness::from_bool(node.value),
            ast::Expr::NoneLiteral(_) => Truthiness::AlwaysFalse,
            ast::Expr::EllipsisLiteral(_) => Truthiness::AlwaysTrue,
            ast::Expr::NumberLiteral(node) => match &node.value {
                ast::Number::Int(value) => Truthiness::from_bool(*value != 0),
                ast::Number::Float(value) => Truthiness::from_bool(*value != 0.0),
                ast::Number::Complex { real, imag } => {
                    Truthiness::from_bool(*real != 0.0 || *imag != 0.0)
                }
            },
            ast::Expr::StringLiteral(node) => Truthiness::from_bool(!node.value.is_empty()),
            ast::Expr::BytesLiteral(node) => Truthiness::from_bool(!node.value.is_empty()),
            ast::Expr::UnaryOp(ast::ExprUnaryOp {
                op: ast::UnaryOp::Not,
                operand,
                ..
            }) => self.truthiness(operand).negate(),
            _ => Truthiness::Ambiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use text_size::TextRange;

    use super::*;

    fn boolean(value: bool) -> ast::Expr {
        ast::Expr::BooleanLiteral(ast::ExprBooleanLiteral {
            range: TextRange::default(),
            value,
        })
    }

    #[test_case(true, Truthiness::AlwaysTrue)]
    #[test_case(false, Truthiness::AlwaysFalse)]
    fn boolean_literals(value: bool, expected: Truthiness) {
        assert_eq!(LiteralEvaluator.truthiness(&boolean(value)), expected);
    }

    #[test]
    fn not_inverts_known_operands() {
        let expr = ast::Expr::UnaryOp(ast::ExprUnaryOp {
            range: TextRange::default(),
            op: ast::UnaryOp::Not,
            operand: Box::new(boolean(false)),
        });
        assert_eq!(LiteralEvaluator.truthiness(&expr), Truthiness::AlwaysTrue);
    }

    #[test]
    fn names_are_ambiguous() {
        let expr = ast::Expr::Name(ast::ExprName {
            range: TextRange::default(),
            id: ast::Name::new("DEBUG"),
            ctx: ast::ExprContext::Load,
        });
        assert_eq!(LiteralEvaluator.truthiness(&expr), Truthiness::Ambiguous);
    }
}
