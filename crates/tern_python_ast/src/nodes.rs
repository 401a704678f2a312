//! Owned syntax-tree nodes. The tree is produced by a parser upstream of
//! this crate; every node records the source range it was parsed from.
//!
//! The parser also records string-unescape problems it encountered on the
//! literal nodes themselves (see [`StringEscapeError`]) so later passes can
//! report them without re-lexing the source.

use text_size::TextRange;

use crate::name::Name;

/// Implemented by every node that records its source range.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> text_size::TextSize {
        self.range().start()
    }

    fn end(&self) -> text_size::TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T: Ranged> Ranged for &T {
    fn range(&self) -> TextRange {
        T::range(self)
    }
}

macro_rules! impl_ranged {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Ranged for $ty {
                #[inline]
                fn range(&self) -> TextRange {
                    self.range
                }
            }
        )+
    };
}

/// The root node for a parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct ModModule {
    pub range: TextRange,
    pub body: Vec<Stmt>,
}

/// An identifier with its source range, e.g. a function name or import alias.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub id: Name,
    pub range: TextRange,
}

impl Identifier {
    pub fn new(id: impl Into<Name>, range: TextRange) -> Self {
        Self {
            id: id.into(),
            range,
        }
    }

    pub fn as_str(&self) -> &str {
        self.id.as_str()
    }
}

impl std::ops::Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    FunctionDef(StmtFunctionDef),
    ClassDef(StmtClassDef),
    Return(StmtReturn),
    Delete(StmtDelete),
    Assign(StmtAssign),
    AugAssign(StmtAugAssign),
    AnnAssign(StmtAnnAssign),
    For(StmtFor),
    While(StmtWhile),
    If(StmtIf),
    With(StmtWith),
    Raise(StmtRaise),
    Try(StmtTry),
    Assert(StmtAssert),
    Import(StmtImport),
    ImportFrom(StmtImportFrom),
    Global(StmtGlobal),
    Nonlocal(StmtNonlocal),
    Expr(StmtExpr),
    Pass(StmtPass),
    Break(StmtBreak),
    Continue(StmtContinue),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtFunctionDef {
    pub range: TextRange,
    pub is_async: bool,
    pub decorator_list: Vec<Decorator>,
    pub name: Identifier,
    pub parameters: Box<Parameters>,
    pub returns: Option<Box<Expr>>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtClassDef {
    pub range: TextRange,
    pub decorator_list: Vec<Decorator>,
    pub name: Identifier,
    pub arguments: Option<Box<Arguments>>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtReturn {
    pub range: TextRange,
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtDelete {
    pub range: TextRange,
    pub targets: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAssign {
    pub range: TextRange,
    pub targets: Vec<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAugAssign {
    pub range: TextRange,
    pub target: Box<Expr>,
    pub op: Operator,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAnnAssign {
    pub range: TextRange,
    pub target: Box<Expr>,
    pub annotation: Box<Expr>,
    pub value: Option<Box<Expr>>,
    /// Whether the target is a plain name (no parentheses, no member access
    /// or subscript), which makes the annotation apply to the binding.
    pub simple: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtFor {
    pub range: TextRange,
    pub is_async: bool,
    pub target: Box<Expr>,
    pub iter: Box<Expr>,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWhile {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtIf {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub body: Vec<Stmt>,
    pub elif_else_clauses: Vec<ElifElseClause>,
}

/// One `elif test:` (with `test`) or `else:` (without) clause of an `if`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElifElseClause {
    pub range: TextRange,
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWith {
    pub range: TextRange,
    pub is_async: bool,
    pub items: Vec<WithItem>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WithItem {
    pub range: TextRange,
    pub context_expr: Expr,
    pub optional_vars: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtRaise {
    pub range: TextRange,
    pub exc: Option<Box<Expr>>,
    pub cause: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtTry {
    pub range: TextRange,
    pub body: Vec<Stmt>,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Vec<Stmt>,
    pub finalbody: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExceptHandler {
    ExceptHandler(ExceptHandlerExceptHandler),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExceptHandlerExceptHandler {
    pub range: TextRange,
    pub type_: Option<Box<Expr>>,
    pub name: Option<Identifier>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAssert {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub msg: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtImport {
    pub range: TextRange,
    pub names: Vec<Alias>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtImportFrom {
    pub range: TextRange,
    /// `None` for a bare relative import (`from . import x`).
    pub module: Option<Identifier>,
    pub names: Vec<Alias>,
    /// Number of leading dots.
    pub level: u32,
}

/// A single `name` or `name as asname` clause of an import statement.
/// In `import a.b.c` the `name` holds the full dotted path.
#[derive(Clone, Debug, PartialEq)]
pub struct Alias {
    pub range: TextRange,
    pub name: Identifier,
    pub asname: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtGlobal {
    pub range: TextRange,
    pub names: Vec<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtNonlocal {
    pub range: TextRange,
    pub names: Vec<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtExpr {
    pub range: TextRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtPass {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtBreak {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtContinue {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    BoolOp(ExprBoolOp),
    Named(ExprNamed),
    BinOp(ExprBinOp),
    UnaryOp(ExprUnaryOp),
    Lambda(ExprLambda),
    If(ExprIf),
    Dict(ExprDict),
    Set(ExprSet),
    ListComp(ExprListComp),
    SetComp(ExprSetComp),
    DictComp(ExprDictComp),
    Generator(ExprGenerator),
    Await(ExprAwait),
    Yield(ExprYield),
    YieldFrom(ExprYieldFrom),
    Compare(ExprCompare),
    Call(ExprCall),
    FString(ExprFString),
    StringLiteral(ExprStringLiteral),
    BytesLiteral(ExprBytesLiteral),
    NumberLiteral(ExprNumberLiteral),
    BooleanLiteral(ExprBooleanLiteral),
    NoneLiteral(ExprNoneLiteral),
    EllipsisLiteral(ExprEllipsisLiteral),
    Attribute(ExprAttribute),
    Subscript(ExprSubscript),
    Starred(ExprStarred),
    Name(ExprName),
    List(ExprList),
    Tuple(ExprTuple),
    Slice(ExprSlice),
}

impl Expr {
    pub const fn as_name_expr(&self) -> Option<&ExprName> {
        match self {
            Expr::Name(name) => Some(name),
            _ => None,
        }
    }

    pub const fn as_attribute_expr(&self) -> Option<&ExprAttribute> {
        match self {
            Expr::Attribute(attribute) => Some(attribute),
            _ => None,
        }
    }

    pub const fn as_string_literal_expr(&self) -> Option<&ExprStringLiteral> {
        match self {
            Expr::StringLiteral(literal) => Some(literal),
            _ => None,
        }
    }

    pub const fn is_name_expr(&self) -> bool {
        matches!(self, Expr::Name(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBoolOp {
    pub range: TextRange,
    pub op: BoolOp,
    pub values: Vec<Expr>,
}

/// An assignment expression `target := value`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprNamed {
    pub range: TextRange,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBinOp {
    pub range: TextRange,
    pub left: Box<Expr>,
    pub op: Operator,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprUnaryOp {
    pub range: TextRange,
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprLambda {
    pub range: TextRange,
    pub parameters: Option<Box<Parameters>>,
    pub body: Box<Expr>,
}

/// A conditional expression `body if test else orelse`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprIf {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub body: Box<Expr>,
    pub orelse: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprDict {
    pub range: TextRange,
    pub items: Vec<DictItem>,
}

/// A `key: value` entry, or `**value` when `key` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct DictItem {
    pub key: Option<Expr>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSet {
    pub range: TextRange,
    pub elts: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprListComp {
    pub range: TextRange,
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSetComp {
    pub range: TextRange,
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprDictComp {
    pub range: TextRange,
    pub key: Box<Expr>,
    pub value: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprGenerator {
    pub range: TextRange,
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

/// One `for target in iter [if cond]*` clause of a comprehension.
#[derive(Clone, Debug, PartialEq)]
pub struct Comprehension {
    pub range: TextRange,
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprAwait {
    pub range: TextRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprYield {
    pub range: TextRange,
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprYieldFrom {
    pub range: TextRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCompare {
    pub range: TextRange,
    pub left: Box<Expr>,
    pub ops: Vec<CmpOp>,
    pub comparators: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCall {
    pub range: TextRange,
    pub func: Box<Expr>,
    pub arguments: Arguments,
}

/// The argument list of a call or a class definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    pub range: TextRange,
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,
}

/// A keyword argument `name=value`, or `**value` when `arg` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyword {
    pub range: TextRange,
    pub arg: Option<Identifier>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprFString {
    pub range: TextRange,
    pub elements: Vec<FStringElement>,
    /// Unescape problems recorded by the lexer anywhere in this literal.
    pub errors: Vec<StringEscapeError>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FStringElement {
    Literal(FStringLiteralElement),
    Expression(FStringExpressionElement),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FStringLiteralElement {
    pub range: TextRange,
    pub value: Box<str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FStringExpressionElement {
    pub range: TextRange,
    pub expression: Box<Expr>,
    pub format_spec: Option<Vec<FStringElement>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprStringLiteral {
    pub range: TextRange,
    pub value: Box<str>,
    /// Unescape problems recorded by the lexer for this literal.
    pub errors: Vec<StringEscapeError>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBytesLiteral {
    pub range: TextRange,
    pub value: Box<[u8]>,
    pub errors: Vec<StringEscapeError>,
}

/// A problem found while unescaping a string or f-string token. The lexer
/// records these on the literal node instead of failing the parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringEscapeError {
    pub kind: StringEscapeErrorKind,
    pub range: TextRange,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StringEscapeErrorKind {
    /// A backslash escape the language does not define, e.g. `"\q"`.
    InvalidEscapeSequence,
    /// A backslash inside an f-string format expression.
    EscapeWithinFormatExpression,
    /// A single `}` outside any format expression of an f-string.
    SingleCloseBrace,
    /// A `{` that is never closed within an f-string.
    UnterminatedFormatExpression,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNumberLiteral {
    pub range: TextRange,
    pub value: Number,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(u64),
    Float(f64),
    Complex { real: f64, imag: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBooleanLiteral {
    pub range: TextRange,
    pub value: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNoneLiteral {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprEllipsisLiteral {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprAttribute {
    pub range: TextRange,
    pub value: Box<Expr>,
    pub attr: Identifier,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSubscript {
    pub range: TextRange,
    pub value: Box<Expr>,
    pub slice: Box<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprStarred {
    pub range: TextRange,
    pub value: Box<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprName {
    pub range: TextRange,
    pub id: Name,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprList {
    pub range: TextRange,
    pub elts: Vec<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprTuple {
    pub range: TextRange,
    pub elts: Vec<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSlice {
    pub range: TextRange,
    pub lower: Option<Box<Expr>>,
    pub upper: Option<Box<Expr>>,
    pub step: Option<Box<Expr>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExprContext {
    Load,
    Store,
    Del,
}

impl ExprContext {
    pub const fn is_store(self) -> bool {
        matches!(self, ExprContext::Store)
    }

    pub const fn is_load(self) -> bool {
        matches!(self, ExprContext::Load)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Invert,
    Not,
    UAdd,
    USub,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

/// A decorator line above a function or class definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    pub range: TextRange,
    pub expression: Expr,
}

/// The parameter list of a function or lambda, grouped the way the grammar
/// groups them.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    pub range: TextRange,
    pub posonlyargs: Vec<ParameterWithDefault>,
    pub args: Vec<ParameterWithDefault>,
    pub vararg: Option<Box<Parameter>>,
    pub kwonlyargs: Vec<ParameterWithDefault>,
    pub kwarg: Option<Box<Parameter>>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            range: TextRange::default(),
            posonlyargs: Vec::new(),
            args: Vec::new(),
            vararg: None,
            kwonlyargs: Vec::new(),
            kwarg: None,
        }
    }
}

impl Parameters {
    /// All parameters in declaration order, variadic ones included.
    pub fn iter(&self) -> impl Iterator<Item = AnyParameterRef<'_>> {
        self.posonlyargs
            .iter()
            .chain(&self.args)
            .map(AnyParameterRef::NonVariadic)
            .chain(self.vararg.as_deref().map(AnyParameterRef::Variadic))
            .chain(self.kwonlyargs.iter().map(AnyParameterRef::NonVariadic))
            .chain(self.kwarg.as_deref().map(AnyParameterRef::Variadic))
    }

    /// Parameters that may carry a default value, in declaration order.
    pub fn iter_non_variadic_params(&self) -> impl Iterator<Item = &ParameterWithDefault> {
        self.posonlyargs.iter().chain(&self.args).chain(&self.kwonlyargs)
    }

    pub fn is_empty(&self) -> bool {
        self.posonlyargs.is_empty()
            && self.args.is_empty()
            && self.vararg.is_none()
            && self.kwonlyargs.is_empty()
            && self.kwarg.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterWithDefault {
    pub range: TextRange,
    pub parameter: Parameter,
    pub default: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub range: TextRange,
    pub name: Identifier,
    pub annotation: Option<Box<Expr>>,
}

/// A borrowed view over either kind of parameter.
#[derive(Copy, Clone, Debug)]
pub enum AnyParameterRef<'a> {
    NonVariadic(&'a ParameterWithDefault),
    Variadic(&'a Parameter),
}

impl<'a> AnyParameterRef<'a> {
    pub const fn as_parameter(self) -> &'a Parameter {
        match self {
            AnyParameterRef::NonVariadic(param) => &param.parameter,
            AnyParameterRef::Variadic(param) => param,
        }
    }

    pub const fn name(self) -> &'a Identifier {
        &self.as_parameter().name
    }

    pub fn annotation(self) -> Option<&'a Expr> {
        self.as_parameter().annotation.as_deref()
    }

    pub fn default(self) -> Option<&'a Expr> {
        match self {
            AnyParameterRef::NonVariadic(param) => param.default.as_deref(),
            AnyParameterRef::Variadic(_) => None,
        }
    }
}

impl_ranged!(
    ModModule,
    Identifier,
    StmtFunctionDef,
    StmtClassDef,
    StmtReturn,
    StmtDelete,
    StmtAssign,
    StmtAugAssign,
    StmtAnnAssign,
    StmtFor,
    StmtWhile,
    StmtIf,
    ElifElseClause,
    StmtWith,
    WithItem,
    StmtRaise,
    StmtTry,
    ExceptHandlerExceptHandler,
    StmtAssert,
    StmtImport,
    StmtImportFrom,
    Alias,
    StmtGlobal,
    StmtNonlocal,
    StmtExpr,
    StmtPass,
    StmtBreak,
    StmtContinue,
    ExprBoolOp,
    ExprNamed,
    ExprBinOp,
    ExprUnaryOp,
    ExprLambda,
    ExprIf,
    ExprDict,
    ExprSet,
    ExprListComp,
    ExprSetComp,
    ExprDictComp,
    ExprGenerator,
    Comprehension,
    ExprAwait,
    ExprYield,
    ExprYieldFrom,
    ExprCompare,
    ExprCall,
    Arguments,
    Keyword,
    ExprFString,
    FStringLiteralElement,
    FStringExpressionElement,
    ExprStringLiteral,
    ExprBytesLiteral,
    ExprNumberLiteral,
    ExprBooleanLiteral,
    ExprNoneLiteral,
    ExprEllipsisLiteral,
    ExprAttribute,
    ExprSubscript,
    ExprStarred,
    ExprName,
    ExprList,
    ExprTuple,
    ExprSlice,
    Decorator,
    Parameters,
    ParameterWithDefault,
    Parameter,
);

impl Ranged for Stmt {
    fn range(&self) -> TextRange {
        match self {
            Stmt::FunctionDef(node) => node.range,
            Stmt::ClassDef(node) => node.range,
            Stmt::Return(node) => node.range,
            Stmt::Delete(node) => node.range,
            Stmt::Assign(node) => node.range,
            Stmt::AugAssign(node) => node.range,
            Stmt::AnnAssign(node) => node.range,
            Stmt::For(node) => node.range,
            Stmt::While(node) => node.range,
            Stmt::If(node) => node.range,
            Stmt::With(node) => node.range,
            Stmt::Raise(node) => node.range,
            Stmt::Try(node) => node.range,
            Stmt::Assert(node) => node.range,
            Stmt::Import(node) => node.range,
            Stmt::ImportFrom(node) => node.range,
            Stmt::Global(node) => node.range,
            Stmt::Nonlocal(node) => node.range,
            Stmt::Expr(node) => node.range,
            Stmt::Pass(node) => node.range,
            Stmt::Break(node) => node.range,
            Stmt::Continue(node) => node.range,
        }
    }
}

impl Ranged for Expr {
    fn range(&self) -> TextRange {
        match self {
            Expr::BoolOp(node) => node.range,
            Expr::Named(node) => node.range,
            Expr::BinOp(node) => node.range,
            Expr::UnaryOp(node) => node.range,
            Expr::Lambda(node) => node.range,
            Expr::If(node) => node.range,
            Expr::Dict(node) => node.range,
            Expr::Set(node) => node.range,
            Expr::ListComp(node) => node.range,
            Expr::SetComp(node) => node.range,
            Expr::DictComp(node) => node.range,
            Expr::Generator(node) => node.range,
            Expr::Await(node) => node.range,
            Expr::Yield(node) => node.range,
            Expr::YieldFrom(node) => node.range,
            Expr::Compare(node) => node.range,
            Expr::Call(node) => node.range,
            Expr::FString(node) => node.range,
            Expr::StringLiteral(node) => node.range,
            Expr::BytesLiteral(node) => node.range,
            Expr::NumberLiteral(node) => node.range,
            Expr::BooleanLiteral(node) => node.range,
            Expr::NoneLiteral(node) => node.range,
            Expr::EllipsisLiteral(node) => node.range,
            Expr::Attribute(node) => node.range,
            Expr::Subscript(node) => node.range,
            Expr::Starred(node) => node.range,
            Expr::Name(node) => node.range,
            Expr::List(node) => node.range,
            Expr::Tuple(node) => node.range,
            Expr::Slice(node) => node.range,
        }
    }
}

impl Ranged for ExceptHandler {
    fn range(&self) -> TextRange {
        match self {
            ExceptHandler::ExceptHandler(node) => node.range,
        }
    }
}

impl Ranged for FStringElement {
    fn range(&self) -> TextRange {
        match self {
            FStringElement::Literal(node) => node.range,
            FStringElement::Expression(node) => node.range,
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty) => $enum:ident),+ $(,)?) => {
        $(
            impl From<$ty> for $enum {
                fn from(node: $ty) -> Self {
                    $enum::$variant(node)
                }
            }
        )+
    };
}

impl_from!(
    FunctionDef(StmtFunctionDef) => Stmt,
    ClassDef(StmtClassDef) => Stmt,
    Return(StmtReturn) => Stmt,
    Delete(StmtDelete) => Stmt,
    Assign(StmtAssign) => Stmt,
    AugAssign(StmtAugAssign) => Stmt,
    AnnAssign(StmtAnnAssign) => Stmt,
    For(StmtFor) => Stmt,
    While(StmtWhile) => Stmt,
    If(StmtIf) => Stmt,
    With(StmtWith) => Stmt,
    Raise(StmtRaise) => Stmt,
    Try(StmtTry) => Stmt,
    Assert(StmtAssert) => Stmt,
    Import(StmtImport) => Stmt,
    ImportFrom(StmtImportFrom) => Stmt,
    Global(StmtGlobal) => Stmt,
    Nonlocal(StmtNonlocal) => Stmt,
    Expr(StmtExpr) => Stmt,
    Pass(StmtPass) => Stmt,
    Break(StmtBreak) => Stmt,
    Continue(StmtContinue) => Stmt,
);

impl_from!(
    BoolOp(ExprBoolOp) => Expr,
    Named(ExprNamed) => Expr,
    BinOp(ExprBinOp) => Expr,
    UnaryOp(ExprUnaryOp) => Expr,
    Lambda(ExprLambda) => Expr,
    If(ExprIf) => Expr,
    Dict(ExprDict) => Expr,
    Set(ExprSet) => Expr,
    ListComp(ExprListComp) => Expr,
    SetComp(ExprSetComp) => Expr,
    DictComp(ExprDictComp) => Expr,
    Generator(ExprGenerator) => Expr,
    Await(ExprAwait) => Expr,
    Yield(ExprYield) => Expr,
    YieldFrom(ExprYieldFrom) => Expr,
    Compare(ExprCompare) => Expr,
    Call(ExprCall) => Expr,
    FString(ExprFString) => Expr,
    StringLiteral(ExprStringLiteral) => Expr,
    BytesLiteral(ExprBytesLiteral) => Expr,
    NumberLiteral(ExprNumberLiteral) => Expr,
    BooleanLiteral(ExprBooleanLiteral) => Expr,
    NoneLiteral(ExprNoneLiteral) => Expr,
    EllipsisLiteral(ExprEllipsisLiteral) => Expr,
    Attribute(ExprAttribute) => Expr,
    Subscript(ExprSubscript) => Expr,
    Starred(ExprStarred) => Expr,
    Name(ExprName) => Expr,
    List(ExprList) => Expr,
    Tuple(ExprTuple) => Expr,
    Slice(ExprSlice) => Expr,
);
