//!
//!
use std::rc::Rc;

use sona_syntax::Span;

/// A parsed source unit: the ordered top-level statements.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub stmts: Box<[Stmt]>,
}

impl Module {
    /// Top-level function definitions, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &Rc<FuncDef>> {
        self.stmts.iter().filter_map(|s| match s {
            Stmt::FuncDef(def) => Some(def),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    FuncDef(Rc<FuncDef>),
    If(Box<IfStmt>),
    While(Box<WhileStmt>),
    Return(Option<Expr>),
    Break,
    Continue,
    Assign(Box<AssignStmt>),
    Block(Box<[Stmt]>),
    Expr(Expr),
    Error(Span),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub params: Box<[String]>,
    pub body: Box<[Stmt]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Box<[Stmt]>,
    pub else_branch: Option<Box<[Stmt]>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Box<[Stmt]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignStmt {
    pub target: Expr,
    pub value: Expr,
    pub decl: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(String),
    /// A reference to a named function, resolved through the registry
    /// with create-if-absent semantics so forward references bind to a
    /// stable handle before the body is known.
    FuncRef(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Member(Box<MemberExpr>),
    Call(Box<CallExpr>),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Group(Box<Expr>),
    Error(Span),
}

/// A property access site. Each session keys its inline cache on the
/// address of this node, so the node itself carries no cache state.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub field: String,
}

/// A call site. Cached per session by node address, like [`MemberExpr`].
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Box<[Expr]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    And,
    Or,
}

impl Expr {
    /// Whether the expression can appear on the left of an assignment.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expr::Ident(_) | Expr::Member(_))
    }
}
