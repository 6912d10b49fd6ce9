//! Expression nodes in the MiniML AST.
//!
//! Every node carries the [`SrcLoc`] where it starts. Children are boxed and
//! owned by their parent, so an [`Expr`] is always a tree.

use crate::span::{SrcLoc, Spanned};
use std::fmt;

/// Identifier used for variables, lambda parameters and let bindings.
pub type Name = String;

/// An expression together with its source location.
///
/// # Examples
///
/// ```
/// use miniml_syntax::ast::{Expr, ExprKind};
/// use miniml_syntax::span::SrcLoc;
///
/// let loc = SrcLoc::unknown(1, 1);
/// let id = Expr::lam("x", Expr::var("x", loc.at(1, 7)), loc.clone());
///
/// assert!(matches!(id.kind, ExprKind::Lam { .. }));
/// assert_eq!(id.to_string(), "\\x -> x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    /// What kind of expression this is
    pub kind: ExprKind,
    /// Where the expression starts
    pub loc: SrcLoc,
}

/// The expression forms of the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// Variable reference: `x`
    Var(Name),

    /// Integer literal: `42`
    LitInt(i64),

    /// Boolean literal: `true`, `false`
    LitBool(bool),

    /// Tuple literal: `(1, true, x)`
    LitTuple(Vec<Expr>),

    /// Single-parameter lambda: `\x -> body`
    Lam {
        /// Parameter name
        param: Name,
        /// Function body
        body: Box<Expr>,
    },

    /// Curried application: `f a`
    App {
        /// The function being applied
        func: Box<Expr>,
        /// The argument
        arg: Box<Expr>,
    },

    /// Non-recursive binding: `let name = rhs in body`
    Let {
        /// Bound name, visible in `body` only
        name: Name,
        /// Bound expression
        rhs: Box<Expr>,
        /// Scope of the binding
        body: Box<Expr>,
    },

    /// Conditional expression: `if cond then a else b`
    If {
        /// Condition
        cond: Box<Expr>,
        /// Then branch
        then_branch: Box<Expr>,
        /// Else branch
        else_branch: Box<Expr>,
    },

    /// Prefix operator: `not e`
    UnOp {
        /// The operator
        op: UnOp,
        /// The operand
        operand: Box<Expr>,
    },

    /// Infix operator: `a + b`, `x == y`
    BinOp {
        /// The operator
        op: BinOp,
        /// Left operand
        lhs: Box<Expr>,
        /// Right operand
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Wraps a kind with its location.
    #[must_use]
    pub fn new(kind: ExprKind, loc: SrcLoc) -> Self {
        Self { kind, loc }
    }

    /// `name`
    #[must_use]
    pub fn var(name: impl Into<Name>, loc: SrcLoc) -> Self {
        Self::new(ExprKind::Var(name.into()), loc)
    }

    /// Integer literal.
    #[must_use]
    pub fn int(value: i64, loc: SrcLoc) -> Self {
        Self::new(ExprKind::LitInt(value), loc)
    }

    /// Boolean literal.
    #[must_use]
    pub fn bool(value: bool, loc: SrcLoc) -> Self {
        Self::new(ExprKind::LitBool(value), loc)
    }

    /// Tuple literal.
    #[must_use]
    pub fn tuple(elements: Vec<Expr>, loc: SrcLoc) -> Self {
        Self::new(ExprKind::LitTuple(elements), loc)
    }

    /// `\param -> body`
    #[must_use]
    pub fn lam(param: impl Into<Name>, body: Expr, loc: SrcLoc) -> Self {
        Self::new(
            ExprKind::Lam {
                param: param.into(),
                body: Box::new(body),
            },
            loc,
        )
    }

    /// `func arg`
    #[must_use]
    pub fn app(func: Expr, arg: Expr, loc: SrcLoc) -> Self {
        Self::new(
            ExprKind::App {
                func: Box::new(func),
                arg: Box::new(arg),
            },
            loc,
        )
    }

    /// `let name = rhs in body`
    #[must_use]
    pub fn let_in(name: impl Into<Name>, rhs: Expr, body: Expr, loc: SrcLoc) -> Self {
        Self::new(
            ExprKind::Let {
                name: name.into(),
                rhs: Box::new(rhs),
                body: Box::new(body),
            },
            loc,
        )
    }

    /// `if cond then then_branch else else_branch`
    #[must_use]
    pub fn if_then_else(cond: Expr, then_branch: Expr, else_branch: Expr, loc: SrcLoc) -> Self {
        Self::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            loc,
        )
    }

    /// Prefix operator application.
    #[must_use]
    pub fn unary(op: UnOp, operand: Expr, loc: SrcLoc) -> Self {
        Self::new(
            ExprKind::UnOp {
                op,
                operand: Box::new(operand),
            },
            loc,
        )
    }

    /// Infix operator application.
    #[must_use]
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr, loc: SrcLoc) -> Self {
        Self::new(
            ExprKind::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            loc,
        )
    }

    /// Nesting depth of the tree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let children = match &self.kind {
            ExprKind::Var(_) | ExprKind::LitInt(_) | ExprKind::LitBool(_) => 0,
            ExprKind::LitTuple(elements) => elements.iter().map(Expr::depth).max().unwrap_or(0),
            ExprKind::Lam { body, .. } => body.depth(),
            ExprKind::UnOp { operand, .. } => operand.depth(),
            ExprKind::App { func: a, arg: b }
            | ExprKind::Let { rhs: a, body: b, .. }
            | ExprKind::BinOp { lhs: a, rhs: b, .. } => a.depth().max(b.depth()),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => cond.depth().max(then_branch.depth()).max(else_branch.depth()),
        };
        children + 1
    }
}

impl Spanned for Expr {
    fn loc(&self) -> &SrcLoc {
        &self.loc
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// Logical negation: `not`
    Not,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not => write!(f, "not"),
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`
    Mul,
    /// Division: `/`
    Div,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Le,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Ge,
    /// Equality: `==`
    Eq,
    /// Inequality: `!=`
    Ne,
    /// Logical AND: `&&`
    And,
    /// Logical OR: `||`
    Or,
}

/// Operator families that share a typing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpClass {
    /// `+ - * /`
    Arithmetic,
    /// `< <= > >=`
    Ordering,
    /// `== !=`
    Equality,
    /// `&& ||`
    Logical,
}

impl BinOp {
    /// Every operator, in declaration order.
    pub const ALL: [BinOp; 12] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Lt,
        BinOp::Le,
        BinOp::Gt,
        BinOp::Ge,
        BinOp::Eq,
        BinOp::Ne,
        BinOp::And,
        BinOp::Or,
    ];

    /// Which typing rule the operator follows.
    #[must_use]
    pub const fn class(self) -> BinOpClass {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => BinOpClass::Arithmetic,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => BinOpClass::Ordering,
            Self::Eq | Self::Ne => BinOpClass::Equality,
            Self::And | Self::Or => BinOpClass::Logical,
        }
    }

    /// Surface syntax of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self.class() {
            BinOpClass::Logical => {
                if matches!(self, Self::Or) {
                    1
                } else {
                    2
                }
            }
            BinOpClass::Equality => 3,
            BinOpClass::Ordering => 4,
            BinOpClass::Arithmetic => {
                if matches!(self, Self::Add | Self::Sub) {
                    5
                } else {
                    6
                }
            }
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SrcLoc {
        SrcLoc::unknown(1, 1)
    }

    #[test]
    fn test_expr_loc() {
        let at = SrcLoc::new("t.ml", 4, 2);
        let expr = Expr::int(42, at.clone());
        assert_eq!(expr.loc(), &at);
    }

    #[test]
    fn test_unary_op_display() {
        assert_eq!(format!("{}", UnOp::Not), "not");
    }

    #[test]
    fn test_binary_op_display() {
        assert_eq!(format!("{}", BinOp::Add), "+");
        assert_eq!(format!("{}", BinOp::Ne), "!=");
        assert_eq!(format!("{}", BinOp::And), "&&");
    }

    #[test]
    fn test_binary_op_classes() {
        assert_eq!(BinOp::Div.class(), BinOpClass::Arithmetic);
        assert_eq!(BinOp::Ge.class(), BinOpClass::Ordering);
        assert_eq!(BinOp::Eq.class(), BinOpClass::Equality);
        assert_eq!(BinOp::Or.class(), BinOpClass::Logical);
        assert!(BinOp::Mul.precedence() > BinOp::Add.precedence());
        assert!(BinOp::And.precedence() > BinOp::Or.precedence());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Expr::int(1, loc()).depth(), 1);

        let nested = Expr::lam(
            "x",
            Expr::app(Expr::var("f", loc()), Expr::var("x", loc()), loc()),
            loc(),
        );
        assert_eq!(nested.depth(), 3);

        let tuple = Expr::tuple(vec![Expr::int(1, loc()), nested], loc());
        assert_eq!(tuple.depth(), 4);
    }
}
