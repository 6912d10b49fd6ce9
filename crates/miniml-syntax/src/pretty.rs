//! Surface-syntax printing for expressions.
//!
//! Used for log lines and diagnostics. Parentheses are inserted only where
//! operator precedence requires them, so printed code reads like source.

use crate::ast::{Expr, ExprKind};
use std::fmt;

// Precedence levels for positions in the tree. Binary operators use their
// own levels (1..=6) between `OPEN` and `PREFIX`.
const OPEN: u8 = 0;
const PREFIX: u8 = 7;
const APP: u8 = 8;
const ATOM: u8 = 9;

fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Lam { .. } | ExprKind::Let { .. } | ExprKind::If { .. } => OPEN,
        ExprKind::BinOp { op, .. } => op.precedence(),
        ExprKind::UnOp { .. } => PREFIX,
        ExprKind::App { .. } => APP,
        ExprKind::Var(_) | ExprKind::LitInt(_) | ExprKind::LitBool(_) | ExprKind::LitTuple(_) => {
            ATOM
        }
    }
}

fn write_expr(expr: &Expr, min_prec: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parens = precedence(expr) < min_prec;
    if parens {
        f.write_str("(")?;
    }

    match &expr.kind {
        ExprKind::Var(name) => f.write_str(name)?,
        ExprKind::LitInt(value) => write!(f, "{value}")?,
        ExprKind::LitBool(value) => write!(f, "{value}")?,
        ExprKind::LitTuple(elements) => {
            f.write_str("(")?;
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(element, OPEN, f)?;
            }
            f.write_str(")")?;
        }
        ExprKind::Lam { param, body } => {
            write!(f, "\\{param} -> ")?;
            write_expr(body, OPEN, f)?;
        }
        ExprKind::App { func, arg } => {
            write_expr(func, APP, f)?;
            f.write_str(" ")?;
            write_expr(arg, ATOM, f)?;
        }
        ExprKind::Let { name, rhs, body } => {
            write!(f, "let {name} = ")?;
            write_expr(rhs, OPEN, f)?;
            f.write_str(" in ")?;
            write_expr(body, OPEN, f)?;
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            f.write_str("if ")?;
            write_expr(cond, OPEN, f)?;
            f.write_str(" then ")?;
            write_expr(then_branch, OPEN, f)?;
            f.write_str(" else ")?;
            write_expr(else_branch, OPEN, f)?;
        }
        ExprKind::UnOp { op, operand } => {
            write!(f, "{op} ")?;
            write_expr(operand, PREFIX, f)?;
        }
        ExprKind::BinOp { op, lhs, rhs } => {
            let prec = op.precedence();
            write_expr(lhs, prec, f)?;
            write!(f, " {op} ")?;
            // Left-associative: an equal-precedence right operand needs parens.
            write_expr(rhs, prec + 1, f)?;
        }
    }

    if parens {
        f.write_str(")")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self, OPEN, f)
    }
}
