// Common test utilities for integration tests
//
// AST builders that stamp every node with a location in `test.ml`. Nodes
// built without an explicit position sit at 1:1; `at` moves one.

#![allow(dead_code)]

use miniml_syntax::{BinOp, Expr, SrcLoc, UnOp};
use miniml_typecheck::{InferConfig, Result, Ty, TypeEnv, infer_with};

/// File name used in every test location
pub const FILE: &str = "test.ml";

fn loc() -> SrcLoc {
    SrcLoc::new(FILE, 1, 1)
}

/// Moves `expr` to `line:col`
pub fn at(mut expr: Expr, line: u32, col: u32) -> Expr {
    expr.loc = SrcLoc::new(FILE, line, col);
    expr
}

pub fn var(name: &str) -> Expr {
    Expr::var(name, loc())
}

pub fn int(value: i64) -> Expr {
    Expr::int(value, loc())
}

pub fn bool(value: bool) -> Expr {
    Expr::bool(value, loc())
}

pub fn tuple(elements: Vec<Expr>) -> Expr {
    Expr::tuple(elements, loc())
}

pub fn lam(param: &str, body: Expr) -> Expr {
    Expr::lam(param, body, loc())
}

pub fn app(func: Expr, arg: Expr) -> Expr {
    Expr::app(func, arg, loc())
}

/// `f a b ...` as nested applications
pub fn apps(func: Expr, args: Vec<Expr>) -> Expr {
    args.into_iter().fold(func, app)
}

pub fn let_in(name: &str, rhs: Expr, body: Expr) -> Expr {
    Expr::let_in(name, rhs, body, loc())
}

pub fn if_then_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::if_then_else(cond, then_branch, else_branch, loc())
}

pub fn not(operand: Expr) -> Expr {
    Expr::unary(UnOp::Not, operand, loc())
}

pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(op, lhs, rhs, loc())
}

/// `let id = \x -> x in body`
pub fn with_id(body: Expr) -> Expr {
    let_in("id", lam("x", var("x")), body)
}

/// Infers under the empty environment and renders the type.
pub fn type_of(expr: &Expr) -> Result<String> {
    type_of_with(expr, &InferConfig::default())
}

pub fn type_of_with(expr: &Expr, config: &InferConfig) -> Result<String> {
    infer_with(expr, &TypeEnv::new(), config).map(|ty: Ty| ty.to_string())
}
