//! Type inference engine.
//!
//! This module implements Hindley-Milner inference with let-polymorphism:
//! a recursive walk that threads substitutions between sibling
//! subexpressions and unifies whenever two types must agree.

pub mod context;
pub mod expr;
pub mod unify;

pub use context::{Context, VarSupply};
pub use expr::infer_expr;
pub use unify::{Unifier, unify};
