//! MiniML Type Checker: Hindley-Milner inference
//!
//! This crate decides whether a MiniML expression is well-typed and computes
//! its principal type:
//! - Type terms and their canonical printer ([`types`])
//! - Substitutions, schemes and environments ([`context`])
//! - Unification and the inference walk ([`infer`])
//! - Errors with source locations ([`error`])
//!
//! # Examples
//!
//! ```
//! use miniml_syntax::{Expr, SrcLoc};
//! use miniml_typecheck::{TypeEnv, infer};
//!
//! let loc = SrcLoc::default();
//! // let id = \x -> x in (id 1, id true)
//! let id = || Expr::var("id", loc.clone());
//! let expr = Expr::let_in(
//!     "id",
//!     Expr::lam("x", Expr::var("x", loc.clone()), loc.clone()),
//!     Expr::tuple(
//!         vec![
//!             Expr::app(id(), Expr::int(1, loc.clone()), loc.clone()),
//!             Expr::app(id(), Expr::bool(true, loc.clone()), loc.clone()),
//!         ],
//!         loc.clone(),
//!     ),
//!     loc,
//! );
//!
//! let ty = infer(&expr, &TypeEnv::new()).unwrap();
//! assert_eq!(ty.to_string(), "(Int, Bool)");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod infer;
pub mod types;

pub use config::InferConfig;
pub use context::{Scheme, Subst, TypeEnv};
pub use error::{Result, TypeError, TypeErrorKind};
pub use infer::{Context, VarSupply};
pub use types::Ty;

use miniml_log::debug;
use miniml_syntax::Expr;

/// Infer the principal type of `expr` under `env` with the default
/// configuration.
///
/// # Errors
///
/// Returns the first [`TypeError`] found.
pub fn infer(expr: &Expr, env: &TypeEnv) -> Result<Ty> {
    infer_with(expr, env, &InferConfig::default())
}

/// Infer the principal type of `expr` under `env`.
///
/// Fresh variables are numbered above every variable `env` mentions.
///
/// # Errors
///
/// Returns the first [`TypeError`] found.
pub fn infer_with(expr: &Expr, env: &TypeEnv, config: &InferConfig) -> Result<Ty> {
    let supply = VarSupply::for_env(env);
    let mut ctx = Context::new(&supply, config);

    debug!("infer {expr} (depth {})", expr.depth());
    let (subst, ty) = infer::infer_expr(&mut ctx, expr, env)?;
    let ty = subst.apply(&ty);
    debug!("{expr} : {ty} ({} bindings, next var a{})", subst.len(), supply.peek());
    Ok(ty)
}
