//! MiniML Syntax: the location-tagged AST
//!
//! This crate defines the tree that the parser hands to later phases:
//! - Source location tracking ([`span`])
//! - Expression nodes and operators ([`ast`])
//! - Surface-syntax printing ([`pretty`])
//!
//! # Examples
//!
//! ```
//! use miniml_syntax::{BinOp, Expr, SrcLoc};
//!
//! let loc = SrcLoc::new("calc.ml", 1, 1);
//! let sum = Expr::binary(BinOp::Add, Expr::int(1, loc.at(1, 1)), Expr::int(2, loc.at(1, 5)), loc);
//! assert_eq!(sum.to_string(), "1 + 2");
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod pretty;
pub mod span;

pub use ast::{BinOp, BinOpClass, Expr, ExprKind, Name, UnOp};
pub use span::{SrcLoc, Spanned};
