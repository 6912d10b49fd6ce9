//! Abstract syntax tree for MiniML.
//!
//! The tree is produced by the parser and is read-only afterwards. Each node
//! records its [`SrcLoc`](crate::span::SrcLoc) for diagnostics.
//!
//! # Modules
//!
//! - [`expr`] - Expression nodes and operators

pub mod expr;

pub use expr::{BinOp, BinOpClass, Expr, ExprKind, Name, UnOp};
