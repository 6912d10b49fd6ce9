//! Type representation and operations.
//!
//! - **Ty**: monotypes with inference variables
//! - **Operations**: occurs check, free variables
//! - **Display**: the canonical printer used by diagnostics and callers

pub mod display;
pub mod ty;

pub use ty::Ty;
