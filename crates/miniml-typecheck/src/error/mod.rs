//! Type errors.
//!
//! Every error carries the [`SrcLoc`] of the node that caused it, and every
//! message starts with that location.

use crate::types::Ty;
use miniml_syntax::{Name, SrcLoc};
use thiserror::Error;

/// Type inference errors. The first error aborts inference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A variable with no binding in the environment.
    #[error("{loc}: unbound variable `{name}`")]
    UnboundVariable {
        /// Name of the variable
        name: Name,
        /// Location of the reference
        loc: SrcLoc,
    },

    /// Binding `var` to `ty` would build an infinite type.
    #[error("{loc}: infinite type: a{var} occurs in {ty}")]
    OccursCheck {
        /// The variable being bound
        var: u32,
        /// The type it occurs in
        ty: Ty,
        /// Source location
        loc: SrcLoc,
    },

    /// Two types that cannot be made equal.
    #[error("{loc}: type mismatch: expected {expected}, found {found}")]
    Mismatch {
        /// The type the context required
        expected: Ty,
        /// The type the expression has
        found: Ty,
        /// Source location
        loc: SrcLoc,
    },

    /// Two tuple types with different numbers of elements.
    #[error(
        "{loc}: tuple arity mismatch: expected {expected} with {} elements, found {found} with {}",
        .expected.tuple_len().unwrap_or(0),
        .found.tuple_len().unwrap_or(0)
    )]
    TupleArity {
        /// The expected tuple type
        expected: Ty,
        /// The tuple type found
        found: Ty,
        /// Source location
        loc: SrcLoc,
    },

    /// The expression nests deeper than the configured limit.
    #[error("{loc}: expression nested deeper than {limit} levels")]
    RecursionLimit {
        /// Configured maximum depth
        limit: usize,
        /// Location of the first node past the limit
        loc: SrcLoc,
    },
}

/// Error category without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeErrorKind {
    /// See [`TypeError::UnboundVariable`].
    UnboundVariable,
    /// See [`TypeError::OccursCheck`].
    OccursCheck,
    /// See [`TypeError::Mismatch`].
    Mismatch,
    /// See [`TypeError::TupleArity`].
    TupleArity,
    /// See [`TypeError::RecursionLimit`].
    RecursionLimit,
}

impl TypeError {
    /// Location of the error.
    #[must_use]
    pub fn loc(&self) -> &SrcLoc {
        match self {
            TypeError::UnboundVariable { loc, .. }
            | TypeError::OccursCheck { loc, .. }
            | TypeError::Mismatch { loc, .. }
            | TypeError::TupleArity { loc, .. }
            | TypeError::RecursionLimit { loc, .. } => loc,
        }
    }

    /// Category of the error.
    #[must_use]
    pub fn kind(&self) -> TypeErrorKind {
        match self {
            TypeError::UnboundVariable { .. } => TypeErrorKind::UnboundVariable,
            TypeError::OccursCheck { .. } => TypeErrorKind::OccursCheck,
            TypeError::Mismatch { .. } => TypeErrorKind::Mismatch,
            TypeError::TupleArity { .. } => TypeErrorKind::TupleArity,
            TypeError::RecursionLimit { .. } => TypeErrorKind::RecursionLimit,
        }
    }
}

/// A result type for inference operations.
pub type Result<T> = std::result::Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SrcLoc {
        SrcLoc::new("main.ml", 3, 14)
    }

    #[test]
    fn test_unbound_display() {
        let err = TypeError::UnboundVariable {
            name: "y".to_string(),
            loc: loc(),
        };
        assert_eq!(err.to_string(), "main.ml:3:14: unbound variable `y`");
        assert_eq!(err.kind(), TypeErrorKind::UnboundVariable);
    }

    #[test]
    fn test_mismatch_display() {
        let err = TypeError::Mismatch {
            expected: Ty::fun(Ty::Int, Ty::Var(3)),
            found: Ty::Bool,
            loc: loc(),
        };
        assert_eq!(
            err.to_string(),
            "main.ml:3:14: type mismatch: expected (Int -> a3), found Bool"
        );
    }

    #[test]
    fn test_occurs_display() {
        let err = TypeError::OccursCheck {
            var: 0,
            ty: Ty::fun(Ty::Var(0), Ty::Int),
            loc: SrcLoc::unknown(1, 1),
        };
        assert_eq!(err.to_string(), "<unknown>:1:1: infinite type: a0 occurs in (a0 -> Int)");
    }

    #[test]
    fn test_tuple_arity_display() {
        let err = TypeError::TupleArity {
            expected: Ty::tuple([Ty::Int, Ty::Int]),
            found: Ty::tuple([Ty::Int]),
            loc: loc(),
        };
        assert_eq!(
            err.to_string(),
            "main.ml:3:14: tuple arity mismatch: expected (Int, Int) with 2 elements, found (Int) with 1"
        );
        assert_eq!(err.loc(), &loc());
    }
}
