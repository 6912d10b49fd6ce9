//! Canonical type printing.
//!
//! - `Int`, `Bool`
//! - `aN` for type variable `N`
//! - `(T1 -> T2)` for functions: arrows associate to the right, the whole
//!   chain is wrapped once, and a function in parameter position gets its
//!   own parentheses
//! - `(T1, T2, ...)` for tuples
//!
//! ```
//! use miniml_typecheck::types::Ty;
//!
//! let curried = Ty::fun(Ty::Int, Ty::fun(Ty::Int, Ty::Int));
//! assert_eq!(curried.to_string(), "(Int -> Int -> Int)");
//!
//! let higher = Ty::fun(Ty::fun(Ty::Int, Ty::Int), Ty::Int);
//! assert_eq!(higher.to_string(), "((Int -> Int) -> Int)");
//! ```

use crate::types::Ty;
use std::fmt;

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => f.write_str("Int"),
            Ty::Bool => f.write_str("Bool"),
            Ty::Var(id) => write!(f, "a{id}"),
            Ty::Fun { .. } => {
                f.write_str("(")?;
                format_arrow_chain(self, f)?;
                f.write_str(")")
            }
            Ty::Tuple(elements) => {
                f.write_str("(")?;
                for (i, ty) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Writes `P1 -> P2 -> ... -> R` without outer parentheses.
///
/// Parameters go through the full printer, so a function-typed parameter
/// comes out parenthesized. Results that are functions continue the chain.
fn format_arrow_chain(ty: &Ty, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut current = ty;
    while let Ty::Fun { param, result } = current {
        write!(f, "{param} -> ")?;
        current = &**result;
    }
    write!(f, "{current}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_base_types() {
        assert_eq!(Ty::Int.to_string(), "Int");
        assert_eq!(Ty::Bool.to_string(), "Bool");
        assert_eq!(Ty::Var(12).to_string(), "a12");
    }

    #[test]
    fn test_display_identity() {
        assert_eq!(Ty::fun(Ty::Var(0), Ty::Var(0)).to_string(), "(a0 -> a0)");
    }

    #[test]
    fn test_display_right_associative() {
        let ty = Ty::fun(Ty::Var(0), Ty::fun(Ty::Var(1), Ty::Var(0)));
        assert_eq!(ty.to_string(), "(a0 -> a1 -> a0)");
    }

    #[test]
    fn test_display_function_parameter_is_parenthesized() {
        let compose_arg = Ty::fun(Ty::fun(Ty::Var(0), Ty::Var(1)), Ty::fun(Ty::Var(0), Ty::Var(1)));
        assert_eq!(compose_arg.to_string(), "((a0 -> a1) -> a0 -> a1)");
    }

    #[test]
    fn test_display_tuples() {
        let ty = Ty::tuple([Ty::Int, Ty::Bool, Ty::fun(Ty::Var(3), Ty::Var(3))]);
        assert_eq!(ty.to_string(), "(Int, Bool, (a3 -> a3))");

        let fst = Ty::fun(Ty::tuple([Ty::Var(0), Ty::Var(1)]), Ty::Var(0));
        assert_eq!(fst.to_string(), "((a0, a1) -> a0)");

        assert_eq!(Ty::tuple([]).to_string(), "()");
    }
}
