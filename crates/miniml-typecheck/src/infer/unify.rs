//! Unification algorithm with occurs check.
//!
//! This module implements type unification, the core of type inference.
//! Unification finds the most general substitution that makes two types
//! equal.

use crate::context::Subst;
use crate::error::{Result, TypeError};
use crate::types::Ty;
use miniml_log::trace;
use miniml_syntax::SrcLoc;

/// Unify `expected` with `found`, reporting failures at `loc`.
///
/// On success the returned substitution `s` satisfies
/// `s.apply(expected) == s.apply(found)`. A mismatch anywhere inside the two
/// types is reported with both full operands, resolved through whatever the
/// unifier had learned before it failed.
///
/// # Errors
///
/// - [`TypeError::Mismatch`] for incompatible constructors
/// - [`TypeError::TupleArity`] for tuples of different lengths
/// - [`TypeError::OccursCheck`] when a variable would contain itself
pub fn unify(expected: &Ty, found: &Ty, loc: &SrcLoc) -> Result<Subst> {
    let mut unifier = Unifier::new(loc);
    match unifier.unify(expected, found) {
        Ok(()) => Ok(unifier.finish()),
        Err(TypeError::Mismatch { .. }) => Err(TypeError::Mismatch {
            expected: unifier.subst.apply(expected),
            found: unifier.subst.apply(found),
            loc: loc.clone(),
        }),
        Err(err) => Err(err),
    }
}

/// Unification state: the substitution accumulated so far.
#[derive(Debug)]
pub struct Unifier<'a> {
    /// Current substitution
    pub subst: Subst,
    loc: &'a SrcLoc,
}

impl<'a> Unifier<'a> {
    /// Create a unifier with an empty substitution.
    pub fn new(loc: &'a SrcLoc) -> Self {
        Self {
            subst: Subst::new(),
            loc,
        }
    }

    /// Unify two types, accumulating substitutions.
    ///
    /// Both operands are resolved through the current substitution first, so
    /// bindings made while unifying a function's parameter are visible when
    /// its result is unified.
    ///
    /// # Errors
    ///
    /// Returns a `TypeError` if the types cannot be unified. The mismatch
    /// carries the clashing subterms, not the outer operands.
    pub fn unify(&mut self, expected: &Ty, found: &Ty) -> Result<()> {
        let expected = self.subst.apply(expected);
        let found = self.subst.apply(found);
        trace!("unify {expected} ~ {found}");

        match (&expected, &found) {
            (Ty::Var(a), Ty::Var(b)) if a == b => Ok(()),
            (Ty::Var(var), ty) | (ty, Ty::Var(var)) => self.bind(*var, ty),

            (Ty::Int, Ty::Int) | (Ty::Bool, Ty::Bool) => Ok(()),

            (
                Ty::Fun {
                    param: p1,
                    result: r1,
                },
                Ty::Fun {
                    param: p2,
                    result: r2,
                },
            ) => {
                self.unify(p1, p2)?;
                self.unify(r1, r2)
            }

            (Ty::Tuple(elems1), Ty::Tuple(elems2)) if elems1.len() == elems2.len() => {
                for (t1, t2) in elems1.iter().zip(elems2.iter()) {
                    self.unify(t1, t2)?;
                }
                Ok(())
            }

            (Ty::Tuple(_), Ty::Tuple(_)) => Err(TypeError::TupleArity {
                expected,
                found,
                loc: self.loc.clone(),
            }),

            _ => {
                trace!("cannot unify {} with {}", expected.shape(), found.shape());
                Err(TypeError::Mismatch {
                    expected,
                    found,
                    loc: self.loc.clone(),
                })
            }
        }
    }

    /// Bind an unbound variable to a type already resolved through `subst`.
    fn bind(&mut self, var: u32, ty: &Ty) -> Result<()> {
        if ty.occurs_in(var) {
            return Err(TypeError::OccursCheck {
                var,
                ty: ty.clone(),
                loc: self.loc.clone(),
            });
        }

        trace!("bind a{var} := {ty}");
        self.subst = self.subst.compose(&Subst::single(var, ty.clone()));
        Ok(())
    }

    /// The accumulated substitution.
    #[must_use]
    pub fn finish(self) -> Subst {
        self.subst
    }
}
