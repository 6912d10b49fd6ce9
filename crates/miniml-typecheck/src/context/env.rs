//! Type schemes and the type environment.
//!
//! # Design
//!
//! - **Type schemes**: a monotype with universally quantified variables
//! - **Persistent environment**: extending returns a new environment and the
//!   caller's view never changes; the binding table is shared until written
//! - **Let-polymorphism**: [`generalize`] closes a type over the variables the
//!   environment does not mention, [`Scheme::instantiate`] opens it again with
//!   fresh variables at each use
//!
//! # Example
//!
//! ```
//! use miniml_typecheck::context::{Scheme, TypeEnv};
//! use miniml_typecheck::types::Ty;
//!
//! let outer = TypeEnv::new().with("x", Scheme::mono(Ty::Int));
//! let inner = outer.extend("y", Scheme::mono(Ty::Bool));
//!
//! assert!(inner.lookup("y").is_some());
//! assert!(outer.lookup("y").is_none());
//! ```

use crate::context::subst::Subst;
use crate::infer::VarSupply;
use crate::types::Ty;
use hashbrown::HashMap;
use miniml_syntax::Name;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Type scheme: a type with possible universally quantified variables.
///
/// - `forall a0. a0 -> a0` is the identity function type
/// - `Int -> Int` is a monomorphic type (no quantified variables)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    /// Universally quantified type variables, ascending and unique.
    pub vars: Vec<u32>,

    /// The type itself (may contain references to `vars`).
    pub ty: Ty,
}

impl Scheme {
    /// Create a monomorphic type scheme (no quantified variables).
    #[must_use]
    pub fn mono(ty: Ty) -> Self {
        Self {
            vars: Vec::new(),
            ty,
        }
    }

    /// Create a polymorphic type scheme quantifying `vars`.
    #[must_use]
    pub fn poly(mut vars: Vec<u32>, ty: Ty) -> Self {
        vars.sort_unstable();
        vars.dedup();
        Self { vars, ty }
    }

    /// Whether nothing is quantified.
    #[must_use]
    pub fn is_mono(&self) -> bool {
        self.vars.is_empty()
    }

    /// Instantiate this scheme with fresh type variables.
    ///
    /// Every call draws new variables from `supply`, so two uses of the same
    /// scheme never share a variable. The renaming is simultaneous: a fresh
    /// id that happens to equal a quantified id is not renamed again.
    pub fn instantiate(&self, supply: &VarSupply) -> Ty {
        if self.vars.is_empty() {
            return self.ty.clone();
        }

        let fresh: Subst = self.vars.iter().map(|&v| (v, supply.fresh_ty())).collect();
        fresh.rename(&self.ty)
    }

    /// Free type variables: those in `ty` that are not quantified.
    #[must_use]
    pub fn free_vars(&self) -> BTreeSet<u32> {
        let mut vars = self.ty.free_vars();
        for v in &self.vars {
            vars.remove(v);
        }
        vars
    }

    /// Largest variable id mentioned, quantified or not.
    #[must_use]
    pub fn max_var(&self) -> Option<u32> {
        self.ty.max_var().max(self.vars.last().copied())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.vars.is_empty() {
            f.write_str("forall")?;
            for v in &self.vars {
                write!(f, " a{v}")?;
            }
            f.write_str(". ")?;
        }
        write!(f, "{}", self.ty)
    }
}

/// Close `ty` over every variable that is free in it but not in `env`.
///
/// Variables still mentioned by `env` stay free: they are shared with an
/// enclosing scope and must keep one meaning there.
#[must_use]
pub fn generalize(env: &TypeEnv, ty: &Ty) -> Scheme {
    let env_vars = env.free_vars();
    let vars = ty.free_vars().difference(&env_vars).copied().collect();
    Scheme::poly(vars, ty.clone())
}

/// Type environment mapping names to type schemes.
///
/// Cloning is cheap. Writes go through [`Arc::make_mut`], so a write through
/// one handle copies the table instead of changing what other handles see.
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    bindings: Arc<HashMap<Name, Scheme>>,
}

impl TypeEnv {
    /// Empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A small standard environment of polymorphic helpers.
    ///
    /// | name    | scheme                              |
    /// |---------|-------------------------------------|
    /// | `id`    | `forall a0. a0 -> a0`               |
    /// | `const` | `forall a0 a1. a0 -> a1 -> a0`      |
    /// | `fst`   | `forall a0 a1. (a0, a1) -> a0`      |
    /// | `snd`   | `forall a0 a1. (a0, a1) -> a1`      |
    /// | `not`   | `Bool -> Bool`                      |
    #[must_use]
    pub fn prelude() -> Self {
        let (a, b) = (Ty::Var(0), Ty::Var(1));
        Self::new()
            .with("id", Scheme::poly(vec![0], Ty::fun(a.clone(), a.clone())))
            .with(
                "const",
                Scheme::poly(vec![0, 1], Ty::fun(a.clone(), Ty::fun(b.clone(), a.clone()))),
            )
            .with(
                "fst",
                Scheme::poly(vec![0, 1], Ty::fun(Ty::tuple([a.clone(), b.clone()]), a.clone())),
            )
            .with(
                "snd",
                Scheme::poly(vec![0, 1], Ty::fun(Ty::tuple([a, b.clone()]), b)),
            )
            .with("not", Scheme::mono(Ty::fun(Ty::Bool, Ty::Bool)))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Look up the scheme bound to `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Scheme> {
        self.bindings.get(name)
    }

    /// Bind `name` in place, replacing any previous binding.
    ///
    /// Other clones of this environment are unaffected.
    pub fn insert(&mut self, name: impl Into<Name>, scheme: Scheme) {
        Arc::make_mut(&mut self.bindings).insert(name.into(), scheme);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<Name>, scheme: Scheme) -> Self {
        self.insert(name, scheme);
        self
    }

    /// A new environment with `name` bound (shadowing any outer binding).
    #[must_use]
    pub fn extend(&self, name: impl Into<Name>, scheme: Scheme) -> Self {
        self.clone().with(name, scheme)
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Scheme)> {
        self.bindings.iter()
    }

    /// Union of the free variables of every binding.
    #[must_use]
    pub fn free_vars(&self) -> BTreeSet<u32> {
        self.bindings
            .values()
            .flat_map(Scheme::free_vars)
            .collect()
    }

    /// Generalize `ty` against this environment. See [`generalize`].
    #[must_use]
    pub fn generalize(&self, ty: &Ty) -> Scheme {
        generalize(self, ty)
    }

    /// Largest variable id mentioned by any binding.
    #[must_use]
    pub fn max_var(&self) -> Option<u32> {
        self.bindings.values().filter_map(Scheme::max_var).max()
    }
}

impl FromIterator<(Name, Scheme)> for TypeEnv {
    fn from_iter<I: IntoIterator<Item = (Name, Scheme)>>(iter: I) -> Self {
        Self {
            bindings: Arc::new(iter.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_scheme() {
        let scheme = Scheme::mono(Ty::Int);
        assert!(scheme.is_mono());
        assert_eq!(scheme.to_string(), "Int");
    }

    #[test]
    fn test_poly_sorts_and_dedups() {
        let scheme = Scheme::poly(vec![3, 1, 3], Ty::fun(Ty::Var(1), Ty::Var(3)));
        assert_eq!(scheme.vars, vec![1, 3]);
        assert_eq!(scheme.to_string(), "forall a1 a3. (a1 -> a3)");
    }

    #[test]
    fn test_scheme_free_vars() {
        let scheme = Scheme::poly(vec![0], Ty::fun(Ty::Var(0), Ty::Var(5)));
        assert_eq!(scheme.free_vars().into_iter().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_instantiate_uses_fresh_vars() {
        let supply = VarSupply::starting_at(10);
        let scheme = Scheme::poly(vec![0, 1], Ty::fun(Ty::Var(0), Ty::fun(Ty::Var(1), Ty::Var(2))));

        let first = scheme.instantiate(&supply);
        let second = scheme.instantiate(&supply);

        assert_eq!(first, Ty::fun(Ty::Var(10), Ty::fun(Ty::Var(11), Ty::Var(2))));
        // the free variable is shared between instances
        assert_eq!(second, Ty::fun(Ty::Var(12), Ty::fun(Ty::Var(13), Ty::Var(2))));
    }

    #[test]
    fn test_instantiate_with_overlapping_supply() {
        let scheme = Scheme::poly(vec![0, 1], Ty::fun(Ty::Var(0), Ty::Var(1)));

        let shifted = scheme.instantiate(&VarSupply::starting_at(1));
        assert_eq!(shifted, Ty::fun(Ty::Var(1), Ty::Var(2)));

        let same = scheme.instantiate(&VarSupply::new());
        assert_eq!(same, Ty::fun(Ty::Var(0), Ty::Var(1)));
    }

    #[test]
    fn test_instantiate_prelude_from_zero() {
        let env = TypeEnv::prelude();
        let supply = VarSupply::new();

        let id = env.lookup("id").map(|s| s.instantiate(&supply));
        assert_eq!(id, Some(Ty::fun(Ty::Var(0), Ty::Var(0))));

        let konst = env.lookup("const").map(|s| s.instantiate(&supply));
        assert_eq!(
            konst,
            Some(Ty::fun(Ty::Var(1), Ty::fun(Ty::Var(2), Ty::Var(1))))
        );
    }

    #[test]
    fn test_instantiate_mono_is_identity() {
        let supply = VarSupply::new();
        let scheme = Scheme::mono(Ty::fun(Ty::Var(0), Ty::Int));
        assert_eq!(scheme.instantiate(&supply), scheme.ty);
        assert_eq!(supply.peek(), 0);
    }

    #[test]
    fn test_generalize_quantifies_unconstrained() {
        let env = TypeEnv::new().with("x", Scheme::mono(Ty::Int));
        let scheme = generalize(&env, &Ty::fun(Ty::Var(7), Ty::Var(7)));
        assert_eq!(scheme.vars, vec![7]);
    }

    #[test]
    fn test_generalize_keeps_env_vars_free() {
        let env = TypeEnv::new()
            .with("x", Scheme::mono(Ty::Int))
            .with("y", Scheme::mono(Ty::Var(7)));
        let scheme = env.generalize(&Ty::fun(Ty::Var(7), Ty::Var(8)));
        assert_eq!(scheme.vars, vec![8]);
    }

    #[test]
    fn test_quantified_env_vars_do_not_block_generalization() {
        let env = TypeEnv::new().with("id", Scheme::poly(vec![7], Ty::fun(Ty::Var(7), Ty::Var(7))));
        assert!(env.free_vars().is_empty());
        assert_eq!(env.generalize(&Ty::Var(7)).vars, vec![7]);
    }

    #[test]
    fn test_extend_is_persistent() {
        let base = TypeEnv::new().with("x", Scheme::mono(Ty::Int));
        let shadowed = base.extend("x", Scheme::mono(Ty::Bool));

        assert_eq!(base.lookup("x").map(|s| &s.ty), Some(&Ty::Int));
        assert_eq!(shadowed.lookup("x").map(|s| &s.ty), Some(&Ty::Bool));
        assert_eq!(base.len(), 1);
        assert_eq!(shadowed.len(), 1);
    }

    #[test]
    fn test_insert_copies_shared_table() {
        let base = TypeEnv::new().with("x", Scheme::mono(Ty::Int));
        let mut copy = base.clone();
        copy.insert("y", Scheme::mono(Ty::Bool));

        assert!(base.lookup("y").is_none());
        assert!(copy.lookup("y").is_some());
    }

    #[test]
    fn test_prelude() {
        let env = TypeEnv::prelude();
        assert_eq!(env.len(), 5);
        assert_eq!(env.lookup("id").map(ToString::to_string).as_deref(), Some("forall a0. (a0 -> a0)"));
        assert_eq!(
            env.lookup("fst").map(ToString::to_string).as_deref(),
            Some("forall a0 a1. ((a0, a1) -> a0)")
        );
        assert!(env.free_vars().is_empty());
        assert_eq!(env.max_var(), Some(1));
    }
}
