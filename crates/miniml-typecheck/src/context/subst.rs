//! Substitutions: finite maps from type variables to types.
//!
//! A substitution is applied to types, schemes and whole environments.
//! Application follows chains (`a0 := a1`, `a1 := Int` resolves `a0` to
//! `Int`) and shares every subterm it does not change.
//!
//! # Example
//!
//! ```
//! use miniml_typecheck::context::Subst;
//! use miniml_typecheck::types::Ty;
//!
//! let s = Subst::single(0, Ty::Int);
//! let ty = Ty::fun(Ty::Var(0), Ty::Var(1));
//! assert_eq!(s.apply(&ty), Ty::fun(Ty::Int, Ty::Var(1)));
//! ```

use crate::context::env::{Scheme, TypeEnv};
use crate::types::Ty;
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;

/// Substitution from type variables to types.
///
/// Invariant: no image contains a variable that would loop back to its own
/// key. Unification's occurs check maintains this for every substitution
/// the engine builds.
///
/// [`apply`](Self::apply) resolves chains, so [`compose`](Self::compose)
/// obeys the composition law only when the later substitution's images
/// avoid the variables the earlier one binds. Substitutions produced by one
/// inference walk always satisfy this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subst {
    map: HashMap<u32, Ty>,
}

impl Subst {
    /// Create an empty substitution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty substitution (alias for `new()`).
    #[must_use]
    pub fn empty() -> Self {
        Self::new()
    }

    /// Substitution with the single binding `var := ty`.
    ///
    /// `var := var` is the identity and yields the empty substitution.
    #[must_use]
    pub fn single(var: u32, ty: Ty) -> Self {
        if ty.as_var() == Some(var) {
            return Self::new();
        }
        let mut map = HashMap::with_capacity(1);
        map.insert(var, ty);
        Self { map }
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The direct image of `var`, without following chains.
    #[must_use]
    pub fn lookup(&self, var: u32) -> Option<&Ty> {
        self.map.get(&var)
    }

    /// Bindings sorted by variable id.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Ty)> {
        let mut entries: Vec<(u32, &Ty)> = self.map.iter().map(|(&v, ty)| (v, ty)).collect();
        entries.sort_unstable_by_key(|&(v, _)| v);
        entries.into_iter()
    }

    /// Apply the substitution to a type.
    ///
    /// Bound variables are replaced by their images, and the images are
    /// resolved in turn, so the result contains no bound variable.
    #[must_use]
    pub fn apply(&self, ty: &Ty) -> Ty {
        self.apply_changed(ty).unwrap_or_else(|| ty.clone())
    }

    /// Replace every bound variable by its image exactly once.
    ///
    /// Unlike [`apply`](Self::apply), images are not resolved again, so the
    /// bindings act simultaneously: `{a0 := a1, a1 := a2}` renames
    /// `a0 -> a1` to `a1 -> a2`.
    pub(crate) fn rename(&self, ty: &Ty) -> Ty {
        self.replace_vars(ty, false).unwrap_or_else(|| ty.clone())
    }

    /// Like [`apply`](Self::apply), but returns `None` when nothing changed.
    fn apply_changed(&self, ty: &Ty) -> Option<Ty> {
        self.replace_vars(ty, true)
    }

    /// Rewrites bound variables, sharing unchanged subterms. With `chase`
    /// set, each image is resolved through the substitution again.
    fn replace_vars(&self, ty: &Ty, chase: bool) -> Option<Ty> {
        if self.map.is_empty() {
            return None;
        }

        match ty {
            Ty::Var(var) => self.map.get(var).map(|image| {
                if chase {
                    self.apply(image)
                } else {
                    image.clone()
                }
            }),

            Ty::Fun { param, result } => {
                let new_param = self.replace_vars(param, chase);
                let new_result = self.replace_vars(result, chase);
                if new_param.is_none() && new_result.is_none() {
                    return None;
                }
                Some(Ty::Fun {
                    param: new_param.map_or_else(|| Arc::clone(param), Arc::new),
                    result: new_result.map_or_else(|| Arc::clone(result), Arc::new),
                })
            }

            Ty::Tuple(elements) => {
                let mut changed = false;
                let applied: Vec<Ty> = elements
                    .iter()
                    .map(|element| match self.replace_vars(element, chase) {
                        Some(new) => {
                            changed = true;
                            new
                        }
                        None => element.clone(),
                    })
                    .collect();
                changed.then(|| Ty::Tuple(applied.into()))
            }

            Ty::Int | Ty::Bool => None,
        }
    }

    /// Apply the substitution to a scheme.
    ///
    /// Quantified variables are masked out first: they belong to the scheme,
    /// not to whatever scope this substitution was built for.
    #[must_use]
    pub fn apply_scheme(&self, scheme: &Scheme) -> Scheme {
        if self.map.is_empty() {
            return scheme.clone();
        }
        if scheme.vars.iter().any(|v| self.map.contains_key(v)) {
            let masked = self.without(&scheme.vars);
            Scheme::poly(scheme.vars.clone(), masked.apply(&scheme.ty))
        } else {
            Scheme::poly(scheme.vars.clone(), self.apply(&scheme.ty))
        }
    }

    /// Apply the substitution to every binding of an environment.
    ///
    /// Returns a new environment; `env` itself is left as it was.
    #[must_use]
    pub fn apply_env(&self, env: &TypeEnv) -> TypeEnv {
        if self.map.is_empty() {
            return env.clone();
        }
        env.iter()
            .map(|(name, scheme)| (name.clone(), self.apply_scheme(scheme)))
            .collect()
    }

    /// Compose two substitutions: first `self`, then `later`.
    ///
    /// For every type `t`:
    /// `self.compose(later).apply(t) == later.apply(&self.apply(t))`,
    /// provided no image of `later` mentions a variable `self` binds. Every
    /// pair the inference walk composes has that shape, since `later` is
    /// always computed on types already resolved through `self`.
    ///
    /// Every image of `self` is rewritten through `later`, then the
    /// bindings of `later` whose keys `self` does not bind are added.
    #[must_use]
    pub fn compose(&self, later: &Subst) -> Subst {
        if later.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return later.clone();
        }

        let mut map: HashMap<u32, Ty> = HashMap::with_capacity(self.map.len() + later.map.len());
        for (&var, ty) in &self.map {
            let image = later.apply(ty);
            // `var := var` is the identity; keeping it would make apply loop.
            if image.as_var() != Some(var) {
                map.insert(var, image);
            }
        }
        for (&var, ty) in &later.map {
            if !self.map.contains_key(&var) {
                map.insert(var, ty.clone());
            }
        }
        Subst { map }
    }

    /// This substitution with the given variables unbound.
    #[must_use]
    pub fn without(&self, vars: &[u32]) -> Subst {
        Subst {
            map: self
                .map
                .iter()
                .filter(|(var, _)| !vars.contains(*var))
                .map(|(&var, ty)| (var, ty.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(u32, Ty)> for Subst {
    /// Later bindings for the same variable win; identity bindings are
    /// dropped.
    fn from_iter<I: IntoIterator<Item = (u32, Ty)>>(iter: I) -> Self {
        Subst {
            map: iter
                .into_iter()
                .filter(|(var, ty)| ty.as_var() != Some(*var))
                .collect(),
        }
    }
}

impl fmt::Display for Subst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, ty)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "a{var} := {ty}")?;
        }
        f.write_str("}")
    }
}
