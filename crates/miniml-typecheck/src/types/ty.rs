//! Core type representation for inference.
//!
//! # Design
//!
//! - **Type variables** (`Var`) are unknowns introduced during inference and
//!   resolved through a [`Subst`](crate::context::Subst)
//! - **Base types** are `Int` and `Bool`
//! - **Composite types** are single-parameter functions and tuples
//!
//! Terms are never mutated. Children sit behind `Arc`, so cloning a type is
//! cheap and substitution can share every subterm it leaves untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

/// A monotype.
///
/// # Example
///
/// ```
/// use miniml_typecheck::types::Ty;
///
/// // Int -> a0
/// let ty = Ty::fun(Ty::Int, Ty::Var(0));
/// assert!(ty.occurs_in(0));
/// assert_eq!(ty.to_string(), "(Int -> a0)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Machine integer
    Int,

    /// Boolean
    Bool,

    /// Type variable for inference.
    ///
    /// The `u32` is drawn from a [`VarSupply`](crate::infer::VarSupply) and
    /// is unique within one inference run.
    Var(u32),

    /// Function type. Multi-argument functions are curried.
    Fun {
        /// Parameter type
        param: Arc<Ty>,
        /// Result type
        result: Arc<Ty>,
    },

    /// Tuple type.
    ///
    /// Example: `(Int, Bool, a3)`
    Tuple(Arc<[Ty]>),
}

impl Ty {
    /// `Int`
    #[must_use]
    pub const fn int() -> Self {
        Ty::Int
    }

    /// `Bool`
    #[must_use]
    pub const fn bool() -> Self {
        Ty::Bool
    }

    /// Type variable `a{id}`.
    #[must_use]
    pub const fn var(id: u32) -> Self {
        Ty::Var(id)
    }

    /// `param -> result`
    #[must_use]
    pub fn fun(param: Ty, result: Ty) -> Self {
        Ty::Fun {
            param: Arc::new(param),
            result: Arc::new(result),
        }
    }

    /// Tuple of the given element types.
    #[must_use]
    pub fn tuple(elements: impl IntoIterator<Item = Ty>) -> Self {
        Ty::Tuple(elements.into_iter().collect())
    }

    /// Whether this is a bare type variable.
    #[must_use]
    pub const fn is_var(&self) -> bool {
        matches!(self, Ty::Var(_))
    }

    /// Returns the variable id if this is a bare type variable.
    #[must_use]
    pub const fn as_var(&self) -> Option<u32> {
        match self {
            Ty::Var(v) => Some(*v),
            _ => None,
        }
    }

    /// Number of elements if this is a tuple, `None` otherwise.
    #[must_use]
    pub fn tuple_len(&self) -> Option<usize> {
        match self {
            Ty::Tuple(elements) => Some(elements.len()),
            _ => None,
        }
    }

    /// One-word description of the outermost constructor.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Ty::Int => "Int",
            Ty::Bool => "Bool",
            Ty::Var(_) => "type variable",
            Ty::Fun { .. } => "function",
            Ty::Tuple(_) => "tuple",
        }
    }

    /// Check if this type contains a specific type variable.
    ///
    /// This is the occurs check: binding `var` to a type that contains it
    /// would describe an infinite type.
    ///
    /// # Example
    ///
    /// ```
    /// use miniml_typecheck::types::Ty;
    ///
    /// assert!(Ty::tuple([Ty::Int, Ty::Var(0)]).occurs_in(0));
    /// assert!(!Ty::Int.occurs_in(0));
    /// ```
    #[must_use]
    pub fn occurs_in(&self, var: u32) -> bool {
        match self {
            Ty::Var(v) => *v == var,
            Ty::Fun { param, result } => param.occurs_in(var) || result.occurs_in(var),
            Ty::Tuple(elements) => elements.iter().any(|t| t.occurs_in(var)),
            Ty::Int | Ty::Bool => false,
        }
    }

    /// All type variables in this type, in ascending order.
    ///
    /// A monotype has no binders, so every variable in it is free.
    #[must_use]
    pub fn free_vars(&self) -> BTreeSet<u32> {
        let mut vars = BTreeSet::new();
        self.collect_free_vars(&mut vars);
        vars
    }

    pub(crate) fn collect_free_vars(&self, vars: &mut BTreeSet<u32>) {
        match self {
            Ty::Var(v) => {
                vars.insert(*v);
            }
            Ty::Fun { param, result } => {
                param.collect_free_vars(vars);
                result.collect_free_vars(vars);
            }
            Ty::Tuple(elements) => {
                for ty in elements.iter() {
                    ty.collect_free_vars(vars);
                }
            }
            Ty::Int | Ty::Bool => {}
        }
    }

    /// Largest variable id mentioned anywhere in the type.
    #[must_use]
    pub fn max_var(&self) -> Option<u32> {
        match self {
            Ty::Var(v) => Some(*v),
            Ty::Fun { param, result } => param.max_var().max(result.max_var()),
            Ty::Tuple(elements) => elements.iter().filter_map(Ty::max_var).max(),
            Ty::Int | Ty::Bool => None,
        }
    }
}
