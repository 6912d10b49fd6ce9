//! Inference state that outlives a single unification step.
//!
//! - **Subst**: substitutions, their application and composition
//! - **Scheme**: polymorphic type schemes
//! - **TypeEnv**: persistent name-to-scheme environment

pub mod env;
pub mod subst;

pub use env::{Scheme, TypeEnv, generalize};
pub use subst::Subst;
