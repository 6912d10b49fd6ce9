//! Inference context: the fresh variable supply plus per-run settings.

use crate::config::InferConfig;
use crate::context::TypeEnv;
use crate::error::{Result, TypeError};
use crate::types::Ty;
use miniml_syntax::SrcLoc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of fresh type variable ids.
///
/// Ids increase monotonically and are never reused while the supply lives.
/// The counter is atomic, so one supply can be shared by several runs that
/// must not hand out the same id.
#[derive(Debug, Default)]
pub struct VarSupply {
    next: AtomicU32,
}

impl VarSupply {
    /// A supply starting at `a0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A supply whose first id is `first`.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// A supply numbering above every variable mentioned in `env`.
    #[must_use]
    pub fn for_env(env: &TypeEnv) -> Self {
        Self::starting_at(env.max_var().map_or(0, |v| v + 1))
    }

    /// Next unused id.
    pub fn fresh(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Next unused id as a type.
    pub fn fresh_ty(&self) -> Ty {
        Ty::Var(self.fresh())
    }

    /// The id the next call to [`fresh`](Self::fresh) returns.
    #[must_use]
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }

    /// Restart numbering at zero. Requires exclusive access, so it cannot
    /// happen in the middle of a run.
    pub fn reset(&mut self) {
        *self.next.get_mut() = 0;
    }
}

/// State threaded through one inference walk.
#[derive(Debug)]
pub struct Context<'ctx> {
    /// Fresh variable supply
    pub supply: &'ctx VarSupply,

    /// Run configuration
    pub config: &'ctx InferConfig,

    /// Current nesting depth
    depth: usize,
}

impl<'ctx> Context<'ctx> {
    /// Create a new inference context.
    pub fn new(supply: &'ctx VarSupply, config: &'ctx InferConfig) -> Self {
        Self {
            supply,
            config,
            depth: 0,
        }
    }

    /// Create a fresh type variable.
    pub fn fresh_var(&self) -> Ty {
        self.supply.fresh_ty()
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a child node.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::RecursionLimit`] when this would exceed
    /// `config.max_depth`.
    pub fn enter(&mut self, loc: &SrcLoc) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(TypeError::RecursionLimit {
                limit: self.config.max_depth,
                loc: loc.clone(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a node entered with [`enter`](Self::enter).
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
