//! Inference configuration.

/// Default limit on expression nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for an inference run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferConfig {
    /// Generalize let-bound names. When off, a let binding stays monomorphic
    /// in its body.
    pub let_polymorphism: bool,
    /// Maximum expression nesting before inference gives up
    pub max_depth: usize,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            let_polymorphism: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InferConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with let-polymorphism turned off.
    #[must_use]
    pub fn monomorphic() -> Self {
        Self::default().with_let_polymorphism(false)
    }

    /// Sets whether let-bound names are generalized.
    #[must_use]
    pub fn with_let_polymorphism(mut self, enabled: bool) -> Self {
        self.let_polymorphism = enabled;
        self
    }

    /// Sets the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InferConfig::default();
        assert!(config.let_polymorphism);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builders() {
        let config = InferConfig::new().with_max_depth(8);
        assert_eq!(config.max_depth, 8);
        assert!(!InferConfig::monomorphic().let_polymorphism);
    }
}
