use logbridge_engine::EngineLogger;

use crate::{Adapter, ScopeIsolation};

/// Hands out one [`Adapter`] per category, all rooted at the same engine
/// logger.
///
/// The provider does not own the engine: disposing of it leaves the root
/// logger and its sink untouched.
#[derive(Debug, Clone)]
pub struct LoggerProvider<L> {
    root: L,
    isolation: ScopeIsolation,
}

impl<L: EngineLogger> LoggerProvider<L> {
    pub fn new(root: L) -> Self {
        Self {
            root,
            isolation: ScopeIsolation::default(),
        }
    }

    /// Scope isolation for adapters created from now on.
    pub fn with_scope_isolation(mut self, isolation: ScopeIsolation) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn root(&self) -> &L {
        &self.root
    }

    /// An adapter for `category`.
    ///
    /// An empty or absent category logs straight through the root logger;
    /// any other name logs through the root's sub-context of that name.
    pub fn create_logger(&self, category: Option<&str>) -> Adapter<L> {
        let handle = match category {
            Some(name) if !name.is_empty() => self.root.for_context(name),
            _ => self.root.clone(),
        };
        Adapter::with_scope_isolation(handle, self.isolation)
    }

    /// Releases the provider. The engine's lifecycle is managed elsewhere, so
    /// there is nothing to flush or close.
    pub fn dispose(self) {}
}
