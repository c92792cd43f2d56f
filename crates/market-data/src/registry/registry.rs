//! Ordered registry of market providers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::provider::MarketProvider;

/// Ordered mapping from integer slot to provider.
///
/// Slot order is the scheduling order and the priority order used by the
/// store: a lower slot wins when two providers quote the same pair. It does
/// not imply execution priority; every provider runs on its own timer.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<usize, Arc<dyn MarketProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` at `slot`, returning the provider it replaced.
    pub fn register(
        &mut self,
        slot: usize,
        provider: Arc<dyn MarketProvider>,
    ) -> Option<Arc<dyn MarketProvider>> {
        self.providers.insert(slot, provider)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, slot: usize, provider: Arc<dyn MarketProvider>) -> Self {
        self.register(slot, provider);
        self
    }

    /// Providers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Arc<dyn MarketProvider>)> {
        self.providers.iter().map(|(slot, p)| (*slot, p))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn MarketProvider>> {
        self.providers.values().find(|p| p.id() == id)
    }

    /// Slot of the provider with the given id.
    pub fn priority(&self, id: &str) -> Option<usize> {
        self.providers
            .iter()
            .find(|(_, p)| p.id() == id)
            .map(|(slot, _)| *slot)
    }

    /// Like [`priority`](Self::priority), with unknown ids ranked last.
    pub fn rank(&self, id: &str) -> usize {
        self.priority(id).unwrap_or(usize::MAX)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.providers.values().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.providers.iter().map(|(slot, p)| (slot, p.id())))
            .finish()
    }
}
