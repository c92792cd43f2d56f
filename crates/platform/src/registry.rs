//! Platforms keyed by coin handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::traits::Platform;

#[derive(Default)]
pub struct PlatformRegistry {
    platforms: BTreeMap<&'static str, Arc<dyn Platform>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `platform` under its coin handle, replacing any previous one.
    pub fn register(&mut self, platform: Arc<dyn Platform>) -> Option<Arc<dyn Platform>> {
        self.platforms.insert(platform.coin().handle, platform)
    }

    pub fn with(mut self, platform: Arc<dyn Platform>) -> Self {
        self.register(platform);
        self
    }

    pub fn get(&self, handle: &str) -> Option<&Arc<dyn Platform>> {
        self.platforms.get(handle)
    }

    pub fn handles(&self) -> Vec<&'static str> {
        self.platforms.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Platform>> {
        self.platforms.values()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.platforms.keys()).finish()
    }
}
