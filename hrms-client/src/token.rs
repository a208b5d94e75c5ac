//! Bearer token storage

use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, cloneable slot holding the current bearer token
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token)),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write() = Some(token.into());
    }

    /// Forget the token; returns whether one was held
    pub fn clear(&self) -> bool {
        self.inner.write().take().is_some()
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_slot() {
        let store = TokenStore::default();
        let other = store.clone();
        store.set("t1");
        assert_eq!(other.get().as_deref(), Some("t1"));
        assert!(other.clear());
        assert!(!store.is_set());
        assert!(!store.clear());
    }
}
