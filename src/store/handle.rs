//! Shared handle to a single node store.
//!
//! Every consumer in a session (interpreter, completer, CLI commands) holds a
//! clone of the same handle. All operations are synchronous; the lock only
//! serializes access.

use crate::store::NodeStore;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<NodeStore>>,
}

impl StoreHandle {
    pub fn new(store: NodeStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, NodeStore> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, NodeStore> {
        self.inner.write()
    }
}

impl From<NodeStore> for StoreHandle {
    fn from(store: NodeStore) -> Self {
        Self::new(store)
    }
}
