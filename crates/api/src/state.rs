//! Shared application state.

use std::sync::Arc;

use domain::{ApiKeyVerifier, Contact, ContactRegistry, Gadget, InventoryService, Operator};
use record_store::InMemoryRecordStore;
use upstream::Directory;

use crate::session::SessionPool;
use crate::tasks::TaskQueue;

/// Shared application state accessible from all handlers.
pub struct AppState<D: Directory> {
    pub inventory: InventoryService<InMemoryRecordStore<Gadget>>,
    pub contacts: ContactRegistry<InMemoryRecordStore<Contact>>,
    pub directory: D,
    pub api_keys: ApiKeyVerifier,
    pub operator: Operator,
    pub tasks: TaskQueue,
    pub sessions: Arc<SessionPool>,
}
