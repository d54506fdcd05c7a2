//! # Memory Registry
//!
//! One memory per name. The first [`MemoryRegistry::get_or_create`] for a name runs the
//! factory; later calls return a clone of the same handle, whatever backend was chosen.
//! Callers own the registry and pass it (or the handles) around explicitly.
//!
//! Each name has its own once-cell: concurrent first calls for one name build one backend,
//! while a slow startup (e.g. waiting for a new index to become ready) does not hold up
//! other names.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use memory_core::BackendKind;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::agent_memory::AgentMemory;
use crate::factory::MemoryFactory;

type Slot = Arc<OnceCell<AgentMemory>>;

pub struct MemoryRegistry {
    factory: MemoryFactory,
    slots: Mutex<HashMap<String, Slot>>,
}

impl MemoryRegistry {
    pub fn new(factory: MemoryFactory) -> Self {
        Self {
            factory,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn factory(&self) -> &MemoryFactory {
        &self.factory
    }

    fn slot(&self, name: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(name.to_string()).or_default().clone()
    }

    /// Memory registered for `name`, created through the factory on first use.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self, name: &str) -> AgentMemory {
        let slot = self.slot(name);
        if let Some(existing) = slot.get() {
            debug!(backend = %existing.kind(), "reusing registered memory");
            return existing.clone();
        }
        slot.get_or_init(|| self.factory.create(name)).await.clone()
    }

    /// Memory registered for `name` with the given backend, if any.
    pub async fn get(&self, backend: BackendKind, name: &str) -> Option<AgentMemory> {
        let slot = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()?;
        slot.get().filter(|m| m.kind() == backend).cloned()
    }

    /// Number of registered memories. Names still starting up are not counted.
    pub async fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl std::fmt::Debug for MemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRegistry")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}
