//! Instance registry: the single owner of truth for live sessions.
//!
//! Maps project keys to instances and tracks which key is "current" for
//! default-target operations. Stale entries (buffer no longer confirmed by
//! the editor) are pruned lazily inside [`InstanceRegistry::get`]; there is
//! no background sweep.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::ProjectKey;
use crate::editor::EditorPort;

use super::instance::Instance;

#[derive(Default)]
pub struct InstanceRegistry {
    instances: HashMap<ProjectKey, Instance>,
    current: Option<ProjectKey>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            current: None,
        }
    }

    /// Look up the live instance for a key.
    ///
    /// Before returning an entry, confirms its tracked buffer with the
    /// editor; an entry whose buffer died is removed and treated as
    /// absent, so a subsequent `get` also returns `None`.
    pub fn get(&mut self, key: &ProjectKey, editor: &dyn EditorPort) -> Option<&mut Instance> {
        let stale = match self.instances.get(key) {
            Some(instance) => !editor.buffer_is_valid(instance.buffer()),
            None => return None,
        };

        if stale {
            debug!(key = %key, "pruning stale instance (buffer no longer valid)");
            self.instances.remove(key);
            if self.current.as_ref() == Some(key) {
                self.current = None;
            }
            return None;
        }

        self.instances.get_mut(key)
    }

    /// Insert or replace the instance for a key. At most one instance per
    /// key exists at any time.
    pub fn put(&mut self, key: ProjectKey, instance: Instance) {
        self.instances.insert(key, instance);
    }

    /// Remove and return the instance for a key, releasing its process
    /// handle with it.
    pub fn remove(&mut self, key: &ProjectKey) -> Option<Instance> {
        let removed = self.instances.remove(key);
        if removed.is_some() && self.current.as_ref() == Some(key) {
            self.current = None;
        }
        removed
    }

    /// Record the most recently addressed key. Overwritten, never merged.
    pub fn set_current(&mut self, key: &ProjectKey) {
        self.current = Some(key.clone());
    }

    pub fn current(&self) -> Option<&ProjectKey> {
        self.current.as_ref()
    }

    pub fn contains(&self, key: &ProjectKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
