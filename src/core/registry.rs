//! # Task registry: name → actor map and sole durable owner.
//!
//! The registry holds the long-lived handle of every registered task. Queues
//! only carry transient clones, so removing the registry entry plus flipping
//! the actor's `active` flag is all a stop needs: stale queue references decay
//! as they are popped (lazy deletion), and the record is destroyed when the
//! last clone drops.
//!
//! ## Rules
//! - The map lock is held across the collision check, the factory call, and
//!   the insert, so concurrent `create` calls with one name admit exactly one
//!   winner and the factory never runs for a loser.
//! - The lock is never held while task callbacks execute.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::actor::TaskActor;
use crate::error::RuntimeError;
use crate::events::Bus;
use crate::tasks::{TaskConfig, TaskRef};

/// Name-keyed map of registered tasks.
pub(crate) struct Registry {
    tasks: Mutex<HashMap<String, Arc<TaskActor>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Builds and registers a new actor.
    ///
    /// Fails without invoking the factory if the name is taken; fails without
    /// state change if the factory declines. The caller schedules the returned
    /// actor.
    pub(crate) fn create<F>(
        &self,
        name: &str,
        config: TaskConfig,
        factory: F,
        bus: Bus,
    ) -> Result<Arc<TaskActor>, RuntimeError>
    where
        F: FnOnce() -> Option<TaskRef>,
    {
        let mut tasks = self.tasks.lock();
        if tasks.contains_key(name) {
            return Err(RuntimeError::TaskAlreadyExists { name: name.into() });
        }
        let task = factory().ok_or_else(|| RuntimeError::FactoryFailed { name: name.into() })?;
        let actor = Arc::new(TaskActor::new(name, config, task, bus));
        tasks.insert(name.to_string(), Arc::clone(&actor));
        Ok(actor)
    }

    /// Marks the task inactive and drops the registry entry (lazy deletion).
    pub(crate) fn stop(&self, name: &str) -> Result<Arc<TaskActor>, RuntimeError> {
        let mut tasks = self.tasks.lock();
        let actor = tasks
            .remove(name)
            .ok_or_else(|| RuntimeError::TaskNotFound { name: name.into() })?;
        actor.set_active(false);
        Ok(actor)
    }

    /// Replaces the task's configuration in place.
    pub(crate) fn update(&self, name: &str, config: TaskConfig) -> Result<(), RuntimeError> {
        let tasks = self.tasks.lock();
        let actor = tasks
            .get(name)
            .ok_or_else(|| RuntimeError::TaskNotFound { name: name.into() })?;
        actor.update_config(config);
        Ok(())
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Arc<TaskActor>> {
        self.tasks.lock().get(name).cloned()
    }

    pub(crate) fn count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Deactivates and releases every task. Called once during shutdown.
    pub(crate) fn clear(&self) {
        let mut tasks = self.tasks.lock();
        for actor in tasks.values() {
            actor.set_active(false);
        }
        tasks.clear();
    }
}
