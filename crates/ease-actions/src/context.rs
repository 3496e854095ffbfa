//! Execution context handed to every handler.
//!
//! The context carries the capabilities a handler may use: navigation, the
//! acting user's identity, and one persistence hook per domain record type.
//! The caller builds it per reply; the engine only passes it through.

use crate::hooks::{MemoryHook, PersistenceHook};
use ease_core::{AppointmentRequest, Habit, MoodEntry, Reminder, TodoItem, UserIdentity};
use std::sync::{Arc, Mutex};

/// Moves the app to another section.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &str);
}

/// Navigator that only records destinations, in call order.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations navigated to so far.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(destination.to_string());
        }
    }
}

/// One persistence hook per record type a handler may create.
#[derive(Clone)]
pub struct PersistenceHooks {
    pub todos: Arc<dyn PersistenceHook<TodoItem>>,
    pub moods: Arc<dyn PersistenceHook<MoodEntry>>,
    pub reminders: Arc<dyn PersistenceHook<Reminder>>,
    pub appointments: Arc<dyn PersistenceHook<AppointmentRequest>>,
    pub habits: Arc<dyn PersistenceHook<Habit>>,
}

impl PersistenceHooks {
    /// Hooks backed by in-memory stores, plus handles to inspect them.
    pub fn in_memory() -> (Self, InMemoryStores) {
        let stores = InMemoryStores::default();
        (stores.hooks(), stores)
    }
}

/// Handles to the stores behind [`PersistenceHooks::in_memory`].
#[derive(Clone, Default)]
pub struct InMemoryStores {
    pub todos: Arc<MemoryHook<TodoItem>>,
    pub moods: Arc<MemoryHook<MoodEntry>>,
    pub reminders: Arc<MemoryHook<Reminder>>,
    pub appointments: Arc<MemoryHook<AppointmentRequest>>,
    pub habits: Arc<MemoryHook<Habit>>,
}

impl InMemoryStores {
    /// Hooks that write into these stores.
    pub fn hooks(&self) -> PersistenceHooks {
        PersistenceHooks {
            todos: self.todos.clone(),
            moods: self.moods.clone(),
            reminders: self.reminders.clone(),
            appointments: self.appointments.clone(),
            habits: self.habits.clone(),
        }
    }
}

/// Capabilities supplied by the caller for one dispatch batch.
#[derive(Clone)]
pub struct ExecutionContext {
    pub navigator: Arc<dyn Navigator>,
    pub user: UserIdentity,
    pub hooks: PersistenceHooks,
}

impl ExecutionContext {
    pub fn new(navigator: Arc<dyn Navigator>, user: UserIdentity, hooks: PersistenceHooks) -> Self {
        Self {
            navigator,
            user,
            hooks,
        }
    }
}
