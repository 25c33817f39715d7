//! Change notifications.
//!
//! Instead of callbacks, mutations push events onto an [`EventQueue`] owned by
//! the component that raised them. Consumers drain the queue after each call,
//! which keeps ownership linear and makes the cardinality of notifications
//! directly observable.

use crate::skill::SkillSnapshot;

/// Notifications raised by [`crate::SkillGraphService`].
#[derive(Clone, Debug, PartialEq)]
pub enum SkillTreeEvent {
    /// Raised once per successful upgrade with the updated skill.
    LevelChanged(SkillSnapshot),

    /// Raised once per reset. Consumers treat it as "every source revoked".
    LevelsReset,
}

/// FIFO buffer of pending notifications.
#[derive(Clone, Debug)]
pub struct EventQueue<E> {
    pending: Vec<E>,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
