use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A FIFO worklist that ignores pushes of items already pending.
///
/// Arc-consistency re-enqueues arcs aggressively; since a pending arc is
/// revised against the domains as they stand at pop time, duplicates add
/// work without adding information.
pub struct WorkList<T> {
    queue: VecDeque<T>,
    members: HashSet<T>,
}

impl<T: Copy + Eq + Hash> WorkList<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, item: T) {
        if self.members.insert(item) {
            self.queue.push_back(item);
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let item = self.queue.pop_front()?;
        self.members.remove(&item);
        Some(item)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T: Copy + Eq + Hash> Default for WorkList<T> {
    fn default() -> Self {
        Self::new()
    }
}
