use std::collections::VecDeque;
use std::sync::Mutex;

/// Append-only, ordered record of failure descriptions for the life of the
/// process. Bounded: once `capacity` entries are held, appending drops the
/// oldest entry. Entries are never mutated or deduplicated.
///
/// The client is single-flight, so there is never more than one writer at a
/// time; the mutex is the discipline any future concurrent caller has to go
/// through.
pub struct ErrorLog {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl ErrorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Record one failure description
    pub fn append(&self, message: impl Into<String>) {
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(message.into());
    }

    /// All recorded failures, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
