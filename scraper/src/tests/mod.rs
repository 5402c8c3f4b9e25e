use std::sync::{Mutex, MutexGuard};

use log::Level;

use crate::reporter::Reporter;

pub mod fixtures;

static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that write executables and spawn children.
///
/// Executing a freshly written script fails with ETXTBSY if another thread
/// forks while the script's write handle is still open.
pub fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Keeps every reported message for later assertions
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}
