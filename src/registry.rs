//! Registry of live preferences stores
//!
//! Lets a browsing context be found from the id of the process hosting its
//! main frame, which is how a guest discovers its embedder. Entries hold only
//! weak references to their hosts and are removed when the owning store's
//! [`Registration`] drops, so the registry never outlives what it points at.
//!
//! The registry is not thread-safe. Stores, registrations and lookups all
//! live on one thread.

use crate::host::{ProcessId, WebContents};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Process-wide table of browsing contexts with a preferences store
#[derive(Debug, Default)]
pub struct PreferencesRegistry {
    entries: RefCell<Vec<(u64, Weak<dyn WebContents>)>>,
    next_id: Cell<u64>,
}

impl PreferencesRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Add an entry that lives as long as the returned guard
    pub(crate) fn register(self: &Rc<Self>, web_contents: Weak<dyn WebContents>) -> Registration {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, web_contents));
        tracing::debug!(id, live = self.len(), "registered web contents preferences");

        Registration {
            registry: Rc::clone(self),
            id,
        }
    }

    fn unregister(&self, id: u64) {
        self.entries.borrow_mut().retain(|(entry, _)| *entry != id);
        tracing::debug!(id, live = self.len(), "unregistered web contents preferences");
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Find the browsing context whose main frame runs in `process_id`
    ///
    /// The process is read from each host at lookup time, so a context that
    /// moved to another process is found under its new id.
    pub fn web_contents_from_process_id(
        &self,
        process_id: ProcessId,
    ) -> Option<Rc<dyn WebContents>> {
        let candidates: Vec<Weak<dyn WebContents>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, web_contents)| web_contents.clone())
            .collect();

        candidates
            .iter()
            .filter_map(Weak::upgrade)
            .find(|web_contents| web_contents.main_frame_process_id() == process_id)
    }
}

/// Scoped registry entry; dropping it removes the entry
#[derive(Debug)]
pub struct Registration {
    registry: Rc<PreferencesRegistry>,
    id: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}
