//! Collaborators around a preferences store
//!
//! The store never owns a browsing context; it is owned by one. These traits
//! are the surface it needs from the host: the main frame's process id for
//! registry lookups, a slot to live in, and the embedder/window chain used
//! to tell a guest renderer that its page starts hidden.
//!
//! [`HeadlessWebContents`] is a complete host with no real renderer behind
//! it, used by the command-line tool and handy in tests.

use crate::error::{Error, Result};
use crate::preferences::WebContentsPreferences;
use std::cell::{Cell, OnceCell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Identifier of a renderer process
pub type ProcessId = i32;

/// Top-level window hosting a browsing context
pub trait NativeWindow {
    fn is_visible(&self) -> bool;
    fn is_minimized(&self) -> bool;
}

/// Resolves guest instances to the browsing context embedding them
pub trait GuestViewManager {
    fn embedder(&self, guest_instance_id: i32) -> Option<Rc<dyn WebContents>>;
}

/// A live browsing context
pub trait WebContents {
    /// Process currently hosting the main frame
    fn main_frame_process_id(&self) -> ProcessId;

    /// Storage for the one preferences store this host owns
    fn preferences_slot(&self) -> &PreferencesSlot;

    fn guest_view_manager(&self) -> Option<Rc<dyn GuestViewManager>> {
        None
    }

    fn native_window(&self) -> Option<Rc<dyn NativeWindow>> {
        None
    }
}

/// Write-once slot holding a host's preferences store
///
/// Dropping the slot drops the store, which removes it from its registry.
#[derive(Debug, Default)]
pub struct PreferencesSlot {
    cell: OnceCell<RefCell<WebContentsPreferences>>,
}

impl PreferencesSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&RefCell<WebContentsPreferences>> {
        self.cell.get()
    }

    pub fn is_attached(&self) -> bool {
        self.cell.get().is_some()
    }

    pub(crate) fn attach(
        &self,
        preferences: WebContentsPreferences,
    ) -> Result<&RefCell<WebContentsPreferences>> {
        self.cell
            .set(RefCell::new(preferences))
            .map_err(|_| Error::AlreadyAttached)?;
        self.cell.get().ok_or(Error::AlreadyAttached)
    }
}

/// Browsing context without a renderer behind it
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use webprefs::{HeadlessWebContents, PrefDict, PreferencesRegistry, WebContents,
///     WebContentsPreferences};
///
/// let registry = PreferencesRegistry::new();
/// let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(42));
/// WebContentsPreferences::attach(&host, &registry, &PrefDict::new())?;
///
/// assert!(registry.web_contents_from_process_id(42).is_some());
/// drop(host);
/// assert!(registry.web_contents_from_process_id(42).is_none());
/// # Ok::<(), webprefs::Error>(())
/// ```
#[derive(Default)]
pub struct HeadlessWebContents {
    process_id: Cell<ProcessId>,
    preferences: PreferencesSlot,
    guest_view_manager: RefCell<Option<Rc<dyn GuestViewManager>>>,
    native_window: RefCell<Option<Rc<dyn NativeWindow>>>,
}

impl HeadlessWebContents {
    pub fn new(process_id: ProcessId) -> Self {
        Self {
            process_id: Cell::new(process_id),
            ..Self::default()
        }
    }

    /// Move the main frame to another process
    pub fn set_process_id(&self, process_id: ProcessId) {
        self.process_id.set(process_id);
    }

    pub fn set_guest_view_manager(&self, manager: Option<Rc<dyn GuestViewManager>>) {
        *self.guest_view_manager.borrow_mut() = manager;
    }

    pub fn set_native_window(&self, window: Option<Rc<dyn NativeWindow>>) {
        *self.native_window.borrow_mut() = window;
    }
}

impl WebContents for HeadlessWebContents {
    fn main_frame_process_id(&self) -> ProcessId {
        self.process_id.get()
    }

    fn preferences_slot(&self) -> &PreferencesSlot {
        &self.preferences
    }

    fn guest_view_manager(&self) -> Option<Rc<dyn GuestViewManager>> {
        self.guest_view_manager.borrow().clone()
    }

    fn native_window(&self) -> Option<Rc<dyn NativeWindow>> {
        self.native_window.borrow().clone()
    }
}

/// Window whose visibility is set by hand
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    visible: Cell<bool>,
    minimized: Cell<bool>,
}

impl HeadlessWindow {
    pub fn new(visible: bool, minimized: bool) -> Self {
        Self {
            visible: Cell::new(visible),
            minimized: Cell::new(minimized),
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn set_minimized(&self, minimized: bool) {
        self.minimized.set(minimized);
    }
}

impl NativeWindow for HeadlessWindow {
    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn is_minimized(&self) -> bool {
        self.minimized.get()
    }
}

/// Guest view manager backed by an explicit guest-to-embedder table
///
/// Embedders are held weakly; a dropped embedder resolves to `None`.
#[derive(Default)]
pub struct HeadlessGuestViewManager {
    embedders: RefCell<BTreeMap<i32, Weak<dyn WebContents>>>,
}

impl HeadlessGuestViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_guest(&self, guest_instance_id: i32, embedder: &Rc<dyn WebContents>) {
        self.embedders
            .borrow_mut()
            .insert(guest_instance_id, Rc::downgrade(embedder));
    }

    pub fn remove_guest(&self, guest_instance_id: i32) {
        self.embedders.borrow_mut().remove(&guest_instance_id);
    }
}

impl GuestViewManager for HeadlessGuestViewManager {
    fn embedder(&self, guest_instance_id: i32) -> Option<Rc<dyn WebContents>> {
        self.embedders
            .borrow()
            .get(&guest_instance_id)
            .and_then(Weak::upgrade)
    }
}
