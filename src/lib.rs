//! # webprefs - Web Contents Preferences
//!
//! This library resolves the loosely-typed preferences a caller supplies for a
//! browsing context ("web contents") against a fixed default policy, and
//! projects the result into the two places that consume it: the command line
//! of the renderer process and the render engine's own preferences structure.
//!
//! ## Features
//!
//! - Dynamically-typed preference bags where a missing or wrong-typed value
//!   silently falls back to its default
//! - Security-sensitive defaulting: sandboxed contents always handle
//!   `window.open` natively, and disabling web security lets insecure content
//!   in unless the caller says otherwise
//! - Renderer launch arguments with a fixed, verbatim switch vocabulary
//! - Render-engine preference overrides (fonts, sizes, WebGL, web security)
//! - A registry to find a browsing context by its main frame's process id
//! - Glob queries over a resolved bag
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use webprefs::{CommandLine, HeadlessWebContents, LaunchConfig, PrefDict,
//!     PreferencesRegistry, WebContents, WebContentsPreferences};
//!
//! let registry = PreferencesRegistry::new();
//! let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(7));
//!
//! let bag = PrefDict::from_json_str(r#"{"webSecurity": false, "offscreen": true}"#)?;
//! let prefs = WebContentsPreferences::attach(&host, &registry, &bag)?;
//!
//! // Defaults were filled in at construction
//! assert!(prefs.borrow().is_enabled("nodeIntegration"));
//! assert!(prefs.borrow().is_enabled("allowRunningInsecureContent"));
//!
//! let mut command_line = CommandLine::new("renderer");
//! prefs
//!     .borrow_mut()
//!     .append_command_line_switches(&mut command_line, &LaunchConfig::default());
//! assert!(command_line.has_switch("no-sandbox"));
//! assert!(!command_line.has_switch("background-color"));
//! # Ok::<(), webprefs::Error>(())
//! ```
//!
//! ### Reconfiguring
//!
//! ```rust
//! use std::rc::Rc;
//! use webprefs::{HeadlessWebContents, PrefDict, PreferencesRegistry, WebContents,
//!     WebContentsPreferences};
//!
//! let registry = PreferencesRegistry::new();
//! let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(7));
//! let prefs = WebContentsPreferences::attach(&host, &registry, &PrefDict::new())?;
//!
//! let mut extend = PrefDict::new();
//! extend.set("sandbox", true);
//! prefs.borrow_mut().merge(&extend);
//! assert!(prefs.borrow().is_enabled("nativeWindowOpen"));
//!
//! prefs.borrow_mut().clear();
//! assert!(prefs.borrow().preferences().is_empty());
//! # Ok::<(), webprefs::Error>(())
//! ```
//!
//! ## Threading
//!
//! Stores, hosts and the registry are built on `Rc` and `RefCell` and stay on
//! the thread that created them.

// Re-export all public types at crate root
pub use types::{PrefDict, PrefValue};

// Re-export error types
pub use error::{Error, Result};

pub use command_line::CommandLine;
pub use host::{
    GuestViewManager, HeadlessGuestViewManager, HeadlessWebContents, HeadlessWindow, NativeWindow,
    PreferencesSlot, ProcessId, WebContents,
};
pub use preferences::{LaunchConfig, WebContentsPreferences, DEFAULT_USER_AGENT};
pub use query::query_preferences;
pub use registry::PreferencesRegistry;
pub use web_preferences::{ScriptFontFamilyMap, WebPreferences, COMMON_SCRIPT};

pub mod keys;

mod command_line;
mod error;
mod host;
mod preferences;
mod query;
mod registry;
mod types;
mod web_preferences;
