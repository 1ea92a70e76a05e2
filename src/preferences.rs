//! Per-browsing-context preferences store
//!
//! [`WebContentsPreferences`] owns the configuration bag of one browsing
//! context. At construction it fills in the default policy; afterwards it
//! projects the bag into renderer launch arguments
//! ([`append_command_line_switches`](WebContentsPreferences::append_command_line_switches))
//! and into the render engine's [`WebPreferences`]
//! ([`override_web_preferences`](WebContentsPreferences::override_web_preferences)).
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use webprefs::{CommandLine, HeadlessWebContents, LaunchConfig, PrefDict,
//!     PreferencesRegistry, WebContents, WebContentsPreferences, WebPreferences};
//!
//! let registry = PreferencesRegistry::new();
//! let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(1));
//!
//! let mut bag = PrefDict::new();
//! bag.set("sandbox", true);
//! bag.set("webgl", false);
//! let prefs = WebContentsPreferences::attach(&host, &registry, &bag)?;
//!
//! let mut command_line = CommandLine::new("renderer");
//! prefs
//!     .borrow_mut()
//!     .append_command_line_switches(&mut command_line, &LaunchConfig::default());
//! assert!(command_line.has_switch("enable-sandbox"));
//! assert!(command_line.has_switch("native-window-open"));
//!
//! let mut web_prefs = WebPreferences::default();
//! prefs.borrow().override_web_preferences(&mut web_prefs);
//! assert!(!web_prefs.webgl1_enabled && !web_prefs.webgl2_enabled);
//! # Ok::<(), webprefs::Error>(())
//! ```

use crate::command_line::CommandLine;
use crate::error::{Error, Result};
use crate::host::WebContents;
use crate::keys::{options, switches};
use crate::registry::{PreferencesRegistry, Registration};
use crate::types::PrefDict;
use crate::web_preferences::{WebPreferences, COMMON_SCRIPT};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use url::Url;

/// User agent reported when the embedder does not configure one
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 AppleWebKit/537.36 (KHTML, like Gecko) webprefs/",
    env!("CARGO_PKG_VERSION")
);

/// Whether this platform honors the scroll bounce preference
const PLATFORM_HAS_SCROLL_BOUNCE: bool = cfg!(target_os = "macos");

/// Process-wide inputs to the command-line projection
///
/// # Example
///
/// ```rust
/// use webprefs::LaunchConfig;
///
/// let config = LaunchConfig {
///     user_agent: "MyApp/1.0".to_string(),
///     ..LaunchConfig::default()
/// };
/// assert_eq!(config.user_agent, "MyApp/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Content-layer default user agent
    pub user_agent: String,
    /// Emit `--scroll-bounce` when the bag enables it
    pub scroll_bounce_supported: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            scroll_bounce_supported: PLATFORM_HAS_SCROLL_BOUNCE,
        }
    }
}

/// Preferences of one browsing context
#[derive(Debug)]
pub struct WebContentsPreferences {
    web_contents: Weak<dyn WebContents>,
    preference: PrefDict,
    last_preference: PrefDict,
    _registration: Registration,
}

impl WebContentsPreferences {
    /// Create the store for `web_contents` and hand it to the host's slot
    ///
    /// The store is registered in `registry` for as long as the host keeps
    /// it. A host holds at most one store; attaching again fails with
    /// [`Error::AlreadyAttached`] and leaves the existing store in place.
    pub fn attach<'a>(
        web_contents: &'a Rc<dyn WebContents>,
        registry: &Rc<PreferencesRegistry>,
        web_preferences: &PrefDict,
    ) -> Result<&'a RefCell<Self>> {
        let slot = web_contents.preferences_slot();
        if slot.is_attached() {
            return Err(Error::AlreadyAttached);
        }

        let registration = registry.register(Rc::downgrade(web_contents));
        let preferences = Self::new(Rc::downgrade(web_contents), registration, web_preferences);
        slot.attach(preferences)
    }

    /// The store attached to `web_contents`, if any
    pub fn from_web_contents(web_contents: Option<&dyn WebContents>) -> Option<&RefCell<Self>> {
        web_contents?.preferences_slot().get()
    }

    fn new(
        web_contents: Weak<dyn WebContents>,
        registration: Registration,
        web_preferences: &PrefDict,
    ) -> Self {
        let mut preference = web_preferences.clone();
        // Construction context, not behavior.
        preference.remove(options::EMBEDDER);
        preference.remove(options::IS_GUEST);
        preference.remove(options::SESSION);

        let mut preferences = Self {
            web_contents,
            preference,
            last_preference: PrefDict::new(),
            _registration: registration,
        };

        // Must be evaluated before any default is filled in.
        let node_integration = preferences.is_enabled(options::NODE_INTEGRATION);
        let context_isolation = preferences.is_enabled_or(options::CONTEXT_ISOLATION, true);
        let webview_tag = preferences.is_enabled_or(options::WEBVIEW_TAG, node_integration);
        preferences.set_bool(
            options::NODE_INTEGRATION_WAS_EXPLICITLY_ENABLED,
            node_integration,
        );
        preferences.set_bool(
            options::CONTEXT_ISOLATION_WAS_EXPLICITLY_DISABLED,
            !context_isolation,
        );
        preferences.set_bool(options::WEBVIEW_TAG_WAS_EXPLICITLY_ENABLED, webview_tag);

        let web_security_disabled =
            web_preferences.find_bool(options::WEB_SECURITY) == Some(false);
        preferences.apply_default_values(web_security_disabled);
        preferences.set_defaults();

        preferences.last_preference = preferences.preference.clone();
        preferences
    }

    /// Fill every absent default key, in dependency order
    ///
    /// `webviewTag` reads the resolved `nodeIntegration`, so the order of the
    /// calls below is part of the policy.
    fn apply_default_values(&mut self, web_security_disabled: bool) {
        self.set_default_bool_if_undefined(options::PLUGINS, false);
        self.set_default_bool_if_undefined(options::EXPERIMENTAL_FEATURES, false);
        let node = self.set_default_bool_if_undefined(options::NODE_INTEGRATION, true);
        self.set_default_bool_if_undefined(options::NODE_INTEGRATION_IN_WORKER, false);
        self.set_default_bool_if_undefined(options::WEBVIEW_TAG, node);
        self.set_default_bool_if_undefined(options::SANDBOX, false);
        self.set_default_bool_if_undefined(options::NATIVE_WINDOW_OPEN, false);
        self.set_default_bool_if_undefined(options::CONTEXT_ISOLATION, false);
        self.set_default_bool_if_undefined(options::JAVASCRIPT, true);
        self.set_default_bool_if_undefined(options::IMAGES, true);
        self.set_default_bool_if_undefined(options::TEXT_AREAS_ARE_RESIZABLE, true);
        self.set_default_bool_if_undefined(options::WEBGL, true);
        self.set_default_bool_if_undefined(options::WEB_SECURITY, true);
        // Turning off web security explicitly also lets insecure content in,
        // unless the caller says otherwise.
        self.set_default_bool_if_undefined(
            options::ALLOW_RUNNING_INSECURE_CONTENT,
            web_security_disabled,
        );
        if PLATFORM_HAS_SCROLL_BOUNCE {
            self.set_default_bool_if_undefined(options::SCROLL_BOUNCE, false);
        }
        self.set_default_bool_if_undefined(options::OFFSCREEN, false);
    }

    /// Policy that must hold after construction and after every merge
    fn set_defaults(&mut self) {
        if self.is_enabled(options::SANDBOX) {
            self.set_bool(options::NATIVE_WINDOW_OPEN, true);
        }
    }

    /// Store `value` unless a boolean is already present; return the result
    fn set_default_bool_if_undefined(&mut self, key: &str, value: bool) -> bool {
        match self.preference.find_bool(key) {
            Some(current) => current,
            None => {
                self.set_bool(key, value);
                value
            }
        }
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.preference.set(key, value);
    }

    /// Boolean at `name`, `false` when absent or not a boolean
    pub fn is_enabled(&self, name: &str) -> bool {
        self.is_enabled_or(name, false)
    }

    /// Boolean at `name`, `default_value` when absent or not a boolean
    pub fn is_enabled_or(&self, name: &str, default_value: bool) -> bool {
        self.preference.find_bool(name).unwrap_or(default_value)
    }

    /// String at `name`, if present and a string
    pub fn get_preference(&self, name: &str) -> Option<&str> {
        self.preference.find_string(name)
    }

    pub fn is_remote_module_enabled(&self) -> bool {
        self.is_enabled_or(options::ENABLE_REMOTE_MODULE, true)
    }

    /// Shallow-merge `extend` into the bag, then re-apply the sandbox policy
    pub fn merge(&mut self, extend: &PrefDict) {
        self.preference.merge(extend);
        self.set_defaults();
    }

    pub fn clear(&mut self) {
        self.preference.clear();
    }

    /// Current bag
    pub fn preferences(&self) -> &PrefDict {
        &self.preference
    }

    /// Bag as of construction or the last command-line projection
    pub fn last_preferences(&self) -> &PrefDict {
        &self.last_preference
    }

    /// The owning browsing context, while it is alive
    pub fn web_contents(&self) -> Option<Rc<dyn WebContents>> {
        self.web_contents.upgrade()
    }

    /// Resolve the preload script to a filesystem path
    ///
    /// An absolute `preloadScript` path wins. Otherwise a `file://`
    /// `preloadURL` is converted to a path. A relative script path or a URL
    /// with another scheme is logged and ignored.
    pub fn get_preload_path(&self) -> Option<PathBuf> {
        if let Some(preload) = self.preference.find_string(options::PRELOAD_SCRIPT) {
            let path = Path::new(preload);
            if path.is_absolute() {
                return Some(path.to_path_buf());
            }
            tracing::error!(preload, "preload script must have absolute path");
            None
        } else if let Some(preload) = self.preference.find_string(options::PRELOAD_URL) {
            let path = Url::parse(preload)
                .ok()
                .filter(|url| url.scheme() == "file")
                .and_then(|url| url.to_file_path().ok());
            if path.is_none() {
                tracing::error!(preload, "preload url must be file:// protocol");
            }
            path
        } else {
            None
        }
    }

    /// Append the renderer switches this bag asks for
    ///
    /// Also refreshes [`last_preferences`](Self::last_preferences): the bag
    /// at this point is what the renderer was launched with.
    pub fn append_command_line_switches(
        &mut self,
        command_line: &mut CommandLine,
        config: &LaunchConfig,
    ) {
        command_line.append_switch_ascii(switches::USER_AGENT, &config.user_agent);

        if self.is_enabled(options::PLUGINS) {
            command_line.append_switch(switches::ENABLE_PLUGINS);
        }

        if self.is_enabled(options::EXPERIMENTAL_FEATURES) {
            command_line.append_switch(switches::ENABLE_EXPERIMENTAL_WEB_PLATFORM_FEATURES);
        }

        let node_integration = self.is_enabled_or(options::NODE_INTEGRATION, true);
        command_line.append_switch_ascii(switches::NODE_INTEGRATION, bool_str(node_integration));

        if self.is_enabled(options::NODE_INTEGRATION_IN_WORKER) {
            command_line.append_switch(switches::NODE_INTEGRATION_IN_WORKER);
        }

        let webview_tag = self.is_enabled_or(options::WEBVIEW_TAG, node_integration);
        command_line.append_switch_ascii(switches::WEBVIEW_TAG, bool_str(webview_tag));

        // A sandbox requested elsewhere is never downgraded.
        if self.is_enabled(options::SANDBOX) {
            command_line.append_switch(switches::ENABLE_SANDBOX);
        } else if !command_line.has_switch(switches::ENABLE_SANDBOX) {
            command_line.append_switch(switches::NO_SANDBOX);
        }

        if self.is_enabled(options::NATIVE_WINDOW_OPEN) {
            command_line.append_switch(switches::NATIVE_WINDOW_OPEN);
        }

        if let Some(preload) = self.get_preload_path() {
            command_line.append_switch_native(switches::PRELOAD_SCRIPT, preload);
        }

        if let Some(custom_args) = self.preference.find_list(options::CUSTOM_ARGS) {
            for arg in custom_args.iter().filter_map(|arg| arg.as_str()) {
                command_line.append_arg(arg);
            }
        }

        if !self.is_remote_module_enabled() {
            command_line.append_switch(switches::DISABLE_REMOTE_MODULE);
        }

        if self.is_enabled(options::CONTEXT_ISOLATION) {
            command_line.append_switch(switches::CONTEXT_ISOLATION);
        }

        if let Some(color) = self.preference.find_string(options::BACKGROUND_COLOR) {
            command_line.append_switch_ascii(switches::BACKGROUND_COLOR, color);
        } else if !self.is_enabled(options::OFFSCREEN) {
            // Onscreen contents never start transparent.
            command_line.append_switch_ascii(switches::BACKGROUND_COLOR, "#fff");
        }

        let guest_instance_id = self.preference.find_integer(options::GUEST_INSTANCE_ID);
        if let Some(id) = guest_instance_id {
            command_line.append_switch_ascii(switches::GUEST_INSTANCE_ID, &id.to_string());
        }

        if let Some(opener_id) = self.preference.find_integer(options::OPENER_ID) {
            command_line.append_switch_ascii(switches::OPENER_ID, &opener_id.to_string());
        }

        if config.scroll_bounce_supported && self.is_enabled(options::SCROLL_BOUNCE) {
            command_line.append_switch(switches::SCROLL_BOUNCE);
        }

        if let Some(args) = self.preference.find_list(options::COMMAND_LINE_SWITCHES) {
            for arg in args.iter().filter_map(|arg| arg.as_str()) {
                if !arg.is_empty() {
                    command_line.append_switch(arg);
                }
            }
        }

        if let Some(features) = self.preference.find_string(options::ENABLE_BLINK_FEATURES) {
            command_line.append_switch_ascii(switches::ENABLE_BLINK_FEATURES, features);
        }

        if let Some(features) = self.preference.find_string(options::DISABLE_BLINK_FEATURES) {
            command_line.append_switch_ascii(switches::DISABLE_BLINK_FEATURES, features);
        }

        // The guest's visibility state follows its embedder's window.
        if let Some(id) = guest_instance_id.filter(|id| *id != 0) {
            if self.is_embedder_window_hidden(id) {
                command_line.append_switch(switches::HIDDEN_PAGE);
            }
        }

        tracing::trace!(argv = ?command_line.argv_lossy(), "appended renderer switches");
        self.last_preference = self.preference.clone();
    }

    /// Any missing link between guest and window means "not hidden"
    fn is_embedder_window_hidden(&self, guest_instance_id: i32) -> bool {
        self.web_contents
            .upgrade()
            .and_then(|web_contents| web_contents.guest_view_manager())
            .and_then(|manager| manager.embedder(guest_instance_id))
            .and_then(|embedder| embedder.native_window())
            .is_some_and(|window| !(window.is_visible() && !window.is_minimized()))
    }

    /// Override the render-engine fields this bag configures
    pub fn override_web_preferences(&self, prefs: &mut WebPreferences) {
        prefs.javascript_enabled = self.is_enabled_or(options::JAVASCRIPT, true);
        prefs.images_enabled = self.is_enabled_or(options::IMAGES, true);
        prefs.text_areas_are_resizable =
            self.is_enabled_or(options::TEXT_AREAS_ARE_RESIZABLE, true);
        prefs.navigate_on_drag_drop = self.is_enabled_or(options::NAVIGATE_ON_DRAG_DROP, false);

        let webgl = self.is_enabled_or(options::WEBGL, true);
        prefs.webgl1_enabled = webgl;
        prefs.webgl2_enabled = webgl;

        let web_security = self.is_enabled_or(options::WEB_SECURITY, true);
        prefs.web_security_enabled = web_security;
        prefs.allow_running_insecure_content =
            self.is_enabled_or(options::ALLOW_RUNNING_INSECURE_CONTENT, !web_security);

        if let Some(fonts) = self.preference.find_dict(options::DEFAULT_FONT_FAMILY) {
            use crate::keys::options::font_family;
            let targets = [
                (font_family::STANDARD, &mut prefs.standard_font_family_map),
                (font_family::SERIF, &mut prefs.serif_font_family_map),
                (font_family::SANS_SERIF, &mut prefs.sans_serif_font_family_map),
                (font_family::MONOSPACE, &mut prefs.fixed_font_family_map),
                (font_family::CURSIVE, &mut prefs.cursive_font_family_map),
                (font_family::FANTASY, &mut prefs.fantasy_font_family_map),
            ];
            for (key, map) in targets {
                if let Some(font) = fonts.find_string(key) {
                    map.insert(COMMON_SCRIPT.to_string(), font.to_string());
                }
            }
        }

        if let Some(size) = self.preference.find_integer(options::DEFAULT_FONT_SIZE) {
            prefs.default_font_size = size;
        }
        if let Some(size) = self
            .preference
            .find_integer(options::DEFAULT_MONOSPACE_FONT_SIZE)
        {
            prefs.default_fixed_font_size = size;
        }
        if let Some(size) = self.preference.find_integer(options::MINIMUM_FONT_SIZE) {
            prefs.minimum_font_size = size;
        }
        if let Some(encoding) = self.preference.find_string(options::DEFAULT_ENCODING) {
            prefs.default_encoding = encoding.to_string();
        }

        // Unlike the launch switch, the engine-side default stays off.
        prefs.node_integration = self.is_enabled(options::NODE_INTEGRATION);
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessGuestViewManager, HeadlessWebContents, HeadlessWindow};
    use crate::types::PrefValue;
    use std::ffi::{OsStr, OsString};

    struct Fixture {
        registry: Rc<PreferencesRegistry>,
        host: Rc<dyn WebContents>,
    }

    impl Fixture {
        fn new(bag: PrefDict) -> Self {
            let registry = PreferencesRegistry::new();
            let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(1));
            WebContentsPreferences::attach(&host, &registry, &bag).unwrap();
            Self { registry, host }
        }

        fn prefs(&self) -> &RefCell<WebContentsPreferences> {
            WebContentsPreferences::from_web_contents(Some(&*self.host)).unwrap()
        }

        fn command_line(&self) -> CommandLine {
            let mut command_line = CommandLine::new("renderer");
            self.prefs()
                .borrow_mut()
                .append_command_line_switches(&mut command_line, &LaunchConfig::default());
            command_line
        }

        fn web_preferences(&self) -> WebPreferences {
            let mut prefs = WebPreferences::default();
            self.prefs().borrow().override_web_preferences(&mut prefs);
            prefs
        }
    }

    fn bag<const N: usize>(entries: [(&str, PrefValue); N]) -> PrefDict {
        entries.into_iter().collect()
    }

    #[test]
    fn test_defaults_fill_absent_keys() {
        let fixture = Fixture::new(PrefDict::new());
        let prefs = fixture.prefs().borrow();

        assert!(prefs.is_enabled(options::NODE_INTEGRATION));
        assert!(prefs.is_enabled(options::WEBVIEW_TAG));
        assert!(!prefs.is_enabled(options::SANDBOX));
        assert!(!prefs.is_enabled(options::NATIVE_WINDOW_OPEN));
        assert!(!prefs.is_enabled(options::ALLOW_RUNNING_INSECURE_CONTENT));
        for key in [
            options::PLUGINS,
            options::EXPERIMENTAL_FEATURES,
            options::NODE_INTEGRATION_IN_WORKER,
            options::CONTEXT_ISOLATION,
            options::OFFSCREEN,
        ] {
            assert_eq!(prefs.preferences().find_bool(key), Some(false), "{key}");
        }
        for key in [
            options::JAVASCRIPT,
            options::IMAGES,
            options::TEXT_AREAS_ARE_RESIZABLE,
            options::WEBGL,
            options::WEB_SECURITY,
        ] {
            assert_eq!(prefs.preferences().find_bool(key), Some(true), "{key}");
        }
        assert_eq!(
            prefs.preferences().contains_key(options::SCROLL_BOUNCE),
            PLATFORM_HAS_SCROLL_BOUNCE
        );
    }

    #[test]
    fn test_webview_tag_inherits_resolved_node_integration() {
        let fixture = Fixture::new(bag([(options::NODE_INTEGRATION, false.into())]));
        assert!(!fixture.prefs().borrow().is_enabled(options::WEBVIEW_TAG));
    }

    #[test]
    fn test_wrong_typed_value_is_replaced_by_default() {
        let fixture = Fixture::new(bag([
            (options::NODE_INTEGRATION, "false".into()),
            (options::WEBGL, 0.into()),
        ]));
        let prefs = fixture.prefs().borrow();

        assert_eq!(prefs.preferences().find_bool(options::NODE_INTEGRATION), Some(true));
        assert_eq!(prefs.preferences().find_bool(options::WEBGL), Some(true));
    }

    #[test]
    fn test_transient_keys_are_dropped() {
        let fixture = Fixture::new(bag([
            (options::EMBEDDER, 4.into()),
            (options::IS_GUEST, true.into()),
            (options::SESSION, "persist:main".into()),
            ("somethingCustom", "kept".into()),
        ]));
        let prefs = fixture.prefs().borrow();

        for key in [options::EMBEDDER, options::IS_GUEST, options::SESSION] {
            assert!(!prefs.preferences().contains_key(key));
            assert!(!prefs.last_preferences().contains_key(key));
        }
        assert_eq!(prefs.get_preference("somethingCustom"), Some("kept"));
    }

    #[test]
    fn test_explicit_request_flags() {
        let fixture = Fixture::new(PrefDict::new());
        {
            let prefs = fixture.prefs().borrow();
            assert!(!prefs.is_enabled(options::NODE_INTEGRATION_WAS_EXPLICITLY_ENABLED));
            assert!(!prefs.is_enabled(options::CONTEXT_ISOLATION_WAS_EXPLICITLY_DISABLED));
            assert!(!prefs.is_enabled(options::WEBVIEW_TAG_WAS_EXPLICITLY_ENABLED));
        }

        let fixture = Fixture::new(bag([
            (options::NODE_INTEGRATION, true.into()),
            (options::CONTEXT_ISOLATION, false.into()),
        ]));
        let prefs = fixture.prefs().borrow();
        assert!(prefs.is_enabled(options::NODE_INTEGRATION_WAS_EXPLICITLY_ENABLED));
        assert!(prefs.is_enabled(options::CONTEXT_ISOLATION_WAS_EXPLICITLY_DISABLED));
        assert!(prefs.is_enabled(options::WEBVIEW_TAG_WAS_EXPLICITLY_ENABLED));
    }

    #[test]
    fn test_explicit_flags_survive_merge() {
        let fixture = Fixture::new(bag([(options::NODE_INTEGRATION, true.into())]));
        fixture
            .prefs()
            .borrow_mut()
            .merge(&bag([(options::NODE_INTEGRATION, false.into())]));

        let prefs = fixture.prefs().borrow();
        assert!(!prefs.is_enabled(options::NODE_INTEGRATION));
        assert!(prefs.is_enabled(options::NODE_INTEGRATION_WAS_EXPLICITLY_ENABLED));
    }

    #[test]
    fn test_sandbox_forces_native_window_open() {
        let fixture = Fixture::new(bag([
            (options::SANDBOX, true.into()),
            (options::NATIVE_WINDOW_OPEN, false.into()),
        ]));
        assert!(fixture.prefs().borrow().is_enabled(options::NATIVE_WINDOW_OPEN));

        fixture
            .prefs()
            .borrow_mut()
            .merge(&bag([(options::NATIVE_WINDOW_OPEN, false.into())]));
        assert!(fixture.prefs().borrow().is_enabled(options::NATIVE_WINDOW_OPEN));
    }

    #[test]
    fn test_merge_enabling_sandbox_applies_policy() {
        let fixture = Fixture::new(PrefDict::new());
        fixture
            .prefs()
            .borrow_mut()
            .merge(&bag([(options::SANDBOX, true.into())]));
        assert!(fixture.prefs().borrow().is_enabled(options::NATIVE_WINDOW_OPEN));
    }

    #[test]
    fn test_insecure_content_inherits_disabled_web_security() {
        let fixture = Fixture::new(bag([(options::WEB_SECURITY, false.into())]));
        assert!(fixture
            .prefs()
            .borrow()
            .is_enabled(options::ALLOW_RUNNING_INSECURE_CONTENT));

        let fixture = Fixture::new(bag([
            (options::WEB_SECURITY, false.into()),
            (options::ALLOW_RUNNING_INSECURE_CONTENT, false.into()),
        ]));
        assert!(!fixture
            .prefs()
            .borrow()
            .is_enabled(options::ALLOW_RUNNING_INSECURE_CONTENT));
    }

    #[test]
    fn test_clear_empties_bag() {
        let fixture = Fixture::new(bag([
            (options::SANDBOX, true.into()),
            (options::BACKGROUND_COLOR, "#000".into()),
        ]));
        fixture.prefs().borrow_mut().clear();

        let prefs = fixture.prefs().borrow();
        assert!(prefs.preferences().is_empty());
        assert!(!prefs.is_enabled(options::SANDBOX));
        assert!(!prefs.is_enabled(options::NATIVE_WINDOW_OPEN));
        assert!(prefs.is_enabled_or(options::JAVASCRIPT, true));
        assert_eq!(prefs.get_preference(options::BACKGROUND_COLOR), None);
        assert!(prefs.is_remote_module_enabled());
    }

    #[test]
    fn test_preload_path_resolution() {
        let fixture = Fixture::new(bag([(options::PRELOAD_SCRIPT, "a.js".into())]));
        assert_eq!(fixture.prefs().borrow().get_preload_path(), None);

        let fixture = Fixture::new(bag([(
            options::PRELOAD_URL,
            "http://example.com/x.js".into(),
        )]));
        assert_eq!(fixture.prefs().borrow().get_preload_path(), None);

        let fixture = Fixture::new(bag([(options::PRELOAD_URL, "not a url".into())]));
        assert_eq!(fixture.prefs().borrow().get_preload_path(), None);

        #[cfg(unix)]
        {
            let fixture = Fixture::new(bag([(options::PRELOAD_SCRIPT, "/tmp/a.js".into())]));
            assert_eq!(
                fixture.prefs().borrow().get_preload_path(),
                Some(PathBuf::from("/tmp/a.js"))
            );

            let fixture =
                Fixture::new(bag([(options::PRELOAD_URL, "file:///tmp/x.js".into())]));
            assert_eq!(
                fixture.prefs().borrow().get_preload_path(),
                Some(PathBuf::from("/tmp/x.js"))
            );
        }
    }

    #[test]
    fn test_relative_preload_script_shadows_url() {
        let fixture = Fixture::new(bag([
            (options::PRELOAD_SCRIPT, "relative.js".into()),
            (options::PRELOAD_URL, "file:///tmp/x.js".into()),
        ]));
        assert_eq!(fixture.prefs().borrow().get_preload_path(), None);
    }

    #[test]
    fn test_default_command_line() {
        let fixture = Fixture::new(PrefDict::new());
        let command_line = fixture.command_line();

        assert_eq!(
            command_line.get_switch_value(switches::USER_AGENT),
            Some(OsStr::new(DEFAULT_USER_AGENT))
        );
        assert_eq!(
            command_line.get_switch_value(switches::NODE_INTEGRATION),
            Some(OsStr::new("true"))
        );
        assert_eq!(
            command_line.get_switch_value(switches::WEBVIEW_TAG),
            Some(OsStr::new("true"))
        );
        assert!(command_line.has_switch(switches::NO_SANDBOX));
        assert!(!command_line.has_switch(switches::ENABLE_SANDBOX));
        assert_eq!(
            command_line.get_switch_value(switches::BACKGROUND_COLOR),
            Some(OsStr::new("#fff"))
        );
        assert!(!command_line.has_switch(switches::ENABLE_PLUGINS));
        assert!(!command_line.has_switch(switches::DISABLE_REMOTE_MODULE));
        assert!(!command_line.has_switch(switches::GUEST_INSTANCE_ID));
        assert!(command_line.args().is_empty());
    }

    #[test]
    fn test_command_line_after_clear_still_explicit() {
        let fixture = Fixture::new(bag([(options::NODE_INTEGRATION, false.into())]));
        fixture.prefs().borrow_mut().clear();
        let command_line = fixture.command_line();

        assert_eq!(
            command_line.get_switch_value(switches::NODE_INTEGRATION),
            Some(OsStr::new("true"))
        );
        assert_eq!(
            command_line.get_switch_value(switches::WEBVIEW_TAG),
            Some(OsStr::new("true"))
        );
    }

    #[test]
    fn test_existing_sandbox_switch_is_not_downgraded() {
        let fixture = Fixture::new(PrefDict::new());
        let mut command_line = CommandLine::new("renderer");
        command_line.append_switch(switches::ENABLE_SANDBOX);
        fixture
            .prefs()
            .borrow_mut()
            .append_command_line_switches(&mut command_line, &LaunchConfig::default());

        assert!(!command_line.has_switch(switches::NO_SANDBOX));
    }

    #[test]
    fn test_background_color_rules() {
        let fixture = Fixture::new(bag([(options::OFFSCREEN, true.into())]));
        assert!(!fixture.command_line().has_switch(switches::BACKGROUND_COLOR));

        let fixture = Fixture::new(bag([
            (options::OFFSCREEN, true.into()),
            (options::BACKGROUND_COLOR, "#80FFFFFF".into()),
        ]));
        assert_eq!(
            fixture.command_line().get_switch_value(switches::BACKGROUND_COLOR),
            Some(OsStr::new("#80FFFFFF"))
        );
    }

    #[test]
    fn test_custom_args_and_switches() {
        let fixture = Fixture::new(bag([
            (
                options::CUSTOM_ARGS,
                PrefValue::List(vec!["--app-arg".into(), 5.into(), "plain".into()]),
            ),
            (
                options::COMMAND_LINE_SWITCHES,
                PrefValue::List(vec!["ignore-gpu-blacklist".into(), "".into(), true.into()]),
            ),
        ]));
        let command_line = fixture.command_line();

        assert_eq!(
            command_line.args(),
            [OsString::from("--app-arg"), OsString::from("plain")]
        );
        assert!(command_line.has_switch("ignore-gpu-blacklist"));
        assert!(!command_line.switches().any(|(name, _)| name.is_empty()));
    }

    #[test]
    fn test_pass_through_values() {
        let fixture = Fixture::new(bag([
            (options::GUEST_INSTANCE_ID, "0".into()),
            (options::OPENER_ID, 12.into()),
            (options::ENABLE_BLINK_FEATURES, "CSSVariables".into()),
            (options::DISABLE_BLINK_FEATURES, "Auxclick".into()),
            (options::ENABLE_REMOTE_MODULE, false.into()),
            (options::CONTEXT_ISOLATION, true.into()),
            (options::PLUGINS, true.into()),
            (options::EXPERIMENTAL_FEATURES, true.into()),
            (options::NODE_INTEGRATION_IN_WORKER, true.into()),
        ]));
        let command_line = fixture.command_line();

        assert_eq!(
            command_line.get_switch_value(switches::GUEST_INSTANCE_ID),
            Some(OsStr::new("0"))
        );
        assert_eq!(
            command_line.get_switch_value(switches::OPENER_ID),
            Some(OsStr::new("12"))
        );
        assert_eq!(
            command_line.get_switch_value(switches::ENABLE_BLINK_FEATURES),
            Some(OsStr::new("CSSVariables"))
        );
        assert_eq!(
            command_line.get_switch_value(switches::DISABLE_BLINK_FEATURES),
            Some(OsStr::new("Auxclick"))
        );
        for switch in [
            switches::DISABLE_REMOTE_MODULE,
            switches::CONTEXT_ISOLATION,
            switches::ENABLE_PLUGINS,
            switches::ENABLE_EXPERIMENTAL_WEB_PLATFORM_FEATURES,
            switches::NODE_INTEGRATION_IN_WORKER,
        ] {
            assert!(command_line.has_switch(switch), "{switch}");
        }
    }

    #[test]
    fn test_scroll_bounce_depends_on_platform_support() {
        let fixture = Fixture::new(bag([(options::SCROLL_BOUNCE, true.into())]));
        let mut command_line = CommandLine::new("renderer");
        let config = LaunchConfig {
            scroll_bounce_supported: true,
            ..LaunchConfig::default()
        };
        fixture
            .prefs()
            .borrow_mut()
            .append_command_line_switches(&mut command_line, &config);
        assert!(command_line.has_switch(switches::SCROLL_BOUNCE));

        let mut command_line = CommandLine::new("renderer");
        let config = LaunchConfig {
            scroll_bounce_supported: false,
            ..LaunchConfig::default()
        };
        fixture
            .prefs()
            .borrow_mut()
            .append_command_line_switches(&mut command_line, &config);
        assert!(!command_line.has_switch(switches::SCROLL_BOUNCE));
    }

    #[test]
    fn test_hidden_page_follows_embedder_window() {
        let registry = PreferencesRegistry::new();
        let window = Rc::new(HeadlessWindow::new(false, false));
        let embedder = Rc::new(HeadlessWebContents::new(1));
        embedder.set_native_window(Some(window.clone()));
        let embedder: Rc<dyn WebContents> = embedder;

        let manager = Rc::new(HeadlessGuestViewManager::new());
        manager.add_guest(4, &embedder);
        let guest = Rc::new(HeadlessWebContents::new(2));
        guest.set_guest_view_manager(Some(manager));
        let guest: Rc<dyn WebContents> = guest;

        let prefs = WebContentsPreferences::attach(
            &guest,
            &registry,
            &bag([(options::GUEST_INSTANCE_ID, 4.into())]),
        )
        .unwrap();
        let launch = |prefs: &RefCell<WebContentsPreferences>| {
            let mut command_line = CommandLine::new("renderer");
            prefs
                .borrow_mut()
                .append_command_line_switches(&mut command_line, &LaunchConfig::default());
            command_line.has_switch(switches::HIDDEN_PAGE)
        };

        assert!(launch(prefs));
        window.set_visible(true);
        assert!(!launch(prefs));
        window.set_minimized(true);
        assert!(launch(prefs));
    }

    #[test]
    fn test_hidden_page_skips_missing_links() {
        // No guest view manager on the host.
        let fixture = Fixture::new(bag([(options::GUEST_INSTANCE_ID, 4.into())]));
        assert!(!fixture.command_line().has_switch(switches::HIDDEN_PAGE));
    }

    #[test]
    fn test_command_line_refreshes_snapshot() {
        let fixture = Fixture::new(PrefDict::new());
        fixture
            .prefs()
            .borrow_mut()
            .merge(&bag([(options::BACKGROUND_COLOR, "#123".into())]));
        assert_eq!(
            fixture
                .prefs()
                .borrow()
                .last_preferences()
                .find_string(options::BACKGROUND_COLOR),
            None
        );

        fixture.command_line();
        let prefs = fixture.prefs().borrow();
        assert_eq!(
            prefs.last_preferences().find_string(options::BACKGROUND_COLOR),
            Some("#123")
        );
        assert_eq!(prefs.last_preferences(), prefs.preferences());
    }

    #[test]
    fn test_web_preferences_defaults() {
        let prefs = Fixture::new(PrefDict::new()).web_preferences();

        assert!(prefs.javascript_enabled);
        assert!(prefs.images_enabled);
        assert!(prefs.text_areas_are_resizable);
        assert!(!prefs.navigate_on_drag_drop);
        assert!(prefs.webgl1_enabled && prefs.webgl2_enabled);
        assert!(prefs.web_security_enabled);
        assert!(!prefs.allow_running_insecure_content);
        // Construction filled nodeIntegration=true.
        assert!(prefs.node_integration);
    }

    #[test]
    fn test_web_preferences_node_integration_defaults_off() {
        let fixture = Fixture::new(PrefDict::new());
        fixture.prefs().borrow_mut().clear();
        let prefs = fixture.web_preferences();

        assert!(!prefs.node_integration);
        assert!(prefs.javascript_enabled);
        assert!(prefs.webgl1_enabled && prefs.webgl2_enabled);
    }

    #[test]
    fn test_web_preferences_webgl_and_security() {
        let fixture = Fixture::new(bag([(options::WEBGL, false.into())]));
        let prefs = fixture.web_preferences();
        assert!(!prefs.webgl1_enabled);
        assert!(!prefs.webgl2_enabled);

        // After clear the insecure-content default follows web security again.
        let fixture = Fixture::new(PrefDict::new());
        fixture.prefs().borrow_mut().clear();
        fixture
            .prefs()
            .borrow_mut()
            .merge(&bag([(options::WEB_SECURITY, false.into())]));
        let prefs = fixture.web_preferences();
        assert!(!prefs.web_security_enabled);
        assert!(prefs.allow_running_insecure_content);
    }

    #[test]
    fn test_web_preferences_fonts_and_sizes() {
        let fonts: PrefDict = [
            ("standard", PrefValue::from("Arial")),
            ("monospace", PrefValue::from("Menlo")),
            ("fantasy", PrefValue::from(3)),
        ]
        .into_iter()
        .collect();
        let fixture = Fixture::new(bag([
            (options::DEFAULT_FONT_FAMILY, fonts.into()),
            (options::DEFAULT_FONT_SIZE, 20.into()),
            (options::DEFAULT_MONOSPACE_FONT_SIZE, "15".into()),
            (options::MINIMUM_FONT_SIZE, "small".into()),
            (options::DEFAULT_ENCODING, "UTF-8".into()),
        ]));
        let prefs = fixture.web_preferences();

        assert_eq!(
            prefs.standard_font_family_map.get(COMMON_SCRIPT).map(String::as_str),
            Some("Arial")
        );
        assert_eq!(
            prefs.fixed_font_family_map.get(COMMON_SCRIPT).map(String::as_str),
            Some("Menlo")
        );
        assert!(prefs.fantasy_font_family_map.is_empty());
        assert!(prefs.serif_font_family_map.is_empty());
        assert_eq!(prefs.default_font_size, 20);
        assert_eq!(prefs.default_fixed_font_size, 15);
        assert_eq!(prefs.minimum_font_size, 0);
        assert_eq!(prefs.default_encoding, "UTF-8");
    }

    #[test]
    fn test_web_preferences_every_font_family_and_explicit_overrides() {
        let fonts: PrefDict = [
            ("standard", "Standard Sans"),
            ("serif", "Times"),
            ("sansSerif", "Arial"),
            ("monospace", "Menlo"),
            ("cursive", "Comic"),
            ("fantasy", "Papyrus"),
        ]
        .into_iter()
        .collect();
        let fixture = Fixture::new(bag([
            (options::DEFAULT_FONT_FAMILY, fonts.into()),
            (options::NAVIGATE_ON_DRAG_DROP, true.into()),
            (options::WEB_SECURITY, false.into()),
            (options::ALLOW_RUNNING_INSECURE_CONTENT, false.into()),
        ]));
        let prefs = fixture.web_preferences();

        let common = |map: &crate::web_preferences::ScriptFontFamilyMap| {
            map.get(COMMON_SCRIPT).cloned()
        };
        assert_eq!(common(&prefs.standard_font_family_map).as_deref(), Some("Standard Sans"));
        assert_eq!(common(&prefs.serif_font_family_map).as_deref(), Some("Times"));
        assert_eq!(common(&prefs.sans_serif_font_family_map).as_deref(), Some("Arial"));
        assert_eq!(common(&prefs.fixed_font_family_map).as_deref(), Some("Menlo"));
        assert_eq!(common(&prefs.cursive_font_family_map).as_deref(), Some("Comic"));
        assert_eq!(common(&prefs.fantasy_font_family_map).as_deref(), Some("Papyrus"));

        assert!(prefs.navigate_on_drag_drop);
        assert!(!prefs.web_security_enabled);
        assert!(!prefs.allow_running_insecure_content);
    }

    #[test]
    fn test_attach_twice_keeps_first_store() {
        let fixture = Fixture::new(bag([(options::SANDBOX, true.into())]));
        let result = WebContentsPreferences::attach(
            &fixture.host,
            &fixture.registry,
            &bag([(options::SANDBOX, false.into())]),
        );

        assert!(matches!(result, Err(Error::AlreadyAttached)));
        assert_eq!(fixture.registry.len(), 1);
        assert!(fixture.prefs().borrow().is_enabled(options::SANDBOX));
    }

    #[test]
    fn test_dropping_host_unregisters_store() {
        let fixture = Fixture::new(PrefDict::new());
        assert_eq!(fixture.registry.len(), 1);
        assert!(fixture.prefs().borrow().web_contents().is_some());

        let Fixture { registry, host } = fixture;
        drop(host);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_web_contents_none() {
        assert!(WebContentsPreferences::from_web_contents(None).is_none());
        let host = HeadlessWebContents::new(3);
        assert!(WebContentsPreferences::from_web_contents(Some(&host)).is_none());
    }
}
