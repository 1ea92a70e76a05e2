//! Preference keys and renderer switch names
//!
//! Both vocabularies are contracts with code outside this crate: option keys
//! with whoever builds the bag, switch names with the renderer process that
//! parses its command line. Keep them verbatim.

/// Keys understood in a preferences bag
pub mod options {
    pub const PLUGINS: &str = "plugins";
    pub const EXPERIMENTAL_FEATURES: &str = "experimentalFeatures";
    pub const NODE_INTEGRATION: &str = "nodeIntegration";
    pub const NODE_INTEGRATION_IN_WORKER: &str = "nodeIntegrationInWorker";
    pub const WEBVIEW_TAG: &str = "webviewTag";
    pub const SANDBOX: &str = "sandbox";
    pub const NATIVE_WINDOW_OPEN: &str = "nativeWindowOpen";
    pub const CONTEXT_ISOLATION: &str = "contextIsolation";
    pub const WEB_SECURITY: &str = "webSecurity";
    pub const ALLOW_RUNNING_INSECURE_CONTENT: &str = "allowRunningInsecureContent";
    pub const OFFSCREEN: &str = "offscreen";
    pub const SCROLL_BOUNCE: &str = "scrollBounce";
    pub const ENABLE_REMOTE_MODULE: &str = "enableRemoteModule";

    pub const JAVASCRIPT: &str = "javascript";
    pub const IMAGES: &str = "images";
    pub const TEXT_AREAS_ARE_RESIZABLE: &str = "textAreasAreResizable";
    pub const WEBGL: &str = "webgl";
    pub const NAVIGATE_ON_DRAG_DROP: &str = "navigateOnDragDrop";

    /// Recorded at construction, never recomputed
    pub const NODE_INTEGRATION_WAS_EXPLICITLY_ENABLED: &str = "nodeIntegrationWasExplicitlyEnabled";
    pub const CONTEXT_ISOLATION_WAS_EXPLICITLY_DISABLED: &str =
        "contextIsolationWasExplicitlyDisabled";
    pub const WEBVIEW_TAG_WAS_EXPLICITLY_ENABLED: &str = "webviewTagWasExplicitlyEnabled";

    pub const PRELOAD_SCRIPT: &str = "preloadScript";
    pub const PRELOAD_URL: &str = "preloadURL";
    pub const CUSTOM_ARGS: &str = "customArgs";
    pub const COMMAND_LINE_SWITCHES: &str = "commandLineSwitches";
    pub const ENABLE_BLINK_FEATURES: &str = "enableBlinkFeatures";
    pub const DISABLE_BLINK_FEATURES: &str = "disableBlinkFeatures";
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    pub const GUEST_INSTANCE_ID: &str = "guestInstanceId";
    pub const OPENER_ID: &str = "openerId";

    pub const DEFAULT_FONT_FAMILY: &str = "defaultFontFamily";
    pub const DEFAULT_FONT_SIZE: &str = "defaultFontSize";
    pub const DEFAULT_MONOSPACE_FONT_SIZE: &str = "defaultMonospaceFontSize";
    pub const MINIMUM_FONT_SIZE: &str = "minimumFontSize";
    pub const DEFAULT_ENCODING: &str = "defaultEncoding";

    /// Sub-keys of [`DEFAULT_FONT_FAMILY`]
    pub mod font_family {
        pub const STANDARD: &str = "standard";
        pub const SERIF: &str = "serif";
        pub const SANS_SERIF: &str = "sansSerif";
        pub const MONOSPACE: &str = "monospace";
        pub const CURSIVE: &str = "cursive";
        pub const FANTASY: &str = "fantasy";
    }

    /// Construction context that must never be stored
    pub const EMBEDDER: &str = "embedder";
    pub const IS_GUEST: &str = "isGuest";
    pub const SESSION: &str = "session";
}

/// Switch names passed to the renderer process
pub mod switches {
    pub const USER_AGENT: &str = "user-agent";
    pub const ENABLE_PLUGINS: &str = "enable-plugins";
    pub const ENABLE_EXPERIMENTAL_WEB_PLATFORM_FEATURES: &str =
        "enable-experimental-web-platform-features";
    pub const NODE_INTEGRATION: &str = "node-integration";
    pub const NODE_INTEGRATION_IN_WORKER: &str = "node-integration-in-worker";
    pub const WEBVIEW_TAG: &str = "webview-tag";
    pub const ENABLE_SANDBOX: &str = "enable-sandbox";
    pub const NO_SANDBOX: &str = "no-sandbox";
    pub const NATIVE_WINDOW_OPEN: &str = "native-window-open";
    pub const PRELOAD_SCRIPT: &str = "preload";
    pub const DISABLE_REMOTE_MODULE: &str = "disable-remote-module";
    pub const CONTEXT_ISOLATION: &str = "context-isolation";
    pub const BACKGROUND_COLOR: &str = "background-color";
    pub const GUEST_INSTANCE_ID: &str = "guest-instance-id";
    pub const OPENER_ID: &str = "opener-id";
    pub const SCROLL_BOUNCE: &str = "scroll-bounce";
    pub const ENABLE_BLINK_FEATURES: &str = "enable-blink-features";
    pub const DISABLE_BLINK_FEATURES: &str = "disable-blink-features";
    pub const HIDDEN_PAGE: &str = "hidden-page";
}
