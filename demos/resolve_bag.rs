// Example: Resolve a Preferences Bag
//
// This example demonstrates how a browsing context's preferences are
// resolved, reconfigured, and projected into renderer launch arguments and
// render-engine preferences.

use std::rc::Rc;
use webprefs::{
    CommandLine, HeadlessWebContents, LaunchConfig, PrefDict, PreferencesRegistry, WebContents,
    WebContentsPreferences, WebPreferences,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = PreferencesRegistry::new();
    let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(1));

    let bag = PrefDict::from_json_str(
        r##"{
            "webSecurity": false,
            "backgroundColor": "#1e1e1e",
            "customArgs": ["--app-version=1.0"],
            "defaultFontFamily": {"monospace": "Fira Code"}
        }"##,
    )?;

    let prefs = WebContentsPreferences::attach(&host, &registry, &bag)?;

    println!("Resolved preferences:");
    println!("{}", serde_json::to_string_pretty(prefs.borrow().preferences())?);

    // Reconfigure in place: enabling the sandbox also forces nativeWindowOpen
    let mut extend = PrefDict::new();
    extend.set("sandbox", true);
    prefs.borrow_mut().merge(&extend);

    let mut command_line = CommandLine::new("renderer");
    prefs
        .borrow_mut()
        .append_command_line_switches(&mut command_line, &LaunchConfig::default());

    println!("\nRenderer command line:");
    for arg in command_line.argv_lossy() {
        println!("  {}", arg);
    }

    let mut web_prefs = WebPreferences::default();
    prefs.borrow().override_web_preferences(&mut web_prefs);

    println!("\nRender-engine preferences:");
    println!("{}", serde_json::to_string_pretty(&web_prefs)?);

    println!("\nLive stores: {}", registry.len());
    Ok(())
}
