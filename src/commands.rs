use crate::cli::BagArgs;
use std::rc::Rc;
use webprefs::{
    query_preferences, CommandLine, HeadlessWebContents, LaunchConfig, PrefDict, PrefValue,
    PreferencesRegistry, WebContents, WebContentsPreferences, WebPreferences,
};

/// Process id given to the stand-in browsing context
const HEADLESS_PROCESS_ID: i32 = 1;

/// Print the resolved preferences, optionally filtered or as a single value
pub fn resolve(
    bag_args: &BagArgs,
    query_patterns: &[&str],
    get: Option<String>,
    snapshot: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    with_preferences(bag_args, |prefs| {
        let bag = if snapshot {
            prefs.last_preferences()
        } else {
            prefs.preferences()
        };

        // Handle --get mode: single preference retrieval with raw output
        if let Some(get_key) = get {
            return match bag.get(&get_key) {
                Some(value) => {
                    output_raw_value(value)?;
                    Ok(())
                }
                None => Err(anyhow::anyhow!("Preference '{}' not found", get_key).into()),
            };
        }

        let output = if !query_patterns.is_empty() {
            query_preferences(bag, query_patterns)
                .map_err(|e| anyhow::anyhow!("Failed to apply query: {}", e))?
        } else {
            bag.clone()
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    })
}

/// Print the renderer command line for the preferences
pub fn launch_args(
    bag_args: &BagArgs,
    user_agent: Option<String>,
    scroll_bounce: bool,
    program: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = LaunchConfig::default();
    if let Some(user_agent) = user_agent {
        config.user_agent = user_agent;
    }
    config.scroll_bounce_supported |= scroll_bounce;

    with_preferences(bag_args, |prefs| {
        let mut command_line = CommandLine::new(program);
        prefs.append_command_line_switches(&mut command_line, &config);
        for arg in command_line.argv_lossy() {
            println!("{}", arg);
        }
        Ok(())
    })
}

/// Print the render-engine preferences
pub fn web_prefs(bag_args: &BagArgs) -> Result<(), Box<dyn std::error::Error>> {
    with_preferences(bag_args, |prefs| {
        let mut web_prefs = WebPreferences::default();
        prefs.override_web_preferences(&mut web_prefs);
        println!("{}", serde_json::to_string_pretty(&web_prefs)?);
        Ok(())
    })
}

/// Build a store from the bag files and run `f` on it
fn with_preferences<F>(bag_args: &BagArgs, f: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut WebContentsPreferences) -> Result<(), Box<dyn std::error::Error>>,
{
    let initial = load_bag(&bag_args.file)?;
    let merges = bag_args
        .merges
        .iter()
        .map(|path| load_bag(path.as_path()))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = PreferencesRegistry::new();
    let host: Rc<dyn WebContents> = Rc::new(HeadlessWebContents::new(HEADLESS_PROCESS_ID));
    let prefs = WebContentsPreferences::attach(&host, &registry, &initial)
        .map_err(|e| anyhow::anyhow!("Failed to create preferences: {}", e))?;

    let mut prefs = prefs.borrow_mut();
    for extend in &merges {
        prefs.merge(extend);
    }
    f(&mut *prefs)
}

fn load_bag(path: &std::path::Path) -> Result<PrefDict, anyhow::Error> {
    PrefDict::from_json_file(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load preferences from {}: {e}. The file must hold a JSON object.",
            path.display()
        )
    })
}

/// Output a single preference value in raw format (no JSON wrapping)
fn output_raw_value(value: &PrefValue) -> Result<(), Box<dyn std::error::Error>> {
    match value {
        PrefValue::String(s) => println!("{}", s),
        PrefValue::Bool(b) => println!("{}", b),
        PrefValue::Integer(i) => println!("{}", i),
        PrefValue::Double(f) => println!("{}", f),
        PrefValue::Null => println!("null"),
        PrefValue::List(_) | PrefValue::Dict(_) => {
            // Complex types still output as JSON
            println!("{}", serde_json::to_string(value)?);
        }
    }
    Ok(())
}
