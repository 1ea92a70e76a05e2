use crate::error::{Error, Result};
use crate::types::PrefDict;
use glob::Pattern;

/// Query a bag by glob patterns (OR logic)
///
/// Keeps the top-level entries whose key matches any of the patterns.
///
/// # Example
///
/// ```rust
/// use webprefs::{query_preferences, PrefDict};
///
/// let bag = PrefDict::from_json_str(r#"{
///     "nodeIntegration": true,
///     "nodeIntegrationInWorker": false,
///     "sandbox": true
/// }"#)?;
///
/// let node = query_preferences(&bag, &["nodeIntegration*"])?;
/// assert_eq!(node.len(), 2);
/// assert!(!node.contains_key("sandbox"));
/// # Ok::<(), webprefs::Error>(())
/// ```
pub fn query_preferences(preferences: &PrefDict, patterns: &[&str]) -> Result<PrefDict> {
    // Compile all patterns first to fail fast on invalid patterns
    let compiled_patterns: Vec<Pattern> = patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| Error::InvalidGlobPattern(format!("{}: {}", p, e))))
        .collect::<Result<Vec<_>>>()?;

    Ok(preferences
        .iter()
        .filter(|(key, _)| compiled_patterns.iter().any(|pattern| pattern.matches(key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrefValue;

    fn create_test_bag() -> PrefDict {
        let mut bag = PrefDict::new();
        bag.set("nodeIntegration", true);
        bag.set("nodeIntegrationInWorker", false);
        bag.set("backgroundColor", "#fff");
        bag.set("enableBlinkFeatures", "CSSVariables");
        bag.set("disableBlinkFeatures", "Auxclick");
        bag
    }

    #[test]
    fn test_query_single_pattern() {
        let bag = create_test_bag();
        let queried = query_preferences(&bag, &["nodeIntegration*"]).unwrap();
        assert_eq!(queried.len(), 2);
        assert!(queried.contains_key("nodeIntegration"));
        assert!(queried.contains_key("nodeIntegrationInWorker"));
    }

    #[test]
    fn test_query_multiple_patterns_or_logic() {
        let bag = create_test_bag();
        let queried = query_preferences(&bag, &["*BlinkFeatures", "backgroundColor"]).unwrap();
        assert_eq!(queried.len(), 3);
        assert_eq!(
            queried.get("backgroundColor"),
            Some(&PrefValue::from("#fff"))
        );
    }

    #[test]
    fn test_query_no_matches() {
        let bag = create_test_bag();
        let queried = query_preferences(&bag, &["sandbox*"]).unwrap();
        assert!(queried.is_empty());
    }

    #[test]
    fn test_query_invalid_pattern() {
        let bag = create_test_bag();
        let result = query_preferences(&bag, &["[invalid"]);
        assert!(matches!(result, Err(Error::InvalidGlobPattern(_))));
    }
}
