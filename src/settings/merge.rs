use serde_json::Value;

use super::values::{Settings, differs};

/// A single key whose value changed during a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedValue {
    /// Top-level settings key.
    pub key: String,
    /// The value after the merge.
    pub value: Value,
}

/// Keys touched by [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    /// Keys filled in from the default schema.
    pub added: Vec<String>,
    /// Keys removed because the default schema no longer has them.
    pub removed: Vec<String>,
}

impl UpgradeReport {
    /// Whether the reconciliation changed anything.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Folds a freshly read settings document into the current values.
///
/// Every key of `incoming` whose value differs from `current` is taken over
/// and reported. Keys missing from `incoming` are kept as they are.
pub fn merge(current: &Settings, incoming: &Settings) -> (Settings, Vec<ChangedValue>) {
    let mut merged = current.clone();
    let mut changes = Vec::new();

    for (key, value) in incoming {
        if differs(current.get(key), value) {
            merged.insert(key.clone(), value.clone());
            changes.push(ChangedValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }

    (merged, changes)
}

/// Brings `current` in line with the default schema.
///
/// Missing keys are filled from `defaults`, keys the schema does not know are
/// dropped. Afterwards the key set equals the key set of `defaults`.
pub fn reconcile(current: &Settings, defaults: &Settings) -> (Settings, UpgradeReport) {
    let mut upgraded = Settings::new();
    let mut report = UpgradeReport::default();

    for (key, default) in defaults {
        match current.get(key) {
            Some(value) => {
                upgraded.insert(key.clone(), value.clone());
            }
            None => {
                upgraded.insert(key.clone(), default.clone());
                report.added.push(key.clone());
            }
        }
    }

    report.removed = current
        .keys()
        .filter(|key| !defaults.contains_key(*key))
        .cloned()
        .collect();

    (upgraded, report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn settings(value: Value) -> Settings {
        match value {
            Value::Object(map) => map,
            _ => Settings::new(),
        }
    }

    #[test]
    fn merge_reports_only_changed_keys() {
        let current = settings(json!({"size": 150, "theme": "default"}));
        let incoming = settings(json!({"size": 200.0, "theme": "default"}));

        let (merged, changes) = merge(&current, &incoming);

        assert_eq!(
            changes,
            vec![ChangedValue {
                key: "size".to_string(),
                value: json!(200.0)
            }]
        );
        assert_eq!(merged.get("size"), Some(&json!(200.0)));
    }

    #[test]
    fn merge_never_deletes_absent_keys() {
        let current = settings(json!({"size": 150, "show-seconds": true}));
        let incoming = settings(json!({"size": 150}));

        let (merged, changes) = merge(&current, &incoming);

        assert!(changes.is_empty());
        assert_eq!(merged.get("show-seconds"), Some(&json!(true)));
    }

    #[test]
    fn merge_treats_equal_objects_as_unchanged() {
        let current = settings(json!({"timezone": {"region": "Europe", "city": "Berlin"}}));
        let incoming = settings(json!({"timezone": {"city": "Berlin", "region": "Europe"}}));

        let (_, changes) = merge(&current, &incoming);

        assert!(changes.is_empty());
    }

    #[test]
    fn merge_adds_new_keys() {
        let current = Settings::new();
        let incoming = settings(json!({"theme": "station"}));

        let (merged, changes) = merge(&current, &incoming);

        assert_eq!(changes.len(), 1);
        assert_eq!(merged.get("theme"), Some(&json!("station")));
    }

    #[test]
    fn reconcile_fills_and_prunes() {
        let defaults = settings(json!({"size": 150, "theme": "default", "show-seconds": true}));
        let current = settings(json!({"size": 220, "legacy-option": 3}));

        let (upgraded, report) = reconcile(&current, &defaults);

        let mut keys: Vec<_> = upgraded.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["show-seconds", "size", "theme"]);
        assert_eq!(upgraded.get("size"), Some(&json!(220)));
        assert_eq!(report.removed, vec!["legacy-option".to_string()]);
        assert_eq!(report.added.len(), 2);
    }

    #[test]
    fn reconcile_of_matching_schema_is_a_no_op() {
        let defaults = settings(json!({"size": 150}));
        let current = settings(json!({"size": 300}));

        let (upgraded, report) = reconcile(&current, &defaults);

        assert!(report.is_empty());
        assert_eq!(upgraded, current);
    }
}
