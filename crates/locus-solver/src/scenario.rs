//! Scenario definitions and the registry that loads them

use crate::fact::{Fact, Query};
use locus_core::{LocusError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A fact set together with the query asked about it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, facts: Vec<Fact>, query: Option<Query>) -> Self {
        Self {
            name: name.into(),
            description: None,
            facts,
            query,
        }
    }

    /// The query, or an error naming the scenario when it has none
    pub fn require_query(&self) -> Result<&Query> {
        self.query.as_ref().ok_or_else(|| {
            LocusError::InvalidQuery(format!("scenario '{}' has no query", self.name))
        })
    }

    /// Render as a standalone TOML scenario file
    pub fn to_toml(&self) -> Result<String> {
        let file = ScenarioFileRef {
            scenario: std::slice::from_ref(self),
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}

/// TOML file format for scenario definitions
#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub scenario: Vec<Scenario>,
}

#[derive(Serialize)]
struct ScenarioFileRef<'a> {
    scenario: &'a [Scenario],
}

/// Registry that holds all loaded scenarios
#[derive(Debug, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load scenarios from a directory
    ///
    /// Expects `path/scenarios/*.toml` and `path/scenarios/*.json` files
    pub fn load_from_directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut registry = Self::new();
        let scenarios_path = path.as_ref().join("scenarios");

        if scenarios_path.exists() {
            let mut files: Vec<_> = fs::read_dir(&scenarios_path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<_>>()?;
            files.sort();

            for file_path in files {
                let ext = file_path.extension().and_then(|e| e.to_str());
                if matches!(ext, Some("toml") | Some("json")) {
                    registry.load_file(&file_path)?;
                }
            }
        }

        Ok(registry)
    }

    /// Load scenarios from a file, choosing the format by extension
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.load_json_string(&content),
            _ => self.load_toml_string(&content),
        }
    }

    /// Load scenarios from a TOML string
    pub fn load_toml_string(&mut self, content: &str) -> Result<()> {
        let file: ScenarioFile = toml::from_str(content).map_err(|e| {
            LocusError::ScenarioLoadError(format!("Failed to parse scenario TOML: {}", e))
        })?;

        for scenario in file.scenario {
            self.register(scenario)?;
        }

        Ok(())
    }

    /// Load scenarios from a JSON string
    ///
    /// Accepts a single scenario object, a bare array of them, or the
    /// TOML-shaped `{"scenario": [...]}` wrapper.
    pub fn load_json_string(&mut self, content: &str) -> Result<()> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            LocusError::ScenarioLoadError(format!("Failed to parse scenario JSON: {}", e))
        })?;

        let entries = match value {
            Value::Array(list) => list,
            Value::Object(mut map) => match map.remove("scenario") {
                Some(Value::Array(list)) => list,
                Some(_) => {
                    return Err(LocusError::ScenarioLoadError(
                        "'scenario' must be an array of scenarios".to_string(),
                    ))
                }
                None => vec![Value::Object(map)],
            },
            _ => {
                return Err(LocusError::ScenarioLoadError(
                    "expected a scenario object or an array of scenarios".to_string(),
                ))
            }
        };

        let scenarios = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                serde_json::from_value::<Scenario>(entry).map_err(|e| {
                    LocusError::ScenarioLoadError(format!(
                        "Failed to parse scenario JSON entry {}: {}",
                        i, e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for scenario in scenarios {
            self.register(scenario)?;
        }

        Ok(())
    }

    /// Register a scenario directly
    ///
    /// Unnamed scenarios are named after their position in the registry.
    pub fn register(&mut self, mut scenario: Scenario) -> Result<()> {
        if scenario.name.is_empty() {
            scenario.name = format!("scenario_{}", self.scenarios.len());
        }
        if self.scenarios.iter().any(|s| s.name == scenario.name) {
            return Err(LocusError::ScenarioLoadError(format!(
                "Duplicate scenario name: {}",
                scenario.name
            )));
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    /// Get all scenarios
    pub fn all(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Look up a scenario by name
    pub fn get(&self, name: &str) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| LocusError::ScenarioNotFound(name.to_string()))
    }

    /// Get the number of loaded scenarios
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
[[scenario]]
name = "lamp_above_chair"
facts = [
    ["lamp", "N", "chair"],
    ["chair", "SWR", "room"],
]
query = ["lamp", "chair"]

[[scenario]]
name = "open_plan"
description = "No facts at all"
query = ["sofa", "tv"]
"#
    }

    #[test]
    fn test_load_from_toml_string() {
        let mut registry = ScenarioRegistry::new();
        registry.load_toml_string(sample_toml()).unwrap();
        assert_eq!(registry.len(), 2);

        let s = registry.get("lamp_above_chair").unwrap();
        assert_eq!(s.facts.len(), 2);
        assert_eq!(s.require_query().unwrap().subject(), "lamp");

        let open = registry.get("open_plan").unwrap();
        assert!(open.facts.is_empty());
        assert_eq!(open.description.as_deref(), Some("No facts at all"));
    }

    #[test]
    fn test_bad_relation_rejects_file() {
        let mut registry = ScenarioRegistry::new();
        let err = registry
            .load_toml_string(
                r#"
[[scenario]]
facts = [["lamp", "UP", "chair"]]
"#,
            )
            .unwrap_err();
        assert!(matches!(err, LocusError::ScenarioLoadError(msg) if msg.contains("UP")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_bad_relation_rejects_json() {
        let mut registry = ScenarioRegistry::new();
        let err = registry
            .load_json_string(
                r#"{"name": "x", "facts": [["lamp", "UP", "chair"]], "query": ["lamp", "chair"]}"#,
            )
            .unwrap_err();
        assert!(matches!(err, LocusError::ScenarioLoadError(msg) if msg.contains("UP")));

        let err = registry
            .load_json_string(r#"[{"name": "ok"}, {"name": "bad", "facts": [["a", "CL4", "b"]]}]"#)
            .unwrap_err();
        assert!(
            matches!(err, LocusError::ScenarioLoadError(msg) if msg.contains("entry 1") && msg.contains("CL4"))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_json_wrong_shape() {
        let mut registry = ScenarioRegistry::new();
        assert!(registry.load_json_string("42").is_err());
        assert!(registry.load_json_string(r#"{"scenario": {"name": "x"}}"#).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_json_shapes() {
        let mut registry = ScenarioRegistry::new();
        registry
            .load_json_string(r#"{"facts": [["a", "E", "b"]], "query": ["a", "NE", "b"]}"#)
            .unwrap();
        registry
            .load_json_string(
                r#"[{"name": "x", "facts": []}, {"name": "y", "facts": [["c", "TPP", "room"]]}]"#,
            )
            .unwrap();
        registry
            .load_json_string(r#"{"scenario": [{"name": "z"}]}"#)
            .unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.all()[0].name, "scenario_0");
        assert!(registry.get("y").is_ok());
        assert!(registry.get("z").unwrap().query.is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = ScenarioRegistry::new();
        registry.register(Scenario::new("dup", vec![], None)).unwrap();
        assert!(registry.register(Scenario::new("dup", vec![], None)).is_err());
    }

    #[test]
    fn test_missing_scenario() {
        let registry = ScenarioRegistry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(LocusError::ScenarioNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_require_query() {
        let s = Scenario::new("bare", vec![], None);
        assert!(matches!(s.require_query(), Err(LocusError::InvalidQuery(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut registry = ScenarioRegistry::new();
        registry.load_toml_string(sample_toml()).unwrap();
        let original = registry.get("lamp_above_chair").unwrap();

        let rendered = original.to_toml().unwrap();
        let mut reloaded = ScenarioRegistry::new();
        reloaded.load_toml_string(&rendered).unwrap();
        assert_eq!(reloaded.get("lamp_above_chair").unwrap(), original);
    }

    #[test]
    fn test_load_from_missing_directory() {
        let registry = ScenarioRegistry::load_from_directory("/nonexistent/locus").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_demo_directory() {
        let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let registry = ScenarioRegistry::load_from_directory(demos).unwrap();

        let names: Vec<&str> = registry.all().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["generated_0", "lamp_above_chair", "sofa_and_tv", "chain", "lamp_in_room"]
        );
        let benchmark = registry.get("generated_0").unwrap();
        let query = benchmark.require_query().unwrap();
        assert_eq!((query.subject(), query.target().as_str()), ("bed", "wardrobe"));
    }
}
