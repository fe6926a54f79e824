//! Scenario files: a named parameter set stored as YAML or JSON.

use std::path::Path;

use pv_model::SimulationParameters;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};

pub const LATEST_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub params: SimulationParameters,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "Default".to_string(),
            params: SimulationParameters::default(),
        }
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>, params: SimulationParameters) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            params,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.version == 0 || self.version > LATEST_VERSION {
            return Err(AppError::UnsupportedVersion {
                found: self.version,
                latest: LATEST_VERSION,
            });
        }
        self.params.validate()?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// `.json` selects JSON; anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScenarioFormat::Json,
            _ => ScenarioFormat::Yaml,
        }
    }
}

pub fn parse_scenario(text: &str, format: ScenarioFormat) -> AppResult<Scenario> {
    let scenario: Scenario = match format {
        ScenarioFormat::Yaml => serde_yaml::from_str(text)?,
        ScenarioFormat::Json => serde_json::from_str(text)?,
    };
    scenario.validate()?;
    Ok(scenario)
}

pub fn render_scenario(scenario: &Scenario, format: ScenarioFormat) -> AppResult<String> {
    scenario.validate()?;
    let text = match format {
        ScenarioFormat::Yaml => serde_yaml::to_string(scenario)?,
        ScenarioFormat::Json => serde_json::to_string_pretty(scenario)?,
    };
    Ok(text)
}

/// Load and validate a scenario file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let scenario = parse_scenario(&content, ScenarioFormat::from_path(path))?;
    info!(path = %path.display(), name = %scenario.name, "Loaded scenario");
    Ok(scenario)
}

/// Validate and write a scenario file.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    let content = render_scenario(scenario, ScenarioFormat::from_path(path))?;
    std::fs::write(path, content).map_err(|e| AppError::ScenarioFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), name = %scenario.name, "Saved scenario");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ScenarioFormat::from_path(Path::new("a/b.json")),
            ScenarioFormat::Json
        );
        assert_eq!(
            ScenarioFormat::from_path(Path::new("b.JSON")),
            ScenarioFormat::Json
        );
        assert_eq!(
            ScenarioFormat::from_path(Path::new("b.yaml")),
            ScenarioFormat::Yaml
        );
        assert_eq!(
            ScenarioFormat::from_path(Path::new("noext")),
            ScenarioFormat::Yaml
        );
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let text = "version: 1\nname: Cloudy\nparams:\n  cloud_cover: 0.8\n";
        let s = parse_scenario(text, ScenarioFormat::Yaml).unwrap();
        assert_eq!(s.name, "Cloudy");
        assert_eq!(s.params.cloud_cover, 0.8);
        assert_eq!(s.params.day_of_year, 172);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = "version: 1\nname: Typo\nparams:\n  clod_cover: 0.8\n";
        let err = parse_scenario(text, ScenarioFormat::Yaml).unwrap_err();
        assert!(matches!(err, AppError::Format(_)), "{err}");
    }

    #[test]
    fn misspelt_top_level_key_is_rejected() {
        let text = "version: 1\nname: Cloudy\nparms:\n  cloud_cover: 0.9\n";
        let err = parse_scenario(text, ScenarioFormat::Yaml).unwrap_err();
        assert!(matches!(err, AppError::Format(_)), "{err}");

        let json = r#"{"version": 1, "name": "Cloudy", "parms": {"cloud_cover": 0.9}}"#;
        let err = parse_scenario(json, ScenarioFormat::Json).unwrap_err();
        assert!(matches!(err, AppError::Format(_)), "{err}");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let text = r#"{"version": 1, "name": "Bad", "params": {"day_of_year": 400}}"#;
        let err = parse_scenario(text, ScenarioFormat::Json).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err}");
    }

    #[test]
    fn future_version_is_rejected() {
        let text = "version: 7\nname: Future\n";
        let err = parse_scenario(text, ScenarioFormat::Yaml).unwrap_err();
        assert!(matches!(
            err,
            AppError::UnsupportedVersion { found: 7, .. }
        ));
    }

    #[test]
    fn render_then_parse_preserves_scenario() {
        let scenario = Scenario::new(
            "Winter",
            SimulationParameters {
                day_of_year: 355,
                cloud_cover: 0.6,
                ..Default::default()
            },
        );
        for format in [ScenarioFormat::Yaml, ScenarioFormat::Json] {
            let text = render_scenario(&scenario, format).unwrap();
            assert_eq!(parse_scenario(&text, format).unwrap(), scenario);
        }
    }
}
