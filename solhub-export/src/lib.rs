//! Configuration export formats
//!
//! A solution's parameters are exported as a flat `key -> value` map in
//! one of four renderings. Every format also has a parser, and
//! `parse(render(m)) == m` holds for any flat map, so exported files can
//! be re-imported without loss.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod env;
mod properties;

/// A flat configuration map. `BTreeMap` keeps renderings deterministic.
pub type ConfigMap = BTreeMap<String, String>;

/// The export formats accepted by the config endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Env,
    Properties,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Yaml,
        ExportFormat::Env,
        ExportFormat::Properties,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Env => "env",
            ExportFormat::Properties => "properties",
        }
    }

    /// MIME type for the HTTP response
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Yaml => "application/x-yaml",
            ExportFormat::Env => "text/plain",
            ExportFormat::Properties => "text/plain",
        }
    }

    /// File extension used in the Content-Disposition filename
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Env => "env",
            ExportFormat::Properties => "properties",
        }
    }

    /// Render a flat map in this format
    pub fn render(&self, map: &ConfigMap) -> Result<String, ExportError> {
        match self {
            ExportFormat::Json => {
                let mut out = serde_json::to_string_pretty(map)?;
                out.push('\n');
                Ok(out)
            }
            ExportFormat::Yaml => Ok(serde_yaml::to_string(map)?),
            ExportFormat::Env => Ok(env::render(map)),
            ExportFormat::Properties => Ok(properties::render(map)),
        }
    }

    /// Parse a document previously produced by [`render`](Self::render)
    pub fn parse(&self, input: &str) -> Result<ConfigMap, ExportError> {
        match self {
            ExportFormat::Json => Ok(serde_json::from_str(input)?),
            ExportFormat::Yaml => {
                if input.trim().is_empty() {
                    return Ok(ConfigMap::new());
                }
                Ok(serde_yaml::from_str(input)?)
            }
            ExportFormat::Env => env::parse(input),
            ExportFormat::Properties => properties::parse(input),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "env" => Ok(ExportFormat::Env),
            "properties" => Ok(ExportFormat::Properties),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Rejection for an unrecognized format selector; the message names the
/// accepted values so callers can surface it verbatim
#[derive(Debug, Clone, Error)]
#[error("unknown export format '{0}', accepted formats are json, yaml, env, properties")]
pub struct UnknownFormat(pub String);

/// Errors raised while rendering or parsing an export document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn awkward_map() -> ConfigMap {
        let mut map = ConfigMap::new();
        map.insert("DB_HOST".to_string(), "db.internal".to_string());
        map.insert("EMPTY".to_string(), String::new());
        map.insert("QUOTED".to_string(), "he said \"hi\"".to_string());
        map.insert("SPACED".to_string(), "  padded  ".to_string());
        map.insert("EQUATION".to_string(), "a=b:c#d!e".to_string());
        map.insert("MULTI".to_string(), "line one\nline two".to_string());
        map.insert("SHELLY".to_string(), "$HOME and `pwd` and \\backslash".to_string());
        map.insert("numeric".to_string(), "12345".to_string());
        map.insert("ODD=KEY".to_string(), "separator in key".to_string());
        map.insert("SPACED KEY".to_string(), "whitespace in key".to_string());
        map.insert("dotted.key:colon".to_string(), "x".to_string());
        map
    }

    #[test]
    fn format_selector_parses() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("YAML".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert_eq!("env".parse::<ExportFormat>().unwrap(), ExportFormat::Env);
        assert_eq!(
            " properties ".parse::<ExportFormat>().unwrap(),
            ExportFormat::Properties
        );

        let err = "toml".parse::<ExportFormat>().unwrap_err();
        assert!(err.to_string().contains("json, yaml, env, properties"));
    }

    #[test]
    fn every_format_round_trips_awkward_values() {
        let map = awkward_map();
        for format in ExportFormat::ALL {
            let rendered = format.render(&map).unwrap();
            let parsed = format.parse(&rendered).unwrap();
            assert_eq!(parsed, map, "round trip failed for {format}");
        }
    }

    #[test]
    fn every_format_round_trips_empty_map() {
        let map = ConfigMap::new();
        for format in ExportFormat::ALL {
            let rendered = format.render(&map).unwrap();
            let parsed = format.parse(&rendered).unwrap();
            assert!(parsed.is_empty(), "round trip failed for {format}");
        }
    }

    #[test]
    fn json_rendering_is_a_flat_object() {
        let mut map = ConfigMap::new();
        map.insert("DB_HOST".to_string(), "db.internal".to_string());
        let rendered = ExportFormat::Json.render(&map).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["DB_HOST"], "db.internal");
    }

    #[test]
    fn env_rendering_sources_cleanly() {
        let mut map = ConfigMap::new();
        map.insert("DB_HOST".to_string(), "db.internal".to_string());
        map.insert("GREETING".to_string(), "hello world".to_string());
        let rendered = ExportFormat::Env.render(&map).unwrap();
        assert_eq!(rendered, "DB_HOST=db.internal\nGREETING=\"hello world\"\n");
    }
}
