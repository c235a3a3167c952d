//! Case-insensitive parameter map.
//!
//! Keys are compared ignoring ASCII case. Each entry keeps a numeric value
//! in internal units (when the text was numeric), the unit it was written
//! in, and its textual form. Values are written as `450 [ft]`, `35`, or
//! plain strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, WcvError};
use crate::units::Unit;

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    /// Numeric value in internal units.
    pub value: Option<f64>,
    /// Unit used when the value is displayed.
    pub unit: Option<Unit>,
    pub text: String,
}

impl ParameterEntry {
    fn numeric(internal: f64, unit: Option<Unit>) -> Self {
        let shown = unit.map_or(internal, |u| u.to_value(internal));
        let text = match unit {
            Some(u) => format!("{} [{}]", shown, u),
            None => shown.to_string(),
        };
        Self {
            value: Some(internal),
            unit,
            text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterData {
    /// Lowercased key -> (key as first written, entry).
    entries: BTreeMap<String, (String, ParameterEntry)>,
}

impl ParameterData {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(key: &str) -> String {
        key.trim().to_ascii_lowercase()
    }

    fn insert(&mut self, key: &str, entry: ParameterEntry) {
        let norm = Self::normalize(key);
        let shown = self
            .entries
            .get(&norm)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| key.trim().to_string());
        self.entries.insert(norm, (shown, entry));
    }

    /// Store a value already in internal units, remembering `unit` for display.
    pub fn set_internal(&mut self, key: &str, value: f64, unit: Unit) {
        self.insert(key, ParameterEntry::numeric(value, Some(unit)));
    }

    /// Store a unitless value.
    pub fn set_value(&mut self, key: &str, value: f64) {
        self.insert(key, ParameterEntry::numeric(value, None));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set_string(key, if value { "true" } else { "false" });
    }

    pub fn set_string(&mut self, key: &str, text: &str) {
        self.insert(
            key,
            ParameterEntry {
                value: None,
                unit: None,
                text: text.to_string(),
            },
        );
    }

    /// Store a value from its textual form.
    ///
    /// Numeric text with an optional bracketed unit (`4000 [ft]`) is
    /// converted to internal units. A bracketed unit after non-numeric text
    /// is an error; any other text is stored as a string.
    pub fn set(&mut self, key: &str, text: &str) -> Result<()> {
        let text = text.trim();
        let (number, unit) = match text.find('[') {
            Some(open) => {
                let close = text.rfind(']').filter(|&c| c > open).ok_or_else(|| {
                    WcvError::MalformedParameter {
                        key: key.to_string(),
                        value: text.to_string(),
                    }
                })?;
                let unit: Unit = text[open + 1..close].parse()?;
                (text[..open].trim(), Some(unit))
            }
            None => (text, None),
        };

        match number.parse::<f64>() {
            Ok(v) => {
                let internal = unit.map_or(v, |u| u.from_value(v));
                self.insert(
                    key,
                    ParameterEntry {
                        value: Some(internal),
                        unit,
                        text: text.to_string(),
                    },
                );
                Ok(())
            }
            Err(_) if unit.is_some() => Err(WcvError::MalformedParameter {
                key: key.to_string(),
                value: text.to_string(),
            }),
            Err(_) => {
                self.set_string(key, text);
                Ok(())
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&Self::normalize(key))
    }

    pub fn entry(&self, key: &str) -> Option<&ParameterEntry> {
        self.entries.get(&Self::normalize(key)).map(|(_, e)| e)
    }

    /// Numeric value in internal units.
    pub fn get_value(&self, key: &str) -> Option<f64> {
        self.entry(key).and_then(|e| e.value)
    }

    /// Numeric value converted to `unit`.
    pub fn get_value_in(&self, key: &str, unit: Unit) -> Option<f64> {
        self.get_value(key).map(|v| unit.to_value(v))
    }

    pub fn get_unit(&self, key: &str) -> Option<Unit> {
        self.entry(key).and_then(|e| e.unit)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|e| e.text.as_str())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_string(key)?.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ParameterEntry> {
        self.entries.remove(&Self::normalize(key)).map(|(_, e)| e)
    }

    /// Keys in their originally written case, sorted case-insensitively.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.values().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` into this map, overwriting equal keys.
    pub fn copy_from(&mut self, other: &ParameterData) {
        for (key, entry) in other.entries.values() {
            self.insert(key, entry.clone());
        }
    }

    /// Parse a `key = value [unit]` document.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse_lines(text: &str) -> Result<Self> {
        let mut params = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(WcvError::MalformedLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(WcvError::MalformedLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
            params.set(key, value)?;
        }
        Ok(params)
    }
}

impl fmt::Display for ParameterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, entry) in self.entries.values() {
            writeln!(f, "{} = {}", key, entry.text)?;
        }
        Ok(())
    }
}

impl Serialize for ParameterData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.entries
                .values()
                .map(|(k, e)| (k.as_str(), e.text.as_str())),
        )
    }
}

impl<'de> Deserialize<'de> for ParameterData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut params = ParameterData::new();
        for (key, value) in raw {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            params.set(&key, &text).map_err(serde::de::Error::custom)?;
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut p = ParameterData::new();
        p.set("DTHR", "4000 [ft]").unwrap();
        assert!(p.contains("dthr"));
        assert!((p.get_value("Dthr").unwrap() - 1219.2).abs() < 1e-9);
        assert_eq!(p.get_unit("dthr"), Some(Unit::Foot));

        p.set("dthr", "1 [nmi]").unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.keys(), vec!["DTHR"]);
        assert_eq!(p.get_value("DTHR"), Some(1852.0));
    }

    #[test]
    fn test_strings_and_numbers() {
        let mut p = ParameterData::new();
        p.set("id", "wcv-a").unwrap();
        p.set("tthr", "35").unwrap();
        assert_eq!(p.get_string("ID"), Some("wcv-a"));
        assert_eq!(p.get_value("id"), None);
        assert_eq!(p.get_value("TTHR"), Some(35.0));
        assert_eq!(p.get_unit("TTHR"), None);
    }

    #[test]
    fn test_malformed_unit_is_rejected() {
        let mut p = ParameterData::new();
        assert!(matches!(
            p.set("zthr", "450 [furlong]"),
            Err(WcvError::UnknownUnit(_))
        ));
        assert!(matches!(
            p.set("zthr", "high [ft]"),
            Err(WcvError::MalformedParameter { .. })
        ));
        assert!(matches!(
            p.set("zthr", "450 [ft"),
            Err(WcvError::MalformedParameter { .. })
        ));
        assert!(p.is_empty());
    }

    #[test]
    fn test_parse_lines() {
        let text = "# thresholds\nDTHR = 0.66 [nmi]\n\nZTHR = 450 [ft]\nid = test\n";
        let p = ParameterData::parse_lines(text).unwrap();
        assert_eq!(p.len(), 3);
        assert!((p.get_value_in("dthr", Unit::NauticalMile).unwrap() - 0.66).abs() < 1e-12);
        assert_eq!(p.get_string("id"), Some("test"));

        let err = ParameterData::parse_lines("DTHR 4000").unwrap_err();
        assert!(matches!(err, WcvError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_set_internal_displays_in_unit() {
        let mut p = ParameterData::new();
        p.set_internal("ZTHR", 137.16, Unit::Foot);
        assert!(p.get_string("ZTHR").unwrap().ends_with("[ft]"));
        assert_eq!(p.get_value("zthr"), Some(137.16));
    }

    #[test]
    fn test_json_round_trip() {
        let mut p = ParameterData::new();
        p.set("DTHR", "4000 [ft]").unwrap();
        p.set_bool("pvs", true);
        let json = serde_json::to_string(&p).unwrap();
        let back: ParameterData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get_bool("PVS"), Some(true));
        assert!((back.get_value("dthr").unwrap() - 1219.2).abs() < 1e-6);

        let numeric: ParameterData = serde_json::from_str(r#"{"TTHR": 20}"#).unwrap();
        assert_eq!(numeric.get_value("tthr"), Some(20.0));
    }
}
