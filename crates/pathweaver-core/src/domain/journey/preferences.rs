//! User preferences for journey personalization

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{JourneyType, Level};

const PREFERRED_JOURNEY_TYPE: &str = "preferred_journey_type";
const PATTERN_SEEKING_LEVEL: &str = "pattern_seeking_level";
const HIERARCHICAL_PREFERENCE: &str = "hierarchical_preference";
const ASSOCIATIVE_PREFERENCE: &str = "associative_preference";

/// Cognitive-style preferences
///
/// Parsing is lenient: a recognised key with a value of the wrong type or an
/// unknown variant is treated as absent and kept verbatim in `extra`, so
/// nothing the user stored is lost on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct UserPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_journey_type: Option<JourneyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_seeking_level: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchical_preference: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associative_preference: Option<Level>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences from any JSON value; non-objects give empty preferences
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map.clone()),
            _ => Self::default(),
        }
    }

    pub fn with_journey_type(mut self, journey_type: JourneyType) -> Self {
        self.set(PREFERRED_JOURNEY_TYPE, Value::from(journey_type.as_str()));
        self
    }

    pub fn with_pattern_seeking(mut self, level: Level) -> Self {
        self.pattern_seeking_level = Some(level);
        self
    }

    pub fn with_hierarchical(mut self, level: Level) -> Self {
        self.hierarchical_preference = Some(level);
        self
    }

    pub fn with_associative(mut self, level: Level) -> Self {
        self.associative_preference = Some(level);
        self
    }

    /// Set a single key, re-applying the lenient parsing rules
    pub fn set(&mut self, key: &str, value: Value) {
        let mut map = self.to_map();
        map.insert(key.to_string(), value);
        *self = Self::from(map);
    }

    /// Flat JSON object with every stored key
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map: Map<String, Value> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(t) = self.preferred_journey_type {
            map.insert(PREFERRED_JOURNEY_TYPE.into(), t.as_str().into());
        }
        for (key, level) in [
            (PATTERN_SEEKING_LEVEL, self.pattern_seeking_level),
            (HIERARCHICAL_PREFERENCE, self.hierarchical_preference),
            (ASSOCIATIVE_PREFERENCE, self.associative_preference),
        ] {
            if let Some(level) = level {
                map.insert(key.into(), level.as_str().into());
            }
        }
        map
    }

    pub fn is_empty(&self) -> bool {
        self.preferred_journey_type.is_none()
            && self.pattern_seeking_level.is_none()
            && self.hierarchical_preference.is_none()
            && self.associative_preference.is_none()
            && self.extra.is_empty()
    }
}

impl From<Map<String, Value>> for UserPreferences {
    fn from(map: Map<String, Value>) -> Self {
        let mut prefs = Self::default();
        for (key, value) in map {
            let accepted = match key.as_str() {
                PREFERRED_JOURNEY_TYPE => assign(
                    &mut prefs.preferred_journey_type,
                    value
                        .as_str()
                        .and_then(JourneyType::parse)
                        .filter(|t| *t != JourneyType::Default),
                ),
                PATTERN_SEEKING_LEVEL => assign(&mut prefs.pattern_seeking_level, level(&value)),
                HIERARCHICAL_PREFERENCE => {
                    assign(&mut prefs.hierarchical_preference, level(&value))
                }
                ASSOCIATIVE_PREFERENCE => assign(&mut prefs.associative_preference, level(&value)),
                _ => false,
            };
            if !accepted {
                prefs.extra.insert(key, value);
            }
        }
        prefs
    }
}

fn assign<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

fn level(value: &Value) -> Option<Level> {
    value.as_str().and_then(Level::parse)
}
