use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const KEY_DATE_FORMAT: &str = "%d.%m.%Y";
pub const NIGHT_SUFFIX: char = 'N';

/// Date of a forecast entry, optionally marking the night after that date.
///
/// Orders by date first, the day entry before the night entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForecastKey {
    pub date: NaiveDate,
    pub night: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid forecast key: {0:?}")]
pub struct InvalidKey(pub String);

impl ForecastKey {
    pub fn day(date: NaiveDate) -> Self {
        Self { date, night: false }
    }

    pub fn night(date: NaiveDate) -> Self {
        Self { date, night: true }
    }
}

impl FromStr for ForecastKey {
    type Err = InvalidKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (date_part, night) = match trimmed.strip_suffix(NIGHT_SUFFIX) {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };
        NaiveDate::parse_from_str(date_part, KEY_DATE_FORMAT)
            .map(|date| Self { date, night })
            .map_err(|_| InvalidKey(raw.to_string()))
    }
}

impl fmt::Display for ForecastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format(KEY_DATE_FORMAT))?;
        if self.night {
            write!(f, "{}", NIGHT_SUFFIX)?;
        }
        Ok(())
    }
}

impl Serialize for ForecastKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Forecast texts keyed by date, always iterated in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ForecastMap(BTreeMap<ForecastKey, String>);

impl ForecastMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a JSON object, skipping keys that are not dates and values that are
    /// not strings. Anything other than an object yields `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(object) = value else {
            return None;
        };

        let mut map = Self::new();
        for (raw_key, value) in object {
            let (Ok(key), serde_json::Value::String(text)) =
                (raw_key.parse::<ForecastKey>(), value)
            else {
                continue;
            };
            map.insert(key, text);
        }
        Some(map)
    }

    pub fn insert(&mut self, key: ForecastKey, text: String) -> Option<String> {
        self.0.insert(key, text)
    }

    pub fn get(&self, key: &ForecastKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_mut(&mut self, key: &ForecastKey) -> Option<&mut String> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &ForecastKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ForecastKey, &String)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ForecastKey> {
        self.0.keys()
    }
}

impl FromIterator<(ForecastKey, String)> for ForecastMap {
    fn from_iter<I: IntoIterator<Item = (ForecastKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ForecastMap {
    type Item = (ForecastKey, String);
    type IntoIter = std::collections::btree_map::IntoIter<ForecastKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
