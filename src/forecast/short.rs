use super::retention::RunMoment;
use super::types::{ForecastKey, ForecastMap};
use crate::vocabulary::Vocabulary;
use chrono::Days;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Forecast texts under relative-day labels, in publishing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeForecast {
    entries: Vec<(String, String)>,
}

impl RelativeForecast {
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for RelativeForecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, text) in &self.entries {
            map.serialize_entry(label, text)?;
        }
        map.end()
    }
}

/// Projects the date-keyed forecast onto labels relative to `moment`.
///
/// Last night's label is only filled during the morning grace period.
pub fn project_relative(
    forecasts: &ForecastMap,
    moment: &RunMoment,
    vocabulary: &Vocabulary,
) -> RelativeForecast {
    let lookup = |key: ForecastKey| {
        forecasts
            .get(&key)
            .unwrap_or(vocabulary.no_data.as_str())
            .to_string()
    };

    let mut entries = Vec::with_capacity(1 + 2 * vocabulary.day_labels.len());

    let last_night = if moment.night_grace {
        lookup(ForecastKey::night(moment.yesterday))
    } else {
        vocabulary.no_data.clone()
    };
    entries.push((vocabulary.yesterday_night_label.clone(), last_night));

    for (offset, label) in vocabulary.day_labels.iter().enumerate() {
        let Some(date) = moment.today.checked_add_days(Days::new(offset as u64)) else {
            continue;
        };
        entries.push((label.clone(), lookup(ForecastKey::day(date))));
        entries.push((vocabulary.night_label(label), lookup(ForecastKey::night(date))));
    }

    RelativeForecast { entries }
}
