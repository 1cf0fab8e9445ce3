use super::clean::TextCleaner;
use super::types::{ForecastKey, ForecastMap};
use crate::vocabulary::Vocabulary;
use chrono::NaiveDate;
use regex::Regex;

/// Text of one article paragraph as the reader sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Text of the emphasized span, if the paragraph has one.
    pub marked: Option<String>,
    pub text: String,
}

#[cfg(test)]
impl Paragraph {
    pub fn new(marked: Option<&str>, text: &str) -> Self {
        Self {
            marked: marked.map(str::to_string),
            text: text.to_string(),
        }
    }
}

/// Date the next night paragraph without its own date belongs to.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Unset,
    Date(NaiveDate),
    /// The last dated paragraph carried a date that does not exist.
    Invalid,
}

/// Reads marked paragraphs of a forecast article into a [`ForecastMap`].
#[derive(Debug, Clone)]
pub struct ForecastExtractor {
    vocabulary: Vocabulary,
    date_pattern: Regex,
    cleaner: TextCleaner,
}

impl ForecastExtractor {
    pub fn new(vocabulary: Vocabulary) -> Result<Self, regex::Error> {
        let date_pattern = Regex::new(&vocabulary.date_pattern)?;
        let cleaner = TextCleaner::new(&vocabulary)?;
        Ok(Self {
            vocabulary,
            date_pattern,
            cleaner,
        })
    }

    /// Builds the forecast map from paragraphs in document order.
    ///
    /// `today` stands in for the date of a night paragraph that appears before any dated one.
    /// A marked paragraph without a keyword but with a temperature continues the last entry.
    pub fn extract(&self, paragraphs: &[Paragraph], today: NaiveDate) -> ForecastMap {
        let mut forecasts = ForecastMap::new();
        let mut anchor = Anchor::Unset;
        let mut last_key: Option<ForecastKey> = None;

        for paragraph in paragraphs {
            let Some(marked) = paragraph.marked.as_deref() else {
                continue;
            };
            let marked = marked.trim().to_uppercase();
            let text = paragraph.text.trim();

            if !self.vocabulary.has_keyword(&marked) {
                if !text.contains(self.vocabulary.temperature_marker.as_str()) {
                    continue;
                }
                let Some(key) = last_key else {
                    continue;
                };
                if let Some(entry) = forecasts.get_mut(&key) {
                    entry.push(' ');
                    entry.push_str(&self.cleaner.clean(text));
                    tracing::debug!("Appended continuation paragraph to {}", key);
                }
                continue;
            }

            let key = match self.key_for(&marked, anchor, today) {
                KeyOutcome::Key(key) => key,
                KeyOutcome::InvalidDate(raw) => {
                    tracing::debug!("Skipping paragraph with invalid date {}", raw);
                    anchor = Anchor::Invalid;
                    last_key = None;
                    continue;
                }
                KeyOutcome::None => continue,
            };

            if !key.night {
                anchor = Anchor::Date(key.date);
            }
            forecasts.insert(key, self.cleaner.clean(text));
            last_key = Some(key);
        }

        forecasts
    }

    fn key_for(&self, marked: &str, anchor: Anchor, today: NaiveDate) -> KeyOutcome {
        if let Some(captures) = self.date_pattern.captures(marked) {
            let raw = captures.get(1).map_or("", |m| m.as_str());
            return match raw.parse::<ForecastKey>() {
                Ok(key) if !key.night => KeyOutcome::Key(key),
                _ => KeyOutcome::InvalidDate(raw.to_string()),
            };
        }

        if !self.vocabulary.is_night(marked) {
            return KeyOutcome::None;
        }
        match anchor {
            Anchor::Date(date) => KeyOutcome::Key(ForecastKey::night(date)),
            Anchor::Unset => KeyOutcome::Key(ForecastKey::night(today)),
            Anchor::Invalid => KeyOutcome::None,
        }
    }
}

enum KeyOutcome {
    Key(ForecastKey),
    InvalidDate(String),
    None,
}
