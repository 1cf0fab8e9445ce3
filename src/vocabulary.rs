/// One alternative of the temperature expression family.
#[derive(Clone, Debug)]
pub struct TemperaturePattern {
    pub pattern: String,
    /// Only match where the preceding character is not part of a word.
    pub standalone: bool,
}

impl TemperaturePattern {
    pub fn standalone(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            standalone: true,
        }
    }

    pub fn anywhere(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            standalone: false,
        }
    }
}

/// Locale-specific words and markers used to read the article and to label the short forecast.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    /// Upper-cased day names, Monday first.
    pub day_names: Vec<String>,
    /// Upper-cased keyword marking a night forecast paragraph.
    pub night_keyword: String,
    /// Bracketed date embedded in the marked span, first capture group is `DD.MM.YYYY`.
    pub date_pattern: String,
    /// Separator between the day-name prefix and the forecast body.
    pub prefix_separator: String,
    /// Substring that flags a paragraph as carrying a temperature.
    pub temperature_marker: String,
    /// Temperature expressions to emphasize, tried in order at each position.
    pub temperature_patterns: Vec<TemperaturePattern>,
    pub emphasis: String,
    pub no_data: String,
    /// Labels for today, tomorrow and the following days, in offset order.
    pub day_labels: Vec<String>,
    pub yesterday_night_label: String,
    pub night_label_suffix: String,
}

impl Vocabulary {
    pub fn polish() -> Self {
        Self {
            day_names: [
                "PONIEDZIAŁEK",
                "WTOREK",
                "ŚRODA",
                "CZWARTEK",
                "PIĄTEK",
                "SOBOTA",
                "NIEDZIELA",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            night_keyword: "NOC".to_string(),
            date_pattern: r"\[(\d{2}\.\d{2}\.\d{4})\]".to_string(),
            prefix_separator: "–".to_string(),
            temperature_marker: "°C".to_string(),
            temperature_patterns: vec![
                TemperaturePattern::standalone(r"od\s+[-+]?\d{1,2}\s+do\s+[-+]?\d{1,2}°C"),
                TemperaturePattern::anywhere(r"ok\.?\s+[-+]?\d{1,2}(?:[-/][-+]?\d{1,2})?°C"),
                TemperaturePattern::standalone(r"[-+]?\d{1,2}(?:[-/][-+]?\d{1,2})?°C"),
            ],
            emphasis: "**".to_string(),
            no_data: "Brak danych".to_string(),
            day_labels: ["dzis", "jutro", "za_2_dni", "za_3_dni", "za_4_dni", "za_5_dni"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            yesterday_night_label: "wczoraj_noc".to_string(),
            night_label_suffix: "_noc".to_string(),
        }
    }

    /// True when the marked text names a day or the night keyword.
    pub fn has_keyword(&self, marked: &str) -> bool {
        self.day_names.iter().any(|day| marked.contains(day.as_str()))
            || marked.contains(self.night_keyword.as_str())
    }

    pub fn is_night(&self, marked: &str) -> bool {
        marked.contains(self.night_keyword.as_str())
    }

    pub fn night_label(&self, label: &str) -> String {
        format!("{}{}", label, self.night_label_suffix)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::polish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_cover_days_and_night() {
        let vocab = Vocabulary::polish();
        assert!(vocab.has_keyword("[01.01.2025] ŚRODA"));
        assert!(vocab.has_keyword("NOC"));
        assert!(vocab.has_keyword("NOC ZE ŚRODY NA CZWARTEK"));
        assert!(!vocab.has_keyword("UWAGA"));
    }

    #[test]
    fn test_night_label() {
        let vocab = Vocabulary::polish();
        assert_eq!(vocab.night_label("jutro"), "jutro_noc");
        assert_eq!(vocab.day_labels.len(), 6);
    }
}
