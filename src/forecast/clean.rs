use crate::vocabulary::Vocabulary;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Turns a raw paragraph into publishable forecast text.
///
/// Drops the day-name prefix before the first separator, collapses whitespace runs, wraps
/// temperature expressions in emphasis markers and upper-cases the first character.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    separator: String,
    emphasis: String,
    temperatures: Vec<AnchoredPattern>,
}

#[derive(Debug, Clone)]
struct AnchoredPattern {
    regex: Regex,
    standalone: bool,
}

impl TextCleaner {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, regex::Error> {
        let temperatures = vocabulary
            .temperature_patterns
            .iter()
            .map(|p| {
                Ok(AnchoredPattern {
                    regex: Regex::new(&format!("^(?:{})", p.pattern))?,
                    standalone: p.standalone,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            separator: vocabulary.prefix_separator.clone(),
            emphasis: vocabulary.emphasis.clone(),
            temperatures,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let body = match text.split_once(self.separator.as_str()) {
            Some((_, rest)) => rest.trim(),
            None => text,
        };
        let collapsed = WHITESPACE_RUN.replace_all(body, " ");
        let highlighted = self.highlight_temperatures(collapsed.trim());
        capitalize_first(&highlighted)
    }

    /// Wraps every temperature expression not already touching an emphasis marker.
    ///
    /// Matches are leftmost and non-overlapping; at a given position the patterns are tried in
    /// vocabulary order and the first acceptable one wins.
    pub fn highlight_temperatures(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 4 * self.emphasis.len());
        let mut copied = 0;

        for (pos, _) in text.char_indices() {
            if pos < copied {
                continue;
            }
            if let Some(end) = self.temperature_at(text, pos) {
                out.push_str(&text[copied..pos]);
                out.push_str(&self.emphasis);
                out.push_str(&text[pos..end]);
                out.push_str(&self.emphasis);
                copied = end;
            }
        }

        out.push_str(&text[copied..]);
        out
    }

    fn temperature_at(&self, text: &str, pos: usize) -> Option<usize> {
        let before = text[..pos].chars().next_back();
        if before.is_some_and(|c| self.is_marker(c)) {
            return None;
        }
        let after_word = before.is_some_and(is_word_char);

        for pattern in &self.temperatures {
            if pattern.standalone && after_word {
                continue;
            }
            let Some(found) = pattern.regex.find(&text[pos..]) else {
                continue;
            };
            let end = pos + found.end();
            if text[end..].chars().next().is_some_and(|c| self.is_marker(c)) {
                continue;
            }
            return Some(end);
        }
        None
    }

    fn is_marker(&self, c: char) -> bool {
        self.emphasis.contains(c)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> TextCleaner {
        TextCleaner::new(&Vocabulary::polish()).unwrap()
    }

    #[test]
    fn test_clean_drops_day_prefix() {
        assert_eq!(
            cleaner().clean("PONIEDZIAŁEK – Dziś 15°C i słonecznie"),
            "Dziś **15°C** i słonecznie"
        );
    }

    #[test]
    fn test_clean_capitalizes_and_collapses_whitespace() {
        assert_eq!(
            cleaner().clean("  WTOREK –   pochmurno,   deszcz  "),
            "Pochmurno, deszcz"
        );
        assert_eq!(cleaner().clean("źle"), "Źle");
        assert_eq!(cleaner().clean(""), "");
        assert_eq!(cleaner().clean("SOBOTA –"), "");
    }

    #[test]
    fn test_only_first_separator_is_dropped() {
        assert_eq!(
            cleaner().clean("ŚRODA – rano mgła – potem słońce"),
            "Rano mgła – potem słońce"
        );
    }

    #[test]
    fn test_approximate_range_is_one_span() {
        assert_eq!(cleaner().clean("ok. -2/+2°C rano"), "**ok. -2/+2°C** rano");
        assert_eq!(cleaner().clean("temperatura ok 5°C"), "Temperatura **ok 5°C**");
    }

    #[test]
    fn test_from_to_phrase_is_one_span() {
        assert_eq!(
            cleaner().clean("Temperatura od -1 do +1°C, wiatr słaby"),
            "Temperatura **od -1 do +1°C**, wiatr słaby"
        );
    }

    #[test]
    fn test_plain_and_ranged_temperatures() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean("Mroźno, -3°C"), "Mroźno, **-3°C**");
        assert_eq!(cleaner.clean("max 15-20°C, noc 5/7°C"), "Max **15-20°C**, noc **5/7°C**");
        assert_eq!(cleaner.clean("(12°C)"), "(**12°C**)");
    }

    #[test]
    fn test_existing_emphasis_is_left_alone() {
        let cleaner = cleaner();
        assert_eq!(cleaner.highlight_temperatures("jest **15°C** dziś"), "jest **15°C** dziś");
        assert_eq!(
            cleaner.highlight_temperatures("**ok. 3°C** i 4°C"),
            "**ok. 3°C** i **4°C**"
        );
    }

    #[test]
    fn test_numbers_glued_to_words_are_not_temperatures() {
        let cleaner = cleaner();
        assert_eq!(cleaner.highlight_temperatures("123°C"), "123°C");
        assert_eq!(cleaner.highlight_temperatures("x15°C"), "x15°C");
        assert_eq!(cleaner.highlight_temperatures("bez temperatury"), "bez temperatury");
    }

    #[test]
    fn test_single_newline_survives_collapse() {
        assert_eq!(cleaner().clean("deszcz\nwiatr"), "Deszcz\nwiatr");
        assert_eq!(cleaner().clean("deszcz\n\nwiatr"), "Deszcz wiatr");
    }
}
