use super::retention::RunMoment;
use super::types::ForecastMap;

/// Combines freshly scraped forecasts with the previously published snapshot.
///
/// Both sides go through the same retention rule. On a key collision the fresh text wins, so
/// the snapshot only fills gaps such as days the article no longer covers.
pub fn merge_forecasts(fresh: ForecastMap, prior: &ForecastMap, moment: &RunMoment) -> ForecastMap {
    let mut merged: ForecastMap = fresh
        .into_iter()
        .filter(|(key, _)| moment.retains(key))
        .collect();

    for (key, text) in prior.iter() {
        if merged.contains_key(key) || !moment.retains(key) {
            continue;
        }
        merged.insert(*key, text.clone());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::ForecastKey;
    use chrono::TimeZone;
    use chrono_tz::Europe::Warsaw;

    fn moment(hour: u32) -> RunMoment {
        RunMoment::at(&Warsaw.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap())
    }

    fn map(entries: &[(&str, &str)]) -> ForecastMap {
        entries
            .iter()
            .map(|(k, v)| (k.parse::<ForecastKey>().unwrap(), v.to_string()))
            .collect()
    }

    fn keys(map: &ForecastMap) -> Vec<String> {
        map.keys().map(ToString::to_string).collect()
    }

    #[test]
    fn test_fresh_wins_on_collision() {
        let fresh = map(&[("11.01.2025", "nowa")]);
        let prior = map(&[("11.01.2025", "stara"), ("12.01.2025", "z archiwum")]);

        let merged = merge_forecasts(fresh, &prior, &moment(12));

        assert_eq!(merged, map(&[("11.01.2025", "nowa"), ("12.01.2025", "z archiwum")]));
    }

    #[test]
    fn test_today_depends_on_evening_cutoff() {
        let fresh = map(&[("10.01.2025", "dziś")]);

        let noon = merge_forecasts(fresh.clone(), &ForecastMap::new(), &moment(12));
        assert_eq!(keys(&noon), ["10.01.2025"]);

        let late = merge_forecasts(fresh, &ForecastMap::new(), &moment(21));
        assert!(late.is_empty());
    }

    #[test]
    fn test_expired_entries_dropped_from_both_sides() {
        let fresh = map(&[("09.01.2025", "wczoraj"), ("11.01.2025", "jutro")]);
        let prior = map(&[("09.01.2025", "wczoraj stare"), ("08.01.2025N", "dawno")]);

        let merged = merge_forecasts(fresh, &prior, &moment(6));

        assert_eq!(keys(&merged), ["11.01.2025"]);
    }

    #[test]
    fn test_last_night_from_snapshot_survives_morning() {
        let fresh = map(&[("10.01.2025", "dziś")]);
        let prior = map(&[("09.01.2025N", "wczorajsza noc")]);

        let morning = merge_forecasts(fresh.clone(), &prior, &moment(7));
        assert_eq!(keys(&morning), ["09.01.2025N", "10.01.2025"]);

        let later = merge_forecasts(fresh, &prior, &moment(9));
        assert_eq!(keys(&later), ["10.01.2025"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let fresh = map(&[("10.01.2025N", "noc"), ("12.01.2025", "pojutrze")]);
        let prior = map(&[("11.01.2025", "jutro"), ("12.01.2025", "stare")]);

        let first = merge_forecasts(fresh.clone(), &prior, &moment(15));
        let second = merge_forecasts(fresh, &prior, &moment(15));

        assert_eq!(first, second);
        assert_eq!(keys(&first), ["10.01.2025N", "11.01.2025", "12.01.2025"]);
        assert_eq!(first.get(&"12.01.2025".parse().unwrap()), Some("pojutrze"));
    }
}
