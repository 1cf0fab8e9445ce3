use super::types::ForecastKey;
use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

/// From this hour on, today's day forecast gives way to tonight's.
pub const DAY_EXPIRY_HOUR: u32 = 21;

/// Until this hour, last night's forecast is still published.
pub const NIGHT_GRACE_END_HOUR: u32 = 8;

/// The wall-clock reading a run is evaluated against, in the configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMoment {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    /// At or after 21:00.
    pub day_expired: bool,
    /// Before 08:00.
    pub night_grace: bool,
}

impl RunMoment {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let local = now.naive_local();
        let today = local.date();
        Self {
            today,
            yesterday: today.pred_opt().unwrap_or(today),
            day_expired: local.hour() >= DAY_EXPIRY_HOUR,
            night_grace: local.hour() < NIGHT_GRACE_END_HOUR,
        }
    }

    /// Whether an entry is still worth publishing at this moment.
    pub fn retains(&self, key: &ForecastKey) -> bool {
        let last_night = key.night && key.date == self.yesterday;

        if key.date < self.today {
            return last_night && self.night_grace;
        }
        if last_night {
            return self.night_grace;
        }
        if key.date == self.today && self.day_expired && !key.night {
            return false;
        }
        true
    }
}
