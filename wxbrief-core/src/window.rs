use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::BriefingError;

/// Optional inclusive [from, to] bounds for forecast entries.
///
/// Bounds are parsed once when the window is built; entry times are parsed
/// per call. An open window (no bounds at all) accepts everything without
/// even looking at the entry time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeWindow {
    from: Option<i64>,
    to: Option<i64>,
}

impl TimeWindow {
    /// Build a window from the optional `from`/`to` request parameters.
    /// Malformed bounds propagate to the caller.
    pub fn new(from: Option<&str>, to: Option<&str>) -> Result<Self, BriefingError> {
        Ok(Self {
            from: from.map(to_unix_time).transpose()?,
            to: to.map(to_unix_time).transpose()?,
        })
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `valid_time` falls inside the window, both ends inclusive.
    /// A malformed `valid_time` is an error, except for an open window,
    /// which short-circuits before parsing.
    pub fn contains(&self, valid_time: &str) -> Result<bool, BriefingError> {
        if self.is_open() {
            return Ok(true);
        }

        let at = to_unix_time(valid_time)?;
        if let Some(from) = self.from {
            if at < from {
                return Ok(false);
            }
        }
        if let Some(to) = self.to {
            if at > to {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// ISO-8601 date-time string to epoch seconds.
///
/// Offset-qualified strings are the supported path. Strings without an
/// offset (including bare dates, taken as midnight) resolve in the
/// machine-local timezone, matching the behavior this service always had.
fn to_unix_time(value: &str) -> Result<i64, BriefingError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp());
    }
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return local_timestamp(naive, value);
    }
    let date: NaiveDate = value.parse()?;
    local_timestamp(date.and_time(NaiveTime::MIN), value)
}

fn local_timestamp(naive: NaiveDateTime, raw: &str) -> Result<i64, BriefingError> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.timestamp()),
        LocalResult::None => Err(BriefingError::InvalidLocalTime(raw.to_string())),
    }
}
