use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::Bar;

const DATE_LABEL_FORMAT: &str = "%d.%m.%Y";

/// Time zone used to resolve calendar days for bar date labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelTimeZone {
    /// Viewer's local time zone.
    #[default]
    Local,
    /// Fixed UTC offset in seconds east of Greenwich.
    FixedOffsetSeconds(i32),
}

impl LabelTimeZone {
    /// Calendar day of `unix_seconds` in this zone.
    ///
    /// Returns `None` for timestamps chrono cannot represent or offsets outside
    /// `(-86_400, 86_400)`.
    #[must_use]
    pub fn calendar_day(self, unix_seconds: i64) -> Option<NaiveDate> {
        let utc = DateTime::from_timestamp(unix_seconds, 0)?;
        match self {
            Self::Local => Some(utc.with_timezone(&Local).date_naive()),
            Self::FixedOffsetSeconds(seconds) => {
                let offset = FixedOffset::east_opt(seconds)?;
                Some(utc.with_timezone(&offset).date_naive())
            }
        }
    }
}

/// Formats the calendar day of a bar timestamp as `day.month.year`.
#[must_use]
pub fn format_bar_date(unix_seconds: i64, time_zone: LabelTimeZone) -> Option<String> {
    time_zone
        .calendar_day(unix_seconds)
        .map(|day| day.format(DATE_LABEL_FORMAT).to_string())
}

/// Selects the bars that open a new calendar day.
///
/// A bar is labelled when its day differs from the immediately preceding bar's
/// day; bar 0 is always labelled. Bars whose timestamp cannot be resolved are
/// skipped and do not reset the comparison.
#[must_use]
pub fn day_boundary_labels(bars: &[Bar], time_zone: LabelTimeZone) -> Vec<(usize, String)> {
    let mut labels = Vec::new();
    let mut previous_day: Option<NaiveDate> = None;
    for (index, bar) in bars.iter().enumerate() {
        let Some(day) = time_zone.calendar_day(bar.time) else {
            continue;
        };
        if previous_day != Some(day) {
            labels.push((index, day.format(DATE_LABEL_FORMAT).to_string()));
        }
        previous_day = Some(day);
    }
    labels
}
