//! Opening hours of a restaurant.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CLOCK_TIME_FORMAT;
use crate::errors::{AppError, AppResult};

/// Parse a 24h `HH:MM` clock string. A trailing `:SS` is accepted and dropped.
pub fn parse_clock_time(raw: &str) -> AppResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, CLOCK_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| AppError::validation(format!("Invalid time '{}', expected HH:MM", raw)))
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    // hour() and minute() of a valid NaiveTime always form a valid time
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Render a clock time the way it is accepted.
pub fn format_clock_time(time: &NaiveTime) -> String {
    time.format(CLOCK_TIME_FORMAT).to_string()
}

/// One opening-hours interval attached to a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenTime {
    pub id: i32,
    pub restaurant_id: i32,
    pub day_of_week: i32,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub create_at: DateTime<Utc>,
    pub update_at: Option<DateTime<Utc>>,
}

impl OpenTime {
    /// True iff this interval covers `time` on `day_of_week`.
    ///
    /// Both ends are inclusive. Intervals that cross midnight
    /// (`close_time < open_time`) never match.
    pub fn is_open_at(&self, day_of_week: i32, time: NaiveTime) -> bool {
        self.day_of_week == day_of_week && self.open_time <= time && time <= self.close_time
    }
}

/// Raw opening-hours entry as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpenTimeInput {
    /// Day of week, nominally 1 = Monday ... 7 = Sunday; stored as given
    #[schema(example = 3)]
    pub day_of_week: i32,
    /// Opening clock time
    #[schema(example = "12:00")]
    pub open_time: String,
    /// Closing clock time
    #[schema(example = "20:30")]
    pub close_time: String,
}

/// Validated opening-hours entry ready to be stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenTimeDraft {
    pub day_of_week: i32,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

impl OpenTimeDraft {
    pub fn parse(input: &OpenTimeInput) -> AppResult<Self> {
        Ok(Self {
            day_of_week: input.day_of_week,
            open_time: parse_clock_time(&input.open_time)?,
            close_time: parse_clock_time(&input.close_time)?,
        })
    }

    /// Parse a whole batch; the first malformed entry rejects all of them.
    pub fn parse_batch(inputs: &[OpenTimeInput]) -> AppResult<Vec<Self>> {
        inputs.iter().map(Self::parse).collect()
    }
}

/// Partial update of an opening-hours entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenTimePatch {
    pub day_of_week: Option<i32>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl OpenTimePatch {
    pub fn is_empty(&self) -> bool {
        self.day_of_week.is_none() && self.open_time.is_none() && self.close_time.is_none()
    }

    /// Overwrite only the fields present in the patch.
    pub fn apply_to(&self, open_time: &mut OpenTime) {
        if let Some(day) = self.day_of_week {
            open_time.day_of_week = day;
        }
        if let Some(open) = self.open_time {
            open_time.open_time = open;
        }
        if let Some(close) = self.close_time {
            open_time.close_time = close;
        }
    }
}

/// Raw partial update as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OpenTimePatchInput {
    #[schema(example = 5)]
    pub day_of_week: Option<i32>,
    #[schema(example = "11:30")]
    pub open_time: Option<String>,
    #[schema(example = "21:00")]
    pub close_time: Option<String>,
}

impl OpenTimePatchInput {
    pub fn parse(&self) -> AppResult<OpenTimePatch> {
        Ok(OpenTimePatch {
            day_of_week: self.day_of_week,
            open_time: self.open_time.as_deref().map(parse_clock_time).transpose()?,
            close_time: self.close_time.as_deref().map(parse_clock_time).transpose()?,
        })
    }
}

/// Opening hours as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OpenTimeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 3)]
    pub day_of_week: i32,
    #[schema(example = "12:00")]
    pub open_time: String,
    #[schema(example = "20:30")]
    pub close_time: String,
}

impl From<OpenTime> for OpenTimeResponse {
    fn from(open_time: OpenTime) -> Self {
        Self {
            id: open_time.id,
            day_of_week: open_time.day_of_week,
            open_time: format_clock_time(&open_time.open_time),
            close_time: format_clock_time(&open_time.close_time),
        }
    }
}
