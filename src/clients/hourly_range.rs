//! Stitches hourly data for a span of days into one table.
//!
//! The forecast endpoint answers time machine requests one day at a time, so a
//! range costs one request per day. Requests are issued strictly one after another.

use crate::types::traits::request_time::RequestTime;
use crate::weather_data::frames::concat_frames;
use crate::{DarkSky, DarkSkyError, LatLon};
use chrono::{NaiveDateTime, TimeDelta};
use log::info;
use polars::prelude::DataFrame;

impl DarkSky {
    /// Fetches hourly data for every day in the half-open range `[start, end)` and
    /// stacks the days into one table, in chronological order.
    ///
    /// One request is made at `start`, then at `start + 24h`, and so on while the
    /// request time is before `end`. Steps are fixed 24-hour durations, so a range
    /// crossing a daylight saving change keeps the wall-clock time of `start`.
    /// An empty or inverted range makes no requests and returns an empty table.
    ///
    /// `start` and `end` can be `YYYY-MM-DDTHH:MM:SS` strings or chrono values, see
    /// [`RequestTime`].
    ///
    /// # Errors
    ///
    /// * [`DarkSkyError::TimeParse`] if a string bound does not match the format.
    ///   No request is made in that case.
    /// * Any error of [`DarkSky::hourly_weather`] for one of the days. The range is
    ///   abandoned at the first failing day and the days fetched so far are dropped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use darksky::{DarkSky, DarkSkyError, LatLon};
    ///
    /// # fn main() -> Result<(), DarkSkyError> {
    /// let client = DarkSky::from_env()?;
    /// // Two requests: 2020-01-01 and 2020-01-02.
    /// let frame = client.hourly_range(
    ///     LatLon(37.8, -122.4),
    ///     "2020-01-01T00:00:00",
    ///     "2020-01-03T00:00:00",
    /// )?;
    /// println!("{} hours", frame.height());
    /// # Ok(())
    /// # }
    /// ```
    pub fn hourly_range(
        &self,
        location: LatLon,
        start: impl RequestTime,
        end: impl RequestTime,
    ) -> Result<DataFrame, DarkSkyError> {
        let start = start.request_time()?;
        let end = end.request_time()?;
        collect_days(start, end, |day| self.hourly_at(location, day))
    }
}

/// Calls `fetch_day` for each 24-hour step in `[start, end)` and concatenates the results.
pub(crate) fn collect_days<F>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    mut fetch_day: F,
) -> Result<DataFrame, DarkSkyError>
where
    F: FnMut(NaiveDateTime) -> Result<DataFrame, DarkSkyError>,
{
    let mut frames = Vec::new();
    let mut day = start;
    while day < end {
        frames.push(fetch_day(day)?);
        day = day
            .checked_add_signed(TimeDelta::days(1))
            .ok_or(DarkSkyError::TimeOverflow(day))?;
    }

    info!(
        "Fetched hourly data for {} days from {} to {}",
        frames.len(),
        start,
        end
    );
    concat_frames(frames)
}
