//! Activity window the host schedules the provider in.

use chrono::{Days, NaiveDateTime, NaiveTime, TimeDelta};

use crate::prelude::*;

/// Ticks at `start + k * interval` not later than `end`, every day, in local time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Activity {
    start: NaiveTime,
    end: NaiveTime,
    interval: TimeDelta,
}

impl Default for Activity {
    /// Every hour from 02:00 till 21:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::MIN + TimeDelta::hours(2),
            end: NaiveTime::MIN + TimeDelta::hours(21),
            interval: TimeDelta::hours(1),
        }
    }
}

impl Activity {
    pub fn new(start: NaiveTime, end: NaiveTime, interval: TimeDelta) -> Result<Self> {
        ensure!(start <= end, "the activity must start before it ends");
        ensure!(interval > TimeDelta::zero(), "the interval must be positive");
        Ok(Self { start, end, interval })
    }

    /// First tick strictly after `now`.
    #[must_use]
    pub fn next_tick_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let date = now.date();
        let end = date.and_time(self.end);
        let mut tick = date.and_time(self.start);
        while tick <= end {
            if tick > now {
                return tick;
            }
            tick += self.interval;
        }
        date.checked_add_days(Days::new(1)).unwrap_or(date).and_time(self.start)
    }
}
