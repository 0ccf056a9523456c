//! New-year countdown state and text formatting.
//!
//! Celebration rule: from January 1st 00:00 through the end of January
//! `celebration_days` (local time) the countdown is hidden, both greeting
//! banners are shown and one fireworks burst is requested. Once that window
//! has passed, the target moves to the following January 1st.
//!
//! Calendar checks use wall-clock time; the remaining time is measured
//! between absolute instants so offset changes (DST) are counted.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};

/// Midnight opening `year`, as wall-clock time.
pub fn new_year(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Pin a wall-clock time to `zone`. A repeated time picks the earlier
/// instant; a skipped one is read as UTC.
pub fn resolve<Tz: TimeZone>(zone: &Tz, wall: NaiveDateTime) -> DateTime<Tz> {
    zone.from_local_datetime(&wall)
        .earliest()
        .unwrap_or_else(|| zone.from_utc_datetime(&wall))
}

/// Time left before the target, in whole units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Saturates at zero once `now` is past `target`.
    pub fn between<Tz: TimeZone, Tz2: TimeZone>(target: DateTime<Tz>, now: DateTime<Tz2>) -> Self {
        let total = target.signed_duration_since(now).num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: total / 3_600 % 24,
            minutes: total / 60 % 60,
            seconds: total % 60,
        }
    }
}

pub fn format_clock(now: NaiveDateTime) -> String {
    format!(
        "{}年{:02}月{:02}日{:02}時{:02}分{:02}秒",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

pub fn format_remaining(target_year: i32, r: Remaining) -> String {
    format!(
        "{target_year}年まで\nあと {:02}日{:02}時間{:02}分{:02}秒",
        r.days, r.hours, r.minutes, r.seconds
    )
}

/// What the page should show after one countdown refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownView {
    pub now_text: String,
    pub countdown_text: String,
    pub show_countdown: bool,
    /// Both greeting banners.
    pub show_celebration: bool,
    /// Set on the first refresh inside a celebration window only.
    pub launch_burst: bool,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    /// Wall-clock target, resolved against the caller's zone on each update.
    target: NaiveDateTime,
    celebration_days: u32,
    celebrated_year: Option<i32>,
}

impl Countdown {
    pub fn new(now: NaiveDateTime, celebration_days: u32) -> Self {
        Self {
            target: new_year(now.year() + 1),
            celebration_days,
            celebrated_year: None,
        }
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn in_celebration(&self, now: NaiveDateTime) -> bool {
        now.month() == 1 && now.day() <= self.celebration_days
    }

    pub fn update<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> CountdownView {
        let wall = now.naive_local();
        let celebrating = self.in_celebration(wall);
        let mut launch_burst = false;

        if celebrating {
            if self.celebrated_year != Some(wall.year()) {
                self.celebrated_year = Some(wall.year());
                launch_burst = true;
                log::info!("happy new year {}", wall.year());
            }
        } else if wall >= self.target {
            while self.target <= wall {
                self.target = new_year(self.target.year() + 1);
            }
            log::info!("countdown re-armed for {}", self.target.year());
        }

        let remaining = Remaining::between(resolve(&now.timezone(), self.target), now.clone());
        CountdownView {
            now_text: format_clock(wall),
            countdown_text: format_remaining(self.target.year(), remaining),
            show_countdown: !celebrating,
            show_celebration: celebrating,
            launch_burst,
        }
    }
}
