use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekday on which the usage percentage returns to zero.
///
/// Serialized with full English names (`"Monday"`), which is what the config
/// file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ResetDay {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl ResetDay {
    pub const ALL: [ResetDay; 7] = [
        ResetDay::Monday,
        ResetDay::Tuesday,
        ResetDay::Wednesday,
        ResetDay::Thursday,
        ResetDay::Friday,
        ResetDay::Saturday,
        ResetDay::Sunday,
    ];

    pub fn weekday(self) -> Weekday {
        match self {
            ResetDay::Monday    => Weekday::Mon,
            ResetDay::Tuesday   => Weekday::Tue,
            ResetDay::Wednesday => Weekday::Wed,
            ResetDay::Thursday  => Weekday::Thu,
            ResetDay::Friday    => Weekday::Fri,
            ResetDay::Saturday  => Weekday::Sat,
            ResetDay::Sunday    => Weekday::Sun,
        }
    }

    /// Latest date `<= today` that falls on this weekday.
    #[must_use]
    pub fn week_start(self, today: NaiveDate) -> NaiveDate {
        let back = (today.weekday().num_days_from_monday() + 7
            - self.weekday().num_days_from_monday())
            % 7;
        today - Days::new(u64::from(back))
    }

    /// Date on which the current tracking week ends (exclusive).
    #[must_use]
    pub fn next_reset(self, today: NaiveDate) -> NaiveDate {
        self.week_start(today) + Days::new(7)
    }

    /// Whole days left before the next reset, not counting the partially
    /// elapsed current day. Always in `0..=6`.
    #[must_use]
    pub fn whole_days_until_reset(self, today: NaiveDate) -> i64 {
        (self.next_reset(today) - today).num_days() - 1
    }
}

impl fmt::Display for ResetDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
