use crate::{
    error::{Result, UsageError},
    store,
    week::ResetDay,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Upper bound of the usage percentage.
pub const MAX_PERCENTAGE: u8 = 100;

/// Runtime state persisted to `state.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UsageState {
    /// Share of the weekly limit used so far (0 – 100).
    #[serde(deserialize_with = "clamped_percentage")]
    pub percentage: u8,
    /// First day of the current tracking week. `None` only before first load.
    pub week_start: Option<NaiveDate>,
    /// Time of the last write to disk.
    pub last_updated: Option<DateTime<Local>>,
}

impl UsageState {
    /// Clamp `value` into `[0, 100]` and store it. Returns the stored value.
    pub fn set_percentage(&mut self, value: i32) -> u8 {
        // Lossless: the clamp keeps the value inside u8 range.
        self.percentage = value.clamp(0, i32::from(MAX_PERCENTAGE)) as u8;
        self.percentage
    }

    /// Align `week_start` with the week containing `today`.
    ///
    /// Returns `true` when the stored week has ended, in which case the
    /// percentage is cleared. A missing or future `week_start` is realigned
    /// without touching the percentage.
    pub fn roll_over(&mut self, reset_day: ResetDay, today: NaiveDate) -> bool {
        let current = reset_day.week_start(today);
        match self.week_start {
            Some(stored) if stored < current => {
                info!("Week of {stored} ended; resetting usage (new week starts {current})");
                self.percentage = 0;
                self.week_start = Some(current);
                true
            }
            Some(stored) if stored > current => {
                warn!("Stored week start {stored} is ahead of {current}; realigning");
                self.week_start = Some(current);
                false
            }
            Some(_) => false,
            None => {
                self.week_start = Some(current);
                false
            }
        }
    }
}

fn clamped_percentage<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    // Lossless: the clamp keeps the value inside u8 range.
    Ok(raw.clamp(0, i64::from(MAX_PERCENTAGE)) as u8)
}

/// [`UsageState`] bound to its file. Every mutation is written through
/// immediately; write failures are logged and the in-memory value is kept.
#[derive(Debug, Clone)]
pub struct StateStore {
    path:  PathBuf,
    state: UsageState,
}

impl StateStore {
    /// Load from `path` and apply the weekly rollover for the local date.
    pub fn load(path: impl Into<PathBuf>, reset_day: ResetDay) -> Self {
        Self::load_at(path, reset_day, Local::now().date_naive())
    }

    /// Like [`StateStore::load`] with an explicit "today".
    pub fn load_at(path: impl Into<PathBuf>, reset_day: ResetDay, today: NaiveDate) -> Self {
        let path = path.into();
        let state: UsageState = store::load_or_default(&path);
        let mut this = Self { path, state };

        let before = this.state.week_start;
        this.state.roll_over(reset_day, today);
        if this.state.week_start != before {
            this.flush();
        }
        this
    }

    pub fn state(&self) -> &UsageState {
        &self.state
    }

    pub fn percentage(&self) -> u8 {
        self.state.percentage
    }

    /// Stamp `last_updated` and write the state file.
    pub fn save(&mut self) -> Result<()> {
        self.state.last_updated = Some(Local::now());
        store::save(&self.path, &self.state).map_err(|e| {
            UsageError::State(format!("cannot write '{}': {e}", self.path.display()))
        })
    }

    /// Clamp, store, and persist. Returns the stored value.
    pub fn set_percentage(&mut self, value: i32) -> u8 {
        let stored = self.state.set_percentage(value);
        debug!("Usage set to {stored}%");
        self.flush();
        stored
    }

    /// Shift the percentage by `delta` points (clamped).
    pub fn adjust(&mut self, delta: i32) -> u8 {
        self.set_percentage(i32::from(self.state.percentage) + delta)
    }

    pub fn reset(&mut self) {
        info!("Usage reset to 0%");
        self.set_percentage(0);
    }

    /// Re-run the weekly rollover; persists when anything changed.
    pub fn check_rollover(&mut self, reset_day: ResetDay, today: NaiveDate) -> bool {
        let before = self.state.week_start;
        let reset = self.state.roll_over(reset_day, today);
        if reset || self.state.week_start != before {
            self.flush();
        }
        reset
    }

    fn flush(&mut self) {
        if let Err(e) = self.save() {
            warn!("{e}; keeping state in memory only");
        }
    }
}
