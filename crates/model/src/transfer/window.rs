use crate::transfer::watermark::TransferMode;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window width must be positive, got {0}s")]
    NonPositiveWidth(i64),

    #[error("Window starting at {0} overflows the timestamp range")]
    Overflow(NaiveDateTime),
}

/// Fixed-width interval over the timestamp domain, the unit of extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn starting_at(start: NaiveDateTime, width: TimeDelta) -> Result<Self, WindowError> {
        if width <= TimeDelta::zero() {
            return Err(WindowError::NonPositiveWidth(width.num_seconds()));
        }
        let end = start
            .checked_add_signed(width)
            .ok_or(WindowError::Overflow(start))?;
        Ok(TimeWindow { start, end })
    }

    pub fn width(&self) -> TimeDelta {
        self.end - self.start
    }

    /// The adjacent window of the same width.
    pub fn next(&self) -> Result<Self, WindowError> {
        TimeWindow::starting_at(self.end, self.width())
    }

    /// Whether a row stamped `ts` belongs to this window under `mode`.
    ///
    /// Fresh windows are `[start, end)`; resume windows are `(start, end]`
    /// so the row sitting exactly on the watermark is not fetched twice.
    pub fn admits(&self, mode: TransferMode, ts: NaiveDateTime) -> bool {
        match mode {
            TransferMode::Fresh => self.start <= ts && ts < self.end,
            TransferMode::Resume => self.start < ts && ts <= self.end,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_fresh_bounds_are_half_open() {
        let w = TimeWindow::starting_at(at(9, 0), TimeDelta::hours(1)).unwrap();
        assert!(w.admits(TransferMode::Fresh, at(9, 0)));
        assert!(w.admits(TransferMode::Fresh, at(9, 59)));
        assert!(!w.admits(TransferMode::Fresh, at(10, 0)));
    }

    #[test]
    fn test_resume_bounds_exclude_watermark() {
        let w = TimeWindow::starting_at(at(9, 0), TimeDelta::hours(1)).unwrap();
        assert!(!w.admits(TransferMode::Resume, at(9, 0)));
        assert!(w.admits(TransferMode::Resume, at(9, 1)));
        assert!(w.admits(TransferMode::Resume, at(10, 0)));
    }

    #[test]
    fn test_next_is_adjacent() {
        let w = TimeWindow::starting_at(at(9, 0), TimeDelta::minutes(30)).unwrap();
        let n = w.next().unwrap();
        assert_eq!(n.start, at(9, 30));
        assert_eq!(n.end, at(10, 0));
    }

    #[test]
    fn test_rejects_empty_width() {
        assert_eq!(
            TimeWindow::starting_at(at(9, 0), TimeDelta::zero()),
            Err(WindowError::NonPositiveWidth(0))
        );
        assert!(TimeWindow::starting_at(NaiveDateTime::MAX, TimeDelta::hours(1)).is_err());
    }
}
