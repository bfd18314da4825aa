//! Daily streak arithmetic
//!
//! A streak counts consecutive calendar days with at least one submission.
//! Comparisons are at day granularity; callers pick the time zone by
//! choosing the event date (the CLI uses UTC).

use chrono::NaiveDate;

/// Result of applying a submission event to a user's streak state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    /// The streak after the event
    pub streak: u32,

    /// The calendar day of the most recent credit
    pub last_submission_date: NaiveDate,

    /// Whether the stored state needs rewriting
    pub changed: bool,
}

/// Compute the streak resulting from a submission on `event_date`.
///
/// - first ever submission starts the streak at 1
/// - a second submission on the same day leaves everything untouched
/// - a submission on the very next day extends the streak
/// - a gap of two or more days (or a clock that moved backwards) resets
///   the streak to 1
pub fn advance_streak(
    prior_streak: u32,
    last_submission_date: Option<NaiveDate>,
    event_date: NaiveDate,
) -> StreakUpdate {
    let Some(last) = last_submission_date else {
        return StreakUpdate {
            streak: 1,
            last_submission_date: event_date,
            changed: true,
        };
    };

    let diff_days = (event_date - last).num_days();

    if diff_days == 0 {
        // Already credited today
        StreakUpdate {
            streak: prior_streak,
            last_submission_date: last,
            changed: false,
        }
    } else if diff_days == 1 {
        StreakUpdate {
            streak: prior_streak + 1,
            last_submission_date: event_date,
            changed: true,
        }
    } else {
        StreakUpdate {
            streak: 1,
            last_submission_date: event_date,
            changed: true,
        }
    }
}
