//! Streak bookkeeping for habits.
//!
//! A streak counts consecutive completed frequency periods. The state lives
//! on the habit row (`current_streak`, `longest_streak`,
//! `last_completed_date`) and is advanced incrementally on every completion
//! write rather than recomputed from the full entry log.

use chrono::{Days, Months, NaiveDate};

use crate::models::habit::HabitFrequency;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakState {
    pub current: i32,
    pub longest: i32,
    pub last_completed_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn new() -> Self {
        Self {
            current: 0,
            longest: 0,
            last_completed_date: None,
        }
    }
}

impl Default for StreakState {
    fn default() -> Self {
        Self::new()
    }
}

/// The day exactly one frequency period after `date`.
///
/// Monthly periods land on the same day-of-month; chrono clamps to the last
/// day of shorter months (Jan 31 + 1 month = Feb 28/29).
pub fn next_period(date: NaiveDate, frequency: HabitFrequency) -> NaiveDate {
    match frequency {
        HabitFrequency::Daily => date + Days::new(1),
        HabitFrequency::Weekly => date + Days::new(7),
        HabitFrequency::Monthly => date + Months::new(1),
    }
}

/// Apply one completion write to the streak state.
///
/// `was_completed` is the entry's completed flag before the upsert,
/// `now_completed` after. Rules:
/// - first completion, or a gap wider than one period → current = 1
/// - completion exactly one period after the last → current + 1
/// - re-completing the same day → unchanged
/// - un-checking → current - 1 (floor 0); `longest` never rolls back
/// - a completion dated before `last_completed_date` is recorded in the log
///   but does not move the streak
pub fn apply_entry(
    state: StreakState,
    frequency: HabitFrequency,
    day: NaiveDate,
    was_completed: bool,
    now_completed: bool,
) -> StreakState {
    let mut next = state;

    match (was_completed, now_completed) {
        (false, true) => match state.last_completed_date {
            None => {
                next.current = 1;
                next.last_completed_date = Some(day);
            }
            Some(last) if day == last => {}
            Some(last) if day < last => {
                // Backfill into history; the streak anchor stays put.
            }
            Some(last) => {
                if day == next_period(last, frequency) {
                    next.current += 1;
                } else {
                    next.current = 1;
                }
                next.last_completed_date = Some(day);
            }
        },
        (true, false) => {
            next.current = (state.current - 1).max(0);
        }
        // true→true and false→false are idempotent re-submissions.
        _ => {}
    }

    next.longest = next.longest.max(next.current);
    next
}

/// Expected number of completion entries for one habit over a window,
/// derived from its frequency. Used by the completion-rate aggregate.
pub fn expected_entries(frequency: HabitFrequency, window_days: i64) -> i64 {
    match frequency {
        HabitFrequency::Daily => window_days.max(1),
        HabitFrequency::Weekly => (window_days / 7).max(1),
        HabitFrequency::Monthly => (window_days / 30).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn complete(state: StreakState, day: NaiveDate) -> StreakState {
        apply_entry(state, HabitFrequency::Daily, day, false, true)
    }

    #[test]
    fn first_completion_starts_streak_at_one() {
        let state = complete(StreakState::new(), d(2026, 3, 1));
        assert_eq!(state.current, 1);
        assert_eq!(state.longest, 1);
        assert_eq!(state.last_completed_date, Some(d(2026, 3, 1)));
    }

    #[test]
    fn three_consecutive_days_build_a_streak_of_three() {
        let mut state = StreakState::new();
        for day in 1..=3 {
            state = complete(state, d(2026, 3, day));
        }
        assert_eq!(state.current, 3);
        assert_eq!(state.longest, 3);
    }

    #[test]
    fn skipping_a_day_resets_current_but_keeps_longest() {
        let mut state = StreakState::new();
        for day in 1..=3 {
            state = complete(state, d(2026, 3, day));
        }
        // Day 4 missed; completing day 5 starts over.
        state = complete(state, d(2026, 3, 5));
        assert_eq!(state.current, 1);
        assert_eq!(state.longest, 3);
        assert_eq!(state.last_completed_date, Some(d(2026, 3, 5)));
    }

    #[test]
    fn same_day_recheck_is_idempotent() {
        let mut state = StreakState::new();
        state = complete(state, d(2026, 3, 1));
        state = complete(state, d(2026, 3, 2));
        let again = apply_entry(state, HabitFrequency::Daily, d(2026, 3, 2), false, true);
        assert_eq!(again, state);
    }

    #[test]
    fn already_completed_resubmission_changes_nothing() {
        let mut state = StreakState::new();
        state = complete(state, d(2026, 3, 1));
        let again = apply_entry(state, HabitFrequency::Daily, d(2026, 3, 1), true, true);
        assert_eq!(again, state);
    }

    #[test]
    fn unchecking_decrements_current_but_never_longest() {
        let mut state = StreakState::new();
        for day in 1..=3 {
            state = complete(state, d(2026, 3, day));
        }
        state = apply_entry(state, HabitFrequency::Daily, d(2026, 3, 3), true, false);
        assert_eq!(state.current, 2);
        assert_eq!(state.longest, 3);
    }

    #[test]
    fn unchecking_floors_at_zero() {
        let state = apply_entry(
            StreakState::new(),
            HabitFrequency::Daily,
            d(2026, 3, 1),
            true,
            false,
        );
        assert_eq!(state.current, 0);
        assert_eq!(state.longest, 0);
    }

    #[test]
    fn backfilled_completion_does_not_move_the_anchor() {
        let mut state = StreakState::new();
        state = complete(state, d(2026, 3, 10));
        let after = complete(state, d(2026, 3, 4));
        assert_eq!(after.current, 1);
        assert_eq!(after.last_completed_date, Some(d(2026, 3, 10)));
    }

    #[test]
    fn weekly_streak_advances_on_exact_seven_day_gap() {
        let mut state = StreakState::new();
        state = apply_entry(state, HabitFrequency::Weekly, d(2026, 3, 2), false, true);
        state = apply_entry(state, HabitFrequency::Weekly, d(2026, 3, 9), false, true);
        assert_eq!(state.current, 2);

        // Eight days later is a gap: reset.
        state = apply_entry(state, HabitFrequency::Weekly, d(2026, 3, 17), false, true);
        assert_eq!(state.current, 1);
        assert_eq!(state.longest, 2);
    }

    #[test]
    fn monthly_period_clamps_to_short_months() {
        assert_eq!(
            next_period(d(2026, 1, 31), HabitFrequency::Monthly),
            d(2026, 2, 28)
        );
        assert_eq!(
            next_period(d(2026, 3, 15), HabitFrequency::Monthly),
            d(2026, 4, 15)
        );
    }

    #[test]
    fn monthly_streak_advances_month_over_month() {
        let mut state = StreakState::new();
        state = apply_entry(state, HabitFrequency::Monthly, d(2026, 1, 15), false, true);
        state = apply_entry(state, HabitFrequency::Monthly, d(2026, 2, 15), false, true);
        state = apply_entry(state, HabitFrequency::Monthly, d(2026, 3, 15), false, true);
        assert_eq!(state.current, 3);
        assert_eq!(state.longest, 3);
    }

    #[test]
    fn expected_entries_by_frequency() {
        assert_eq!(expected_entries(HabitFrequency::Daily, 30), 30);
        assert_eq!(expected_entries(HabitFrequency::Weekly, 30), 4);
        assert_eq!(expected_entries(HabitFrequency::Monthly, 30), 1);
        // Short windows still expect at least one entry.
        assert_eq!(expected_entries(HabitFrequency::Monthly, 7), 1);
    }
}
