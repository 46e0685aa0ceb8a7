//! Next-period, phase and fertility-window estimation.
//!
//! Everything here is a pure function of a [`Profile`], its [`PeriodLog`]s and
//! the date the caller considers "today".

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::models::{CyclePrediction, FertilityWindow, PeriodLog, Phase, Profile};

/// Days from ovulation to the next period. Fixed regardless of cycle length.
pub const LUTEAL_DAYS: i64 = 14;
const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;
const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("invalid cycle configuration: cycle length {cycle_length}, period length {period_length} (both must be positive and period shorter than cycle)")]
    Configuration { cycle_length: i32, period_length: i32 },

    #[error("next period after {anchor} with cycle length {cycle_length} is outside the supported date range")]
    OutOfRange { anchor: NaiveDate, cycle_length: i32 },
}

fn validate(profile: &Profile) -> Result<(), CycleError> {
    if profile.cycle_length <= 0
        || profile.period_length <= 0
        || profile.period_length >= profile.cycle_length
    {
        return Err(CycleError::Configuration {
            cycle_length: profile.cycle_length,
            period_length: profile.period_length,
        });
    }
    Ok(())
}

/// Latest logged date, falling back to the profile's last period date.
///
/// On equal dates the earliest entry in `logs` wins.
pub fn anchor_date(profile: &Profile, logs: &[PeriodLog]) -> Option<NaiveDate> {
    let mut latest: Option<NaiveDate> = None;
    for log in logs {
        if latest.map_or(true, |d| log.date > d) {
            latest = Some(log.date);
        }
    }
    latest.or(profile.last_period_date)
}

/// `Ok(None)` means there is nothing to anchor a prediction on yet.
pub fn predict_next_period(
    profile: &Profile,
    logs: &[PeriodLog],
    today: NaiveDate,
) -> Result<Option<CyclePrediction>, CycleError> {
    validate(profile)?;

    let Some(anchor) = anchor_date(profile, logs) else {
        return Ok(None);
    };

    let cycle_length = i64::from(profile.cycle_length);
    let next_period_date = anchor
        .checked_add_signed(Duration::days(cycle_length))
        .ok_or(CycleError::OutOfRange {
            anchor,
            cycle_length: profile.cycle_length,
        })?;
    let raw_days_until = (next_period_date - today).num_days();

    let phase = cycle_phase(
        cycle_length - raw_days_until,
        cycle_length,
        i64::from(profile.period_length),
    );

    Ok(Some(CyclePrediction {
        next_period_date,
        days_until: raw_days_until.max(0),
        phase,
        fertility_window: estimate_fertility_window(next_period_date),
    }))
}

/// Maps a 1-based cycle day onto a phase, assuming a 14 day luteal phase.
///
/// The ovulation band is `[ovulation_day - 2, ovulation_day + 1]`.
pub fn cycle_phase(day_in_cycle: i64, cycle_length: i64, period_length: i64) -> Phase {
    let day = if day_in_cycle <= 0 {
        day_in_cycle + cycle_length
    } else {
        day_in_cycle
    };

    if day <= period_length {
        return Phase::Menstrual;
    }

    let ovulation_day = cycle_length - LUTEAL_DAYS;
    if day >= ovulation_day - 2 && day <= ovulation_day + 1 {
        Phase::Ovulation
    } else if day < ovulation_day - 2 {
        Phase::Follicular
    } else {
        Phase::Luteal
    }
}

/// `None` only when the window would fall outside chrono's date range.
pub fn estimate_fertility_window(next_period_date: NaiveDate) -> Option<FertilityWindow> {
    let ovulation_date = next_period_date.checked_sub_signed(Duration::days(LUTEAL_DAYS))?;
    Some(FertilityWindow {
        ovulation_date,
        fertile_start: ovulation_date
            .checked_sub_signed(Duration::days(FERTILE_DAYS_BEFORE_OVULATION))?,
        fertile_end: ovulation_date
            .checked_add_signed(Duration::days(FERTILE_DAYS_AFTER_OVULATION))?,
    })
}

/// Inclusive on both ends.
pub fn is_in_fertile_window(date: NaiveDate, window: &FertilityWindow) -> bool {
    (window.fertile_start..=window.fertile_end).contains(&date)
}

impl Phase {
    pub fn description(self) -> &'static str {
        match self {
            Phase::Menstrual => "Your period is here. Rest, stay hydrated, and be gentle with yourself.",
            Phase::Follicular => "Energy is rising! Great time for new projects and exercise.",
            Phase::Ovulation => "Peak fertility and energy. You may feel more social and confident.",
            Phase::Luteal => "Winding down. PMS symptoms may appear. Practice self-care.",
        }
    }

    /// Palette name the UI uses for this phase.
    pub fn color(self) -> &'static str {
        match self {
            Phase::Menstrual => "coral",
            Phase::Follicular => "mint",
            Phase::Ovulation => "lavender",
            Phase::Luteal => "peach",
        }
    }
}

pub const NO_PREDICTION_HINT: &str = "Log your first period to get personalized predictions.";
