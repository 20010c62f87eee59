// Series windower - Synthetic bulb pair windows for when the feed has nothing
use crate::domain::bulb::FULL_ON;
use crate::domain::feed::{BulbPair, BulbPairSeries, ChannelPoint, ChannelSeries};
use crate::domain::time_range::TimeRange;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::ops::Range;

const PARTIAL_LEVEL: f64 = 0.5;
const DARK: f64 = 0.0;

const PARTIAL_CURRENT_MA: Range<u32> = 150..180;
const FULL_CURRENT_MA: Range<u32> = 280..320;

/// Odds of a generated primary sample being dark or dimmed; the rest are fully on.
#[derive(Debug, Clone, Copy)]
struct FailureProfile {
    off: f64,
    partial: f64,
}

fn failure_profile(pair: BulbPair) -> FailureProfile {
    match pair {
        BulbPair::One => FailureProfile { off: 0.15, partial: 0.15 },
        BulbPair::Two => FailureProfile { off: 0.20, partial: 0.10 },
    }
}

fn primary_level<R: Rng>(profile: FailureProfile, rng: &mut R) -> f64 {
    let roll: f64 = rng.random();
    if roll < profile.off {
        DARK
    } else if roll < profile.off + profile.partial {
        PARTIAL_LEVEL
    } else {
        FULL_ON
    }
}

fn primary_current<R: Rng>(level: f64, rng: &mut R) -> f64 {
    if level == DARK {
        0.0
    } else if level < FULL_ON {
        f64::from(rng.random_range(PARTIAL_CURRENT_MA))
    } else {
        f64::from(rng.random_range(FULL_CURRENT_MA))
    }
}

/// Generate one pair's window for `range`.
///
/// The backup lights exactly when the primary is dark, and every current
/// reading tracks the status of the lamp it belongs to.
pub fn synthetic_pair<R: Rng>(pair: BulbPair, range: TimeRange, now: DateTime<Utc>, rng: &mut R) -> BulbPairSeries {
    let profile = failure_profile(pair);
    let timestamps = range.timestamps(now);

    let mut primary_status = Vec::with_capacity(timestamps.len());
    let mut primary_current_ma = Vec::with_capacity(timestamps.len());
    let mut backup_status = Vec::with_capacity(timestamps.len());
    let mut backup_current_ma = Vec::with_capacity(timestamps.len());

    for time in timestamps {
        let primary = primary_level(profile, rng);
        let backup = if primary == DARK { FULL_ON } else { DARK };
        let backup_current = if backup == FULL_ON {
            f64::from(rng.random_range(FULL_CURRENT_MA))
        } else {
            0.0
        };

        primary_status.push(ChannelPoint::new(time, primary));
        primary_current_ma.push(ChannelPoint::new(time, primary_current(primary, rng)));
        backup_status.push(ChannelPoint::new(time, backup));
        backup_current_ma.push(ChannelPoint::new(time, backup_current));
    }

    BulbPairSeries {
        pair,
        primary_status: ChannelSeries::new(primary_status),
        primary_current: ChannelSeries::new(primary_current_ma),
        backup_status: ChannelSeries::new(backup_status),
        backup_current: ChannelSeries::new(backup_current_ma),
    }
}

pub fn synthetic_window<R: Rng>(
    pairs: impl IntoIterator<Item = BulbPair>,
    range: TimeRange,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<BulbPairSeries> {
    pairs
        .into_iter()
        .map(|pair| synthetic_pair(pair, range, now, rng))
        .collect()
}
