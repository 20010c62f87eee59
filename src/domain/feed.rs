// Feed samples, channel series and the record parser
use chrono::{DateTime, Utc};

pub const CHANNEL_COUNT: usize = 6;

/// The six numeric fields carried by every feed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PrimaryBulb1,
    SecondaryBulb1,
    PrimaryBulb2,
    SecondaryBulb2,
    Current1,
    Current2,
}

impl Channel {
    /// Zero-based slot; `field1` lives at index 0.
    pub fn index(self) -> usize {
        match self {
            Channel::PrimaryBulb1 => 0,
            Channel::SecondaryBulb1 => 1,
            Channel::PrimaryBulb2 => 2,
            Channel::SecondaryBulb2 => 3,
            Channel::Current1 => 4,
            Channel::Current2 => 5,
        }
    }
}

/// A feed record as it arrives, before any numeric parsing.
#[derive(Debug, Clone, Default)]
pub struct RawSample {
    pub created_at: String,
    pub fields: [Option<String>; CHANNEL_COUNT],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedSample {
    pub timestamp: DateTime<Utc>,
    pub fields: [f64; CHANNEL_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl ChannelPoint {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSeries {
    pub points: Vec<ChannelPoint>,
}

impl ChannelSeries {
    pub fn new(points: Vec<ChannelPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.points.iter().map(|p| p.time)
    }
}

/// One series per channel, all the same length as the source feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedChannels {
    series: [ChannelSeries; CHANNEL_COUNT],
}

impl FeedChannels {
    pub fn from_samples(samples: &[FeedSample]) -> Self {
        let series = std::array::from_fn(|idx| {
            ChannelSeries::new(
                samples
                    .iter()
                    .map(|s| ChannelPoint::new(s.timestamp, s.fields[idx]))
                    .collect(),
            )
        });
        Self { series }
    }

    pub fn channel(&self, channel: Channel) -> &ChannelSeries {
        &self.series[channel.index()]
    }

    pub fn sample_count(&self) -> usize {
        self.series[0].len()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("feed contains no samples")]
pub struct EmptyFeed;

/// Parse one field. Missing, malformed and non-finite values all read as 0.0.
pub fn parse_reading(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a whole feed into typed samples.
///
/// A record whose `created_at` cannot be read keeps its slot and inherits the
/// previous record's timestamp, or `fetched_at` when it is the first record.
pub fn parse_samples(raw: &[RawSample], fetched_at: DateTime<Utc>) -> Result<Vec<FeedSample>, EmptyFeed> {
    if raw.is_empty() {
        return Err(EmptyFeed);
    }

    let mut previous = fetched_at;
    let samples = raw
        .iter()
        .map(|record| {
            let timestamp = DateTime::parse_from_rfc3339(record.created_at.trim())
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(|_| {
                    tracing::debug!("Unreadable created_at {:?}, reusing {}", record.created_at, previous);
                    previous
                });
            previous = timestamp;

            FeedSample {
                timestamp,
                fields: std::array::from_fn(|idx| parse_reading(record.fields[idx].as_deref())),
            }
        })
        .collect();

    Ok(samples)
}

pub fn parse_feed(raw: &[RawSample], fetched_at: DateTime<Utc>) -> Result<FeedChannels, EmptyFeed> {
    parse_samples(raw, fetched_at).map(|samples| FeedChannels::from_samples(&samples))
}

/// One streetlight's primary/backup bulb pair and the current channel it reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulbPair {
    One,
    Two,
}

impl BulbPair {
    pub const ALL: [BulbPair; 2] = [BulbPair::One, BulbPair::Two];

    pub fn number(self) -> u8 {
        match self {
            BulbPair::One => 1,
            BulbPair::Two => 2,
        }
    }

    pub fn primary_channel(self) -> Channel {
        match self {
            BulbPair::One => Channel::PrimaryBulb1,
            BulbPair::Two => Channel::PrimaryBulb2,
        }
    }

    pub fn backup_channel(self) -> Channel {
        match self {
            BulbPair::One => Channel::SecondaryBulb1,
            BulbPair::Two => Channel::SecondaryBulb2,
        }
    }

    pub fn current_channel(self) -> Channel {
        match self {
            BulbPair::One => Channel::Current1,
            BulbPair::Two => Channel::Current2,
        }
    }
}

/// Latest-or-indexed view of a pair at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSample {
    pub time: DateTime<Utc>,
    pub primary: f64,
    pub primary_current: f64,
    pub backup: f64,
    pub backup_current: f64,
}

impl PairSample {
    /// Current drawn by whichever lamp is lit.
    pub fn lamp_current(&self) -> f64 {
        self.primary_current.max(self.backup_current)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulbPairSeries {
    pub pair: BulbPair,
    pub primary_status: ChannelSeries,
    pub primary_current: ChannelSeries,
    pub backup_status: ChannelSeries,
    pub backup_current: ChannelSeries,
}

impl BulbPairSeries {
    /// Live-data view: the pair shares one current channel, which is attributed
    /// to the backup only while the backup reads above zero.
    pub fn from_channels(channels: &FeedChannels, pair: BulbPair) -> Self {
        let primary_status = channels.channel(pair.primary_channel()).clone();
        let backup_status = channels.channel(pair.backup_channel()).clone();
        let primary_current = channels.channel(pair.current_channel()).clone();
        let backup_current = ChannelSeries::new(
            backup_status
                .points
                .iter()
                .zip(&primary_current.points)
                .map(|(status, current)| {
                    let value = if status.value > 0.0 { current.value } else { 0.0 };
                    ChannelPoint::new(current.time, value)
                })
                .collect(),
        );

        Self {
            pair,
            primary_status,
            primary_current,
            backup_status,
            backup_current,
        }
    }

    pub fn len(&self) -> usize {
        self.primary_status.len()
    }

    pub fn sample(&self, idx: usize) -> Option<PairSample> {
        let primary = self.primary_status.points.get(idx)?;
        Some(PairSample {
            time: primary.time,
            primary: primary.value,
            primary_current: self.primary_current.points.get(idx).map_or(0.0, |p| p.value),
            backup: self.backup_status.points.get(idx).map_or(0.0, |p| p.value),
            backup_current: self.backup_current.points.get(idx).map_or(0.0, |p| p.value),
        })
    }

    pub fn latest(&self) -> Option<PairSample> {
        self.len().checked_sub(1).and_then(|idx| self.sample(idx))
    }

    pub fn samples(&self) -> impl Iterator<Item = PairSample> + '_ {
        (0..self.len()).filter_map(|idx| self.sample(idx))
    }
}
