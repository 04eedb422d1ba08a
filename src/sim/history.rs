//! Rolling window of timestamped samples behind the analytics charts

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::sim::aggregate::AggregateSnapshot;
use crate::sim::error::SimError;
use crate::sim::sampler::RandomSource;

/// Spacing of back-filled samples
pub const BACKFILL_SPACING_MINUTES: i64 = 5;

/// Samples per hour of back-fill
const SAMPLES_PER_HOUR: usize = (60 / BACKFILL_SPACING_MINUTES) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalSample {
    pub timestamp: DateTime<Local>,
    pub cpu: f64,
    pub memory: f64,
    pub temperature: f64,
    pub power: f64,
    pub efficiency: f64,
}

impl HistoricalSample {
    /// Chart point built from live fleet statistics.
    ///
    /// Efficiency has no fleet counterpart; the mean network health is the
    /// closest stand-in.
    pub fn from_aggregate(agg: &AggregateSnapshot, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            cpu: agg.avg_cpu,
            memory: agg.avg_memory,
            temperature: agg.avg_temperature,
            power: agg.total_power,
            efficiency: agg.avg_network,
        }
    }

    pub fn get(&self, metric: HistoryMetric) -> f64 {
        match metric {
            HistoryMetric::Cpu => self.cpu,
            HistoryMetric::Memory => self.memory,
            HistoryMetric::Temperature => self.temperature,
            HistoryMetric::Power => self.power,
            HistoryMetric::Efficiency => self.efficiency,
        }
    }
}

/// Tracked series in a [`HistoricalSample`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMetric {
    Cpu,
    Memory,
    Temperature,
    Power,
    Efficiency,
}

impl HistoryMetric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU %",
            Self::Memory => "Memory %",
            Self::Temperature => "Temperature °F",
            Self::Power => "Power W",
            Self::Efficiency => "Efficiency %",
        }
    }
}

/// Look-back window selectable in the analytics view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "24h")]
    Day,
}

impl HistoryRange {
    pub const ALL: [HistoryRange; 3] = [Self::OneHour, Self::SixHours, Self::Day];

    pub fn hours(self) -> usize {
        match self {
            Self::OneHour => 1,
            Self::SixHours => 6,
            Self::Day => 24,
        }
    }

    /// Back-fill covers both ends, so one hour is 13 points.
    pub fn window_size(self) -> usize {
        self.hours() * SAMPLES_PER_HOUR + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::SixHours => "6h",
            Self::Day => "24h",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::OneHour => Self::SixHours,
            Self::SixHours => Self::Day,
            Self::Day => Self::OneHour,
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HistoryRange {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Ok(Self::OneHour),
            "6h" => Ok(Self::SixHours),
            "24h" | "1d" => Ok(Self::Day),
            other => Err(SimError::UnknownRange(other.to_string())),
        }
    }
}

/// Where live chart points come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySource {
    /// Independent random draws, unrelated to the fleet
    #[default]
    Synthetic,
    /// Fleet aggregates at each tick
    Fleet,
}

/// Draws synthetic chart samples in plausible operating ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleGenerator;

impl SampleGenerator {
    pub fn generate(
        &self,
        rng: &mut dyn RandomSource,
        timestamp: DateTime<Local>,
    ) -> HistoricalSample {
        HistoricalSample {
            timestamp,
            cpu: rng.between(60.0, 30.0),
            memory: rng.between(50.0, 40.0),
            temperature: rng.between(68.0, 12.0),
            power: rng.between(400.0, 300.0),
            efficiency: rng.between(85.0, 10.0),
        }
    }
}

/// Fixed-capacity FIFO of chart samples, oldest first
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<HistoricalSample>,
    window: usize,
    range: HistoryRange,
}

impl HistoryBuffer {
    pub fn new(range: HistoryRange) -> Self {
        Self {
            samples: VecDeque::with_capacity(range.window_size()),
            window: range.window_size(),
            range,
        }
    }

    /// Buffer with an explicit capacity, independent of any range.
    #[cfg(test)]
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            range: HistoryRange::default(),
        }
    }

    /// Discard everything and regenerate a full window for `range`,
    /// spaced [`BACKFILL_SPACING_MINUTES`] apart and ending at `now`.
    pub fn backfill(
        &mut self,
        range: HistoryRange,
        now: DateTime<Local>,
        generator: &SampleGenerator,
        rng: &mut dyn RandomSource,
    ) {
        self.range = range;
        self.window = range.window_size();
        self.samples = (0..self.window)
            .rev()
            .map(|i| {
                let timestamp = now - Duration::minutes(i as i64 * BACKFILL_SPACING_MINUTES);
                generator.generate(rng, timestamp)
            })
            .collect();
        tracing::debug!(range = %range, samples = self.samples.len(), "history back-filled");
    }

    /// Push a sample, evicting the oldest once the window is full.
    pub fn append(&mut self, sample: HistoricalSample) {
        while self.samples.len() >= self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.window
    }

    pub fn range(&self) -> HistoryRange {
        self.range
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoricalSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&HistoricalSample> {
        self.samples.back()
    }

    /// Most recent value of `metric`, 0 when empty.
    pub fn current(&self, metric: HistoryMetric) -> f64 {
        self.latest().map(|s| s.get(metric)).unwrap_or(0.0)
    }

    /// Change between the last two samples, 0 with fewer than two.
    pub fn trend(&self, metric: HistoryMetric) -> f64 {
        let n = self.samples.len();
        if n < 2 {
            return 0.0;
        }
        self.samples[n - 1].get(metric) - self.samples[n - 2].get(metric)
    }

    /// `(index, value)` pairs for a chart dataset
    pub fn series(&self, metric: HistoryMetric) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, s.get(metric)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sampler::{ChaChaSource, FixedSequence};
    use pretty_assertions::assert_eq;

    fn sample(marker: f64) -> HistoricalSample {
        HistoricalSample {
            timestamp: Local::now(),
            cpu: marker,
            memory: marker,
            temperature: marker,
            power: marker,
            efficiency: marker,
        }
    }

    fn cpus(buffer: &HistoryBuffer) -> Vec<f64> {
        buffer.iter().map(|s| s.cpu).collect()
    }

    #[test]
    fn full_buffer_evicts_oldest_first() {
        let mut buffer = HistoryBuffer::with_window(5);
        for i in 0..5 {
            buffer.append(sample(i as f64));
        }
        assert_eq!(cpus(&buffer), vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        buffer.append(sample(5.0));
        assert_eq!(cpus(&buffer), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn grows_until_warm() {
        let mut buffer = HistoryBuffer::with_window(3);
        buffer.append(sample(0.0));
        assert_eq!(buffer.len(), 1);
        buffer.append(sample(1.0));
        buffer.append(sample(2.0));
        buffer.append(sample(3.0));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn window_sizes_per_range() {
        assert_eq!(HistoryRange::OneHour.window_size(), 13);
        assert_eq!(HistoryRange::SixHours.window_size(), 73);
        assert_eq!(HistoryRange::Day.window_size(), 289);
    }

    #[test]
    fn backfill_spacing_ends_at_now() {
        let now = Local::now();
        let mut buffer = HistoryBuffer::new(HistoryRange::OneHour);
        let mut rng = ChaChaSource::seeded(1);
        buffer.backfill(HistoryRange::OneHour, now, &SampleGenerator, &mut rng);

        assert_eq!(buffer.len(), 13);
        assert_eq!(buffer.latest().map(|s| s.timestamp), Some(now));
        let first = buffer.iter().next().map(|s| s.timestamp);
        assert_eq!(first, Some(now - Duration::minutes(60)));
    }

    #[test]
    fn switching_range_discards_and_regenerates() {
        let now = Local::now();
        let mut buffer = HistoryBuffer::new(HistoryRange::Day);
        let mut rng = ChaChaSource::seeded(1);
        buffer.backfill(HistoryRange::Day, now, &SampleGenerator, &mut rng);
        assert_eq!(buffer.len(), 289);

        buffer.backfill(HistoryRange::OneHour, now, &SampleGenerator, &mut rng);
        assert_eq!(buffer.len(), 13);
        assert_eq!(buffer.window_size(), 13);
        assert_eq!(buffer.range(), HistoryRange::OneHour);

        buffer.append(sample(1.0));
        assert_eq!(buffer.len(), 13);
    }

    #[test]
    fn generated_samples_stay_in_operating_ranges() {
        let mut rng = ChaChaSource::seeded(77);
        for _ in 0..500 {
            let s = SampleGenerator.generate(&mut rng, Local::now());
            assert!((60.0..90.0).contains(&s.cpu));
            assert!((50.0..90.0).contains(&s.memory));
            assert!((68.0..80.0).contains(&s.temperature));
            assert!((400.0..700.0).contains(&s.power));
            assert!((85.0..95.0).contains(&s.efficiency));
        }
    }

    #[test]
    fn current_and_trend() {
        let mut buffer = HistoryBuffer::with_window(4);
        assert_eq!(buffer.current(HistoryMetric::Cpu), 0.0);
        assert_eq!(buffer.trend(HistoryMetric::Cpu), 0.0);

        buffer.append(sample(70.0));
        assert_eq!(buffer.trend(HistoryMetric::Cpu), 0.0);

        buffer.append(sample(64.5));
        assert_eq!(buffer.current(HistoryMetric::Power), 64.5);
        assert_eq!(buffer.trend(HistoryMetric::Cpu), -5.5);
    }

    #[test]
    fn fixed_draws_produce_midpoints() {
        let mut rng = FixedSequence::constant(0.5);
        let s = SampleGenerator.generate(&mut rng, Local::now());
        assert_eq!(
            (s.cpu, s.memory, s.temperature, s.power, s.efficiency),
            (75.0, 70.0, 74.0, 550.0, 90.0)
        );
    }

    #[test]
    fn parses_range_labels() {
        assert_eq!("6h".parse::<HistoryRange>(), Ok(HistoryRange::SixHours));
        assert_eq!(" 24H ".parse::<HistoryRange>(), Ok(HistoryRange::Day));
        assert_eq!(
            "2h".parse::<HistoryRange>(),
            Err(SimError::UnknownRange("2h".to_string()))
        );
    }

    #[test]
    fn range_cycle_wraps() {
        assert_eq!(HistoryRange::Day.next(), HistoryRange::OneHour);
    }
}
