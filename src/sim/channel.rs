//! Metric channels, their valid ranges and per-tick volatility

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sim::error::SimError;

/// A single named numeric metric carried by every asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Cpu,
    Memory,
    Temperature,
    Power,
    Network,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Cpu,
        Channel::Memory,
        Channel::Temperature,
        Channel::Power,
        Channel::Network,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Temperature => "temperature",
            Self::Power => "power",
            Self::Network => "network",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°F",
            Self::Power => "W",
            _ => "%",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Factory bounds and step for this channel.
    pub fn default_spec(self) -> ChannelSpec {
        let (min, max, max_step) = match self {
            Self::Cpu => (20.0, 100.0, 10.0),
            Self::Memory => (20.0, 100.0, 8.0),
            Self::Temperature => (60.0, 85.0, 4.0),
            Self::Power => (0.0, 1000.0, 50.0),
            Self::Network => (70.0, 100.0, 6.0),
        };
        ChannelSpec { min, max, max_step }
    }

    /// How alarming a reading is. Temperature runs on its own scale.
    pub fn severity(self, value: f64) -> Severity {
        let (warn, critical) = match self {
            Self::Temperature => (75.0, 80.0),
            _ => (75.0, 90.0),
        };
        if value > critical {
            Severity::Critical
        } else if value > warn {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Closed value range `[min, max]` and the largest total swing per tick.
///
/// Only constructible through [`ChannelSpec::new`] or the factory table,
/// so a spec in hand always satisfies `min <= max` with finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelSpec {
    min: f64,
    max: f64,
    max_step: f64,
}

impl ChannelSpec {
    pub fn new(channel: Channel, min: f64, max: f64, max_step: f64) -> Result<Self, SimError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SimError::invalid_channel(channel, "bounds must be finite"));
        }
        if min > max {
            return Err(SimError::invalid_channel(
                channel,
                format!("min {} is greater than max {}", min, max),
            ));
        }
        if !max_step.is_finite() || max_step < 0.0 {
            return Err(SimError::invalid_channel(
                channel,
                format!("max_step {} must be finite and non-negative", max_step),
            ));
        }
        Ok(Self { min, max, max_step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Position of `value` inside the range as 0.0..=1.0, for gauges.
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Validated spec for every channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelTable {
    specs: [ChannelSpec; 5],
}

impl ChannelTable {
    pub fn get(&self, channel: Channel) -> &ChannelSpec {
        &self.specs[channel.index()]
    }

    pub fn with(mut self, channel: Channel, spec: ChannelSpec) -> Self {
        self.specs[channel.index()] = spec;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ChannelSpec)> + '_ {
        Channel::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self {
            specs: Channel::ALL.map(Channel::default_spec),
        }
    }
}

/// Current reading of every channel for one asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub cpu: f64,
    pub memory: f64,
    pub temperature: f64,
    pub power: f64,
    pub network: f64,
}

impl MetricSet {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Cpu => self.cpu,
            Channel::Memory => self.memory,
            Channel::Temperature => self.temperature,
            Channel::Power => self.power,
            Channel::Network => self.network,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        let slot = match channel {
            Channel::Cpu => &mut self.cpu,
            Channel::Memory => &mut self.memory,
            Channel::Temperature => &mut self.temperature,
            Channel::Power => &mut self.power,
            Channel::Network => &mut self.network,
        };
        *slot = value;
    }

    /// True when every channel sits inside its configured range.
    pub fn within(&self, table: &ChannelTable) -> bool {
        table.iter().all(|(channel, spec)| {
            let v = self.get(channel);
            v >= spec.min() && v <= spec.max()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_factory_bounds() {
        let table = ChannelTable::default();
        let temp = table.get(Channel::Temperature);
        assert_eq!((temp.min(), temp.max(), temp.max_step()), (60.0, 85.0, 4.0));
        let power = table.get(Channel::Power);
        assert_eq!((power.min(), power.max(), power.max_step()), (0.0, 1000.0, 50.0));
        let net = table.get(Channel::Network);
        assert_eq!((net.min(), net.max(), net.max_step()), (70.0, 100.0, 6.0));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = ChannelSpec::new(Channel::Cpu, 90.0, 10.0, 5.0).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidChannel {
                channel: Channel::Cpu,
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(ChannelSpec::new(Channel::Power, f64::NAN, 10.0, 1.0).is_err());
        assert!(ChannelSpec::new(Channel::Power, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(ChannelSpec::new(Channel::Power, 0.0, 10.0, f64::NAN).is_err());
        assert!(ChannelSpec::new(Channel::Power, 0.0, 10.0, -1.0).is_err());
    }

    #[test]
    fn degenerate_range_is_allowed() {
        let spec = ChannelSpec::new(Channel::Network, 80.0, 80.0, 6.0).unwrap();
        assert_eq!(spec.clamp(95.0), 80.0);
        assert_eq!(spec.ratio(80.0), 0.0);
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(Channel::Temperature.severity(81.0), Severity::Critical);
        assert_eq!(Channel::Temperature.severity(76.0), Severity::Warning);
        assert_eq!(Channel::Temperature.severity(75.0), Severity::Normal);
        assert_eq!(Channel::Cpu.severity(92.0), Severity::Critical);
        assert_eq!(Channel::Cpu.severity(78.0), Severity::Warning);
        assert_eq!(Channel::Memory.severity(65.0), Severity::Normal);
    }

    #[test]
    fn temperature_ratio_spans_its_own_range() {
        let spec = Channel::Temperature.default_spec();
        assert!((spec.ratio(72.5) - 0.5).abs() < 1e-9);
    }
}
