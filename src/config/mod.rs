//! Configuration system for twinview

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::View;
use crate::sim::{Channel, ChannelSpec, ChannelTable, HistoryRange, HistorySource, SimError};

/// Global application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
    pub channels: ChannelsConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("twinview").join("config.toml"))
    }

    /// Check everything the simulation relies on and build the runtime
    /// settings. Called once at startup so the hot path never validates.
    pub fn validate(&self) -> Result<SimSettings, SimError> {
        let channels = self.channels.table()?;
        let asset_interval = interval("fleet", self.simulation.asset_interval_ms)?;
        let history_interval = interval("history", self.simulation.history_interval_ms)?;
        let history_range = self.simulation.history_range.parse::<HistoryRange>()?;
        let default_view = self.display.default_view.parse::<View>()?;

        Ok(SimSettings {
            channels,
            asset_interval,
            history_interval,
            history_range,
            history_source: self.simulation.history_source,
            seed: self.simulation.seed,
            default_view,
        })
    }
}

fn interval(source_name: &str, millis: u64) -> Result<Duration, SimError> {
    if millis == 0 {
        return Err(SimError::InvalidInterval {
            source_name: source_name.to_string(),
        });
    }
    Ok(Duration::from_millis(millis))
}

/// Validated runtime view of [`Config`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    pub channels: ChannelTable,
    pub asset_interval: Duration,
    pub history_interval: Duration,
    pub history_range: HistoryRange,
    pub history_source: HistorySource,
    pub seed: Option<u64>,
    pub default_view: View,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: String,
    pub default_view: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "tokyo-night".to_string(),
            default_view: "map".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub asset_interval_ms: u64,
    pub history_interval_ms: u64,
    pub history_range: String,
    pub history_source: HistorySource,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            asset_interval_ms: 3000,
            history_interval_ms: 5000,
            history_range: "1h".to_string(),
            history_source: HistorySource::Synthetic,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChannelConfig {
    pub min: f64,
    pub max: f64,
    pub max_step: f64,
}

impl From<ChannelSpec> for ChannelConfig {
    fn from(spec: ChannelSpec) -> Self {
        Self {
            min: spec.min(),
            max: spec.max(),
            max_step: spec.max_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChannelsConfig {
    pub cpu: ChannelConfig,
    pub memory: ChannelConfig,
    pub temperature: ChannelConfig,
    pub power: ChannelConfig,
    pub network: ChannelConfig,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        let spec = |c: Channel| ChannelConfig::from(c.default_spec());
        Self {
            cpu: spec(Channel::Cpu),
            memory: spec(Channel::Memory),
            temperature: spec(Channel::Temperature),
            power: spec(Channel::Power),
            network: spec(Channel::Network),
        }
    }
}

impl ChannelsConfig {
    fn get(&self, channel: Channel) -> &ChannelConfig {
        match channel {
            Channel::Cpu => &self.cpu,
            Channel::Memory => &self.memory,
            Channel::Temperature => &self.temperature,
            Channel::Power => &self.power,
            Channel::Network => &self.network,
        }
    }

    pub fn table(&self) -> Result<ChannelTable, SimError> {
        Channel::ALL
            .iter()
            .try_fold(ChannelTable::default(), |table, &channel| {
                let c = self.get(channel);
                let spec = ChannelSpec::new(channel, c.min, c.max, c.max_step)?;
                Ok(table.with(channel, spec))
            })
    }
}

/// Write the default configuration to `path`
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Created {}", path.display());
    Ok(())
}
