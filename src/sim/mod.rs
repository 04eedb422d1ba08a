//! Simulation engine: bounded random walks over a fleet of assets, derived
//! statistics, and the rolling chart window.

pub mod aggregate;
pub mod channel;
pub mod error;
pub mod fleet;
pub mod history;
pub mod sampler;
pub mod scheduler;

pub use aggregate::{aggregate, AggregateSnapshot};
pub use channel::{Channel, ChannelSpec, ChannelTable, Severity};
pub use error::SimError;
pub use fleet::{AssetStatus, AssetStore, MonitoredEntity};
pub use history::{
    HistoricalSample, HistoryBuffer, HistoryMetric, HistoryRange, HistorySource, SampleGenerator,
};
pub use sampler::{ChaChaSource, RandomSource};
pub use scheduler::{Scheduler, TickSource};
