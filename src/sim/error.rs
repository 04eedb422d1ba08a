//! Errors raised by the simulation engine and its configuration.

use crate::sim::channel::Channel;

/// Everything that can go wrong while configuring or driving the simulation.
///
/// The sampler itself is total; these errors are raised once, when the
/// configuration is loaded or a user command names something that does
/// not exist.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A channel's bounds or step are unusable
    #[error("invalid bounds for channel '{channel}': {reason}")]
    InvalidChannel { channel: Channel, reason: String },

    /// A tick interval of zero was requested
    #[error("tick interval for '{source_name}' must be greater than zero")]
    InvalidInterval { source_name: String },

    /// Look-back window label not one of 1h, 6h, 24h
    #[error("unknown history range '{0}' (expected 1h, 6h or 24h)")]
    UnknownRange(String),

    /// No control with this id
    #[error("unknown control '{0}'")]
    UnknownControl(String),

    /// The control exists but has no value to adjust
    #[error("control '{0}' is a toggle and has no adjustable value")]
    NotAdjustable(String),

    /// Unrecognized view or history source name in configuration
    #[error("unknown {kind} '{value}'")]
    UnknownSetting { kind: &'static str, value: String },
}

impl SimError {
    pub fn invalid_channel(channel: Channel, reason: impl Into<String>) -> Self {
        Self::InvalidChannel {
            channel,
            reason: reason.into(),
        }
    }
}
