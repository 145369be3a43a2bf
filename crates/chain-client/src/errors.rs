//! Chain client error types.

use thiserror::Error;

/// Failures while reading contract state or event logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("contract call: {0}")]
    Contract(#[from] alloy::contract::Error),

    /// A returned log has no block number or log index, so it cannot be
    /// placed in the total order.
    #[error("{event} log missing block number or log index")]
    UnorderedLog { event: &'static str },

    #[error("failed to decode {event} log: {source}")]
    LogDecode {
        event: &'static str,
        source: alloy::sol_types::Error,
    },

    #[error("registry has no current round set")]
    EmptyRegistry,

    #[error("invalid rpc url: {0}")]
    InvalidUrl(String),
}
