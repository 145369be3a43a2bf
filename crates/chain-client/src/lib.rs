//! Read-only chain access for the round indexer.
//!
//! The [`RoundChainClient`] trait is the seam between the sync pipeline and
//! the chain; [`rpc::RpcRoundChainClient`] is the production implementation
//! over JSON-RPC.

pub mod client;
pub mod errors;
pub mod rpc;

pub use client::RoundChainClient;
pub use errors::ClientError;
pub use rpc::{HttpRoundChainClient, RpcRoundChainClient};
