//! Round read-model synchronization pipeline.
//!
//! One sync pass flows window calculation -> read-model build (concurrent
//! fetch, reorg-safe merge, reconciliation) -> persistence. Each stage is
//! exposed on its own so it can be driven and tested independently.

pub mod builder;
pub mod errors;
pub mod reconcile;
pub mod store;
pub mod window;

pub use builder::{build_round_read_model, BuildParams};
pub use errors::{StoreError, SyncError};
pub use reconcile::{reconcile_round, ReconcileInput, Reconciliation};
pub use window::{compute_sync_window, SyncWindow, SyncWindowParams};
