//! Data model for the arena round read model.
//!
//! Everything here is plain data: the indexed event records, the persisted
//! [`RoundReadModel`] snapshot, the resume cursor, and the tagged big-integer
//! wire encoding shared by all of them.

pub mod bigint;
pub mod cursor;
pub mod events;
pub mod model;
pub mod state;

pub use bigint::TaggedU256;
pub use cursor::RoundSyncCursor;
pub use events::{
    ChainLog, ClaimedEvent, CommittedEvent, FinalizedEvent, LogPosition, PlayerClaimedEvent,
    RevealedEvent, SteppedEvent,
};
pub use model::{
    BlockRange, EventCounts, ModelVersion, ReconciliationStatus, RoundAccounting, RoundEvents,
    RoundLifecycle, RoundReadModel,
};
pub use state::RoundStateSnapshot;
