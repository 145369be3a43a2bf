//! Shared runtime plumbing for arena binaries.

pub mod logging;
