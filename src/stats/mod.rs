//! Emission statistics.
//!
//! Observability only. Nothing in the emit path reads these numbers back;
//! they feed the session summary logged at shutdown.

pub mod event;
pub mod metrics;
pub mod recorder;
