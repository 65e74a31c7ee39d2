pub mod config;
pub mod emitter;
pub mod generator;
pub mod record;
pub mod stats;
pub mod store;
pub mod time;

pub use config::EmitterConfig;
pub use emitter::Emitter;
pub use record::{Status, TelemetryRecord};
pub use store::EmitError;
