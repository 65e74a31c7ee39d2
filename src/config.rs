use std::path::PathBuf;
use std::time::Duration;

use crate::time::tick_interval;

pub const DEFAULT_LOG_PATH: &str = "telemetry.csv";
pub const DEFAULT_ASSET_ID: u32 = 101;

#[derive(Debug, Clone)]
pub struct EmitterConfig {
    pub log_path: PathBuf,
    pub tick_interval: Duration,
    pub asset_id: u32,
    /// `None` seeds from the wall clock at construction.
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            tick_interval: tick_interval(),
            asset_id: DEFAULT_ASSET_ID,
            seed: None,
        }
    }
}
