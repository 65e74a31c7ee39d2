use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::record::{Status, TelemetryRecord};
use crate::time::now_utc;

const MILEAGE_BASE: f64 = 5000.0;
const MILEAGE_SPREAD: u32 = 100;
const BATTERY_BASE: u8 = 80;
const BATTERY_SPREAD: u8 = 20;
const USAGE_BASE: f64 = 1200.0;
const USAGE_SPREAD: u32 = 10;
const STATUS_OUTCOMES: u32 = 10;

/// Samples records from the fixed distributions. Owns its random source so
/// a seeded generator replays the same sequence.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    asset_id: u32,
    seed: u64,
    rng: StdRng,
}

impl RecordGenerator {
    pub fn with_seed(asset_id: u32, seed: u64) -> Self {
        Self {
            asset_id,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the wall clock, so separate runs diverge.
    pub fn from_clock(asset_id: u32) -> Self {
        let now = Utc::now();
        let seed = now
            .timestamp_nanos_opt()
            .map(|n| n as u64)
            .unwrap_or_else(|| now.timestamp() as u64);
        Self::with_seed(asset_id, seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate(&mut self) -> TelemetryRecord {
        self.generate_at(now_utc())
    }

    pub fn generate_at(&mut self, timestamp: DateTime<Utc>) -> TelemetryRecord {
        let mileage = MILEAGE_BASE + self.rng.random_range(0..MILEAGE_SPREAD) as f64;
        let battery_health = BATTERY_BASE + self.rng.random_range(0..BATTERY_SPREAD);
        let usage_hours = USAGE_BASE + self.rng.random_range(0..USAGE_SPREAD) as f64;
        // Only the top outcome of the draw fails.
        let status = if self.rng.random_range(0..STATUS_OUTCOMES) == STATUS_OUTCOMES - 1 {
            Status::Fail
        } else {
            Status::Ok
        };

        TelemetryRecord {
            asset_id: self.asset_id,
            timestamp,
            mileage,
            battery_health,
            usage_hours,
            status,
        }
    }
}
