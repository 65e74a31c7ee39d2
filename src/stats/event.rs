use serde::{Deserialize, Serialize};

use crate::record::Status;
use crate::time::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionEvent {
    Recorded {
        tick: Tick,
        status: Status,
        battery_health: u8,
    },

    OpenFailed {
        tick: Tick,
    },

    WriteFailed {
        tick: Tick,
    },
}

impl EmissionEvent {
    pub fn tick(&self) -> Tick {
        match self {
            EmissionEvent::Recorded { tick, .. }
            | EmissionEvent::OpenFailed { tick }
            | EmissionEvent::WriteFailed { tick } => *tick,
        }
    }
}
