use serde::Serialize;
use std::collections::VecDeque;

use super::event::EmissionEvent;
use crate::record::Status;
use crate::time::Tick;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmissionSnapshot {
    pub ticks: u64,
    pub records_written: u64,
    pub open_failures: u64,
    pub write_failures: u64,
    pub fail_status: u64,
    pub avg_battery_health: f64,
    pub min_battery_health: Option<u8>,
    pub last_tick: Option<Tick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub duration_secs: u64,
    pub ticks: u64,
    pub records_written: u64,
    pub open_failures: u64,
    pub write_failures: u64,
    pub fail_ratio: f64,
}

pub fn compute_snapshot(events: &VecDeque<EmissionEvent>) -> EmissionSnapshot {
    let mut snap = EmissionSnapshot::default();
    let mut battery_total: u64 = 0;

    for event in events {
        snap.ticks += 1;
        snap.last_tick = Some(event.tick());

        match event {
            EmissionEvent::Recorded { status, battery_health, .. } => {
                snap.records_written += 1;
                battery_total += u64::from(*battery_health);
                if *status == Status::Fail {
                    snap.fail_status += 1;
                }
                snap.min_battery_health = Some(match snap.min_battery_health {
                    Some(min) => min.min(*battery_health),
                    None => *battery_health,
                });
            }
            EmissionEvent::OpenFailed { .. } => snap.open_failures += 1,
            EmissionEvent::WriteFailed { .. } => snap.write_failures += 1,
        }
    }

    if snap.records_written > 0 {
        snap.avg_battery_health = battery_total as f64 / snap.records_written as f64;
    }

    snap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window() {
        let snap = compute_snapshot(&VecDeque::new());
        assert_eq!(snap, EmissionSnapshot::default());
    }

    #[test]
    fn test_counts_and_battery() {
        let events: VecDeque<_> = vec![
            EmissionEvent::Recorded { tick: Tick { frame: 0 }, status: Status::Ok, battery_health: 90 },
            EmissionEvent::OpenFailed { tick: Tick { frame: 1 } },
            EmissionEvent::Recorded { tick: Tick { frame: 2 }, status: Status::Fail, battery_health: 82 },
        ]
        .into();

        let snap = compute_snapshot(&events);
        assert_eq!(snap.ticks, 3);
        assert_eq!(snap.records_written, 2);
        assert_eq!(snap.open_failures, 1);
        assert_eq!(snap.fail_status, 1);
        assert_eq!(snap.min_battery_health, Some(82));
        assert_eq!(snap.avg_battery_health, 86.0);
        assert_eq!(snap.last_tick, Some(Tick { frame: 2 }));
    }
}
