use std::path::Path;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::EmitterConfig;
use crate::generator::RecordGenerator;
use crate::record::TelemetryRecord;
use crate::stats::event::EmissionEvent;
use crate::stats::metrics::{EmissionSnapshot, SessionSummary};
use crate::stats::recorder::EmissionRecorder;
use crate::store::{EmitError, TelemetryLog};
use crate::time::Tick;

/// Shortest cadence `run` will use; a zero interval is clamped up to this.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

pub struct Emitter {
    config: EmitterConfig,
    generator: RecordGenerator,
    recorder: EmissionRecorder,
    tick: Tick,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => RecordGenerator::with_seed(config.asset_id, seed),
            None => RecordGenerator::from_clock(config.asset_id),
        };
        Self::with_generator(config, generator)
    }

    pub fn with_generator(config: EmitterConfig, generator: RecordGenerator) -> Self {
        Self {
            config,
            generator,
            recorder: EmissionRecorder::new(),
            tick: Tick::new(),
        }
    }

    /// Tick the next emission will carry.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn snapshot(&self) -> EmissionSnapshot {
        self.recorder.snapshot()
    }

    /// One generate-and-append cycle against `log_path`.
    ///
    /// The log is opened before anything is sampled, so a failed open leaves
    /// the generator untouched. Failures are reported here and returned, never
    /// escalated: the next tick simply tries again.
    pub fn emit_once(&mut self, log_path: &Path) -> Result<TelemetryRecord, EmitError> {
        let tick = self.tick;
        self.tick = self.tick.next();

        let log = TelemetryLog::new(log_path);
        let mut handle = match log.open() {
            Ok(handle) => handle,
            Err(e) => {
                report(tick, &e);
                self.recorder.record(EmissionEvent::OpenFailed { tick });
                return Err(e);
            }
        };

        let record = self.generator.generate();
        if let Err(e) = handle.append_line(&record.to_csv_line()) {
            report(tick, &e);
            self.recorder.record(EmissionEvent::WriteFailed { tick });
            return Err(e);
        }
        drop(handle);

        self.recorder.record(EmissionEvent::Recorded {
            tick,
            status: record.status,
            battery_health: record.battery_health,
        });
        info!(tick = tick.frame, status = %record.status, "Telemetry recorded for Asset {}", record.asset_id);

        Ok(record)
    }

    /// Emits immediately, then once per interval until `cancel` fires.
    /// Returns the session summary.
    pub async fn run(mut self, cancel: CancellationToken) -> SessionSummary {
        let span = info_span!("emitter", run_id = %Uuid::new_v4());

        async move {
            info!(
                path = %self.config.log_path.display(),
                interval_ms = self.config.tick_interval.as_millis() as u64,
                seed = self.generator.seed(),
                "Telemetry emitter started"
            );

            let started = Instant::now();
            let mut cadence = interval(self.config.tick_interval.max(MIN_TICK_INTERVAL));
            cadence.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = cadence.tick() => {
                        let path = self.config.log_path.clone();
                        if self.emit_once(&path).is_err() {
                            debug!("Tick skipped, retrying next interval");
                        }
                    }
                }
            }

            let summary = self.recorder.aggregate_session(started.elapsed());
            info!(
                ticks = summary.ticks,
                open_failures = summary.open_failures,
                write_failures = summary.write_failures,
                "Telemetry emitter stopped"
            );
            summary
        }
        .instrument(span)
        .await
    }

    /// `run` with a token nobody holds, so it never stops on its own.
    pub async fn run_forever(self) -> SessionSummary {
        self.run(CancellationToken::new()).await
    }
}

fn report(tick: Tick, e: &EmitError) {
    match e {
        EmitError::Open { source, .. } | EmitError::Write { source, .. } => {
            error!(tick = tick.frame, cause = %source, "{}", e);
        }
    }
}
