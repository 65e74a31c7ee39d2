use telemetry_gen::{Emitter, EmitterConfig};
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Failures on stderr, confirmations on stdout.
        .with_writer(std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, stopping");
                shutdown.cancel();
            }
            // Without a signal handler the emitter just runs until killed.
            Err(e) => tracing::warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let summary = Emitter::new(EmitterConfig::default()).run(cancel).await;
    tracing::info!("Session summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}
