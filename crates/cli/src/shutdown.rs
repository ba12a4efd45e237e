//! Signal-driven shutdown

use std::future::Future;
use std::io;
use tokio::signal::unix::{signal, SignalKind};

/// Register SIGINT/SIGTERM handlers and return a future that completes on
/// the first of them
///
/// Must be called inside the runtime. Launched children get default signal
/// dispositions back on exec and are left running.
pub fn install() -> io::Result<impl Future<Output = ()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("Received SIGINT"),
            _ = terminate.recv() => tracing::info!("Received SIGTERM"),
        }
    })
}
