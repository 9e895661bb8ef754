//! Periodic memory maintenance.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::memory::MemoryReport;

/// Controls a running maintenance loop.
///
/// The loop stops when [`stop`](Self::stop) is called, when the handle is
/// dropped, or when its coordinator shuts down or goes away.
pub struct MaintenanceHandle {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<u64>>,
}

impl MaintenanceHandle {
    /// Spawn a loop calling `pass` every `period`, first after one period.
    /// The loop ends early once `pass` returns `None`.
    pub(crate) fn spawn<F>(
        runtime: &Handle,
        period: Duration,
        mut shutdown: watch::Receiver<bool>,
        mut pass: F,
    ) -> Self
    where
        F: FnMut() -> Option<MemoryReport> + Send + 'static,
    {
        let (stop, mut stop_rx) = watch::channel(false);
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut passes = 0u64;
            loop {
                tokio::select! {
                    _ = interval.tick() => match pass() {
                        Some(report) => {
                            passes += 1;
                            debug!(passes, ?report, "maintenance pass complete");
                        }
                        None => break,
                    },
                    _ = stopped(&mut stop_rx) => break,
                    _ = stopped(&mut shutdown) => break,
                }
            }
            debug!(passes, "maintenance loop stopped");
            passes
        });
        Self {
            stop,
            task: Some(task),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the loop and wait for it. Returns the number of passes run.
    pub async fn stop(mut self) -> u64 {
        self.stop.send_replace(true);
        match self.task.take() {
            Some(task) => task.await.unwrap_or(0),
            None => 0,
        }
    }
}

impl Drop for MaintenanceHandle {
    fn drop(&mut self) {
        self.stop.send_replace(true);
    }
}

/// Resolves once the flag is set or its sender is gone.
async fn stopped(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}
