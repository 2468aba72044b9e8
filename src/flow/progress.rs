use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;
use crate::config::ProgressConfig;

pub const PROGRESS_COMPLETE: u8 = 100;

/// Next cosmetic progress value. Never moves backwards and never passes
/// `ceiling`.
pub fn advance(current: u8, step: u8, ceiling: u8) -> u8 {
    if current >= ceiling {
        current
    } else {
        current.saturating_add(step).min(ceiling)
    }
}

/// Periodic task nudging a progress value toward a ceiling while a request
/// is outstanding. It reports nothing about the request itself.
///
/// Dropping the ticker cancels it; `stop` additionally waits for the task to
/// exit so no update can land afterwards.
pub struct ProgressTicker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn start(progress: Arc<watch::Sender<u8>>, cadence: &ProgressConfig) -> Self {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let period = Duration::from_millis(cadence.tick_ms.max(1));
        let step = cadence.step;
        let ceiling = cadence.ceiling;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => break,
                    _ = interval.tick() => {
                        progress.send_modify(|p| *p = advance(*p, step, ceiling));
                        trace!(progress = *progress.borrow(), "Progress tick");
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
