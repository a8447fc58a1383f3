use std::future::Future;
use std::time::{Duration, Instant};
use tracing::info;

/// Run a future and report its wall-clock duration alongside its output.
/// Purely an observer: the output is handed back untouched.
pub async fn timed<F, T>(fut: F) -> (T, Duration)
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    (out, start.elapsed())
}

/// Wrap one handler invocation, emitting the measured latency as a tracing
/// event. Emitted exactly once per invocation, whether the action succeeded
/// or failed.
pub async fn measured<F, T>(action: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let (out, elapsed) = timed(fut).await;
    info!(
        action,
        latency_ms = elapsed.as_millis() as u64,
        "action completed"
    );
    out
}
