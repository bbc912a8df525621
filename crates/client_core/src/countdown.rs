use std::time::Duration;

use tokio::{task::JoinHandle, time};

use crate::verification::VerificationError;

/// Owns the single interval task behind the send-code countdown.
pub struct CountdownTicker {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Spawns the interval on the current tokio runtime. `on_tick` runs once
    /// per period, first after one full period; returning `false` ends the
    /// task.
    pub fn start<F>(&mut self, mut on_tick: F) -> Result<(), VerificationError>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        if self.is_active() {
            return Err(VerificationError::AlreadyActive);
        }

        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }
        }));
        tracing::debug!(period_ms = period.as_millis() as u64, "countdown ticker started");
        Ok(())
    }

    /// Returns whether a running task was stopped.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                let was_running = !task.is_finished();
                task.abort();
                tracing::debug!(was_running, "countdown ticker stopped");
                was_running
            }
            None => false,
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn ticker_delivers_ticks_until_stopped() {
        let mut ticker = CountdownTicker::new(Duration::from_millis(10));
        let (tx, mut rx) = mpsc::unbounded_channel();
        ticker.start(move || tx.send(()).is_ok()).expect("first start");
        assert!(ticker.is_active());

        for _ in 0..3 {
            tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("tick in time")
                .expect("ticker alive");
        }

        assert!(ticker.stop());
        assert!(!ticker.is_active());
        assert!(!ticker.stop());
    }

    #[tokio::test]
    async fn second_start_is_refused_while_running() {
        let mut ticker = CountdownTicker::new(Duration::from_secs(60));
        ticker.start(|| true).expect("first start");
        assert_eq!(
            ticker.start(|| true),
            Err(VerificationError::AlreadyActive)
        );
        ticker.stop();
        ticker.start(|| true).expect("restart after stop");
    }

    #[tokio::test]
    async fn returning_false_ends_the_task() {
        let mut ticker = CountdownTicker::new(Duration::from_millis(5));
        let (tx, mut rx) = mpsc::unbounded_channel();
        ticker
            .start(move || {
                let _ = tx.send(());
                false
            })
            .expect("start");

        rx.recv().await.expect("one tick");
        assert!(rx.recv().await.is_none());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!ticker.is_active());
    }
}
