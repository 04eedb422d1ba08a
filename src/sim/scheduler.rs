//! Cancellable interval tickers, one per update source.
//!
//! The scheduler never touches simulation state. Each ticker only posts a
//! message into the owner's event channel; the owner applies the tick on
//! its own loop, so ticks are handled one at a time and never overlap.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::sim::error::SimError;

/// Something that wants to be updated periodically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSource {
    /// Asset metrics random walk
    Fleet,
    /// Analytics chart window
    History,
}

impl TickSource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fleet => "fleet",
            Self::History => "history",
        }
    }
}

struct Ticker {
    cancel_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

pub struct Scheduler<E> {
    event_tx: mpsc::UnboundedSender<E>,
    tickers: HashMap<TickSource, Ticker>,
}

impl<E> Scheduler<E>
where
    E: From<TickSource> + Send + 'static,
{
    pub fn new(event_tx: mpsc::UnboundedSender<E>) -> Self {
        Self {
            event_tx,
            tickers: HashMap::new(),
        }
    }

    /// Start posting `source` every `period`. The first tick fires one
    /// full period after the call. Restarts the ticker if already running.
    pub fn start(&mut self, source: TickSource, period: Duration) -> Result<(), SimError> {
        if period.is_zero() {
            return Err(SimError::InvalidInterval {
                source_name: source.name().to_string(),
            });
        }
        self.cancel(source);

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let tx = self.event_tx.clone();
        let handle = tokio::spawn(Self::run(tx, source, period, cancel_rx));
        self.tickers.insert(source, Ticker { cancel_tx, handle });
        tracing::debug!(source = source.name(), ?period, "ticker started");
        Ok(())
    }

    async fn run(
        tx: mpsc::UnboundedSender<E>,
        source: TickSource,
        period: Duration,
        mut cancel_rx: oneshot::Receiver<()>,
    ) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = &mut cancel_rx => break,
                _ = ticker.tick() => {
                    if tx.send(E::from(source)).is_err() {
                        break;
                    }
                }
            }
        }
    }

    /// Stop a ticker. Ticks already posted stay in the channel; no further
    /// ones are produced. Returns whether a ticker was running.
    pub fn cancel(&mut self, source: TickSource) -> bool {
        match self.tickers.remove(&source) {
            Some(ticker) => {
                let _ = ticker.cancel_tx.send(());
                tracing::debug!(source = source.name(), "ticker cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        let sources: Vec<TickSource> = self.tickers.keys().copied().collect();
        for source in sources {
            self.cancel(source);
        }
    }

    #[cfg(test)]
    pub fn is_running(&self, source: TickSource) -> bool {
        self.tickers
            .get(&source)
            .map(|t| !t.handle.is_finished())
            .unwrap_or(false)
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        // The owner is gone, so nothing may be posted after this point
        for (_, ticker) in self.tickers.drain() {
            let _ = ticker.cancel_tx.send(());
            ticker.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn posts_after_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel::<TickSource>();
        let mut scheduler = Scheduler::new(tx);
        scheduler
            .start(TickSource::Fleet, Duration::from_millis(3000))
            .unwrap();

        let start = Instant::now();
        assert_eq!(rx.recv().await, Some(TickSource::Fleet));
        assert!(start.elapsed() >= Duration::from_millis(3000));
        assert_eq!(rx.recv().await, Some(TickSource::Fleet));
        assert!(start.elapsed() >= Duration::from_millis(6000));
        assert!(scheduler.is_running(TickSource::Fleet));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_future_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel::<TickSource>();
        let mut scheduler = Scheduler::new(tx);
        scheduler
            .start(TickSource::History, Duration::from_millis(5000))
            .unwrap();
        assert_eq!(rx.recv().await, Some(TickSource::History));

        assert!(scheduler.cancel(TickSource::History));
        assert!(!scheduler.cancel(TickSource::History));
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert!(rx.try_recv().is_err());
        assert!(!scheduler.is_running(TickSource::History));
    }

    #[tokio::test(start_paused = true)]
    async fn sources_are_independent() {
        let (tx, mut rx) = mpsc::unbounded_channel::<TickSource>();
        let mut scheduler = Scheduler::new(tx);
        scheduler
            .start(TickSource::Fleet, Duration::from_millis(3000))
            .unwrap();
        scheduler
            .start(TickSource::History, Duration::from_millis(5000))
            .unwrap();
        scheduler.cancel(TickSource::Fleet);

        assert_eq!(rx.recv().await, Some(TickSource::History));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn zero_period_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel::<TickSource>();
        let mut scheduler = Scheduler::new(tx);
        let err = scheduler.start(TickSource::Fleet, Duration::ZERO).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidInterval {
                source_name: "fleet".to_string()
            }
        );
        assert!(!scheduler.is_running(TickSource::Fleet));
    }
}
