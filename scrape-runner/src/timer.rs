use moodscope_core::RunId;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Repeating task that reports `run`'s progress ticks through a channel.
///
/// The task lives exactly as long as this handle: [`ProgressTimer::cancel`]
/// or dropping the handle aborts it.
#[derive(Debug)]
pub struct ProgressTimer {
    run: RunId,
    task: JoinHandle<()>,
}

impl ProgressTimer {
    /// Starts ticking after one full `period`; `tick` maps the run id to the
    /// message that is sent.
    pub fn start<E, F>(run: RunId, period: Duration, events: UnboundedSender<E>, tick: F) -> Self
    where
        E: Send + 'static,
        F: Fn(RunId) -> E + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(tick(run)).is_err() {
                    debug!("Progress timer for {} lost its receiver", run);
                    break;
                }
            }
        });
        debug!("Progress timer started for {} every {:?}", run, period);
        Self { run, task }
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(self) {
        debug!("Progress timer cancelled for {}", self.run);
        // Drop aborts the task.
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodscope_core::{Dashboard, Effect, UserAction};
    use tokio::sync::mpsc;

    fn some_run() -> RunId {
        let mut dashboard = Dashboard::default();
        dashboard.apply(UserAction::SubredditsInput("a".to_string()));
        dashboard.apply(UserAction::PostsInput("1".to_string()));
        match dashboard.apply(UserAction::Run).first() {
            Some(Effect::StartProgressTimer { run, .. }) => *run,
            other => panic!("expected timer start, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let run = some_run();
        let timer = ProgressTimer::start(run, Duration::from_millis(500), tx, |run| run);

        tokio::time::sleep(Duration::from_millis(1_250)).await;
        assert_eq!(rx.try_recv().ok(), Some(run));
        assert_eq!(rx.try_recv().ok(), Some(run));
        assert!(rx.try_recv().is_err());
        assert_eq!(timer.run(), run);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ProgressTimer::start(some_run(), Duration::from_millis(500), tx, |run| run);

        tokio::time::sleep(Duration::from_millis(600)).await;
        timer.cancel();
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = ProgressTimer::start(some_run(), Duration::from_millis(500), tx, |run| run);
        drop(rx);

        tokio::time::sleep(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(timer.is_finished());
    }
}
