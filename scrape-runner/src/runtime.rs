use crate::timer::ProgressTimer;
use moodscope_core::{
    render, CoreError, Dashboard, DashboardView, Effect, ErrorReporter, RunId, UserAction,
};
use scrape_client::ScrapeBackend;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum RuntimeEvent {
    User(UserAction),
    Tick(RunId),
    Settled {
        run: RunId,
        outcome: Result<(), CoreError>,
    },
    HideProgress(RunId),
    Shutdown,
}

/// Cloneable front door to a running [`ScrapeRuntime`].
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    events: UnboundedSender<RuntimeEvent>,
    views: watch::Receiver<DashboardView>,
}

impl RuntimeHandle {
    pub fn send(&self, action: UserAction) -> Result<(), CoreError> {
        self.events
            .send(RuntimeEvent::User(action))
            .map_err(|_| CoreError::ChannelClosed {
                channel: "dashboard events".to_string(),
            })
    }

    /// Latest published view.
    pub fn view(&self) -> DashboardView {
        self.views.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.views.clone()
    }

    pub fn shutdown(&self) -> Result<(), CoreError> {
        self.events
            .send(RuntimeEvent::Shutdown)
            .map_err(|_| CoreError::ChannelClosed {
                channel: "dashboard events".to_string(),
            })
    }
}

/// Owns the dashboard and performs the effects its updates ask for.
///
/// All state changes happen inside [`ScrapeRuntime::run`]; timer, request and
/// delayed-hide tasks only send events back into it.
pub struct ScrapeRuntime<B: ScrapeBackend> {
    dashboard: Dashboard,
    backend: Arc<B>,
    timer: Option<ProgressTimer>,
    events_tx: UnboundedSender<RuntimeEvent>,
    events_rx: UnboundedReceiver<RuntimeEvent>,
    views: watch::Sender<DashboardView>,
    reporter: ErrorReporter,
}

impl<B: ScrapeBackend> ScrapeRuntime<B> {
    pub fn new(dashboard: Dashboard, backend: B) -> (Self, RuntimeHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (views, views_rx) = watch::channel(render(&dashboard));

        let handle = RuntimeHandle {
            events: events_tx.clone(),
            views: views_rx,
        };
        let runtime = Self {
            dashboard,
            backend: Arc::new(backend),
            timer: None,
            events_tx,
            events_rx,
            views,
            reporter: ErrorReporter::new(),
        };
        (runtime, handle)
    }

    pub fn spawn(self) -> JoinHandle<Result<(), CoreError>> {
        tokio::spawn(self.run())
    }

    /// Processes events until shutdown or until every handle is gone.
    pub async fn run(mut self) -> Result<(), CoreError> {
        info!("Scrape runtime started");
        loop {
            let event = tokio::select! {
                event = self.events_rx.recv() => event,
                _ = self.views.closed() => None,
            };
            match event {
                None | Some(RuntimeEvent::Shutdown) => break,
                Some(event) => {
                    self.handle(event);
                    self.publish();
                }
            }
        }

        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        info!("Scrape runtime stopped");
        Ok(())
    }

    fn handle(&mut self, event: RuntimeEvent) {
        let effects = match event {
            RuntimeEvent::User(action) => {
                debug!("User action: {:?}", action);
                self.dashboard.apply(action)
            }
            RuntimeEvent::Tick(run) => {
                self.dashboard.tick(run);
                Vec::new()
            }
            RuntimeEvent::Settled { run, outcome } => {
                if let Err(error) = &outcome {
                    self.reporter.report_error(error);
                }
                self.dashboard.settle(run, outcome)
            }
            RuntimeEvent::HideProgress(run) => {
                self.dashboard.hide_progress(run);
                Vec::new()
            }
            RuntimeEvent::Shutdown => Vec::new(),
        };

        for effect in effects {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::StartProgressTimer { run, period } => {
                let timer =
                    ProgressTimer::start(run, period, self.events_tx.clone(), RuntimeEvent::Tick);
                if let Some(previous) = self.timer.replace(timer) {
                    warn!("Replacing live progress timer of {}", previous.run());
                    previous.cancel();
                }
            }
            Effect::CancelProgressTimer => {
                if let Some(timer) = self.timer.take() {
                    timer.cancel();
                }
            }
            Effect::SubmitScrape { run, request } => {
                let backend = Arc::clone(&self.backend);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let outcome = backend.submit(request).await;
                    if events.send(RuntimeEvent::Settled { run, outcome }).is_err() {
                        debug!("Runtime gone before {} settled", run);
                    }
                });
            }
            Effect::HideProgressAfter { run, delay } => {
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(RuntimeEvent::HideProgress(run));
                });
            }
        }
    }

    fn publish(&self) {
        self.views.send_replace(render(&self.dashboard));
    }
}
