use anyhow::Context;
use gui::App;
use iced::{Application, Settings};
use moodscope_core::{AppConfig, Dashboard};
use scrape_client::ScrapeClient;
use scrape_runner::{RuntimeHandle, ScrapeRuntime};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Moodscope - Reddit Sentiment Dashboard");
    tracing::debug!("Scrape backend: {}", config.backend_url);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("moodscope-runtime")
        .build()
        .context("Failed to start async runtime")?;

    let client = ScrapeClient::new(&config)?;
    let (scrape_runtime, handle) = ScrapeRuntime::new(Dashboard::default(), client);
    let task = runtime.spawn(scrape_runtime.run());

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1200.0, 800.0),
            min_size: Some(iced::Size::new(800.0, 600.0)),
            ..Default::default()
        },
        ..Settings::with_flags(handle.clone())
    };

    let result = MoodscopeApp::run(settings);

    if let Err(e) = handle.shutdown() {
        tracing::warn!("Runtime already stopped: {}", e);
    }
    runtime
        .block_on(task)
        .context("Scrape runtime panicked")??;

    result.map_err(|e| {
        tracing::error!("Application error: {}", e);
        anyhow::anyhow!("GUI error: {e}")
    })
}

struct MoodscopeApp {
    app: App,
}

impl Application for MoodscopeApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = RuntimeHandle;

    fn new(handle: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        (Self { app: App::new(handle) }, iced::Command::none())
    }

    fn title(&self) -> String {
        "Moodscope - Reddit Sentiment Dashboard".to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        if let Err(e) = self.app.update(message) {
            tracing::error!("Update error: {}", e);
        }
        iced::Command::none()
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }

    fn subscription(&self) -> iced::Subscription<Self::Message> {
        self.app.subscription()
    }
}
