#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moonlight_launcher::app::LauncherApp;
use moonlight_launcher::backend::{DisplayBackend, platform_backend};
use moonlight_launcher::config;
use moonlight_launcher::gamepad::GamepadInput;
use moonlight_launcher::launcher::ShellLauncher;
use moonlight_launcher::logs::{DEFAULT_CAPACITY, LogBuffer};
use moonlight_launcher::models::LauncherConfig;
use moonlight_launcher::session::Session;
use moonlight_launcher::ui::WINDOW_TITLE;

fn main() -> anyhow::Result<()> {
    let logs = LogBuffer::new(DEFAULT_CAPACITY);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(logs.layer())
        .init();

    let config_dir = match config::get_config_directory() {
        Ok(dir) => Some(dir),
        Err(err) => {
            tracing::error!("{err}");
            None
        }
    };
    let launcher_config = match config_dir.as_deref() {
        Some(dir) => config::load_or_create(dir).unwrap_or_else(|err| {
            tracing::error!("Failed to load configuration: {err}");
            LauncherConfig::default()
        }),
        None => LauncherConfig::default(),
    };

    let backend = platform_backend();
    let (mut width, mut height) = match backend.current_mode() {
        Ok(mode) => {
            tracing::info!("Current resolution: {}x{}", mode.width, mode.height);
            tracing::info!("Refresh rate: {} Hz", mode.frequency);
            (mode.width, mode.height)
        }
        Err(err) => {
            tracing::error!("{err}");
            (1280, 720)
        }
    };
    if let Some((client_width, client_height)) = config::requested_client_extent() {
        tracing::info!("Client requested {client_width}x{client_height}");
        width = client_width;
        height = client_height;
    }

    let session = Session::new(backend, launcher_config);
    let mut app = LauncherApp::new(session, logs, config_dir, Box::new(ShellLauncher))
        .with_gamepad(GamepadInput::new());
    app.fit(width, height);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([width as f32, height as f32])
            .with_decorations(false),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
