mod app_state;
mod cli;
mod headless;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use fluidfx_common::FluidFxError;
use fluidfx_config::{FluidFxConfig, ReloadManager};

const DEFAULT_DIRECTIVE: &str = "fluidfx=info";

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_DIRECTIVE.parse::<Directive>())
    {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Loaded before logging so `[logging] level` can pick the filter.
    let loaded = fluidfx_config::load_config(args.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let directive = args
        .log_directive()
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    init_logging(&directive);

    tracing::info!("fluidfx v{} starting...", env!("CARGO_PKG_VERSION"));

    match &loaded {
        Ok(_) => {
            if let Err(e) = fluidfx_config::validation::validate(&config) {
                tracing::warn!("Config validation warning: {e} (values are passed through unchanged)");
            }
        }
        Err(e) => tracing::warn!("Config load failed, using defaults: {e}"),
    }

    if args.print_config {
        println!("{}", fluidfx_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let result = if args.headless {
        let options = headless::HeadlessOptions {
            frames: args.frames,
            size: args.size,
            output: args.output.clone(),
            sweep: args.sweep,
        };
        headless::run(&options, &config).map_err(FluidFxError::from)
    } else {
        let config_path = args
            .config
            .clone()
            .or_else(|| fluidfx_config::toml_loader::default_config_path().ok());
        run_windowed(config, config_path)
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_windowed(config: FluidFxConfig, config_path: Option<PathBuf>) -> fluidfx_common::Result<()> {
    let (config, config_rx, runtime) = start_reload(config, config_path);

    let event_loop = EventLoop::new().map_err(|e| FluidFxError::Window(e.to_string()))?;
    let mut app = app_state::FluidFxApp::new(config, config_rx, runtime);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| FluidFxError::Window(e.to_string()))
}

/// Start live config reloading on a background tokio runtime.
///
/// Falls back to the already loaded config without reloading when the
/// runtime cannot be built or there is no config path.
fn start_reload(
    config: FluidFxConfig,
    path: Option<PathBuf>,
) -> (
    FluidFxConfig,
    Option<tokio::sync::watch::Receiver<FluidFxConfig>>,
    Option<tokio::runtime::Runtime>,
) {
    let Some(path) = path else {
        return (config, None, None);
    };
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("fluidfx-reload")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::warn!("Live config reload disabled: {e}");
            return (config, None, None);
        }
    };
    tracing::info!("Watching {} for changes", path.display());
    let (initial, rx) = runtime.block_on(ReloadManager::start(path));
    (initial, Some(rx), Some(runtime))
}
