//! # streetlightd — streetlight controller daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the hardware adapter, the light store and the application services
//! - Spawn the sensor sampler
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT): stop sampling, then switch
//!   every light off
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use streetlight_adapter_http_axum::state::AppState;
use streetlight_adapter_virtual::VirtualHardware;
use streetlight_app::event_bus::InProcessEventBus;
use streetlight_app::ports::MonotonicClock;
use streetlight_app::sampler::SensorSampler;
use streetlight_app::services::control_service::ControlService;
use streetlight_app::store::LightStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Hardware & state
    let faulted = config.faulted_lights();
    let hardware = Arc::new(VirtualHardware::new(config.initial_level(), &faulted));
    let store = Arc::new(LightStore::new(&faulted));
    let clock = Arc::new(MonotonicClock::new());

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::default());

    // Services
    let control = Arc::new(ControlService::new(
        Arc::clone(&store),
        Arc::clone(&hardware),
        Arc::clone(&clock),
        Arc::clone(&event_bus),
        config.override_duration(),
    ));
    let sampler = SensorSampler::new(
        store,
        hardware,
        clock,
        Arc::clone(&event_bus),
        config.sample_interval(),
    )
    .with_auto_mode(config.control.auto_mode)
    .spawn();

    // HTTP
    let state = AppState::new(Arc::clone(&control), event_bus);
    let app = streetlight_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        faulted = ?faulted,
        override_secs = config.override_duration().as_secs(),
        auto_mode = config.control.auto_mode,
        "streetlightd listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing::warn!("shutting down, switching every light off");
    sampler.stop().await;
    control.switch_all_off().await;

    served?;
    Ok(())
}

/// Resolve on SIGINT (Ctrl-C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!(signal = "SIGINT", "shutdown requested"),
        () = terminate => tracing::info!(signal = "SIGTERM", "shutdown requested"),
    }
}
