use api::ingest::{run_sampler_loop, run_subscriber};
use api::routes::routes;
use api::state::AppState;
use common::config;
use db::repositories::MongoMeasurementRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let _log_guard = init_logging(&config::log_file());

    // Set up the shared store gateway once; handlers and loops all reuse it
    let database = db::connect()
        .await
        .expect("Failed to connect to the measurement store");
    let app_state = AppState::new(Arc::new(MongoMeasurementRepository::new(&database)));

    // One token supervises all three concurrent activities
    let shutdown = CancellationToken::new();

    let sampler = tokio::spawn(run_sampler_loop(app_state.clone(), shutdown.clone()));

    // Subscription setup failure is fatal: cancel everything and exit non-zero
    let subscriber = {
        let state = app_state.clone();
        let token = shutdown.clone();
        tokio::spawn(async move {
            let result = run_subscriber(state, token.clone()).await;
            if let Err(e) = &result {
                tracing::error!("message bus subscriber failed: {e}");
                token.cancel();
            }
            result
        })
    };

    // Configure middleware
    let cors = CorsLayer::very_permissive();

    // Build app router
    let app = routes(app_state).layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}",
        config::project_name(),
        addr
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .with_graceful_shutdown(wait_for_shutdown(shutdown.clone()))
    .await
    .expect("Server crashed");

    // Drain: stop the timer and close the subscription before exit
    shutdown.cancel();
    let _ = sampler.await;
    if let Ok(Err(_)) = subscriber.await {
        std::process::exit(1);
    }
}

/// Resolves when either an OS shutdown signal arrives or a background task
/// cancels the supervisor token.
async fn wait_for_shutdown(token: CancellationToken) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("shutdown signal received"),
        _ = token.cancelled() => tracing::info!("background task requested shutdown"),
    }
}

fn init_logging(log_file: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let log_to_stdout = config::log_to_stdout();

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
