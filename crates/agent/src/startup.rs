use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use adapters::auth::api_key_provider::ApiKeyAuthProvider;
use adapters::http::server::run_http_server;
use adapters::http::state::AppState;
use adapters::sms::http_transport::HttpSmsTransport;
use adapters::sms::log_transport::LogSmsTransport;
use adapters::storage::redb_alert_store::RedbAlertStore;
use application::alert_dispatcher::AlertDispatcher;
use application::alert_intake_service::AlertIntakeService;
use application::sms_send_service::SmsSendService;
use infrastructure::config::{ServiceConfig, SmsProvider};
use infrastructure::constants::{ALERT_CHANNEL_CAPACITY, GRACEFUL_SHUTDOWN_TIMEOUT};
use infrastructure::logging::init_logging;
use infrastructure::metrics::ServiceMetrics;
use ports::secondary::alert_store::AlertStore;
use ports::secondary::auth_provider::AuthProvider;
use ports::secondary::metrics_port::MetricsPort;
use ports::secondary::sms_transport::SmsTransport;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::shutdown::create_shutdown_token;

/// Run the service startup sequence and block until shutdown.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    // ── 1. Load config ──────────────────────────────────────────────
    let config = ServiceConfig::load(Path::new(&cli.config))?;

    // ── 2. Initialize logging ───────────────────────────────────────
    // CLI flags take precedence over config file
    let log_level = cli.log_level.unwrap_or(config.service.log_level);
    let log_format = cli.log_format.unwrap_or(config.service.log_format);
    init_logging(log_level, log_format)?;

    // Service root span — fields appear in every subsequent log entry
    let _root_span = tracing::span!(
        tracing::Level::INFO,
        "service",
        service.name = %config.service.name,
        service.version = env!("CARGO_PKG_VERSION"),
    )
    .entered();

    info!(
        config_path = %cli.config,
        log_level = log_level.as_str(),
        log_format = ?log_format,
        "alert dispatch service starting"
    );

    // ── 3. Initialize metrics ───────────────────────────────────────
    let metrics = Arc::new(ServiceMetrics::new());

    // ── 4. Open the alert store ─────────────────────────────────────
    let store =
        Arc::new(RedbAlertStore::open(Path::new(&config.store.path))?) as Arc<dyn AlertStore>;
    info!(
        path = %config.store.path,
        alerts = store.alert_count()?,
        "alert store opened"
    );

    // ── 5. Build the SMS transport ──────────────────────────────────
    let transport: Arc<dyn SmsTransport> = match config.sms.provider {
        SmsProvider::Http => {
            // validated at load time: http provider always has credentials
            let account_sid = config.sms.account_sid.clone().unwrap_or_default();
            let auth_token = config.sms.auth_token.clone().unwrap_or_default();
            info!(api_url = %config.sms.api_url, "using http SMS transport");
            Arc::new(HttpSmsTransport::new(
                config.sms.api_url.clone(),
                account_sid,
                auth_token,
                Arc::clone(&metrics) as Arc<dyn MetricsPort>,
            ))
        }
        SmsProvider::Log => {
            warn!("using log SMS transport, no messages will leave the process");
            Arc::new(LogSmsTransport::new())
        }
    };

    // ── 6. Build auth provider ──────────────────────────────────────
    let auth_provider = Arc::new(ApiKeyAuthProvider::new(
        config
            .auth
            .api_keys
            .iter()
            .map(|k| (k.name.clone(), k.key.clone()))
            .collect(),
    )) as Arc<dyn AuthProvider>;
    info!(key_count = config.auth.api_keys.len(), "API auth enabled");

    // ── 7. Start the dispatcher ─────────────────────────────────────
    let (created_tx, created_rx) = mpsc::channel(ALERT_CHANNEL_CAPACITY);
    let dispatcher = Arc::new(AlertDispatcher::new(
        Arc::clone(&store),
        Arc::clone(&transport),
        config.sms.from_number.clone(),
        Arc::clone(&metrics) as Arc<dyn MetricsPort>,
    ));

    let shutdown_token = create_shutdown_token();
    let dispatcher_ready = Arc::new(AtomicBool::new(false));

    let dispatcher_task = tokio::spawn(Arc::clone(&dispatcher).run(
        created_rx,
        shutdown_token.clone(),
    ));
    dispatcher_ready.store(true, Ordering::Relaxed);

    // ── 8. Build shared state and serve ─────────────────────────────
    let send_service = Arc::new(SmsSendService::new(
        Arc::clone(&transport),
        config.sms.from_number.clone(),
    ));
    let intake_service = Arc::new(AlertIntakeService::new(Arc::clone(&store), created_tx));

    let state = Arc::new(AppState::new(
        Arc::clone(&metrics),
        send_service,
        intake_service,
        store,
        auth_provider,
        config.http.metrics_auth_required,
        Arc::clone(&dispatcher_ready),
    ));

    let http_shutdown = shutdown_token.clone();
    run_http_server(
        state,
        &config.http.bind_address,
        config.http.port,
        config.http.openapi,
        async move { http_shutdown.cancelled().await },
    )
    .await?;

    // ── 9. Drain the dispatcher ─────────────────────────────────────
    shutdown_token.cancel();
    dispatcher_ready.store(false, Ordering::Relaxed);
    if tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, dispatcher_task)
        .await
        .is_err()
    {
        warn!("dispatcher did not drain within the shutdown timeout");
    }

    info!("alert dispatch service stopped");
    Ok(())
}
