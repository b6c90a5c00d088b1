use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredLeadStore};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scar_leads::config::AppConfig;
use scar_leads::error::AppError;
use scar_leads::leads::{LeadIntakeService, LeadNotifier, ResendTransport};
use scar_leads::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let client = reqwest::Client::builder().build()?;
    let store = Arc::new(ConfiguredLeadStore::from_config(
        client.clone(),
        config.storage.as_ref(),
    ));
    if config.storage.is_none() {
        warn!("SUPABASE_URL not configured, leads are kept in memory only");
    }

    let notification = config.email.notification.clone();
    if notification.api_key.is_none() || notification.recipient.is_none() {
        warn!(?notification, "lead notifications will be skipped");
    }
    let transport = ResendTransport::new(client, &config.email.api_url);
    let service = Arc::new(LeadIntakeService::new(
        store.clone(),
        LeadNotifier::new(notification, transport),
    ));

    let app = with_lead_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, store = store.label(), "lead capture service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
