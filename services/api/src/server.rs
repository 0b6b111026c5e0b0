use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryIdeaStore, InMemoryTemplateStore, InMemoryUserStore};
use crate::routes::with_platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use ideahub::config::AppConfig;
use ideahub::error::AppError;
use ideahub::telemetry;
use ideahub::workflows::ideas::{IdeaReviewService, UserDirectory};

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

    let ideas = Arc::new(InMemoryIdeaStore::default());
    let templates = Arc::new(InMemoryTemplateStore::seeded());
    let users = Arc::new(InMemoryUserStore::default());

    let service = Arc::new(IdeaReviewService::new(ideas, templates));
    let directory = Arc::new(UserDirectory::new(users));

    let app = with_platform_routes(service, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "idea review platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
