use crate::cli::ServeArgs;
use crate::infra::{
    default_screening_config, AppState, InMemoryApplicationRepository,
    InMemoryCompetitionDirectory,
};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cfo_screening::config::AppConfig;
use cfo_screening::error::AppError;
use cfo_screening::screening::ScreeningService;
use cfo_screening::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let competitions = Arc::new(InMemoryCompetitionDirectory::with_default_competition());
    let screening_service = Arc::new(ScreeningService::new(
        repository,
        competitions,
        default_screening_config(config.ranking),
    ));

    let ranking = *screening_service.ranking_config();
    let app = with_application_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        qualified_cutoff = ranking.qualified_cutoff,
        reserve_cutoff = ranking.reserve_cutoff,
        tie_break = ranking.tie_break,
        "cfo screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
