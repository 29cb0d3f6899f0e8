use std::process;
use std::sync::Arc;

use carta::{
    application::{
        dishes::DishService, error::AppError, menus::MenuService, report::ReportService,
        submenus::SubMenuService,
    },
    cache::{CacheBackend, CacheGateway, CacheInvalidator, MemoryCache},
    config,
    infra::{
        db::PostgresCatalog,
        error::InfraError,
        export::FileExportQueue,
        http::{self, HttpState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (_cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let pool = PostgresCatalog::connect(&settings.database.url, settings.database.max_connections)
        .await
        .map_err(|err| InfraError::database(format!("connect: {err}")))?;
    PostgresCatalog::run_migrations(&pool)
        .await
        .map_err(|err| InfraError::database(format!("migrations: {err}")))?;
    let catalog = Arc::new(PostgresCatalog::new(pool));

    let backend: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new());
    let gateway = CacheGateway::new(backend, settings.cache.clone());
    let invalidator = CacheInvalidator::new(gateway.clone());

    let menus = MenuService::new(catalog.clone(), gateway.clone(), invalidator.clone());
    let submenus = SubMenuService::new(catalog.clone(), gateway.clone(), invalidator.clone());
    let dishes = DishService::new(catalog.clone(), gateway, invalidator);
    let export_queue = Arc::new(FileExportQueue::new(settings.export.dir.clone()));
    let report = ReportService::new(catalog.clone(), export_queue);

    let state = HttpState {
        menus,
        submenus,
        dishes,
        report,
    };
    let router = http::router(state);

    let addr = settings
        .server
        .socket_addr()
        .map_err(|err| AppError::unexpected(err.to_string()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(InfraError::from)?;
    info!(%addr, "carta listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InfraError::from)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
