use dotenvy::dotenv;
use pickup::middleware::rate_limit::spawn_limiter_cleanup;
use pickup::router::init_router;
use pickup::state::init_app_state;
use pickup_config::ServerConfig;
use pickup_observability::{init_tracing, shutdown_tracer};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    #[cfg(feature = "observability")]
    if let Some(handle) = pickup_observability::init_metrics() {
        let metrics_addr = server_config.metrics_addr();
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(&metrics_addr).await {
                Ok(listener) => {
                    info!("📈 Metrics available at http://{metrics_addr}/metrics");
                    if let Err(e) =
                        axum::serve(listener, pickup_observability::metrics_app(handle)).await
                    {
                        warn!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => warn!(error = %e, addr = %metrics_addr, "Metrics listener not started"),
            }
        });
    }

    let state = init_app_state();
    let portal = state.portal.clone();
    let limiter_cleanup = spawn_limiter_cleanup(state.clone());
    let app = init_router(state);

    let addr = server_config.api_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    println!("🚀 Server running on http://{addr}");
    println!("📚 Swagger UI available at http://{addr}/swagger-ui");
    println!("📖 Scalar UI available at http://{addr}/scalar");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .unwrap();

    limiter_cleanup.abort();
    let _ = limiter_cleanup.await;

    match Arc::try_unwrap(portal) {
        Ok(portal) => {
            portal.into_inner().dismissal.close();
        }
        Err(portal) => {
            let stats = portal.lock().await.dismissal.stats();
            info!(
                completed = stats.completed_pickups,
                still_waiting = stats.active_pickups,
                "Server stopped"
            );
        }
    }

    shutdown_tracer().await;
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
