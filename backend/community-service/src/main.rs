use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use community_service::handlers::configure_routes;
use community_service::services::MemberDirectory;
use community_service::{AppState, Config};
use remote_store::RemoteStoreFactory;
use resilience::ReadinessCoordinator;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Community Service
///
/// Serves the community site's JSON API and HTML fragments. All data lives on the
/// hosted data endpoint; the remote handle is resolved once by the readiness
/// coordinator and shared by every request.
///
/// # Routes
///
/// - `/api/v1/news/*`, `/api/v1/board/*`, `/api/v1/comments/*` - content
/// - `/api/v1/events/{id}/participants` - event attendance
/// - `/api/v1/members`, `/api/v1/activity`, `/api/v1/media/*`
/// - `/fragments/*` - escaped HTML fragments for the static pages
/// - `/api/v1/health/*`, `/metrics`
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Container healthchecks: `community-service healthcheck`
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" || cmd == "healthcheck-http" {
                let port = std::env::var("COMMUNITY_SERVICE_PORT").unwrap_or_else(|_| "8080".into());
                let url = format!("http://127.0.0.1:{}/api/v1/health/live", port);
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"));
                    }
                }
            }
        }
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting community-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let directory = MemberDirectory::load(config.site.member_roster_path.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{:#}", e)))?;
    tracing::info!(members = directory.len(), "Member roster ready");

    tracing::info!(
        platform = ?config.readiness.platform,
        interval_ms = config.readiness.polling.interval.as_millis() as u64,
        max_attempts = config.readiness.polling.max_attempts,
        "Resolving remote data endpoint"
    );
    let coordinator = ReadinessCoordinator::spawn(
        RemoteStoreFactory::new(config.remote.clone()),
        config.readiness.polling.clone(),
    );

    let state = web::Data::new(AppState::new(
        coordinator,
        config.readiness.wait_timeout,
        config.site.clone(),
        directory,
    ));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("HTTP server listening on {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Ok(())) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => {
                    tracing::error!("HTTP server error: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!("HTTP server task join error: {}", e);
                    return Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
                }
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    tracing::info!("community-service shut down");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        }
    }
}
