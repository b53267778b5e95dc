mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::assistant::clients::OllamaClient;
use crate::features::assistant::handlers::ChatState;
use crate::features::assistant::{routes as assistant_routes, AssistantService};
use crate::features::auth;
use crate::features::backup::{routes as backup_routes, BackupService};
use crate::features::catalog::routes as catalog_routes;
use crate::features::incidents::{routes as incidents_routes, IncidentService};
use crate::features::media::{routes as media_routes, MediaService};
use crate::features::payments::{routes as payments_routes, PaymentService};
use crate::features::profiles::{routes as profiles_routes, ProfileService};
use crate::features::statistics::services::SnapshotCache;
use crate::features::statistics::sync::{self, RefreshWorker};
use crate::features::statistics::{routes as statistics_routes, StatisticsService};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize auth
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.issuer,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
    ));
    tracing::info!("Auth configuration initialized");

    // Initialize object store for media uploads
    let object_store = Arc::new(
        modules::storage::ObjectStore::new(config.storage.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize object store: {}", e))?,
    );
    tracing::info!(
        "Object store initialized for bucket: {}",
        object_store.bucket_name()
    );

    // Change feed: write paths publish, one worker consumes
    let (change_feed, change_rx) = sync::channel();

    // Initialize services
    let incident_service = Arc::new(IncidentService::new(pool.clone(), change_feed.clone()));
    tracing::info!("Incident service initialized");

    let payment_service = Arc::new(PaymentService::new(pool.clone(), change_feed.clone()));
    tracing::info!("Payment service initialized");

    let media_service = Arc::new(MediaService::new(pool.clone(), Arc::clone(&object_store)));
    tracing::info!("Media service initialized");

    let profile_service = Arc::new(ProfileService::new(pool.clone()));
    tracing::info!("Profile service initialized");

    let statistics_service = Arc::new(StatisticsService::new(pool.clone()));
    let snapshot_cache = Arc::new(SnapshotCache::new());
    tracing::info!("Statistics service initialized");

    let backup_service = Arc::new(BackupService::new(pool.clone()));
    tracing::info!("Backup service initialized");

    // Initialize assistant proxy to the local inference server
    let inference_client = Arc::new(
        OllamaClient::new(&config.assistant)
            .map_err(|e| anyhow::anyhow!("Failed to create inference client: {}", e))?,
    );
    let assistant_service = Arc::new(AssistantService::new(
        pool.clone(),
        inference_client,
        config.assistant.default_model.clone(),
    ));
    tracing::info!(
        "Assistant service initialized (inference: {})",
        config.assistant.base_url
    );

    // Drop the original sender so the worker exits when the services do
    drop(change_feed);

    // Spawn the statistics refresh worker
    let refresh_worker = RefreshWorker::new(
        change_rx,
        Arc::clone(&statistics_service) as Arc<dyn features::statistics::services::SnapshotRefresher>,
        Arc::clone(&snapshot_cache),
    );
    tokio::spawn(async move {
        refresh_worker.run().await;
    });
    tracing::info!("Statistics refresh worker spawned");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(incidents_routes::routes(Arc::clone(&incident_service)))
        .merge(payments_routes::routes(Arc::clone(&payment_service)))
        .merge(media_routes::routes(Arc::clone(&media_service)))
        .merge(profiles_routes::routes(Arc::clone(&profile_service)))
        .merge(statistics_routes::routes(
            Arc::clone(&statistics_service),
            Arc::clone(&snapshot_cache),
        ))
        .merge(backup_routes::routes(Arc::clone(&backup_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required; the chat endpoint resolves an
    // optional session itself)
    let public_routes = Router::new()
        .merge(catalog_routes::routes())
        .merge(assistant_routes::routes(ChatState {
            assistant: Arc::clone(&assistant_service),
            validator: jwt_validator.clone(),
        }));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
