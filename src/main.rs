use recycle_scan_core::core::config::{AnalysisProviderKind, Config, StoreBackend};
use recycle_scan_core::core::database;
use recycle_scan_core::core::router::{build_router, AppServices};
use recycle_scan_core::features::analysis::{
    AnalysisProvider, AnalysisService, MockAnalysisProvider, RemoteAnalysisProvider,
};
use recycle_scan_core::features::images::{
    ImageMetadataStore, ImageUploadService, InMemoryImageMetadataStore, PgImageMetadataStore,
};
use recycle_scan_core::features::scan_results::{
    InMemoryScanResultStore, PgScanResultStore, ScanResultService, ScanResultStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

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

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Select persistence backend
    let (image_store, scan_result_store): (Arc<dyn ImageMetadataStore>, Arc<dyn ScanResultStore>) =
        match config.database.backend {
            StoreBackend::Postgres => {
                let url = config
                    .database
                    .url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
                let pool = database::create_pool(&config.database, url).await?;
                tracing::info!("Database connection pool created");

                tracing::info!("Running database migrations...");
                database::run_migrations(&pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
                tracing::info!("Database migrations completed successfully");

                (
                    Arc::new(PgImageMetadataStore::new(pool.clone())),
                    Arc::new(PgScanResultStore::new(pool)),
                )
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory stores; records are lost on restart");
                (
                    Arc::new(InMemoryImageMetadataStore::new()),
                    Arc::new(InMemoryScanResultStore::new()),
                )
            }
        };

    // Upload receiver; the directory must already exist
    let image_upload_service = Arc::new(ImageUploadService::new(
        config.upload.clone(),
        image_store,
    ));
    image_upload_service
        .check_upload_dir()
        .await
        .map_err(|e| anyhow::anyhow!("Upload directory unusable: {}", e))?;
    tracing::info!(
        "Image upload service initialized (dir: {})",
        config.upload.upload_dir.display()
    );

    let scan_result_service = Arc::new(ScanResultService::new(scan_result_store));
    tracing::info!("Scan result service initialized");

    let provider: Arc<dyn AnalysisProvider> = match config.analysis.provider {
        AnalysisProviderKind::Mock => {
            Arc::new(MockAnalysisProvider::new(config.analysis.mock_delay))
        }
        AnalysisProviderKind::Remote => {
            let url = config
                .analysis
                .remote_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("ANALYSIS_REMOTE_URL is not set"))?;
            Arc::new(RemoteAnalysisProvider::new(url))
        }
    };
    tracing::info!("Analysis service initialized (provider: {})", provider.name());
    let analysis_service = Arc::new(AnalysisService::new(
        provider,
        config.upload.max_file_size,
    ));

    let app = build_router(
        AppServices {
            images: image_upload_service,
            scan_results: scan_result_service,
            analysis: analysis_service,
        },
        &config.app,
        &config.swagger,
    );

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
    socket.set_nodelay(true)?;

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
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
