use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocrgate::api::{create_router, AppState};
use ocrgate::config::Config;
use ocrgate::ocr::OcrProvider;
use ocrgate::source::RemoteFetcher;

#[derive(Parser)]
#[command(name = "ocrgate")]
#[command(about = "OCR over HTTP: images by path, URL, base64 or upload")]
struct Args {
    /// Bind host, overrides OCR_HOST
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides OCR_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocrgate=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Initializing OCR engine: language={}...", config.ocr.language);
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - recognition requests will fail with 500");
    }

    let fetcher = RemoteFetcher::new(config.server.max_body_bytes)?;
    let state = AppState::new(config.clone(), ocr, fetcher);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("ocrgate starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/ocr/health", addr);
    tracing::info!("  API docs:     http://{}/ocr/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/ocr/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
